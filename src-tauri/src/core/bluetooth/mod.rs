//! Bluetooth functionality for LED Link
//! This module handles all bluetooth operations: finding the board,
//! connecting to it and writing the LED characteristic.

mod commands;
mod connection;
mod constants;
mod error;
mod platform;
mod types;

// Re-export types that should be publicly accessible
pub use commands::{LedValue, write_led};
pub use connection::ConnectionManager;
pub use constants::*; // Re-export all constants
pub use error::{ConnectStage, LinkError};
pub use platform::BluestApi;
pub use types::{
    BluetoothApi, DisconnectObserver, GattCharacteristic, GattDevice, GattServer, GattService, Link,
    RequestOptions,
};
