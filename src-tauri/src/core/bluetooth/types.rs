//! Defines shared data structures for the Bluetooth module.
//!
//! The traits here are the seam between the LED logic and the host
//! Bluetooth stack. `platform::BluestApi` implements them with `bluest`;
//! tests implement them with in-memory fakes.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Callback run every time a device reports that its link went down.
pub type DisconnectObserver = Arc<dyn Fn() + Send + Sync>;

/// What a device request looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Exact advertised name of the wanted device
    pub name: String,
    /// Services the caller intends to use once connected
    pub optional_services: Vec<Uuid>,
    /// Give up looking after this many seconds
    pub scan_timeout_secs: u64,
}

/// Entry point into the host Bluetooth stack.
#[async_trait]
pub trait BluetoothApi: Send + Sync {
    /// Finds one device matching `options`.
    async fn request_device(&self, options: &RequestOptions) -> Result<Arc<dyn GattDevice>>;
}

/// A peripheral handed out by [`BluetoothApi::request_device`].
#[async_trait]
pub trait GattDevice: Send + Sync {
    /// Platform-specific unique identifier
    fn id(&self) -> String;
    /// Advertised name, if known
    fn name(&self) -> Option<String>;
    /// Transport-level connected flag
    async fn is_connected(&self) -> bool;
    /// Opens the GATT connection.
    async fn connect_gatt(&self) -> Result<Arc<dyn GattServer>>;
    /// Closes the GATT connection.
    async fn disconnect(&self) -> Result<()>;
    /// Registers `observer` for every future disconnect of this device,
    /// replacing the observer registered before. The subscription is live
    /// once this returns.
    async fn on_disconnected(&self, observer: DisconnectObserver) -> Result<()>;
    /// Drops the registered observer, if any.
    fn stop_watching(&self);
}

#[async_trait]
pub trait GattServer: Send + Sync {
    async fn primary_service(&self, uuid: Uuid) -> Result<Arc<dyn GattService>>;
}

#[async_trait]
pub trait GattService: Send + Sync {
    async fn characteristic(&self, uuid: Uuid) -> Result<Arc<dyn GattCharacteristic>>;
}

#[async_trait]
pub trait GattCharacteristic: Send + Sync {
    fn uuid(&self) -> Uuid;
    /// Writes `value` and waits for the peripheral's acknowledgement.
    async fn write_value(&self, value: &[u8]) -> Result<()>;
}

/// The device/characteristic pair negotiated by a successful connect.
#[derive(Clone)]
pub struct Link {
    pub device: Arc<dyn GattDevice>,
    pub characteristic: Arc<dyn GattCharacteristic>,
}

impl std::fmt::Debug for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Link")
            .field("device", &self.device.id())
            .field("characteristic", &self.characteristic.uuid())
            .finish()
    }
}
