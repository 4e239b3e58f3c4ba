//! Core functionality for LED Link
//! This module contains the Bluetooth link to the LED board and the session
//! that remembers it between clicks.

pub mod bluetooth;
pub mod session;

// Re-export commonly used types
pub use bluetooth::ConnectionManager;
pub use session::{Session, SessionHandle};
