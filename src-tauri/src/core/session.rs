//! Session state
//! Holds the device and characteristic negotiated by the last successful
//! connect, for the disconnect and LED handlers to reuse.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;

use crate::core::bluetooth::{GattCharacteristic, GattDevice, Link};

#[derive(Clone, Default)]
pub struct Session {
    pub device: Option<Arc<dyn GattDevice>>,
    pub characteristic: Option<Arc<dyn GattCharacteristic>>,
}

/// Shared handle to the session. The lock is never held across an await.
#[derive(Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces whatever was held with `link`.
    pub fn store(&self, link: Link) {
        info!("Session now holds device {}", link.device.id());
        let mut session = self.lock();
        session.device = Some(link.device);
        session.characteristic = Some(link.characteristic);
    }

    pub fn device(&self) -> Option<Arc<dyn GattDevice>> {
        self.lock().device.clone()
    }

    pub fn characteristic(&self) -> Option<Arc<dyn GattCharacteristic>> {
        self.lock().characteristic.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    /// Drops the held references if they still belong to `device_id`.
    /// A newer connection to another device is left alone.
    pub fn clear_if_device(&self, device_id: &str) -> bool {
        let mut session = self.lock();
        let held = session
            .device
            .as_ref()
            .is_some_and(|device| device.id() == device_id);
        if held {
            *session = Session::default();
            info!("Connected state cleared for device {}", device_id);
        }
        held
    }
}
