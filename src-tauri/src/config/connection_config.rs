use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::bluetooth::{
    CHARACTERISTIC_ID, DEFAULT_SCAN_TIMEOUT_SECS, DEVICE_NAME, RequestOptions, SERVICE_ID,
    uuid_from_u16,
};

/// Which board to look for and how to reach its LED
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Exact advertised name of the board
    pub device_name: String,
    /// 16-bit id of the LED service
    pub service_id: u16,
    /// 16-bit id of the LED characteristic
    pub characteristic_id: u16,
    /// How long a connect attempt scans before giving up
    pub scan_timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            device_name: DEVICE_NAME.to_string(),
            service_id: SERVICE_ID,
            characteristic_id: CHARACTERISTIC_ID,
            scan_timeout_secs: DEFAULT_SCAN_TIMEOUT_SECS,
        }
    }
}

impl ConnectionConfig {
    pub fn service_uuid(&self) -> Uuid {
        uuid_from_u16(self.service_id)
    }

    pub fn characteristic_uuid(&self) -> Uuid {
        uuid_from_u16(self.characteristic_id)
    }

    pub fn request_options(&self) -> RequestOptions {
        RequestOptions {
            name: self.device_name.clone(),
            optional_services: vec![self.service_uuid()],
            scan_timeout_secs: self.scan_timeout_secs,
        }
    }
}
