//! Constants used throughout the application
//! This module contains the fixed identifiers of the LED board and the
//! timing values used while looking for it.

use uuid::Uuid;

/// The advertised name of the LED board
pub const DEVICE_NAME: &str = "LED-test";

/// 16-bit id of the LED service (Environmental Sensing, reused by the board)
pub const SERVICE_ID: u16 = 0x181A;

/// 16-bit id of the LED characteristic
pub const CHARACTERISTIC_ID: u16 = 0x2ABF;

/// The Bluetooth base UUID that 16-bit ids are expanded onto
pub const BLUETOOTH_BASE_UUID: u128 = 0x00000000_0000_1000_8000_00805f9b34fb;

/// The UUID of the LED service
pub const UUID_LED_SERVICE: Uuid = uuid_from_u16(SERVICE_ID);

/// The UUID of the LED characteristic
pub const UUID_LED_CHARACTERISTIC: Uuid = uuid_from_u16(CHARACTERISTIC_ID);

/// Scan duration in seconds before a device request gives up
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 10;

/// Expands a 16-bit assigned number onto the Bluetooth base UUID.
pub const fn uuid_from_u16(id: u16) -> Uuid {
    Uuid::from_u128(BLUETOOTH_BASE_UUID | ((id as u128) << 96))
}
