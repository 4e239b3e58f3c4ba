//! LED commands
//! This module contains the value written to the LED characteristic and the
//! write operation itself.

use std::sync::Arc;

use log::{debug, info};

use crate::core::bluetooth::error::LinkError;
use crate::core::bluetooth::types::GattCharacteristic;

/// The state the LED is switched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedValue {
    /// LED off (0x00)
    Off,
    /// LED on (0x01)
    On,
}

impl LedValue {
    /// Convert the value to its byte representation
    pub fn to_bytes(self) -> [u8; 1] {
        match self {
            Self::Off => [0x00],
            Self::On => [0x01],
        }
    }
}

impl From<bool> for LedValue {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl TryFrom<u8> for LedValue {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            other => Err(anyhow::anyhow!("LED value must be 0 or 1, got {}", other)),
        }
    }
}

/// Writes `value` to the LED characteristic.
///
/// Fails with [`LinkError::NotConnected`] before touching the platform when
/// no characteristic is held. Otherwise the result is exactly the outcome of
/// the single platform write.
pub async fn write_led(
    characteristic: Option<&Arc<dyn GattCharacteristic>>,
    value: LedValue,
) -> Result<(), LinkError> {
    let characteristic = characteristic.ok_or(LinkError::NotConnected)?;

    let data = value.to_bytes();
    info!("Writing LED value {:?} to {}", value, characteristic.uuid());
    characteristic.write_value(&data).await?;
    debug!("LED write of {:02x?} acknowledged", data);
    Ok(())
}
