//! Bluetooth connection handling for the LED board
//! This module handles connecting to and disconnecting from the board

use std::sync::Arc;

use log::{error, info, warn};

use crate::config::connection_config::ConnectionConfig;
use crate::core::bluetooth::error::{ConnectStage, LinkError};
use crate::core::bluetooth::types::{BluetoothApi, DisconnectObserver, GattDevice, Link};
use crate::core::session::SessionHandle;
use crate::ui::elements::Elements;
use crate::ui::labels::Labels;
use crate::ui::reflect::reflect;

/// Connection manager for the LED board
#[derive(Clone)]
pub struct ConnectionManager {
    api: Arc<dyn BluetoothApi>,
    config: ConnectionConfig,
}

impl ConnectionManager {
    pub fn new(api: Arc<dyn BluetoothApi>, config: ConnectionConfig) -> Self {
        Self { api, config }
    }

    /// Requests the board, opens GATT and resolves the LED characteristic.
    ///
    /// Every failure is reported as a single [`LinkError::Connection`]. On
    /// success the disconnect observer is already registered when this
    /// returns, and the panel shows the connected state. The observer also
    /// clears `clear_on_disconnect` when it still holds this device.
    pub async fn connect(
        &self,
        elements: &Elements,
        labels: &Labels,
        clear_on_disconnect: Option<&SessionHandle>,
    ) -> Result<Link, LinkError> {
        let options = self.config.request_options();
        info!("Requesting device named {:?}...", options.name);
        let device = self
            .api
            .request_device(&options)
            .await
            .map_err(|e| failed(ConnectStage::RequestDevice, e))?;

        info!("Device details - ID: {}, Name: {:?}", device.id(), device.name());
        info!("Initiating GATT connection...");
        let server = device
            .connect_gatt()
            .await
            .map_err(|e| failed(ConnectStage::GattConnect, e))?;

        info!("Connection successful, discovering services...");
        let service = server
            .primary_service(self.config.service_uuid())
            .await
            .map_err(|e| failed(ConnectStage::PrimaryService, e))?;

        let characteristic = service
            .characteristic(self.config.characteristic_uuid())
            .await
            .map_err(|e| failed(ConnectStage::Characteristic, e))?;
        info!("Found LED characteristic: {}", characteristic.uuid());

        let observer: DisconnectObserver = {
            let elements = elements.clone();
            let labels = labels.clone();
            let session = clear_on_disconnect.cloned();
            let device_id = device.id();
            Arc::new(move || {
                info!("Device {} disconnected", device_id);
                if let Some(session) = &session {
                    session.clear_if_device(&device_id);
                }
                reflect(&elements, false, &labels);
            })
        };
        device
            .on_disconnected(observer)
            .await
            .map_err(|e| failed(ConnectStage::WatchDisconnect, e))?;

        reflect(elements, true, labels);
        info!("Connection and setup process completed successfully");
        Ok(Link {
            device,
            characteristic,
        })
    }

    /// Disconnect from the board. Never fails: an absent or already
    /// disconnected device is left alone.
    pub async fn disconnect(&self, device: Option<&Arc<dyn GattDevice>>) {
        let Some(device) = device else {
            info!("No device held, nothing to disconnect");
            return;
        };

        if device.is_connected().await {
            info!("Disconnecting from device {}", device.id());
            match device.disconnect().await {
                Ok(()) => info!("Successfully disconnected"),
                Err(e) => error!("Failed to disconnect from {}: {}", device.id(), e),
            }
        } else {
            info!("Device {} not connected", device.id());
        }
    }
}

fn failed(stage: ConnectStage, err: anyhow::Error) -> LinkError {
    warn!("Connection failed during {}: {}", stage, err);
    LinkError::connection(stage, &err)
}
