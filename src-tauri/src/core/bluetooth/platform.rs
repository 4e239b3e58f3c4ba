//! Host Bluetooth stack, reached through `bluest`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use bluest::{Adapter, Characteristic, ConnectionEvent, Device, Service, Uuid};
use futures_util::StreamExt;
use log::{debug, info};
use tokio::sync::{OnceCell, oneshot};
use tokio::task::JoinHandle;

use crate::core::bluetooth::types::{
    BluetoothApi, DisconnectObserver, GattCharacteristic, GattDevice, GattServer, GattService,
    RequestOptions,
};

/// Disconnect watcher task of each device, by device id.
#[derive(Clone, Default)]
struct Watchers {
    tasks: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl Watchers {
    /// Stores `task` for `device_id` and aborts the one it replaces.
    fn replace(&self, device_id: String, task: JoinHandle<()>) {
        let previous = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(device_id.clone(), task);
        if let Some(previous) = previous {
            debug!("Replacing disconnect watcher of {}", device_id);
            previous.abort();
        }
    }

    fn stop(&self, device_id: &str) {
        let task = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(device_id);
        if let Some(task) = task {
            debug!("Stopping disconnect watcher of {}", device_id);
            task.abort();
        }
    }
}

/// [`BluetoothApi`] over the default system adapter.
#[derive(Default)]
pub struct BluestApi {
    adapter: OnceCell<Adapter>,
    watchers: Watchers,
}

impl BluestApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default adapter, acquired on first use.
    async fn adapter(&self) -> Result<&Adapter> {
        self.adapter
            .get_or_try_init(|| async {
                let adapter = Adapter::default()
                    .await
                    .ok_or_else(|| anyhow!("No Bluetooth adapter found"))?;
                adapter.wait_available().await?;
                info!("Bluetooth adapter is available.");
                Ok::<_, anyhow::Error>(adapter)
            })
            .await
    }

    async fn scan_for(adapter: &Adapter, name: &str) -> Result<Device> {
        let mut scan_stream = adapter.scan(&[]).await?;
        while let Some(discovered) = scan_stream.next().await {
            let advertised = discovered
                .adv_data
                .local_name
                .clone()
                .or_else(|| discovered.device.name().ok());
            debug!(
                "Found device - Device: {:?}, Name: {:?}, RSSI: {:?}",
                discovered.device, advertised, discovered.rssi
            );
            if advertised.as_deref() == Some(name) {
                return Ok(discovered.device);
            }
        }
        Err(anyhow!("Bluetooth scan stream has ended"))
    }
}

#[async_trait]
impl BluetoothApi for BluestApi {
    async fn request_device(&self, options: &RequestOptions) -> Result<Arc<dyn GattDevice>> {
        let adapter = self.adapter().await?;

        info!("Checking for connected devices");
        for device in adapter.connected_devices().await? {
            if device.name().ok().as_deref() == Some(options.name.as_str()) {
                info!("{} is already connected", options.name);
                return Ok(Arc::new(self.wrap(adapter, device)));
            }
        }

        info!(
            "Starting bluetooth scan for {:?} (services {:?})",
            options.name, options.optional_services
        );
        let device = tokio::time::timeout(
            Duration::from_secs(options.scan_timeout_secs),
            Self::scan_for(adapter, &options.name),
        )
        .await
        .map_err(|_| {
            anyhow!(
                "no device named {} found within {} s",
                options.name,
                options.scan_timeout_secs
            )
        })??;

        Ok(Arc::new(self.wrap(adapter, device)))
    }
}

impl BluestApi {
    fn wrap(&self, adapter: &Adapter, device: Device) -> BluestDevice {
        BluestDevice {
            adapter: adapter.clone(),
            device,
            watchers: self.watchers.clone(),
        }
    }
}

pub struct BluestDevice {
    adapter: Adapter,
    device: Device,
    watchers: Watchers,
}

#[async_trait]
impl GattDevice for BluestDevice {
    fn id(&self) -> String {
        self.device.id().to_string()
    }

    fn name(&self) -> Option<String> {
        self.device.name().ok()
    }

    async fn is_connected(&self) -> bool {
        self.device.is_connected().await
    }

    async fn connect_gatt(&self) -> Result<Arc<dyn GattServer>> {
        if !self.device.is_connected().await {
            info!("Initiating connection to {}...", self.device.id());
            self.adapter.connect_device(&self.device).await?;
        }
        Ok(Arc::new(BluestServer {
            device: self.device.clone(),
        }))
    }

    async fn disconnect(&self) -> Result<()> {
        self.adapter.disconnect_device(&self.device).await?;
        Ok(())
    }

    async fn on_disconnected(&self, observer: DisconnectObserver) -> Result<()> {
        let (ready_tx, ready_rx) = oneshot::channel::<Result<()>>();
        let adapter = self.adapter.clone();
        let device = self.device.clone();

        let task = tokio::spawn(async move {
            let mut events = match adapter.device_connection_events(&device).await {
                Ok(events) => {
                    let _ = ready_tx.send(Ok(()));
                    events
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e.into()));
                    return;
                }
            };

            while let Some(event) = events.next().await {
                debug!("Connection event for {}: {:?}", device.id(), event);
                if matches!(event, ConnectionEvent::Disconnected) {
                    observer();
                }
            }
            debug!("Connection event stream for {} ended", device.id());
        });
        self.watchers.replace(self.id(), task);

        ready_rx
            .await
            .map_err(|_| anyhow!("disconnect watcher stopped before subscribing"))?
    }

    fn stop_watching(&self) {
        self.watchers.stop(&self.id());
    }
}

struct BluestServer {
    device: Device,
}

#[async_trait]
impl GattServer for BluestServer {
    async fn primary_service(&self, uuid: Uuid) -> Result<Arc<dyn GattService>> {
        let services = self.device.discover_services_with_uuid(uuid).await?;
        let service = services
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Service not found: {}", uuid))?;
        info!("Found service: {}", service.uuid());
        Ok(Arc::new(BluestService { service }))
    }
}

struct BluestService {
    service: Service,
}

#[async_trait]
impl GattService for BluestService {
    async fn characteristic(&self, uuid: Uuid) -> Result<Arc<dyn GattCharacteristic>> {
        let characteristics = self.service.discover_characteristics_with_uuid(uuid).await?;
        let characteristic = characteristics
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Characteristic not found: {}", uuid))?;
        Ok(Arc::new(BluestCharacteristic { characteristic }))
    }
}

struct BluestCharacteristic {
    characteristic: Characteristic,
}

#[async_trait]
impl GattCharacteristic for BluestCharacteristic {
    fn uuid(&self) -> Uuid {
        self.characteristic.uuid()
    }

    async fn write_value(&self, value: &[u8]) -> Result<()> {
        self.characteristic.write(value).await?;
        Ok(())
    }
}
