//! Event wiring
//! Attaches the click handlers of the four buttons. The Bluetooth operations
//! are reached through [`LinkOps`] so that tests can substitute them.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use log::{error, info, warn};

use crate::core::bluetooth::{
    ConnectionManager, GattCharacteristic, GattDevice, LedValue, Link, LinkError, write_led,
};
use crate::core::session::SessionHandle;
use crate::ui::elements::{ClickHandler, Elements};
use crate::ui::labels::Labels;

/// Channel used to show connect and write failures to the user.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// The operations the buttons trigger.
#[async_trait]
pub trait LinkOps: Send + Sync {
    async fn connect(
        &self,
        elements: &Elements,
        labels: &Labels,
        clear_on_disconnect: Option<&SessionHandle>,
    ) -> Result<Link, LinkError>;

    async fn disconnect(&self, device: Option<&Arc<dyn GattDevice>>);

    async fn write(
        &self,
        characteristic: Option<&Arc<dyn GattCharacteristic>>,
        value: LedValue,
    ) -> Result<(), LinkError>;
}

#[async_trait]
impl LinkOps for ConnectionManager {
    async fn connect(
        &self,
        elements: &Elements,
        labels: &Labels,
        clear_on_disconnect: Option<&SessionHandle>,
    ) -> Result<Link, LinkError> {
        ConnectionManager::connect(self, elements, labels, clear_on_disconnect).await
    }

    async fn disconnect(&self, device: Option<&Arc<dyn GattDevice>>) {
        ConnectionManager::disconnect(self, device).await
    }

    async fn write(
        &self,
        characteristic: Option<&Arc<dyn GattCharacteristic>>,
        value: LedValue,
    ) -> Result<(), LinkError> {
        write_led(characteristic, value).await
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WiringOptions {
    /// Forget the held device and characteristic when the board reports a
    /// disconnect. Off by default: the disconnect only changes the panel.
    pub clear_session_on_disconnect: bool,
}

#[derive(Clone)]
struct Handlers {
    elements: Elements,
    ops: Arc<dyn LinkOps>,
    session: SessionHandle,
    notifier: Arc<dyn Notifier>,
    labels: Labels,
    options: WiringOptions,
}

impl Handlers {
    async fn connect_clicked(&self) {
        let clear = self
            .options
            .clear_session_on_disconnect
            .then_some(&self.session);
        match self.ops.connect(&self.elements, &self.labels, clear).await {
            Ok(link) => {
                let device = link.device.clone();
                self.session.store(link);
                // A disconnect reported before the store found nothing to clear.
                if clear.is_some() && !device.is_connected().await {
                    warn!("Device {} dropped while connecting", device.id());
                    self.session.clear_if_device(&device.id());
                }
            }
            Err(e) => {
                error!("Connect failed: {}", e);
                self.notifier.alert(&self.labels.describe(&e));
            }
        }
    }

    async fn disconnect_clicked(&self) {
        let device = self.session.device();
        self.ops.disconnect(device.as_ref()).await;
    }

    async fn led_clicked(&self, value: LedValue) {
        let characteristic = self.session.characteristic();
        if let Err(e) = self.ops.write(characteristic.as_ref(), value).await {
            error!("LED write failed: {}", e);
            self.notifier.alert(&self.labels.describe(&e));
        }
    }
}

fn click_handler<F, Fut>(f: F) -> ClickHandler
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move || f().boxed())
}

/// Registers the connect, disconnect, LED-on and LED-off click handlers.
pub fn wire(
    elements: &Elements,
    ops: Arc<dyn LinkOps>,
    session: SessionHandle,
    notifier: Arc<dyn Notifier>,
    labels: Labels,
    options: WiringOptions,
) {
    let handlers = Handlers {
        elements: elements.clone(),
        ops,
        session,
        notifier,
        labels,
        options,
    };

    let h = handlers.clone();
    elements.connect_btn.on_click(click_handler(move || {
        let h = h.clone();
        async move { h.connect_clicked().await }
    }));

    let h = handlers.clone();
    elements.disconnect_btn.on_click(click_handler(move || {
        let h = h.clone();
        async move { h.disconnect_clicked().await }
    }));

    let h = handlers.clone();
    elements.led_on_btn.on_click(click_handler(move || {
        let h = h.clone();
        async move { h.led_clicked(LedValue::On).await }
    }));

    let h = handlers;
    elements.led_off_btn.on_click(click_handler(move || {
        let h = h.clone();
        async move { h.led_clicked(LedValue::Off).await }
    }));

    info!("Click handlers registered");
}
