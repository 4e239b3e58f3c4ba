//! In-memory stand-ins for the document and the Bluetooth stack.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use uuid::Uuid;

use crate::core::bluetooth::{
    BluetoothApi, ConnectStage, DisconnectObserver, GattCharacteristic, GattDevice, GattServer,
    GattService, Link, RequestOptions, UUID_LED_CHARACTERISTIC,
};
use crate::ui::elements::{ClickHandler, Document, ElementId, UiElement};
use crate::ui::webview::ClickRegistry;
use crate::ui::wiring::Notifier;

#[derive(Default)]
pub struct FakeElement {
    hidden: Mutex<bool>,
    text: Mutex<String>,
    handlers: Mutex<Vec<ClickHandler>>,
}

impl FakeElement {
    pub fn hidden(&self) -> bool {
        *self.hidden.lock().unwrap()
    }

    pub fn text(&self) -> String {
        self.text.lock().unwrap().clone()
    }

    /// Runs every registered click handler to completion.
    pub async fn click(&self) {
        let handlers = self.handlers.lock().unwrap().clone();
        for handler in handlers {
            handler().await;
        }
    }
}

impl UiElement for FakeElement {
    fn set_hidden(&self, hidden: bool) {
        *self.hidden.lock().unwrap() = hidden;
    }

    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap() = text.to_string();
    }

    fn on_click(&self, handler: ClickHandler) {
        self.handlers.lock().unwrap().push(handler);
    }
}

pub struct FakeDocument {
    elements: HashMap<String, Arc<FakeElement>>,
}

impl FakeDocument {
    /// A document holding all six panel controls.
    pub fn complete() -> Self {
        Self::without(&[])
    }

    pub fn without(missing: &[&str]) -> Self {
        let elements = ElementId::ALL
            .iter()
            .map(|id| id.as_str())
            .filter(|id| !missing.contains(id))
            .map(|id| (id.to_string(), Arc::new(FakeElement::default())))
            .collect();
        Self { elements }
    }

    pub fn get(&self, id: &str) -> Arc<FakeElement> {
        self.elements[id].clone()
    }

    /// `(id, hidden, text)` of every element, sorted by id.
    pub fn snapshot(&self) -> Vec<(String, bool, String)> {
        let mut state: Vec<_> = self
            .elements
            .iter()
            .map(|(id, element)| (id.clone(), element.hidden(), element.text()))
            .collect();
        state.sort();
        state
    }
}

impl Document for FakeDocument {
    fn element(&self, id: &str) -> Option<Arc<dyn UiElement>> {
        self.elements
            .get(id)
            .map(|element| element.clone() as Arc<dyn UiElement>)
    }
}

/// A page whose clicks go through a [`ClickRegistry`], as in the webview.
pub struct RegistryDocument {
    page: FakeDocument,
    clicks: ClickRegistry,
}

impl RegistryDocument {
    pub fn new(clicks: ClickRegistry) -> Self {
        Self {
            page: FakeDocument::complete(),
            clicks,
        }
    }

    pub fn page(&self) -> &FakeDocument {
        &self.page
    }
}

impl Document for RegistryDocument {
    fn element(&self, id: &str) -> Option<Arc<dyn UiElement>> {
        self.page.elements.get(id).map(|element| {
            Arc::new(RegistryElement {
                id: id.to_string(),
                element: element.clone(),
                clicks: self.clicks.clone(),
            }) as Arc<dyn UiElement>
        })
    }
}

struct RegistryElement {
    id: String,
    element: Arc<FakeElement>,
    clicks: ClickRegistry,
}

impl UiElement for RegistryElement {
    fn set_hidden(&self, hidden: bool) {
        self.element.set_hidden(hidden);
    }

    fn set_text(&self, text: &str) {
        self.element.set_text(text);
    }

    fn on_click(&self, handler: ClickHandler) {
        self.clicks.add(&self.id, handler);
    }
}

pub struct FakeCharacteristic {
    writes: Mutex<Vec<Vec<u8>>>,
    attempts: AtomicUsize,
    failure: Option<String>,
}

impl FakeCharacteristic {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            writes: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            failure: None,
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            writes: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            failure: Some(message.to_string()),
        })
    }

    /// Payloads of the successful writes, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.writes.lock().unwrap().clone()
    }

    pub fn write_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GattCharacteristic for FakeCharacteristic {
    fn uuid(&self) -> Uuid {
        UUID_LED_CHARACTERISTIC
    }

    async fn write_value(&self, value: &[u8]) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(anyhow!(message.clone()));
        }
        self.writes.lock().unwrap().push(value.to_vec());
        Ok(())
    }
}

pub struct FakeDevice {
    id: String,
    connected: AtomicBool,
    disconnect_calls: AtomicUsize,
    observer: Mutex<Option<DisconnectObserver>>,
    characteristic: Arc<FakeCharacteristic>,
    fail_stage: Option<ConnectStage>,
    failure: String,
    disconnect_failure: Option<String>,
    drop_on_watch: AtomicBool,
}

impl FakeDevice {
    fn build(
        id: &str,
        fail_stage: Option<ConnectStage>,
        failure: &str,
        disconnect_failure: Option<&str>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            connected: AtomicBool::new(false),
            disconnect_calls: AtomicUsize::new(0),
            observer: Mutex::new(None),
            characteristic: FakeCharacteristic::new(),
            fail_stage,
            failure: failure.to_string(),
            disconnect_failure: disconnect_failure.map(str::to_string),
            drop_on_watch: AtomicBool::new(false),
        })
    }

    pub fn new(id: &str) -> Arc<Self> {
        Self::build(id, None, "", None)
    }

    /// A device whose connect sequence fails at `stage` with `message`.
    pub fn failing_at(id: &str, stage: ConnectStage, message: &str) -> Arc<Self> {
        Self::build(id, Some(stage), message, None)
    }

    pub fn failing_disconnect(id: &str, message: &str) -> Arc<Self> {
        Self::build(id, None, "", Some(message))
    }

    /// A device that drops the link as soon as its disconnect observer is
    /// registered, before the connect call returns.
    pub fn dropping_on_watch(id: &str) -> Arc<Self> {
        let device = Self::build(id, None, "", None);
        device.drop_on_watch.store(true, Ordering::SeqCst);
        device
    }

    pub fn characteristic(&self) -> Arc<FakeCharacteristic> {
        self.characteristic.clone()
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn disconnect_calls(&self) -> usize {
        self.disconnect_calls.load(Ordering::SeqCst)
    }

    pub fn is_watched(&self) -> bool {
        self.observer.lock().unwrap().is_some()
    }

    /// Plays the platform's disconnect notification.
    pub fn fire_disconnected(&self) {
        self.set_connected(false);
        let observer = self.observer.lock().unwrap().clone();
        if let Some(observer) = observer {
            observer();
        }
    }

    fn check(&self, stage: ConnectStage) -> Result<()> {
        if self.fail_stage == Some(stage) {
            Err(anyhow!(self.failure.clone()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GattDevice for FakeDevice {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> Option<String> {
        Some("LED-test".to_string())
    }

    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn connect_gatt(&self) -> Result<Arc<dyn GattServer>> {
        self.check(ConnectStage::GattConnect)?;
        self.set_connected(true);
        Ok(Arc::new(FakeGatt {
            characteristic: self.characteristic.clone(),
            fail_stage: self.fail_stage,
            failure: self.failure.clone(),
        }))
    }

    async fn disconnect(&self) -> Result<()> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.disconnect_failure {
            return Err(anyhow!(message.clone()));
        }
        self.set_connected(false);
        Ok(())
    }

    async fn on_disconnected(&self, observer: DisconnectObserver) -> Result<()> {
        self.check(ConnectStage::WatchDisconnect)?;
        *self.observer.lock().unwrap() = Some(observer);
        if self.drop_on_watch.load(Ordering::SeqCst) {
            self.fire_disconnected();
        }
        Ok(())
    }

    fn stop_watching(&self) {
        *self.observer.lock().unwrap() = None;
    }
}

/// Server and service of a [`FakeDevice`].
struct FakeGatt {
    characteristic: Arc<FakeCharacteristic>,
    fail_stage: Option<ConnectStage>,
    failure: String,
}

impl FakeGatt {
    fn check(&self, stage: ConnectStage) -> Result<()> {
        if self.fail_stage == Some(stage) {
            Err(anyhow!(self.failure.clone()))
        } else {
            Ok(())
        }
    }

    fn clone_arc(&self) -> Arc<Self> {
        Arc::new(Self {
            characteristic: self.characteristic.clone(),
            fail_stage: self.fail_stage,
            failure: self.failure.clone(),
        })
    }
}

#[async_trait]
impl GattServer for FakeGatt {
    async fn primary_service(&self, _uuid: Uuid) -> Result<Arc<dyn GattService>> {
        self.check(ConnectStage::PrimaryService)?;
        Ok(self.clone_arc())
    }
}

#[async_trait]
impl GattService for FakeGatt {
    async fn characteristic(&self, _uuid: Uuid) -> Result<Arc<dyn GattCharacteristic>> {
        self.check(ConnectStage::Characteristic)?;
        Ok(self.characteristic.clone())
    }
}

pub struct FakeBluetooth {
    device: Option<Arc<FakeDevice>>,
    failure: String,
    requests: Mutex<Vec<RequestOptions>>,
}

impl FakeBluetooth {
    pub fn with_device(device: Arc<FakeDevice>) -> Arc<Self> {
        Arc::new(Self {
            device: Some(device),
            failure: String::new(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting(message: &str) -> Arc<Self> {
        Arc::new(Self {
            device: None,
            failure: message.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<RequestOptions> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BluetoothApi for FakeBluetooth {
    async fn request_device(&self, options: &RequestOptions) -> Result<Arc<dyn GattDevice>> {
        self.requests.lock().unwrap().push(options.clone());
        match &self.device {
            Some(device) => Ok(device.clone()),
            None => Err(anyhow!(self.failure.clone())),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// A link to `device` as a successful connect would return it.
pub fn link_to(device: &Arc<FakeDevice>) -> Link {
    Link {
        device: device.clone(),
        characteristic: device.characteristic(),
    }
}
