//! Panel initialization

use std::sync::Arc;

use log::info;

use crate::core::session::SessionHandle;
use crate::ui::elements::{Document, Elements, UiError};
use crate::ui::labels::Labels;
use crate::ui::reflect::reflect;
use crate::ui::webview::ClickRegistry;
use crate::ui::wiring::{LinkOps, Notifier, WiringOptions, wire};

/// Looks up the panel controls, shows the disconnected state and wires the
/// buttons. Returns the session the click handlers share.
pub fn init(
    document: &dyn Document,
    ops: Arc<dyn LinkOps>,
    notifier: Arc<dyn Notifier>,
    labels: Labels,
    options: WiringOptions,
) -> Result<SessionHandle, UiError> {
    let elements = Elements::lookup(document)?;
    reflect(&elements, false, &labels);

    let session = SessionHandle::new();
    wire(&elements, ops, session.clone(), notifier, labels, options);
    info!("Panel initialized");
    Ok(session)
}

/// Lets go of what a page set up before it is wired again: disconnects the
/// device its session holds, stops watching it and forgets the click
/// handlers.
pub async fn release(previous: &SessionHandle, ops: &Arc<dyn LinkOps>, clicks: &ClickRegistry) {
    if let Some(device) = previous.device() {
        info!("Releasing device {} held by the previous page", device.id());
        ops.disconnect(Some(&device)).await;
        device.stop_watching();
    }
    clicks.clear();
}
