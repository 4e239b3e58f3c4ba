//! The panel as rendered in the Tauri webview.
//!
//! The page reports the ids of its elements once its DOM is ready and
//! forwards every click to the backend. Everything the backend changes is
//! sent back as events:
//! - "ui-patch" with `{ id, hidden?, text? }` for one element
//! - "alert" with the message to show

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::error;
use serde::Serialize;
use tauri::{AppHandle, Emitter};

use crate::ui::elements::{ClickHandler, Document, UiElement};
use crate::ui::wiring::Notifier;

/// Click handlers by element id, shared with the `ui_click` command.
#[derive(Clone, Default)]
pub struct ClickRegistry {
    handlers: Arc<Mutex<HashMap<String, Vec<ClickHandler>>>>,
}

impl ClickRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<ClickHandler>>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, id: &str, handler: ClickHandler) {
        self.lock().entry(id.to_string()).or_default().push(handler);
    }

    /// The handlers of `id`, or `None` if nothing was ever registered.
    pub fn handlers(&self, id: &str) -> Option<Vec<ClickHandler>> {
        self.lock().get(id).cloned()
    }

    /// Forgets every handler, e.g. before the page is wired again after a reload.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementPatch {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

pub struct WebviewDocument {
    app_handle: AppHandle,
    element_ids: HashSet<String>,
    clicks: ClickRegistry,
}

impl WebviewDocument {
    pub fn new(app_handle: AppHandle, element_ids: Vec<String>, clicks: ClickRegistry) -> Self {
        Self {
            app_handle,
            element_ids: element_ids.into_iter().collect(),
            clicks,
        }
    }
}

impl Document for WebviewDocument {
    fn element(&self, id: &str) -> Option<Arc<dyn UiElement>> {
        if !self.element_ids.contains(id) {
            return None;
        }
        Some(Arc::new(WebviewElement {
            id: id.to_string(),
            app_handle: self.app_handle.clone(),
            clicks: self.clicks.clone(),
        }))
    }
}

struct WebviewElement {
    id: String,
    app_handle: AppHandle,
    clicks: ClickRegistry,
}

impl WebviewElement {
    fn emit_patch(&self, patch: ElementPatch) {
        if let Err(e) = self.app_handle.emit("ui-patch", patch) {
            error!("Failed to emit ui-patch event for #{}: {}", self.id, e);
        }
    }
}

impl UiElement for WebviewElement {
    fn set_hidden(&self, hidden: bool) {
        self.emit_patch(ElementPatch {
            id: self.id.clone(),
            hidden: Some(hidden),
            text: None,
        });
    }

    fn set_text(&self, text: &str) {
        self.emit_patch(ElementPatch {
            id: self.id.clone(),
            hidden: None,
            text: Some(text.to_string()),
        });
    }

    fn on_click(&self, handler: ClickHandler) {
        self.clicks.add(&self.id, handler);
    }
}

pub struct WebviewNotifier {
    app_handle: AppHandle,
}

impl WebviewNotifier {
    pub fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl Notifier for WebviewNotifier {
    fn alert(&self, message: &str) {
        if let Err(e) = self.app_handle.emit("alert", message) {
            error!("Failed to emit alert event: {}", e);
        }
    }
}
