//! Element registry
//! Looks up the six controls of the panel in a document.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use thiserror::Error;

/// Async click callback. Each click runs the returned future to completion.
pub type ClickHandler = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UiError {
    #[error("element not found in document: #{0}")]
    MissingElement(&'static str),
}

/// The controls of the panel, by DOM id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    ConnectBtn,
    DisconnectBtn,
    Controls,
    LedOnBtn,
    LedOffBtn,
    Status,
}

impl ElementId {
    pub const ALL: [ElementId; 6] = [
        Self::ConnectBtn,
        Self::DisconnectBtn,
        Self::Controls,
        Self::LedOnBtn,
        Self::LedOffBtn,
        Self::Status,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConnectBtn => "connectBtn",
            Self::DisconnectBtn => "disconnectBtn",
            Self::Controls => "controls",
            Self::LedOnBtn => "ledOnBtn",
            Self::LedOffBtn => "ledOffBtn",
            Self::Status => "status",
        }
    }
}

/// A single control in the document.
pub trait UiElement: Send + Sync {
    fn set_hidden(&self, hidden: bool);
    fn set_text(&self, text: &str);
    /// Adds a click handler. Handlers accumulate; none are ever removed.
    fn on_click(&self, handler: ClickHandler);
}

/// The document the controls live in.
pub trait Document: Send + Sync {
    fn element(&self, id: &str) -> Option<Arc<dyn UiElement>>;
}

/// Handles to every control of the panel.
#[derive(Clone)]
pub struct Elements {
    pub connect_btn: Arc<dyn UiElement>,
    pub disconnect_btn: Arc<dyn UiElement>,
    pub controls: Arc<dyn UiElement>,
    pub led_on_btn: Arc<dyn UiElement>,
    pub led_off_btn: Arc<dyn UiElement>,
    pub status: Arc<dyn UiElement>,
}

impl Elements {
    /// Looks up all six controls, failing on the first one that is missing.
    pub fn lookup(document: &dyn Document) -> Result<Self, UiError> {
        let get = |id: ElementId| {
            document
                .element(id.as_str())
                .ok_or(UiError::MissingElement(id.as_str()))
        };

        Ok(Self {
            connect_btn: get(ElementId::ConnectBtn)?,
            disconnect_btn: get(ElementId::DisconnectBtn)?,
            controls: get(ElementId::Controls)?,
            led_on_btn: get(ElementId::LedOnBtn)?,
            led_off_btn: get(ElementId::LedOffBtn)?,
            status: get(ElementId::Status)?,
        })
    }
}
