//! The control panel: its elements, the two display states and the click
//! handlers that drive the Bluetooth link.

pub mod elements;
pub mod labels;
pub mod reflect;
pub mod webview;
pub mod wiring;

pub use elements::{ClickHandler, Document, ElementId, Elements, UiElement, UiError};
pub use labels::Labels;
pub use reflect::reflect;
pub use wiring::{LinkOps, Notifier, WiringOptions, wire};
