//! User-facing strings for the panel.

use crate::config::ui_config::Language;
use crate::core::bluetooth::LinkError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub connected: &'static str,
    pub disconnected: &'static str,
    pub connection_failed: &'static str,
    pub not_connected: &'static str,
}

impl Labels {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::En => Self {
                connected: "connected",
                disconnected: "disconnected",
                connection_failed: "connection failed",
                not_connected: "not connected",
            },
            Language::Ja => Self {
                connected: "接続中",
                disconnected: "切断中",
                connection_failed: "接続失敗",
                not_connected: "未接続",
            },
        }
    }

    pub fn status(&self, connected: bool) -> &'static str {
        if connected { self.connected } else { self.disconnected }
    }

    /// The alert text for `err`.
    pub fn describe(&self, err: &LinkError) -> String {
        match err {
            LinkError::Connection { message, .. } => {
                format!("{}: {}", self.connection_failed, message)
            }
            LinkError::NotConnected => self.not_connected.to_string(),
            LinkError::Platform(e) => e.to_string(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::for_language(Language::En)
    }
}
