//! Errors reported by the connect and write operations.

use std::fmt;

use thiserror::Error;

/// The connect step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectStage {
    RequestDevice,
    GattConnect,
    PrimaryService,
    Characteristic,
    WatchDisconnect,
}

impl fmt::Display for ConnectStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RequestDevice => "device request",
            Self::GattConnect => "GATT connect",
            Self::PrimaryService => "service lookup",
            Self::Characteristic => "characteristic lookup",
            Self::WatchDisconnect => "disconnect watch",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum LinkError {
    /// Any failure while establishing the link. Only `message` is shown to
    /// the user; `stage` is kept for logs and tests.
    #[error("connection failed: {message}")]
    Connection { stage: ConnectStage, message: String },

    #[error("not connected")]
    NotConnected,

    /// A platform call on an established link failed.
    #[error(transparent)]
    Platform(#[from] anyhow::Error),
}

impl LinkError {
    pub fn connection(stage: ConnectStage, source: &anyhow::Error) -> Self {
        Self::Connection {
            stage,
            message: source.to_string(),
        }
    }

    pub fn stage(&self) -> Option<ConnectStage> {
        match self {
            Self::Connection { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
