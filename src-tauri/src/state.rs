//! Application state management
//! This module defines and manages the global application state.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use log::info;
use tauri::AppHandle;

use crate::config::AppConfig;
use crate::core::bluetooth::{BluestApi, ConnectionManager};
use crate::core::session::SessionHandle;
use crate::ui::labels::Labels;
use crate::ui::webview::ClickRegistry;
use crate::ui::wiring::{LinkOps, WiringOptions};

/// Global application state
pub struct AppState {
    pub config: AppConfig,
    /// The connection manager instance
    pub connection_manager: Arc<ConnectionManager>,
    /// Click handlers of the page currently shown
    pub clicks: ClickRegistry,
    session: Mutex<SessionHandle>,
}

impl AppState {
    /// Creates a new AppState instance
    pub async fn new(app_handle: &AppHandle) -> Result<Self> {
        let config = AppConfig::load_config(app_handle).await?;
        info!(
            "Initializing ConnectionManager for {:?}...",
            config.connection.device_name
        );
        let connection_manager = ConnectionManager::new(
            Arc::new(BluestApi::new()),
            config.connection.clone(),
        );
        Ok(Self {
            config,
            connection_manager: Arc::new(connection_manager),
            clicks: ClickRegistry::new(),
            session: Mutex::new(SessionHandle::new()),
        })
    }

    pub fn link_ops(&self) -> Arc<dyn LinkOps> {
        self.connection_manager.clone()
    }

    pub fn labels(&self) -> Labels {
        Labels::for_language(self.config.ui.language)
    }

    pub fn wiring_options(&self) -> WiringOptions {
        WiringOptions {
            clear_session_on_disconnect: self.config.ui.clear_session_on_disconnect,
        }
    }

    /// The session of the page currently shown
    pub fn session(&self) -> SessionHandle {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_session(&self, session: SessionHandle) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }
}
