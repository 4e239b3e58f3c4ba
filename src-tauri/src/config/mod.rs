pub mod connection_config;
pub mod ui_config;

use std::path::Path;

use anyhow::Result;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Manager};
use tokio::fs;

use crate::config::connection_config::ConnectionConfig;
use crate::config::ui_config::UiConfig;
use crate::utils::ensure_directory_exists;

const CONFIG_FILE_NAME: &str = "app_config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub connection: ConnectionConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Loads the config from the app config directory, writing the defaults
    /// there on first start.
    pub async fn load_config(app_handle: &AppHandle) -> Result<Self> {
        let config_dir = app_handle.path().app_config_dir()?;
        let file_path = config_dir.join(CONFIG_FILE_NAME);

        if !file_path.exists() {
            let config = Self::default();
            if let Err(e) = config.save_to(&file_path).await {
                error!("Failed to write default config: {}", e);
            }
            return Ok(config);
        }
        Self::load_from(&file_path).await
    }

    pub async fn load_from(file_path: &Path) -> Result<Self> {
        if !file_path.exists() {
            warn!("Config file not found at {:?}, using default.", file_path);
            return Ok(Self::default());
        }

        let config_json = fs::read_to_string(file_path).await?;
        let config: Self = serde_json::from_str(&config_json)?;

        info!("Config loaded from {:?}", file_path);
        Ok(config)
    }

    pub async fn save_to(&self, file_path: &Path) -> Result<()> {
        if let Some(config_dir) = file_path.parent() {
            ensure_directory_exists(config_dir).await?;
        }

        let config_json = match serde_json::to_string_pretty(&self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize config to JSON: {}", e);
                return Err(e.into());
            }
        };

        fs::write(file_path, config_json).await?;
        info!("Config saved to {:?}", file_path);
        Ok(())
    }
}
