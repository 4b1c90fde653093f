// ABOUTME: File-backed store for the persisted device configuration
// ABOUTME: Reads and writes device_config.json under the Hearth data directory

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::{
    error::{RegistryError, RegistryResult},
    types::DeviceConfig,
};
use hearth_config::DEVICE_CONFIG_FILE;

/// Store for the persisted device-config record
#[derive(Debug, Clone)]
pub struct DeviceConfigStore {
    path: PathBuf,
}

impl DeviceConfigStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(DEVICE_CONFIG_FILE),
        }
    }

    /// Path of the device-config file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a device config already exists on disk
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the stored device config
    pub async fn load(&self) -> RegistryResult<DeviceConfig> {
        let content = fs::read_to_string(&self.path).await?;
        let config: DeviceConfig = serde_json::from_str(&content)
            .map_err(|e| RegistryError::Storage(format!("Invalid device config file: {}", e)))?;

        debug!("Loaded device config from {}", self.path.display());
        Ok(config)
    }

    /// Read back the project id of an existing config, if any
    ///
    /// Used to pre-fill the project prompt on re-runs. Unreadable or
    /// malformed files just mean no default.
    pub async fn default_project_id(&self) -> Option<String> {
        match self.load().await {
            Ok(config) if !config.project_id.is_empty() => Some(config.project_id),
            _ => None,
        }
    }

    /// Persist the device config as pretty-printed JSON
    pub async fn save(&self, config: &DeviceConfig) -> RegistryResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json).await?;

        debug!("Saved device config to {}", self.path.display());
        Ok(())
    }
}
