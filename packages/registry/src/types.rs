// ABOUTME: Device registration types for the assistant cloud API
// ABOUTME: Includes the persisted device config and the registration request bodies

use serde::{Deserialize, Serialize};

use crate::ids;
use hearth_config::{
    DEVICE_CLIENT_TYPE, DEVICE_DESCRIPTION, DEVICE_MANUFACTURER, DEVICE_NICKNAME,
    DEVICE_PRODUCT_NAME, DEVICE_TYPE,
};

/// Device configuration persisted to `device_config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub project_id: String,
    pub device_model_id: String,
    pub device_instance_id: String,
}

impl DeviceConfig {
    /// Generate a config for a project with fresh identifiers
    pub fn generate(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            device_model_id: ids::device_model_id(project_id),
            device_instance_id: ids::device_instance_id(),
        }
    }
}

/// Device-model registration request body
#[derive(Debug, Serialize)]
pub struct DeviceModelRequest {
    pub device_model_id: String,
    pub project_id: String,
    pub device_type: String,
    pub manifest: DeviceManifest,
}

#[derive(Debug, Serialize)]
pub struct DeviceManifest {
    pub manufacturer: String,
    pub product_name: String,
    pub device_description: String,
}

impl DeviceModelRequest {
    pub fn for_config(config: &DeviceConfig) -> Self {
        Self {
            device_model_id: config.device_model_id.clone(),
            project_id: config.project_id.clone(),
            device_type: DEVICE_TYPE.to_string(),
            manifest: DeviceManifest {
                manufacturer: DEVICE_MANUFACTURER.to_string(),
                product_name: DEVICE_PRODUCT_NAME.to_string(),
                device_description: DEVICE_DESCRIPTION.to_string(),
            },
        }
    }
}

/// Device-instance registration request body
#[derive(Debug, Serialize)]
pub struct DeviceInstanceRequest {
    pub id: String,
    pub model_id: String,
    pub client_type: String,
    pub nickname: String,
}

impl DeviceInstanceRequest {
    pub fn for_config(config: &DeviceConfig) -> Self {
        Self {
            id: config.device_instance_id.clone(),
            model_id: config.device_model_id.clone(),
            client_type: DEVICE_CLIENT_TYPE.to_string(),
            nickname: DEVICE_NICKNAME.to_string(),
        }
    }
}
