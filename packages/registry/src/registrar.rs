// ABOUTME: Client for the assistant device-registration REST API
// ABOUTME: Registers the device model and instance, tolerating conflicts

use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::{
    error::{RegistryError, RegistryResult},
    types::{DeviceConfig, DeviceInstanceRequest, DeviceModelRequest},
};
use hearth_config::DEFAULT_DEVICE_API_URL;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of a single registration POST
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    AlreadyExists,
    Rejected(u16),
}

/// Client for registering device models and instances
pub struct DeviceRegistrar {
    client: Client,
    base_url: String,
    access_token: String,
}

impl DeviceRegistrar {
    /// Create a registrar against the production registration API
    pub fn new(access_token: impl Into<String>) -> RegistryResult<Self> {
        Self::with_base_url(access_token, DEFAULT_DEVICE_API_URL)
    }

    /// Create a registrar against a custom API base URL
    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> RegistryResult<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| RegistryError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    /// Register a device model and instance for the project
    ///
    /// Registration failures are logged but never abort the run: the device
    /// config is returned regardless, so provisioning can complete and the
    /// registration can be retried on a later run.
    pub async fn register(&self, project_id: &str) -> RegistryResult<DeviceConfig> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(RegistryError::MissingProjectId);
        }

        let config = DeviceConfig::generate(project_id);

        info!("Registering device model {}", config.device_model_id);
        match self.register_model(&config).await {
            Ok(RegistrationOutcome::Registered) => {
                info!("Device model registered: {}", config.device_model_id)
            }
            Ok(RegistrationOutcome::AlreadyExists) => {
                info!("Device model already exists: {}", config.device_model_id)
            }
            Ok(RegistrationOutcome::Rejected(status)) => {
                warn!("Model registration returned status {}", status)
            }
            Err(e) => warn!("Model registration failed: {}", e),
        }

        info!("Registering device instance {}", config.device_instance_id);
        match self.register_instance(&config).await {
            Ok(RegistrationOutcome::Registered) => {
                info!("Device instance registered: {}", config.device_instance_id)
            }
            Ok(RegistrationOutcome::AlreadyExists) => {
                info!("Device instance already exists: {}", config.device_instance_id)
            }
            Ok(RegistrationOutcome::Rejected(status)) => {
                warn!("Instance registration returned status {}", status)
            }
            Err(e) => warn!("Instance registration failed: {}", e),
        }

        Ok(config)
    }

    /// Register the device model
    pub async fn register_model(&self, config: &DeviceConfig) -> RegistryResult<RegistrationOutcome> {
        let url = format!("{}/projects/{}/deviceModels/", self.base_url, config.project_id);
        self.post_registration(&url, &DeviceModelRequest::for_config(config))
            .await
    }

    /// Register the device instance
    pub async fn register_instance(
        &self,
        config: &DeviceConfig,
    ) -> RegistryResult<RegistrationOutcome> {
        let url = format!("{}/projects/{}/devices/", self.base_url, config.project_id);
        self.post_registration(&url, &DeviceInstanceRequest::for_config(config))
            .await
    }

    async fn post_registration<T: Serialize>(
        &self,
        url: &str,
        body: &T,
    ) -> RegistryResult<RegistrationOutcome> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(RegistrationOutcome::Registered)
        } else if status == StatusCode::CONFLICT {
            Ok(RegistrationOutcome::AlreadyExists)
        } else {
            Ok(RegistrationOutcome::Rejected(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_rejects_empty_project_id() {
        let registrar = DeviceRegistrar::new("token").unwrap();
        let err = registrar.register("  ").await.unwrap_err();
        assert!(matches!(err, RegistryError::MissingProjectId));
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let registrar =
            DeviceRegistrar::with_base_url("token", "https://api.example.com/v1/").unwrap();
        assert_eq!(registrar.base_url, "https://api.example.com/v1");
    }
}
