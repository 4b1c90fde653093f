// ABOUTME: File-backed credential store for the assistant integration
// ABOUTME: Reads and writes credentials.json under the Hearth data directory

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::{
    error::{AuthError, AuthResult},
    oauth::types::CredentialRecord,
};
use hearth_config::CREDENTIALS_FILE;

/// Store for the persisted credential record
///
/// The record lives at a fixed name inside the data directory; the store
/// never deletes it, only creates or overwrites it.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CREDENTIALS_FILE),
        }
    }

    /// Path of the credential file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a credential record already exists on disk
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the stored credential record
    pub async fn load(&self) -> AuthResult<CredentialRecord> {
        let content = fs::read_to_string(&self.path).await?;
        let record: CredentialRecord = serde_json::from_str(&content)
            .map_err(|e| AuthError::Storage(format!("Invalid credential file: {}", e)))?;

        debug!("Loaded credentials from {}", self.path.display());
        Ok(record)
    }

    /// Persist the credential record as pretty-printed JSON
    pub async fn save(&self, record: &CredentialRecord) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json).await?;

        debug!("Saved credentials to {}", self.path.display());
        Ok(())
    }
}
