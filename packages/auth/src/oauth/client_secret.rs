// ABOUTME: Client-secret descriptor parsing for the assistant OAuth flow
// ABOUTME: Accepts the console-downloaded JSON with an "installed" or "web" wrapper

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AuthError, AuthResult};

fn default_auth_uri() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// OAuth client registration loaded from a client-secret descriptor file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

/// Wrapper object as downloaded from the cloud console
#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl ClientSecret {
    /// Load the descriptor from disk
    ///
    /// A missing file is reported as its own error variant so the CLI can
    /// fail before any prompt is shown.
    pub fn load(path: &Path) -> AuthResult<Self> {
        if !path.is_file() {
            return Err(AuthError::ClientSecretNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse descriptor JSON, unwrapping the `installed`/`web` envelope
    pub fn parse(content: &str) -> AuthResult<Self> {
        let file: ClientSecretFile = serde_json::from_str(content)
            .map_err(|e| AuthError::InvalidClientSecret(e.to_string()))?;

        file.installed.or(file.web).ok_or_else(|| {
            AuthError::InvalidClientSecret(
                "expected an \"installed\" or \"web\" client entry".to_string(),
            )
        })
    }
}
