// ABOUTME: Error types for the assistant OAuth flow
// ABOUTME: Covers descriptor parsing, callback handling, code exchange, and storage

use std::path::PathBuf;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Client secret file not found: {0}")]
    ClientSecretNotFound(PathBuf),

    #[error("Invalid client secret descriptor: {0}")]
    InvalidClientSecret(String),

    #[error("OAuth authentication failed: {0}")]
    OAuthFailed(String),

    #[error("No authorization code provided")]
    MissingAuthCode,

    #[error("State mismatch: CSRF protection failed")]
    StateMismatch,

    #[error("Callback server error: {0}")]
    CallbackServer(String),

    #[error("Failed to open browser: {0}")]
    BrowserOpen(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
