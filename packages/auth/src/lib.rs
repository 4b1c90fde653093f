// ABOUTME: Hearth authentication library providing the assistant OAuth flow
// ABOUTME: Covers client-secret parsing, PKCE, code exchange, and credential storage

pub mod error;
pub mod oauth;
pub mod storage;

// Re-export main types
pub use error::{AuthError, AuthResult};
pub use oauth::{
    ClientSecret, CredentialRecord, FlowRunner, ListenerServer, PkceChallenge, TokenResponse,
};
pub use storage::CredentialStore;
