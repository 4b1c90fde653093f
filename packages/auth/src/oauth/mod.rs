// ABOUTME: OAuth module implementing the assistant authorization-code flow
// ABOUTME: Includes PKCE, client-secret parsing, the callback listener, and code exchange

pub mod client_secret;
pub mod flow;
pub mod pkce;
pub mod server;
pub mod types;

pub use client_secret::ClientSecret;
pub use flow::FlowRunner;
pub use server::ListenerServer;
pub use types::{CredentialRecord, PkceChallenge, TokenResponse};
