// ABOUTME: PKCE (Proof Key for Code Exchange) for the assistant OAuth flow
// ABOUTME: Random code verifier plus its SHA256 challenge per RFC 7636

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

use crate::oauth::types::PkceChallenge;

// RFC 7636 allows 43-128 characters
const VERIFIER_LENGTH: usize = 64;

/// Generate a PKCE challenge for the OAuth flow
pub fn generate_pkce_challenge() -> PkceChallenge {
    let code_verifier: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(VERIFIER_LENGTH)
        .map(char::from)
        .collect();

    PkceChallenge {
        code_challenge: challenge_for(&code_verifier),
        code_verifier,
        code_challenge_method: "S256".to_string(),
    }
}

/// SHA256 code challenge for a verifier, base64 URL-safe without padding
fn challenge_for(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}
