// ABOUTME: Core type definitions for the assistant OAuth flow
// ABOUTME: Includes the persisted credential record, wire types, and PKCE challenge

use serde::{Deserialize, Serialize};

/// Credential record persisted to `credentials.json`
///
/// Field names are the on-disk format consumed by the assistant daemon,
/// so they must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub token: String,
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
}

/// PKCE challenge for OAuth flow
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    pub code_verifier: String,
    pub code_challenge: String,
    pub code_challenge_method: String, // Usually "S256"
}

/// OAuth authorization code exchange request (form-encoded body)
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenExchangeRequest {
    pub code: String,
    pub code_verifier: String,
    pub redirect_uri: String,
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String, // "authorization_code"
}

/// OAuth token response from the authorization server
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>, // Seconds
    pub token_type: String,
    pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_record_field_names() {
        let record = CredentialRecord {
            token: "ya29.test".to_string(),
            refresh_token: Some("1//refresh".to_string()),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            scopes: vec!["https://www.googleapis.com/auth/assistant-sdk-prototype".to_string()],
        };

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();

        // On-disk format: these exact keys are read back by the daemon
        for key in [
            "token",
            "refresh_token",
            "token_uri",
            "client_id",
            "client_secret",
            "scopes",
        ] {
            assert!(obj.contains_key(key), "missing field {}", key);
        }
        assert_eq!(obj.len(), 6);
    }

    #[test]
    fn test_credential_record_round_trip() {
        let record = CredentialRecord {
            token: "access".to_string(),
            refresh_token: None,
            token_uri: "https://example.com/token".to_string(),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            scopes: vec!["scope-a".to_string(), "scope-b".to_string()],
        };

        let json = serde_json::to_string_pretty(&record).unwrap();
        let parsed: CredentialRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_token_response_parsing() {
        let json = r#"{
            "access_token": "ya29.a0Af",
            "refresh_token": "1//0gtoken",
            "expires_in": 3599,
            "token_type": "Bearer",
            "scope": "https://www.googleapis.com/auth/assistant-sdk-prototype"
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "ya29.a0Af");
        assert_eq!(response.refresh_token.as_deref(), Some("1//0gtoken"));
        assert_eq!(response.expires_in, Some(3599));
        assert_eq!(response.token_type, "Bearer");
    }

    #[test]
    fn test_token_response_without_optional_fields() {
        // Some servers omit refresh_token and expires_in on re-consent
        let json = r#"{"access_token": "tok", "token_type": "Bearer", "scope": null}"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "tok");
        assert!(response.refresh_token.is_none());
        assert!(response.expires_in.is_none());
        assert!(response.scope.is_none());
    }
}
