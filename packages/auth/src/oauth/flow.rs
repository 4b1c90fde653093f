// ABOUTME: OAuth flow runner orchestrating the assistant authorization-code grant
// ABOUTME: Builds the consent URL, collects the code, and exchanges it for tokens

use reqwest::Client;
use tracing::{debug, error, info};
use url::Url;
use uuid::Uuid;

use crate::{
    error::{AuthError, AuthResult},
    oauth::{
        client_secret::ClientSecret,
        pkce::generate_pkce_challenge,
        server::ListenerServer,
        types::{CredentialRecord, PkceChallenge, TokenExchangeRequest, TokenResponse},
    },
};
use hearth_config::{ASSISTANT_SCOPE, OOB_REDIRECT_URI};

/// Runner for the assistant authorization-code flow
pub struct FlowRunner {
    secret: ClientSecret,
    scopes: Vec<String>,
    client: Client,
}

impl FlowRunner {
    /// Create a flow runner requesting the assistant scope
    pub fn new(secret: ClientSecret) -> Self {
        Self::with_scopes(secret, vec![ASSISTANT_SCOPE.to_string()])
    }

    /// Create a flow runner with explicit scopes
    pub fn with_scopes(secret: ClientSecret, scopes: Vec<String>) -> Self {
        Self {
            secret,
            scopes,
            client: Client::new(),
        }
    }

    /// Authenticate via the localhost redirect listener
    ///
    /// Opens the browser for consent, waits for the redirect, validates the
    /// CSRF state, and exchanges the code for tokens.
    pub async fn authenticate_via_listener(&self, port: u16) -> AuthResult<CredentialRecord> {
        let pkce = generate_pkce_challenge();
        let expected_state = Uuid::new_v4().to_string();
        debug!("Generated PKCE challenge and state parameter");

        let server = ListenerServer::with_port(port);
        let redirect_uri = server.redirect_uri();
        let auth_url = self.authorization_url(&redirect_uri, &pkce, Some(&expected_state))?;

        info!("Opening browser for authorization");
        println!("If the browser doesn't open automatically, visit:");
        println!("  {}", auth_url);
        println!();

        if let Err(e) = open::that(&auth_url) {
            // Not fatal: the URL is printed above for manual use
            error!("Failed to open browser: {}", e);
        }

        let (code, returned_state) = server.wait_for_callback().await?;

        if returned_state != expected_state {
            error!("State mismatch in OAuth callback");
            return Err(AuthError::StateMismatch);
        }

        info!("State validated, exchanging authorization code");
        self.exchange_code(&code, &redirect_uri, &pkce.code_verifier)
            .await
    }

    /// Start the manual (copy-paste) variant of the flow
    ///
    /// Returns the consent URL to print and the PKCE challenge whose
    /// verifier must accompany the pasted code in [`Self::exchange_code`].
    pub fn manual_authorization(&self) -> AuthResult<(String, PkceChallenge)> {
        let pkce = generate_pkce_challenge();
        let auth_url = self.authorization_url(OOB_REDIRECT_URI, &pkce, None)?;
        Ok((auth_url, pkce))
    }

    /// Build the authorization URL for user consent
    pub fn authorization_url(
        &self,
        redirect_uri: &str,
        pkce: &PkceChallenge,
        state: Option<&str>,
    ) -> AuthResult<String> {
        let mut url = Url::parse(&self.secret.auth_uri)
            .map_err(|e| AuthError::Configuration(format!("Invalid auth URL: {}", e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("client_id", &self.secret.client_id)
                .append_pair("redirect_uri", redirect_uri)
                .append_pair("response_type", "code")
                .append_pair("scope", &self.scopes.join(" "))
                .append_pair("code_challenge", &pkce.code_challenge)
                .append_pair("code_challenge_method", &pkce.code_challenge_method)
                // Offline access with forced consent, or no refresh token comes back
                .append_pair("access_type", "offline")
                .append_pair("prompt", "consent");

            if let Some(state) = state {
                pairs.append_pair("state", state);
            }
        }

        Ok(url.to_string())
    }

    /// Exchange an authorization code for tokens
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
        code_verifier: &str,
    ) -> AuthResult<CredentialRecord> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AuthError::MissingAuthCode);
        }

        let request = TokenExchangeRequest {
            code: code.to_string(),
            code_verifier: code_verifier.to_string(),
            redirect_uri: redirect_uri.to_string(),
            client_id: self.secret.client_id.clone(),
            client_secret: self.secret.client_secret.clone(),
            grant_type: "authorization_code".to_string(),
        };

        // The token endpoint only accepts application/x-www-form-urlencoded
        let response = self
            .client
            .post(&self.secret.token_uri)
            .form(&request)
            .send()
            .await
            .map_err(|e| AuthError::TokenExchange(format!("Failed to exchange code: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            // Don't leak the response body, it can echo the code back
            error!("Token exchange failed with status {}", status);
            return Err(AuthError::TokenExchange(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            AuthError::TokenExchange(format!("Failed to parse token response: {}", e))
        })?;

        info!("Successfully exchanged authorization code for tokens");
        Ok(self.credential_record(token_response))
    }

    /// Assemble the persisted credential record from a token response
    fn credential_record(&self, response: TokenResponse) -> CredentialRecord {
        let scopes = match response.scope.as_deref() {
            Some(granted) if !granted.trim().is_empty() => granted
                .split_whitespace()
                .map(|s| s.to_string())
                .collect(),
            _ => self.scopes.clone(),
        };

        CredentialRecord {
            token: response.access_token,
            refresh_token: response.refresh_token,
            token_uri: self.secret.token_uri.clone(),
            client_id: self.secret.client_id.clone(),
            client_secret: self.secret.client_secret.clone(),
            scopes,
        }
    }
}
