// ABOUTME: Localhost listener for the OAuth authorization redirect
// ABOUTME: Accepts a single callback request and extracts the code and state

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};
use tracing::{debug, error, info};

use crate::error::{AuthError, AuthResult};
use hearth_config::DEFAULT_CALLBACK_PORT;

/// Redirect listener for the authorization-code callback
pub struct ListenerServer {
    port: u16,
}

impl Default for ListenerServer {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerServer {
    pub fn new() -> Self {
        Self {
            port: DEFAULT_CALLBACK_PORT,
        }
    }

    pub fn with_port(port: u16) -> Self {
        Self { port }
    }

    /// Get the redirect URI registered for this listener
    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}/oauth/callback", self.port)
    }

    /// Start the listener and wait for the OAuth redirect
    ///
    /// Blocks until a single request arrives. Returns the authorization
    /// code and the state parameter echoed back by the provider.
    pub async fn wait_for_callback(&self) -> AuthResult<(String, String)> {
        let addr = format!("127.0.0.1:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AuthError::CallbackServer(format!("Failed to bind to {}: {}", addr, e)))?;

        info!("Waiting for OAuth callback on {}", addr);

        // One redirect is all the flow produces
        let (mut stream, peer_addr) = listener.accept().await.map_err(|e| {
            AuthError::CallbackServer(format!("Failed to accept connection: {}", e))
        })?;

        debug!("Received connection from {}", peer_addr);

        let mut buffer = vec![0; 2048];
        let n = stream
            .read(&mut buffer)
            .await
            .map_err(|e| AuthError::CallbackServer(format!("Failed to read request: {}", e)))?;

        let request = String::from_utf8_lossy(&buffer[..n]);

        if let (Some(code), Some(state)) = (
            extract_query_param(&request, "code"),
            extract_query_param(&request, "state"),
        ) {
            let response = success_response();
            if let Err(e) = stream.write_all(response.as_bytes()).await {
                error!("Failed to send success response: {}", e);
            }

            info!("Received authorization code from callback");
            Ok((code, state))
        } else if let Some(error_msg) = extract_query_param(&request, "error") {
            let response = error_response(&error_msg);
            let _ = stream.write_all(response.as_bytes()).await;

            Err(AuthError::OAuthFailed(format!(
                "Provider error: {}",
                error_msg
            )))
        } else {
            let response = error_response("No authorization code found in request");
            let _ = stream.write_all(response.as_bytes()).await;

            Err(AuthError::CallbackServer(
                "No authorization code or state found in callback".to_string(),
            ))
        }
    }
}

/// Extract a query parameter from the request line of an HTTP request
///
/// Values are percent-decoded: authorization codes are `4/0A…` shaped,
/// so the redirect always delivers them percent-encoded.
fn extract_query_param(request: &str, name: &str) -> Option<String> {
    let first_line = request.lines().next()?;
    let target = first_line.split_whitespace().nth(1)?;
    let (_, query) = target.split_once('?')?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn success_response() -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
        SUCCESS_HTML.len(),
        SUCCESS_HTML
    )
}

fn error_response(error_msg: &str) -> String {
    let html = format!(
        r#"<html><body><h1>Authorization failed</h1><p>{}</p><p>You can close this tab and return to your terminal.</p></body></html>"#,
        error_msg
    );
    format!(
        "HTTP/1.1 400 Bad Request\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
        html.len(),
        html
    )
}

const SUCCESS_HTML: &str = r#"<html>
<head>
    <title>Hearth Setup</title>
    <style>
        body { font-family: system-ui, -apple-system, sans-serif; max-width: 600px; margin: 100px auto; text-align: center; }
        h1 { color: #22c55e; }
        p { color: #64748b; }
    </style>
</head>
<body>
    <h1>Authorization complete</h1>
    <p>Hearth received your authorization code.</p>
    <p>You can close this tab and return to your terminal.</p>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_code() {
        let request =
            "GET /oauth/callback?code=abc123&state=xyz789 HTTP/1.1\r\nHost: localhost:7337\r\n";
        assert_eq!(
            extract_query_param(request, "code"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_state() {
        let request =
            "GET /oauth/callback?code=abc123&state=xyz789 HTTP/1.1\r\nHost: localhost:7337\r\n";
        assert_eq!(
            extract_query_param(request, "state"),
            Some("xyz789".to_string())
        );
    }

    #[test]
    fn test_extract_state_as_first_param() {
        let request =
            "GET /oauth/callback?state=xyz789&code=abc123 HTTP/1.1\r\nHost: localhost:7337\r\n";
        assert_eq!(
            extract_query_param(request, "state"),
            Some("xyz789".to_string())
        );
    }

    #[test]
    fn test_extract_decodes_percent_encoding() {
        // Real authorization codes contain a slash
        let request =
            "GET /oauth/callback?code=4%2F0AeanSxyz&state=st%3D1 HTTP/1.1\r\nHost: localhost:7337\r\n";
        assert_eq!(
            extract_query_param(request, "code"),
            Some("4/0AeanSxyz".to_string())
        );
        assert_eq!(
            extract_query_param(request, "state"),
            Some("st=1".to_string())
        );
    }

    #[test]
    fn test_extract_no_params() {
        let request = "GET /oauth/callback HTTP/1.1\r\nHost: localhost:7337\r\n";
        assert_eq!(extract_query_param(request, "code"), None);
    }

    #[test]
    fn test_extract_error() {
        let request = "GET /oauth/callback?error=access_denied HTTP/1.1\r\n";
        assert_eq!(
            extract_query_param(request, "error"),
            Some("access_denied".to_string())
        );
    }

    #[test]
    fn test_redirect_uri() {
        let server = ListenerServer::new();
        assert_eq!(server.redirect_uri(), "http://localhost:7337/oauth/callback");

        let server = ListenerServer::with_port(8080);
        assert_eq!(server.redirect_uri(), "http://localhost:8080/oauth/callback");
    }
}
