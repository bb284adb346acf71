use crate::api::{ApiClient, LoginRequest, LoginResponse};
use crate::auth::Session;
use anyhow::{Context, Result};
use base64::prelude::*;
use reqwest::header::HeaderMap;
use std::sync::Arc;

pub const LOGIN_PATH: &str = "login";

/// Submits operator credentials and, on success, hands the granted API key
/// to the session.
pub struct LoginClient {
    api: Arc<ApiClient>,
    session: Arc<Session>,
}

impl LoginClient {
    pub fn new(api: Arc<ApiClient>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    /// The session is only touched after the server has answered with an
    /// API key; any transport or decode failure leaves it unmodified.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        log::info!("Logging in as {}", username);

        let request = LoginRequest {
            username: username.to_string(),
            password: encode_password(password),
        };

        let response: LoginResponse = self
            .api
            .post_entity(LOGIN_PATH, Some(&request), HeaderMap::new())
            .await
            .context("Login request failed")?;

        self.session.set_api_key(response.api_key.clone());
        log::info!("Login succeeded");

        Ok(response)
    }
}

/// Reversible obfuscation of the password for transmission. This is not
/// cryptographic protection; confidentiality has to come from the transport.
pub fn encode_password(password: &str) -> String {
    BASE64_STANDARD.encode(password.as_bytes())
}

pub fn decode_password(encoded: &str) -> Result<String> {
    let bytes = BASE64_STANDARD
        .decode(encoded)
        .context("Password is not valid base64")?;
    String::from_utf8(bytes).context("Decoded password is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CannedResponse, TestServer};

    #[test]
    fn test_password_encoding_round_trips() {
        for password in ["hunter2", "", "pässwörd ✓", "with spaces and / symbols"] {
            assert_eq!(decode_password(&encode_password(password)).unwrap(), password);
        }
        // Non-empty plaintext never goes over the wire as-is.
        assert_ne!(encode_password("hunter2"), "hunter2");
        assert_eq!(encode_password(""), "");
    }

    #[tokio::test]
    async fn test_login_stores_api_key_and_encodes_password() {
        let server = TestServer::start(vec![CannedResponse::new(200, r#"{"apiKey":"k-123"}"#)]);
        let api = Arc::new(ApiClient::new(server.base_url()));
        let session = Arc::new(Session::new());
        let login = LoginClient::new(api, session.clone());

        assert!(!session.is_authenticated());
        let response = login.login("admin", "hunter2").await.unwrap();

        assert_eq!(response.api_key, "k-123");
        assert!(session.is_authenticated());
        assert_eq!(session.api_key().as_deref(), Some("k-123"));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/login");

        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body["username"], "admin");
        assert_eq!(body["password"], encode_password("hunter2"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_untouched() {
        let server = TestServer::start(vec![CannedResponse::new(401, "Unauthorized")]);
        let api = Arc::new(ApiClient::new(server.base_url()));
        let session = Arc::new(Session::new());
        let login = LoginClient::new(api, session.clone());

        let result = login.login("admin", "wrong").await;
        assert!(result.is_err());
        assert!(!session.is_authenticated());
    }
}
