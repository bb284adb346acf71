use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue};

/// Header carrying the credential on every authenticated request.
pub const API_KEY_HEADER: &str = "api_key";

/// Single-slot in-memory holder for the API key granted at login. At most
/// one credential is active at a time; a new login overwrites the old key.
/// Never persisted beyond the process lifetime.
///
/// Shared as `Arc<Session>`: the login workflow is the only writer, every
/// component issuing authenticated requests reads through `auth_headers`.
#[derive(Default)]
pub struct Session {
    api_key: RwLock<Option<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key(&self, api_key: String) {
        log::info!("Session credential updated");
        *self.api_key.write() = Some(api_key);
    }

    /// Explicit logout: drops the stored credential.
    pub fn clear(&self) {
        log::info!("Session credential cleared");
        *self.api_key.write() = None;
    }

    pub fn api_key(&self) -> Option<String> {
        self.api_key.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.api_key.read().is_some()
    }

    /// Header set for authenticated requests. Before a successful login this
    /// is empty: no `api_key` entry at all, never a placeholder value.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(key) = self.api_key.read().as_deref() {
            match HeaderValue::from_str(key) {
                Ok(value) => {
                    headers.insert(API_KEY_HEADER, value);
                }
                Err(_) => log::warn!("Stored API key is not a valid header value"),
            }
        }
        headers
    }
}
