use serde::{Deserialize, Serialize};

// Wire types for the tunnel admin API. Field names on the wire are
// camelCase, matching what the server serializes.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    /// Base64-encoded before it gets here, see `auth::encode_password`.
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub api_key: String,
}

/// Desired/persisted tunnel server settings. Replaced wholesale by the
/// server's copy after every successful fetch, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub server_name: String,
    pub server_password: String,
    pub admin_username: String,
    pub admin_password: String,
    pub max_clients: u32,
    pub port: u16,
    pub tunnel_enabled: bool,
}

/// Point-in-time runtime snapshot. A new instance replaces the previous
/// one on every poll tick, never merged with the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub slots_free: u32,
    pub slots_in_use: u32,
    #[serde(default)]
    pub server_log: Vec<String>,
}

impl Status {
    /// Appends a line terminator to every log line so each one renders on
    /// its own row. An empty log is left untouched.
    pub fn terminate_log_lines(&mut self) {
        for line in &mut self.server_log {
            line.push('\n');
        }
    }
}
