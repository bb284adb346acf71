// Session-aware client core for the CNC tunnel admin panel: authenticated
// request plumbing, the session store, status polling, and the
// configuration update workflow. Rendering and routing live with the host.

pub mod api;
pub mod auth;
pub mod configuration;
pub mod settings;
pub mod status;

pub use api::{ApiClient, ApiError, Configuration, LoginRequest, LoginResponse, Status};
pub use auth::{decode_password, encode_password, LoginClient, Session, API_KEY_HEADER, LOGIN_PATH};
pub use configuration::{ConfigurationClient, SubmitOutcome, CONFIGURATION_PATH};
pub use settings::Settings;
pub use status::{PollerState, StatusPoller, STATUS_PATH};

#[cfg(test)]
pub(crate) mod test_support;
