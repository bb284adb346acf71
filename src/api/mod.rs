mod client;
mod types;

pub use client::ApiClient;
pub use types::{Configuration, LoginRequest, LoginResponse, Status};

use thiserror::Error;

/// Failure at the request client boundary. Transport covers DNS, connect,
/// timeout and send errors; Decode covers a body that is not valid JSON
/// for the expected type. Application-level non-2xx statuses are not
/// errors here; callers inspect the status where it matters.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        source: reqwest::Error,
    },
}
