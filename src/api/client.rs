use crate::api::ApiError;
use crate::settings::Settings;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Typed HTTP access to the tunnel server. Paths are relative to the
/// configured base host; callers supply authorization headers per request.
///
/// The raw operations never interpret the HTTP status code; callers inspect
/// it where relevant. The `_entity` variants decode the response body as
/// JSON and fail if decoding fails. No operation retries.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_settings(&Settings {
            api_host: base_url.into(),
            ..Settings::default()
        })
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: settings.api_host.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str, headers: HeaderMap) -> Result<Response, ApiError> {
        self.send::<()>(Method::GET, path, None, headers).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        headers: HeaderMap,
    ) -> Result<Response, ApiError> {
        self.send(Method::POST, path, body, headers).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        headers: HeaderMap,
    ) -> Result<Response, ApiError> {
        self.send(Method::PUT, path, body, headers).await
    }

    pub async fn get_entity<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: HeaderMap,
    ) -> Result<T, ApiError> {
        let response = self.get(path, headers).await?;
        Self::decode(response).await
    }

    pub async fn post_entity<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
        headers: HeaderMap,
    ) -> Result<T, ApiError> {
        let response = self.post(path, body, headers).await?;
        Self::decode(response).await
    }

    pub async fn put_entity<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
        headers: HeaderMap,
    ) -> Result<T, ApiError> {
        let response = self.put(path, body, headers).await?;
        Self::decode(response).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: HeaderMap,
    ) -> Result<Response, ApiError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        log::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url.as_str()).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|source| ApiError::Transport { url, source })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let url = response.url().to_string();
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}
