use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracker_logging::tracker_debug;
use url::Url;

use crate::{ApiError, FailureKind, ResourceQuery, ResourceRecord, SavedSearchRecord, SearchId};

pub const SAVED_SEARCHES_PATH: &str = "api/savedsearches";
pub const RESOURCES_FOR_SEARCHES_PATH: &str = "api/resources_for_searches";

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Root of the hosting application; endpoint paths are resolved against it.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn list_saved_searches(&self) -> Result<Vec<SavedSearchRecord>, ApiError>;

    async fn resources_for_searches(
        &self,
        search_ids: &[SearchId],
    ) -> Result<Vec<ResourceRecord>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: ApiSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes).map_err(|err| ApiError::new(FailureKind::Parse, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ApiClient for ReqwestApiClient {
    async fn list_saved_searches(&self) -> Result<Vec<SavedSearchRecord>, ApiError> {
        let url = self.endpoint(SAVED_SEARCHES_PATH)?;
        tracker_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_json(response).await
    }

    async fn resources_for_searches(
        &self,
        search_ids: &[SearchId],
    ) -> Result<Vec<ResourceRecord>, ApiError> {
        let url = self.endpoint(RESOURCES_FOR_SEARCHES_PATH)?;
        let body = serde_json::to_vec(&ResourceQuery { search_ids })
            .map_err(|err| ApiError::new(FailureKind::Parse, err.to_string()))?;
        tracker_debug!("POST {} search_ids={:?}", url, search_ids);
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.read_json(response).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut base =
        Url::parse(raw).map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(ApiError::new(FailureKind::InvalidUrl, format!("{raw} cannot be a base url")));
    }
    // Relative endpoint paths must land below the configured root.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> ApiError {
    ApiError::new(FailureKind::TooLarge { max_bytes, actual }, "response too large")
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> ReqwestApiClient {
        ReqwestApiClient::new(ApiSettings {
            base_url: base.to_string(),
            ..ApiSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoints_resolve_against_root() {
        let client = client_for("http://localhost:5000");
        assert_eq!(
            client.endpoint(SAVED_SEARCHES_PATH).unwrap().as_str(),
            "http://localhost:5000/api/savedsearches"
        );
    }

    #[test]
    fn endpoints_resolve_below_mount_prefix() {
        let client = client_for("http://localhost:5000/tracker");
        assert_eq!(
            client.endpoint(RESOURCES_FOR_SEARCHES_PATH).unwrap().as_str(),
            "http://localhost:5000/tracker/api/resources_for_searches"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ReqwestApiClient::new(ApiSettings {
            base_url: "not a url".to_string(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
