//! TMDb API gateway.
//!
//! One outbound GET per call. Credentials and default parameters are attached
//! here and every transport or status failure is mapped to an [`ApiError`].
//! Nothing is retried.

use crate::error::{ApiError, ApiResult};
use crate::models::config::TmdbConfig;
use crate::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Query parameters in send order.
pub type QueryParams = Vec<(String, String)>;

/// Parameters the gateway always sets itself.
pub const RESERVED_PARAMS: [&str; 3] = ["api_key", "language", "include_adult"];

/// Upstream access used by the tool handlers and the genre cache.
///
/// [`TmdbClient`] is the real implementation; tests substitute a stub.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// GET `endpoint` (relative to the API base) with extra query parameters.
    async fn request(&self, endpoint: &str, params: QueryParams) -> ApiResult<Value>;
}

/// Request `endpoint` and decode the body into a typed record.
pub async fn fetch<T: DeserializeOwned>(
    gateway: &dyn Gateway,
    endpoint: &str,
    params: QueryParams,
) -> ApiResult<T> {
    let body = gateway.request(endpoint, params).await?;
    serde_json::from_value(body)
        .map_err(|e| ApiError::Unexpected(format!("malformed response from {}: {}", endpoint, e)))
}

/// TMDb API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDb client. The HTTP client is built once and reused.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("movie-tv-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    /// Build the final query: caller extras minus reserved keys, then the
    /// fixed credential, language and adult-content parameters.
    pub fn build_query(&self, api_key: &str, extras: QueryParams) -> QueryParams {
        let mut query: QueryParams = extras
            .into_iter()
            .filter(|(key, _)| {
                let reserved = RESERVED_PARAMS.contains(&key.as_str());
                if reserved {
                    tracing::warn!("Dropping caller-supplied reserved parameter {:?}", key);
                }
                !reserved
            })
            .collect();

        query.push(("api_key".to_string(), api_key.to_string()));
        query.push(("language".to_string(), self.config.language.clone()));
        query.push((
            "include_adult".to_string(),
            self.config.include_adult.to_string(),
        ));
        query
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.config.timeout)
        } else if err.is_decode() {
            ApiError::Unexpected(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl Gateway for TmdbClient {
    async fn request(&self, endpoint: &str, params: QueryParams) -> ApiResult<Value> {
        let api_key = match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ApiError::NotConfigured),
        };

        tracing::debug!(endpoint, params = ?params, "TMDb request");

        let url = format!("{}{}", self.config.base_url, endpoint);
        let query = self.build_query(api_key, params);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let err = ApiError::from_status(status);
            tracing::warn!(endpoint, status = status.as_u16(), "TMDb request failed: {}", err);
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Unexpected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_strips_reserved_keys() {
        let client = TmdbClient::new(TmdbConfig::with_api_key("real-key")).unwrap();
        let query = client.build_query(
            "real-key",
            vec![
                ("query".to_string(), "Alien".to_string()),
                ("api_key".to_string(), "spoofed".to_string()),
                ("language".to_string(), "fr-FR".to_string()),
            ],
        );

        assert_eq!(
            query,
            vec![
                ("query".to_string(), "Alien".to_string()),
                ("api_key".to_string(), "real-key".to_string()),
                ("language".to_string(), "en-US".to_string()),
                ("include_adult".to_string(), "false".to_string()),
            ]
        );
    }
}
