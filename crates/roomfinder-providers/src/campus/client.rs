//! HTTP client for the campus API gateway.
//!
//! Every request carries the application token (`X-ApplicationId`), the
//! endpoint's `API-Version` and the requested language. Both endpoints we
//! use answer with a JSON array of records.

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use tracing::{trace, warn};

use crate::error::{ProviderError, ProviderErrorCode, ProviderResult};

use super::config::CampusApiConfig;

/// HTTP client for the campus API.
pub struct CampusApiClient {
    client: Client,
    config: CampusApiConfig,
}

impl CampusApiClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: CampusApiConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::network(format!("Failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self { client, config })
    }

    /// Fetches `path` and returns the records of the JSON array it answers
    /// with.
    pub async fn get_records(&self, path: &str, api_version: &str) -> ProviderResult<Vec<Value>> {
        let token = self
            .config
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProviderError::configuration("No campus API token configured"))?;

        let url = self.config.endpoint(path).map_err(|e| {
            ProviderError::configuration(format!("Invalid endpoint {}: {}", path, e))
        })?;

        trace!(url = %url, api_version, "Sending request");

        let response = self
            .client
            .get(url)
            .header("X-ApplicationId", token)
            .header("API-Version", api_version)
            .header("X-RequestedLanguage", &self.config.language)
            .send()
            .await
            .map_err(map_send_error)?;

        let body = self.handle_response(response).await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(other) => Err(ProviderError::invalid_response(format!(
                "Expected a JSON array, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(
                ProviderError::invalid_response(format!("Response is not JSON: {}", e))
                    .with_source(e),
            ),
        }
    }

    /// Handles the HTTP response and extracts the body.
    async fn handle_response(&self, response: Response) -> ProviderResult<String> {
        let status = response.status();
        trace!(status = %status, "Received response");

        if status == StatusCode::OK {
            return response.text().await.map_err(|e| {
                ProviderError::network(format!("Failed to read response: {}", e)).with_source(e)
            });
        }

        let body = response.text().await.unwrap_or_default();
        let error = ProviderError::from_status(status.as_u16(), &body);
        if error.code() == ProviderErrorCode::InvalidResponse {
            warn!(status = %status, body = %body, "Unexpected response status");
        }
        Err(error)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CampusApiConfig {
        &self.config
    }
}

fn map_send_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::timeout(format!("Request timed out: {}", e)).with_source(e)
    } else {
        ProviderError::network(format!("Request failed: {}", e)).with_source(e)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
