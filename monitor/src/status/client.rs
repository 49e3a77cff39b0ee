//! Shared HTTP client for node API calls

use anyhow::{anyhow, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::types::HostDescriptor;
use crate::constants::limits::MAX_RESPONSE_BYTES;
use crate::errors::FetchError;

/// Thin wrapper around `reqwest::Client` that classifies node responses.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: HttpClient,
}

impl NodeClient {
    /// Client with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self { http })
    }

    /// GET `path` on `host` and parse the 200 body as JSON.
    ///
    /// Bodies larger than `MAX_RESPONSE_BYTES` are rejected as `Decode`.
    pub async fn get_json(
        &self,
        host: &HostDescriptor,
        path: &str,
        headers: HeaderMap,
    ) -> Result<Value, FetchError> {
        let url = host.endpoint(path);
        debug!("GET {}", url);

        let mut response = self.http.get(&url).headers(headers).send().await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::FORBIDDEN => return Err(FetchError::Forbidden),
            status => {
                return Err(FetchError::Status {
                    code: status.as_u16(),
                })
            }
        }

        if response
            .content_length()
            .is_some_and(|length| length > MAX_RESPONSE_BYTES as u64)
        {
            return Err(oversized_body());
        }

        // Content-Length may be absent or wrong, so the limit is enforced while reading
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > MAX_RESPONSE_BYTES {
                return Err(oversized_body());
            }
            body.extend_from_slice(&chunk);
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

fn oversized_body() -> FetchError {
    FetchError::Decode {
        reason: format!("response body exceeds {} bytes", MAX_RESPONSE_BYTES),
    }
}

/// Read an unsigned integer at a JSON pointer such as `/data/height`
pub fn extract_u64(body: &Value, pointer: &'static str) -> Result<u64, FetchError> {
    body.pointer(pointer)
        .and_then(Value::as_u64)
        .ok_or(FetchError::MissingField { field: pointer })
}

/// Read an array at a JSON pointer, taking ownership of its elements
pub fn extract_array(mut body: Value, pointer: &'static str) -> Result<Vec<Value>, FetchError> {
    match body.pointer_mut(pointer).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(FetchError::MissingField { field: pointer }),
    }
}
