//! Ark v2 node API: like Lisk, but versioned by header and height read from `data.now`

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;

use super::client::{extract_array, extract_u64, NodeClient};
use super::diagnostics::Diagnostics;
use super::dialect::{classify, peers_or_empty, Dialect, NodeApi};
use super::types::{CallKind, CallOutcome, HostDescriptor};
use crate::constants::http::ARKV2_API_VERSION;

pub const STATUS_PATH: &str = "/api/node/status";
pub const PEERS_PATH: &str = "/api/peers?limit=100&offset=0";

// HeaderName::from_static only accepts lowercase; sent as `api-version`
const API_VERSION: HeaderName = HeaderName::from_static("api-version");

pub struct ArkV2Api {
    client: NodeClient,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ArkV2Api {
    pub fn new(client: NodeClient, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            client,
            diagnostics,
        }
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_VERSION, HeaderValue::from_static(ARKV2_API_VERSION));
        headers
    }
}

impl NodeApi for ArkV2Api {
    fn dialect(&self) -> Dialect {
        Dialect::ArkV2
    }

    async fn fetch_block_height(&self, host: &HostDescriptor) -> CallOutcome<u64> {
        let result = self
            .client
            .get_json(host, STATUS_PATH, Self::headers())
            .await
            .and_then(|body| extract_u64(&body, "/data/now"));
        classify(result, host, CallKind::BlockHeight, self.diagnostics.as_ref())
    }

    async fn fetch_peers(&self, host: &HostDescriptor) -> Vec<Value> {
        let result = self
            .client
            .get_json(host, PEERS_PATH, Self::headers())
            .await
            .and_then(|body| extract_array(body, "/data"));
        peers_or_empty(result, host, self.diagnostics.as_ref())
    }
}
