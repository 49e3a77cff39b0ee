//! Lisk 1.0 node API: `{data: {...}}` bodies, no success flag, no version call

use reqwest::header::HeaderMap;
use serde_json::Value;
use std::sync::Arc;

use super::client::{extract_array, extract_u64, NodeClient};
use super::diagnostics::Diagnostics;
use super::dialect::{classify, peers_or_empty, Dialect, NodeApi};
use super::types::{CallKind, CallOutcome, HostDescriptor};

pub const STATUS_PATH: &str = "/api/node/status";
pub const PEERS_PATH: &str = "/api/peers?limit=100&offset=0&sort=height:desc";

pub struct LiskApi {
    client: NodeClient,
    diagnostics: Arc<dyn Diagnostics>,
}

impl LiskApi {
    pub fn new(client: NodeClient, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            client,
            diagnostics,
        }
    }
}

impl NodeApi for LiskApi {
    fn dialect(&self) -> Dialect {
        Dialect::Lisk
    }

    async fn fetch_block_height(&self, host: &HostDescriptor) -> CallOutcome<u64> {
        let result = self
            .client
            .get_json(host, STATUS_PATH, HeaderMap::new())
            .await
            .and_then(|body| extract_u64(&body, "/data/height"));
        classify(result, host, CallKind::BlockHeight, self.diagnostics.as_ref())
    }

    async fn fetch_peers(&self, host: &HostDescriptor) -> Vec<Value> {
        let result = self
            .client
            .get_json(host, PEERS_PATH, HeaderMap::new())
            .await
            .and_then(|body| extract_array(body, "/data"));
        peers_or_empty(result, host, self.diagnostics.as_ref())
    }
}
