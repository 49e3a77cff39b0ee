//! Generic node API: `{success, <field>}` envelopes

use reqwest::header::HeaderMap;
use serde_json::Value;
use std::sync::Arc;

use super::client::NodeClient;
use super::diagnostics::Diagnostics;
use super::dialect::{classify, peers_or_empty, Dialect, NodeApi};
use super::types::{CallKind, CallOutcome, HostDescriptor};
use crate::errors::FetchError;

pub const HEIGHT_PATH: &str = "/api/blocks/getHeight";
pub const VERSION_PATH: &str = "/api/peers/version";
pub const PEERS_PATH: &str = "/api/peers";

pub struct GenericApi {
    client: NodeClient,
    diagnostics: Arc<dyn Diagnostics>,
}

impl GenericApi {
    pub fn new(client: NodeClient, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            client,
            diagnostics,
        }
    }

    /// Fetch `path` and unwrap `field` from the success envelope
    async fn fetch_field(
        &self,
        host: &HostDescriptor,
        path: &str,
        field: &'static str,
    ) -> Result<Value, FetchError> {
        let mut body = self.client.get_json(host, path, HeaderMap::new()).await?;

        let success = body.get("success").and_then(Value::as_bool);
        match success {
            Some(true) => body
                .get_mut(field)
                .map(Value::take)
                .ok_or(FetchError::MissingField { field }),
            Some(false) => Err(FetchError::Rejected),
            None => Err(FetchError::MissingField { field: "success" }),
        }
    }
}

impl NodeApi for GenericApi {
    fn dialect(&self) -> Dialect {
        Dialect::Generic
    }

    async fn fetch_block_height(&self, host: &HostDescriptor) -> CallOutcome<u64> {
        let result = self
            .fetch_field(host, HEIGHT_PATH, "height")
            .await
            .and_then(|height| {
                height
                    .as_u64()
                    .ok_or(FetchError::MissingField { field: "height" })
            });
        classify(result, host, CallKind::BlockHeight, self.diagnostics.as_ref())
    }

    async fn fetch_version(&self, host: &HostDescriptor) -> CallOutcome<String> {
        let result = self
            .fetch_field(host, VERSION_PATH, "version")
            .await
            .and_then(|version| match version {
                Value::String(version) => Ok(version),
                _ => Err(FetchError::MissingField { field: "version" }),
            });
        classify(result, host, CallKind::Version, self.diagnostics.as_ref())
    }

    async fn fetch_peers(&self, host: &HostDescriptor) -> Vec<Value> {
        let result = self
            .fetch_field(host, PEERS_PATH, "peers")
            .await
            .and_then(|peers| match peers {
                Value::Array(peers) => Ok(peers),
                _ => Err(FetchError::MissingField { field: "peers" }),
            });
        peers_or_empty(result, host, self.diagnostics.as_ref())
    }
}
