//! Dialect adapter interface shared by the generic, Lisk and Ark v2 node APIs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::Future;

use super::diagnostics::Diagnostics;
use super::types::{CallKind, CallOutcome, HostDescriptor};
use crate::errors::FetchError;

/// Node API protocol variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Generic,
    /// Lisk 1.0 style API
    Lisk,
    /// Ark v2 style API, requires the `API-Version: 2` header
    #[serde(rename = "arkv2")]
    ArkV2,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Generic => "generic",
            Dialect::Lisk => "lisk",
            Dialect::ArkV2 => "arkv2",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three raw calls of one node API dialect.
///
/// Implementations never fail: every transport or protocol error is reported
/// to the diagnostics sink and degraded to a `CallOutcome` or an empty list.
pub trait NodeApi: Send + Sync {
    fn dialect(&self) -> Dialect;

    fn fetch_block_height(
        &self,
        host: &HostDescriptor,
    ) -> impl Future<Output = CallOutcome<u64>> + Send;

    /// Dialects without a version endpoint report `Skipped`
    fn fetch_version(
        &self,
        _host: &HostDescriptor,
    ) -> impl Future<Output = CallOutcome<String>> + Send {
        async { CallOutcome::Skipped }
    }

    /// Raw peer payloads; empty on any failure
    fn fetch_peers(&self, host: &HostDescriptor) -> impl Future<Output = Vec<Value>> + Send;
}

/// Report a failed call and classify it
pub(crate) fn classify<T>(
    result: Result<T, FetchError>,
    host: &HostDescriptor,
    kind: CallKind,
    diagnostics: &dyn Diagnostics,
) -> CallOutcome<T> {
    if let Err(error) = &result {
        diagnostics.call_failed(host, kind, error);
    }
    CallOutcome::from_fetch(result)
}

/// Peers have no sentinel distinction: any failure is an empty list
pub(crate) fn peers_or_empty(
    result: Result<Vec<Value>, FetchError>,
    host: &HostDescriptor,
    diagnostics: &dyn Diagnostics,
) -> Vec<Value> {
    result.unwrap_or_else(|error| {
        diagnostics.call_failed(host, CallKind::Peers, &error);
        Vec::new()
    })
}
