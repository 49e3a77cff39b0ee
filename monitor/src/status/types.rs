//! Status types: host descriptors, group inputs, call outcomes and reports

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use super::dialect::Dialect;
use crate::constants::{limits, sentinels};
use crate::errors::{FetchError, PollError};

/// A node to poll: display name plus complete base URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDescriptor {
    pub name: String,
    pub address: String,
}

impl HostDescriptor {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Build a descriptor for a bare host/ip and port as `http://host:port`
    pub fn from_endpoint(name: &str, host: &str, port: u16) -> Self {
        Self::new(name, format!("http://{}:{}", host, port))
    }

    /// Check that the descriptor names a pollable http(s) base URL
    pub fn validate(&self) -> Result<(), PollError> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("empty host name"));
        }

        let url = Url::parse(&self.address).map_err(|e| self.invalid(&e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(self.invalid(&format!("unsupported scheme '{}'", other))),
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(self.invalid("missing host"));
        }

        Ok(())
    }

    /// Full request URL for a dialect path (path carries its own leading `/`)
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.address.trim_end_matches('/'), path)
    }

    fn invalid(&self, reason: &str) -> PollError {
        PollError::InvalidDescriptor {
            name: self.name.clone(),
            reason: format!("{} ({})", reason, self.address),
        }
    }
}

/// An input entry of one status group
pub trait GroupEntry {
    /// Name used in diagnostics when the entry fails
    fn label(&self) -> &str;

    fn to_descriptor(&self) -> Result<HostDescriptor, PollError>;
}

/// Explicitly configured base host, already carrying a full URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseHostEntry {
    pub name: String,
    pub host: String,
}

/// Peer record as configured or discovered: ip and port only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRecord {
    pub name: String,
    pub ip: String,
    #[serde(deserialize_with = "port_from_number_or_string")]
    pub port: u16,
}

/// Node tracked for alerting, supplied by discovery outside the poller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredNode {
    pub name: String,
    pub host: String,
    #[serde(deserialize_with = "port_from_number_or_string")]
    pub port: u16,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortRepr {
    Number(u16),
    Text(String),
}

/// Ports are written as integers or, as some peer lists do, numeric strings
fn port_from_number_or_string<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match PortRepr::deserialize(deserializer)? {
        PortRepr::Number(port) => Ok(port),
        PortRepr::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid port '{}'", text))),
    }
}

impl GroupEntry for BaseHostEntry {
    fn label(&self) -> &str {
        &self.name
    }

    fn to_descriptor(&self) -> Result<HostDescriptor, PollError> {
        Ok(HostDescriptor::new(self.name.clone(), self.host.clone()))
    }
}

impl GroupEntry for PeerRecord {
    fn label(&self) -> &str {
        &self.name
    }

    fn to_descriptor(&self) -> Result<HostDescriptor, PollError> {
        Ok(HostDescriptor::from_endpoint(&self.name, &self.ip, self.port))
    }
}

impl GroupEntry for MonitoredNode {
    fn label(&self) -> &str {
        &self.name
    }

    fn to_descriptor(&self) -> Result<HostDescriptor, PollError> {
        Ok(HostDescriptor::from_endpoint(&self.name, &self.host, self.port))
    }
}

/// Group entry read leniently from configuration.
///
/// An entry that does not fit `E` is kept as `Malformed` instead of failing
/// the whole environment; the aggregator then drops just that host.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEntry<E> {
    Parsed(E),
    Malformed { label: String, reason: String },
}

impl<E> ConfigEntry<E> {
    pub fn parsed(&self) -> Option<&E> {
        match self {
            ConfigEntry::Parsed(entry) => Some(entry),
            ConfigEntry::Malformed { .. } => None,
        }
    }
}

impl<E> From<E> for ConfigEntry<E> {
    fn from(entry: E) -> Self {
        ConfigEntry::Parsed(entry)
    }
}

impl<'de, E: DeserializeOwned> Deserialize<'de> for ConfigEntry<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = toml::Value::deserialize(deserializer)?;
        let label = raw
            .get("name")
            .and_then(toml::Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(match E::deserialize(raw) {
            Ok(entry) => ConfigEntry::Parsed(entry),
            Err(e) => ConfigEntry::Malformed {
                label,
                reason: e.to_string().trim().to_string(),
            },
        })
    }
}

impl<E: GroupEntry> GroupEntry for ConfigEntry<E> {
    fn label(&self) -> &str {
        match self {
            ConfigEntry::Parsed(entry) => entry.label(),
            ConfigEntry::Malformed { label, .. } => label,
        }
    }

    fn to_descriptor(&self) -> Result<HostDescriptor, PollError> {
        match self {
            ConfigEntry::Parsed(entry) => entry.to_descriptor(),
            ConfigEntry::Malformed { label, reason } => Err(PollError::MalformedEntry {
                label: label.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Which call of a host a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    BlockHeight,
    Version,
    Peers,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallKind::BlockHeight => write!(f, "block height"),
            CallKind::Version => write!(f, "version"),
            CallKind::Peers => write!(f, "peers"),
        }
    }
}

/// Result of one height or version call.
///
/// Replaces the overloaded integers/strings of the legacy report; use
/// [`CallOutcome::height_sentinel`] or [`CallOutcome::version_sentinel`]
/// when the legacy shape is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome<T> {
    Value(T),
    /// HTTP 403
    Forbidden,
    /// Other non-200 status, or a 200 with an unusable body
    ServerError,
    /// Timeout, connection failure or malformed body
    Unreachable,
    /// Call not issued: toggled off, or not supported by the dialect
    Skipped,
}

impl<T> CallOutcome<T> {
    /// Classify a fetch result
    pub fn from_fetch(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => CallOutcome::Value(value),
            Err(FetchError::Forbidden) => CallOutcome::Forbidden,
            Err(FetchError::Status { .. })
            | Err(FetchError::MissingField { .. })
            | Err(FetchError::Rejected) => CallOutcome::ServerError,
            Err(FetchError::Timeout)
            | Err(FetchError::Transport { .. })
            | Err(FetchError::Decode { .. }) => CallOutcome::Unreachable,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, CallOutcome::Value(_))
    }
}

impl CallOutcome<u64> {
    pub fn height_sentinel(&self) -> u64 {
        match self {
            CallOutcome::Value(height) => *height,
            CallOutcome::Forbidden => sentinels::HEIGHT_FORBIDDEN,
            CallOutcome::ServerError => sentinels::HEIGHT_SERVER_ERROR,
            CallOutcome::Unreachable | CallOutcome::Skipped => sentinels::HEIGHT_UNREACHABLE,
        }
    }
}

impl CallOutcome<String> {
    pub fn version_sentinel(&self) -> String {
        match self {
            CallOutcome::Value(version) => version.clone(),
            CallOutcome::Forbidden => sentinels::VERSION_FORBIDDEN.to_string(),
            CallOutcome::ServerError => sentinels::VERSION_SERVER_ERROR.to_string(),
            CallOutcome::Unreachable | CallOutcome::Skipped => {
                sentinels::VERSION_UNREACHABLE.to_string()
            }
        }
    }
}

fn serialize_height<S: Serializer>(
    outcome: &CallOutcome<u64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(outcome.height_sentinel())
}

fn serialize_version<S: Serializer>(
    outcome: &CallOutcome<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&outcome.version_sentinel())
}

/// Status of one host for one poll cycle.
///
/// Serializes in the legacy shape: `block_height` and `version` carry the
/// sentinel values (403, 500, 0 / "403", "500", "") instead of the tagged outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostStatus {
    pub name: String,
    pub host: String,
    #[serde(serialize_with = "serialize_height")]
    pub block_height: CallOutcome<u64>,
    #[serde(serialize_with = "serialize_version")]
    pub version: CallOutcome<String>,
    pub peers: Vec<serde_json::Value>,
}

/// The three host groups of a status report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    BaseHosts,
    PeerNodes,
    NodesToMonitor,
}

impl Group {
    pub const ALL: [Group; 3] = [Group::BaseHosts, Group::PeerNodes, Group::NodesToMonitor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::BaseHosts => "base_hosts",
            Group::PeerNodes => "peer_nodes",
            Group::NodesToMonitor => "nodes_to_monitor",
        }
    }

    /// Maximum number of successful entries kept for the group
    pub fn fanout_cap(&self) -> Option<usize> {
        match self {
            Group::PeerNodes => Some(limits::PEER_NODE_FANOUT),
            Group::BaseHosts | Group::NodesToMonitor => None,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate result of one status cycle, keyed by group.
///
/// An empty report is the failure signal of the report builder.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub cycle_id: Uuid,
    pub dialect: Dialect,
    pub generated_at: DateTime<Utc>,
    pub base_hosts: Vec<HostStatus>,
    pub peer_nodes: Vec<HostStatus>,
    pub nodes_to_monitor: Vec<HostStatus>,
}

impl StatusReport {
    pub fn empty(dialect: Dialect) -> Self {
        Self {
            cycle_id: Uuid::new_v4(),
            dialect,
            generated_at: Utc::now(),
            base_hosts: Vec::new(),
            peer_nodes: Vec::new(),
            nodes_to_monitor: Vec::new(),
        }
    }

    pub fn group(&self, group: Group) -> &[HostStatus] {
        match group {
            Group::BaseHosts => &self.base_hosts,
            Group::PeerNodes => &self.peer_nodes,
            Group::NodesToMonitor => &self.nodes_to_monitor,
        }
    }

    pub fn host_count(&self) -> usize {
        Group::ALL.iter().map(|group| self.group(*group).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.host_count() == 0
    }
}
