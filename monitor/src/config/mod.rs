// File: monitor/src/config/mod.rs
pub mod manager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
pub use manager::ConfigManager;

use crate::constants::defaults;
use crate::errors::ConfigError;
use crate::status::{
    BaseHostEntry, ConfigEntry, Dialect, MonitoredNode, PeerRecord, StatusSettings,
    StatusToggles,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default = "default_check_interval")]
    pub check_interval_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_max_concurrent_polls")]
    pub max_concurrent_polls: usize,
    #[serde(default = "default_true")]
    pub check_block_height: bool,
    #[serde(default = "default_true")]
    pub check_version: bool,
    // Populated from individual environment config files
    #[serde(skip)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

fn default_check_interval() -> u64 {
    defaults::CHECK_INTERVAL_SECONDS
}

fn default_request_timeout() -> u64 {
    defaults::REQUEST_TIMEOUT_SECONDS
}

fn default_max_concurrent_polls() -> usize {
    defaults::MAX_CONCURRENT_POLLS
}

fn default_true() -> bool {
    true
}

/// One environment file: the hosts polled in every status cycle.
///
/// Entries are read leniently; a malformed one only drops that host.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    pub base_hosts: Vec<ConfigEntry<BaseHostEntry>>,
    pub peer_nodes: Vec<ConfigEntry<PeerRecord>>,
    // Normally produced by discovery; a static list may be given here instead
    #[serde(default)]
    pub nodes_to_monitor: Vec<ConfigEntry<MonitoredNode>>,
}

impl EnvironmentConfig {
    /// Number of entries across all groups that could not be read as hosts
    pub fn malformed_entries(&self) -> usize {
        fn count<E>(entries: &[ConfigEntry<E>]) -> usize {
            entries.iter().filter(|entry| entry.parsed().is_none()).count()
        }

        count(&self.base_hosts) + count(&self.peer_nodes) + count(&self.nodes_to_monitor)
    }
}

impl Config {
    pub fn toggles(&self) -> StatusToggles {
        StatusToggles {
            check_block_height: self.check_block_height,
            check_version: self.check_version,
        }
    }

    pub fn status_settings(&self) -> StatusSettings {
        StatusSettings {
            toggles: self.toggles(),
            max_concurrent_polls: self.max_concurrent_polls,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.max_concurrent_polls == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrent_polls".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.environments.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "environments".to_string(),
            });
        }

        Ok(())
    }
}
