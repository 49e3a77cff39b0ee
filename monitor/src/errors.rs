//! Error types for the status monitor
//!
//! Node calls never surface these to callers of the report builder: a
//! `FetchError` is classified into a `CallOutcome`, a `PollError` drops one
//! host from its group. `ConfigError` is the only kind that reaches `main`.

use std::fmt;

/// Failure of a single HTTP call against a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Node answered 403
    Forbidden,

    /// Node answered with any other non-200 status
    Status { code: u16 },

    /// Request exceeded the per-request timeout
    Timeout,

    /// Connection, DNS or other transport failure
    Transport { reason: String },

    /// Body was not valid JSON
    Decode { reason: String },

    /// Body was JSON but the expected field was missing or had the wrong type
    MissingField { field: &'static str },

    /// Generic envelope came back with `success: false`
    Rejected,
}

/// Host-level failure; the host is omitted from its group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// Descriptor could not be turned into a pollable base URL
    InvalidDescriptor { name: String, reason: String },

    /// Configured group entry could not be read as a host
    MalformedEntry { label: String, reason: String },
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Forbidden => write!(f, "HTTP 403 forbidden"),
            FetchError::Status { code } => write!(f, "HTTP error {}", code),
            FetchError::Timeout => write!(f, "request timeout"),
            FetchError::Transport { reason } => write!(f, "HTTP request failed: {}", reason),
            FetchError::Decode { reason } => {
                write!(f, "Failed to parse JSON response: {}", reason)
            }
            FetchError::MissingField { field } => {
                write!(f, "Field '{}' missing from response", field)
            }
            FetchError::Rejected => write!(f, "Node reported success=false"),
        }
    }
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollError::InvalidDescriptor { name, reason } => {
                write!(f, "Invalid host descriptor '{}': {}", name, reason)
            }
            PollError::MalformedEntry { label, reason } => {
                write!(f, "Malformed group entry '{}': {}", label, reason)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl std::error::Error for FetchError {}
impl std::error::Error for PollError {}
impl std::error::Error for ConfigError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode {
                reason: err.to_string(),
            }
        } else {
            FetchError::Transport {
                reason: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode {
            reason: err.to_string(),
        }
    }
}
