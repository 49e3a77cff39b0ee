//! Diagnostic sink for failures absorbed by the poller
//!
//! Failures never surface as errors from the report builder; they are handed
//! to a `Diagnostics` implementation with the host, call and group context.

use tracing::{error, warn};

use super::dialect::Dialect;
use super::types::{CallKind, Group, HostDescriptor};
use crate::errors::{FetchError, PollError};

pub trait Diagnostics: Send + Sync {
    /// A single node call failed and was degraded to a sentinel or empty list
    fn call_failed(&self, host: &HostDescriptor, kind: CallKind, error: &FetchError);

    /// A group entry failed as a whole and was left out of the group
    fn host_dropped(&self, group: Group, label: &str, error: &PollError);

    /// The report builder gave up and returned an empty report
    fn report_failed(&self, dialect: Dialect, reason: &str);
}

/// Default sink: structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn call_failed(&self, host: &HostDescriptor, kind: CallKind, error: &FetchError) {
        match error {
            FetchError::Forbidden => {
                warn!(host = %host.name, call = %kind, "403 {}, {}", kind, host.name);
            }
            FetchError::Status { code } => {
                warn!(host = %host.name, call = %kind, code, "500 {}, {}", kind, host.name);
            }
            FetchError::MissingField { .. } | FetchError::Rejected => {
                warn!(
                    host = %host.name,
                    call = %kind,
                    "Unexpected {} response from {}: {}",
                    kind, host.address, error
                );
            }
            FetchError::Timeout | FetchError::Transport { .. } | FetchError::Decode { .. } => {
                warn!(
                    host = %host.name,
                    call = %kind,
                    "Unable to get {} {}: {}",
                    kind, host.address, error
                );
            }
        }
    }

    fn host_dropped(&self, group: Group, label: &str, error: &PollError) {
        error!(group = %group, entry = label, "Unable to check {} status {}: {}", group, label, error);
    }

    fn report_failed(&self, dialect: Dialect, reason: &str) {
        error!(dialect = %dialect, "Unable to check status: {}", reason);
    }
}
