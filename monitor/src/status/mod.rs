//! Node status polling
//!
//! This module polls node HTTP APIs of three dialects and folds the results
//! into a per-group status report that tolerates any single host failing.

pub mod aggregator;
pub mod arkv2;
pub mod client;
pub mod diagnostics;
pub mod dialect;
pub mod generic;
pub mod lisk;
pub mod poller;
pub mod report;
pub mod types;

pub use aggregator::aggregate_group;
pub use arkv2::ArkV2Api;
pub use client::NodeClient;
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use dialect::{Dialect, NodeApi};
pub use generic::GenericApi;
pub use lisk::LiskApi;
pub use poller::{Poller, StatusToggles};
pub use report::{
    check_arkv2_status, check_dialect_status, check_generic_status, check_lisk_status,
    check_status, StatusReporter, StatusSettings,
};
pub use types::{
    BaseHostEntry, CallKind, CallOutcome, ConfigEntry, Group, GroupEntry, HostDescriptor,
    HostStatus, MonitoredNode, PeerRecord, StatusReport,
};
