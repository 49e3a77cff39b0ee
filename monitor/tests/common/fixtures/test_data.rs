//! Common test data and pre-wired pollers

use std::sync::Arc;
use std::time::Duration;

use status_monitor::status::{
    ArkV2Api, BaseHostEntry, Diagnostics, GenericApi, LiskApi, NodeClient, Poller, StatusToggles,
};

use super::RecordingDiagnostics;

/// Short request timeout so timeout tests finish quickly
pub const TEST_REQUEST_TIMEOUT: Duration = Duration::from_millis(300);

/// Address nothing listens on
pub const UNREACHABLE_ADDRESS: &str = "http://127.0.0.1:1";

pub fn test_client() -> NodeClient {
    NodeClient::new(TEST_REQUEST_TIMEOUT).expect("Failed to create test client")
}

pub fn base_host(name: &str, host: &str) -> BaseHostEntry {
    BaseHostEntry {
        name: name.to_string(),
        host: host.to_string(),
    }
}

pub fn generic_poller(
    diagnostics: &Arc<RecordingDiagnostics>,
    toggles: StatusToggles,
) -> Poller<GenericApi> {
    let diagnostics: Arc<dyn Diagnostics> = diagnostics.clone();
    Poller::new(
        GenericApi::new(test_client(), diagnostics.clone()),
        toggles,
        diagnostics,
    )
}

pub fn lisk_poller(
    diagnostics: &Arc<RecordingDiagnostics>,
    toggles: StatusToggles,
) -> Poller<LiskApi> {
    let diagnostics: Arc<dyn Diagnostics> = diagnostics.clone();
    Poller::new(
        LiskApi::new(test_client(), diagnostics.clone()),
        toggles,
        diagnostics,
    )
}

pub fn arkv2_poller(
    diagnostics: &Arc<RecordingDiagnostics>,
    toggles: StatusToggles,
) -> Poller<ArkV2Api> {
    let diagnostics: Arc<dyn Diagnostics> = diagnostics.clone();
    Poller::new(
        ArkV2Api::new(test_client(), diagnostics.clone()),
        toggles,
        diagnostics,
    )
}
