//! Status report builder: composes the three group aggregations of one dialect

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::info;

use super::aggregator::aggregate_group;
use super::arkv2::ArkV2Api;
use super::client::NodeClient;
use super::diagnostics::Diagnostics;
use super::dialect::{Dialect, NodeApi};
use super::generic::GenericApi;
use super::lisk::LiskApi;
use super::poller::{Poller, StatusToggles};
use super::types::{ConfigEntry, Group, MonitoredNode, StatusReport};
use crate::config::EnvironmentConfig;
use crate::constants::defaults;

/// Poll behaviour shared by every group of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSettings {
    pub toggles: StatusToggles,
    pub max_concurrent_polls: usize,
}

impl Default for StatusSettings {
    fn default() -> Self {
        Self {
            toggles: StatusToggles::all(),
            max_concurrent_polls: defaults::MAX_CONCURRENT_POLLS,
        }
    }
}

pub struct StatusReporter<A> {
    poller: Poller<A>,
    max_concurrent_polls: usize,
}

impl<A: NodeApi> StatusReporter<A> {
    pub fn new(api: A, settings: StatusSettings, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            poller: Poller::new(api, settings.toggles, diagnostics),
            max_concurrent_polls: settings.max_concurrent_polls,
        }
    }

    /// Build the report for one environment.
    ///
    /// Never fails: per-call and per-host failures are absorbed below, and
    /// anything escaping those boundaries is reported to diagnostics and
    /// turned into an empty report. Callers treat an empty report as failure.
    pub async fn check_status(
        &self,
        environment: &EnvironmentConfig,
        nodes_to_monitor: &[ConfigEntry<MonitoredNode>],
    ) -> StatusReport {
        let dialect = self.poller.api().dialect();

        match AssertUnwindSafe(self.build_report(environment, nodes_to_monitor))
            .catch_unwind()
            .await
        {
            Ok(report) => report,
            Err(panic) => {
                self.poller
                    .diagnostics()
                    .report_failed(dialect, &panic_message(panic.as_ref()));
                StatusReport::empty(dialect)
            }
        }
    }

    async fn build_report(
        &self,
        environment: &EnvironmentConfig,
        nodes_to_monitor: &[ConfigEntry<MonitoredNode>],
    ) -> StatusReport {
        let concurrency = self.max_concurrent_polls;
        let (base_hosts, peer_nodes, nodes_to_monitor) = tokio::join!(
            aggregate_group(
                Group::BaseHosts,
                &environment.base_hosts,
                &self.poller,
                concurrency
            ),
            aggregate_group(
                Group::PeerNodes,
                &environment.peer_nodes,
                &self.poller,
                concurrency
            ),
            aggregate_group(
                Group::NodesToMonitor,
                nodes_to_monitor,
                &self.poller,
                concurrency
            ),
        );

        let mut report = StatusReport::empty(self.poller.api().dialect());
        report.base_hosts = base_hosts;
        report.peer_nodes = peer_nodes;
        report.nodes_to_monitor = nodes_to_monitor;

        info!(
            "{} status cycle {}: {} base hosts, {} peer nodes, {} nodes to monitor",
            report.dialect,
            report.cycle_id,
            report.base_hosts.len(),
            report.peer_nodes.len(),
            report.nodes_to_monitor.len()
        );

        report
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Build a report with any dialect adapter
pub async fn check_status<A: NodeApi>(
    api: A,
    settings: StatusSettings,
    environment: &EnvironmentConfig,
    nodes_to_monitor: &[ConfigEntry<MonitoredNode>],
    diagnostics: Arc<dyn Diagnostics>,
) -> StatusReport {
    StatusReporter::new(api, settings, diagnostics)
        .check_status(environment, nodes_to_monitor)
        .await
}

pub async fn check_generic_status(
    client: &NodeClient,
    settings: StatusSettings,
    environment: &EnvironmentConfig,
    nodes_to_monitor: &[ConfigEntry<MonitoredNode>],
    diagnostics: Arc<dyn Diagnostics>,
) -> StatusReport {
    let api = GenericApi::new(client.clone(), diagnostics.clone());
    check_status(api, settings, environment, nodes_to_monitor, diagnostics).await
}

pub async fn check_lisk_status(
    client: &NodeClient,
    settings: StatusSettings,
    environment: &EnvironmentConfig,
    nodes_to_monitor: &[ConfigEntry<MonitoredNode>],
    diagnostics: Arc<dyn Diagnostics>,
) -> StatusReport {
    let api = LiskApi::new(client.clone(), diagnostics.clone());
    check_status(api, settings, environment, nodes_to_monitor, diagnostics).await
}

pub async fn check_arkv2_status(
    client: &NodeClient,
    settings: StatusSettings,
    environment: &EnvironmentConfig,
    nodes_to_monitor: &[ConfigEntry<MonitoredNode>],
    diagnostics: Arc<dyn Diagnostics>,
) -> StatusReport {
    let api = ArkV2Api::new(client.clone(), diagnostics.clone());
    check_status(api, settings, environment, nodes_to_monitor, diagnostics).await
}

/// Dispatch to the entry point of a configured dialect
pub async fn check_dialect_status(
    dialect: Dialect,
    client: &NodeClient,
    settings: StatusSettings,
    environment: &EnvironmentConfig,
    nodes_to_monitor: &[ConfigEntry<MonitoredNode>],
    diagnostics: Arc<dyn Diagnostics>,
) -> StatusReport {
    match dialect {
        Dialect::Generic => {
            check_generic_status(client, settings, environment, nodes_to_monitor, diagnostics)
                .await
        }
        Dialect::Lisk => {
            check_lisk_status(client, settings, environment, nodes_to_monitor, diagnostics).await
        }
        Dialect::ArkV2 => {
            check_arkv2_status(client, settings, environment, nodes_to_monitor, diagnostics)
                .await
        }
    }
}
