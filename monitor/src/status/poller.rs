//! Per-host poller: runs the enabled calls of one dialect against one host

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::diagnostics::Diagnostics;
use super::dialect::NodeApi;
use super::types::{CallOutcome, HostDescriptor, HostStatus};
use crate::errors::PollError;

/// Which optional calls are issued for every host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusToggles {
    pub check_block_height: bool,
    pub check_version: bool,
}

impl StatusToggles {
    pub fn all() -> Self {
        Self {
            check_block_height: true,
            check_version: true,
        }
    }
}

pub struct Poller<A> {
    api: A,
    toggles: StatusToggles,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<A: NodeApi> Poller<A> {
    pub fn new(api: A, toggles: StatusToggles, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            api,
            toggles,
            diagnostics,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// Poll one host.
    ///
    /// Call failures are absorbed into the returned status; an error here means
    /// the host itself could not be polled and must be left out of its group.
    /// The calls of one host run concurrently, each bounded by its own timeout.
    pub async fn poll(&self, host: &HostDescriptor) -> Result<HostStatus, PollError> {
        host.validate()?;

        let block_height = async {
            if self.toggles.check_block_height {
                self.api.fetch_block_height(host).await
            } else {
                CallOutcome::Skipped
            }
        };
        let version = async {
            if self.toggles.check_version {
                self.api.fetch_version(host).await
            } else {
                CallOutcome::Skipped
            }
        };

        let (block_height, version, peers) =
            tokio::join!(block_height, version, self.api.fetch_peers(host));

        debug!(
            "Polled {} ({}) via {}: height {:?}, version {:?}, {} peers",
            host.name,
            host.address,
            self.api.dialect(),
            block_height,
            version,
            peers.len()
        );

        Ok(HostStatus {
            name: host.name.clone(),
            host: host.address.clone(),
            block_height,
            version,
            peers,
        })
    }
}
