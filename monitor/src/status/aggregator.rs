//! Group aggregation: polls every entry of a group through a bounded worker pool

use futures::stream::{self, StreamExt};
use tracing::debug;

use super::dialect::NodeApi;
use super::poller::Poller;
use super::types::{Group, GroupEntry, HostStatus};
use crate::errors::PollError;

/// Poll the entries of one group and collect their statuses in input order.
///
/// At most `concurrency` hosts are in flight. Entries that fail are reported
/// to the poller's diagnostics and left out without a placeholder. For capped
/// groups the result is the first `cap` successes in input order, and no entry
/// is polled unless its success could still be kept.
pub async fn aggregate_group<A, E>(
    group: Group,
    entries: &[E],
    poller: &Poller<A>,
    concurrency: usize,
) -> Vec<HostStatus>
where
    A: NodeApi,
    E: GroupEntry + Sync,
{
    let concurrency = concurrency.max(1);

    match group.fanout_cap() {
        Some(cap) => aggregate_capped(group, entries, poller, concurrency, cap).await,
        None => poll_window(group, entries, poller, concurrency).await,
    }
}

/// Poll in windows no wider than the number of statuses still needed, so the
/// cap is never overshot and entries after the last needed one stay untouched
async fn aggregate_capped<A, E>(
    group: Group,
    entries: &[E],
    poller: &Poller<A>,
    concurrency: usize,
    cap: usize,
) -> Vec<HostStatus>
where
    A: NodeApi,
    E: GroupEntry + Sync,
{
    let mut statuses = Vec::with_capacity(cap.min(entries.len()));
    let mut remaining = entries;

    while statuses.len() < cap && !remaining.is_empty() {
        let width = (cap - statuses.len()).min(concurrency).min(remaining.len());
        let (window, rest) = remaining.split_at(width);
        remaining = rest;

        statuses.extend(poll_window(group, window, poller, width).await);
    }

    if statuses.len() == cap && !remaining.is_empty() {
        debug!(
            "{} reached fan-out cap of {}, {} entries not polled",
            group,
            cap,
            remaining.len()
        );
    }

    statuses
}

async fn poll_window<A, E>(
    group: Group,
    entries: &[E],
    poller: &Poller<A>,
    concurrency: usize,
) -> Vec<HostStatus>
where
    A: NodeApi,
    E: GroupEntry + Sync,
{
    let results: Vec<(&E, Result<HostStatus, PollError>)> = stream::iter(entries)
        .map(|entry| async move {
            let result = match entry.to_descriptor() {
                Ok(descriptor) => poller.poll(&descriptor).await,
                Err(e) => Err(e),
            };
            (entry, result)
        })
        .buffered(concurrency)
        .collect()
        .await;

    results
        .into_iter()
        .filter_map(|(entry, result)| match result {
            Ok(status) => Some(status),
            Err(e) => {
                poller.diagnostics().host_dropped(group, entry.label(), &e);
                None
            }
        })
        .collect()
}
