//! Readiness solver: partitions a snapshot into complete / running / ready / blocked

use std::collections::HashMap;

use crate::models::{Graph, Slice, SliceStatus};

/// A pending slice whose dependencies are not all complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedSlice {
    pub id: String,
    /// Dependencies not yet complete, in `depends_on` order.
    pub waiting_on: Vec<String>,
}

/// Result of [`partition`].
///
/// `ready` is ordered by (wave, id); every other list follows slice id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyReport {
    pub complete: Vec<String>,
    pub running: Vec<String>,
    pub ready: Vec<String>,
    pub blocked: Vec<BlockedSlice>,
    /// Slices with a status the solver does not act on, e.g. `failed`.
    pub other: Vec<String>,
}

impl ReadyReport {
    pub fn is_idle(&self) -> bool {
        self.ready.is_empty() && self.running.is_empty()
    }

    pub fn total(&self) -> usize {
        self.complete.len()
            + self.running.len()
            + self.ready.len()
            + self.blocked.len()
            + self.other.len()
    }
}

/// Partition slices by status and dependency state.
///
/// A slice is ready when it is `pending` and every graph dependency is
/// `complete` in the same snapshot. Dependencies that have no slice file are
/// never complete. Pure and deterministic.
pub fn partition(slices: &[Slice], graph: &Graph) -> ReadyReport {
    let statuses: HashMap<&str, &SliceStatus> =
        slices.iter().map(|s| (s.id.as_str(), &s.status)).collect();
    let is_complete =
        |id: &str| matches!(statuses.get(id), Some(SliceStatus::Complete));

    let mut ordered: Vec<&Slice> = slices.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let mut report = ReadyReport::default();
    let mut ready: Vec<(u32, &str)> = Vec::new();

    for slice in ordered {
        match &slice.status {
            SliceStatus::Complete => report.complete.push(slice.id.clone()),
            SliceStatus::InProgress => report.running.push(slice.id.clone()),
            SliceStatus::Pending => {
                let waiting_on: Vec<String> = graph
                    .depends_on(&slice.id)
                    .iter()
                    .filter(|dep| !is_complete(dep))
                    .cloned()
                    .collect();

                if waiting_on.is_empty() {
                    ready.push((graph.wave(&slice.id), slice.id.as_str()));
                } else {
                    report.blocked.push(BlockedSlice {
                        id: slice.id.clone(),
                        waiting_on,
                    });
                }
            }
            SliceStatus::Failed | SliceStatus::Other(_) => report.other.push(slice.id.clone()),
        }
    }

    ready.sort();
    report.ready = ready.into_iter().map(|(_, id)| id.to_string()).collect();
    report
}
