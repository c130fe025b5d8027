//! Per-item results of a commit.

use serde::Serialize;

use crate::working_set::UpdateOutcome;

/// Result for one attempted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitItem {
    /// Position in the working set.
    pub index: usize,
    /// Slug the update was addressed to.
    pub from: String,
    /// Slug that was requested.
    pub to: String,
    pub outcome: UpdateOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of one commit. Only attempted entries appear in `items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<CommitItem>,
}

impl CommitReport {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub(crate) fn add_success(&mut self, index: usize, from: String, to: String) {
        self.succeeded += 1;
        self.items.push(CommitItem {
            index,
            from,
            to,
            outcome: UpdateOutcome::Success,
            error: None,
        });
    }

    pub(crate) fn add_failure(&mut self, index: usize, from: String, to: String, error: String) {
        self.failed += 1;
        self.items.push(CommitItem {
            index,
            from,
            to,
            outcome: UpdateOutcome::Failure,
            error: Some(error),
        });
    }

    /// Number of update calls made.
    pub fn attempted(&self) -> usize {
        self.items.len()
    }

    /// True when nothing was attempted or everything succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn failed_items(&self) -> impl Iterator<Item = &CommitItem> {
        self.items
            .iter()
            .filter(|i| i.outcome == UpdateOutcome::Failure)
    }
}
