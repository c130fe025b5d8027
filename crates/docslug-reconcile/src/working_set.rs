//! Working set entries and their per-record outcome state.

use docslug_core::{Category, Doc};
use serde::Serialize;

/// Result of the most recent update attempt for one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOutcome {
    /// No attempt since the entry was loaded.
    #[default]
    Unset,
    Success,
    Failure,
}

/// One doc plus the caller's pending edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    #[serde(flatten)]
    pub doc: Doc,
    pub edited_slug: String,
    pub update_outcome: UpdateOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl DocEntry {
    /// Fresh entry: edit equals the synced slug, no outcome.
    pub fn new(doc: Doc) -> Self {
        let edited_slug = doc.slug.clone();
        Self {
            doc,
            edited_slug,
            update_outcome: UpdateOutcome::Unset,
            last_error: None,
        }
    }

    /// Last slug known to be accepted by the remote system.
    pub fn slug(&self) -> &str {
        &self.doc.slug
    }

    /// Whether the pending edit diverges from the synced slug.
    pub fn is_dirty(&self) -> bool {
        self.edited_slug != self.doc.slug
    }

    /// Record a successful update that sent `sent_slug`.
    pub(crate) fn mark_success(&mut self, sent_slug: String) {
        self.doc.slug = sent_slug;
        self.update_outcome = UpdateOutcome::Success;
        self.last_error = None;
    }

    /// Record a failed update. Slug and edit stay as they were so the same
    /// edit can be committed again.
    pub(crate) fn mark_failure(&mut self, reason: String) {
        self.update_outcome = UpdateOutcome::Failure;
        self.last_error = Some(reason);
    }

    /// Inline status line for display, if an update was attempted.
    pub fn status_message(&self) -> Option<String> {
        match self.update_outcome {
            UpdateOutcome::Unset => None,
            UpdateOutcome::Success => Some("Slug update successful".to_string()),
            UpdateOutcome::Failure => Some(match &self.last_error {
                Some(reason) => format!("Slug update failed: {reason}"),
                None => "Slug update failed".to_string(),
            }),
        }
    }
}

/// Ordered docs of one selected category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkingSet {
    category: Option<Category>,
    entries: Vec<DocEntry>,
}

impl WorkingSet {
    /// Working set for `category`, with every entry freshly initialized.
    pub fn load(category: Category, docs: Vec<Doc>) -> Self {
        Self {
            category: Some(category),
            entries: docs.into_iter().map(DocEntry::new).collect(),
        }
    }

    /// The category this set was loaded for, `None` before any selection.
    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DocEntry> {
        self.entries.get(index)
    }

    /// Position of the entry whose synced slug is `slug`.
    pub fn position_of(&self, slug: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.slug() == slug)
    }

    /// Indices of entries with a diverging edit.
    pub fn dirty_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_dirty())
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut DocEntry> {
        self.entries.get_mut(index)
    }
}
