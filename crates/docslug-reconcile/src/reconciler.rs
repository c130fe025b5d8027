//! Selection, local editing and selective commit of slug changes.

use docslug_core::{Category, Credential, DocsApi, DocsResult};
use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use crate::report::CommitReport;
use crate::working_set::WorkingSet;

/// Session-scoped reconciliation engine.
///
/// Owns the working set exclusively. The credential is fixed for the life of
/// the session and shared read-only by every call.
pub struct Reconciler<A> {
    api: A,
    credential: Credential,
    working_set: WorkingSet,
}

impl<A> std::fmt::Debug for Reconciler<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("credential", &self.credential)
            .field("working_set", &self.working_set)
            .finish_non_exhaustive()
    }
}

impl<A: DocsApi> Reconciler<A> {
    /// Start a session with an empty working set.
    pub fn new(api: A, credential: Credential) -> Self {
        Self {
            api,
            credential,
            working_set: WorkingSet::default(),
        }
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    /// Guide categories available to this session.
    pub async fn list_categories(&self) -> DocsResult<Vec<Category>> {
        self.api.list_guide_categories(&self.credential).await
    }

    /// Load the docs of `category` as the new working set.
    ///
    /// All or nothing: on error the previous working set, edits included, is
    /// left exactly as it was.
    #[instrument(skip(self, category), fields(category = %category.slug))]
    pub async fn select_category(&mut self, category: &Category) -> DocsResult<&WorkingSet> {
        let docs = self
            .api
            .list_docs(&self.credential, &category.slug)
            .await
            .inspect_err(|e| warn!(error = %e, "Category selection failed"))?;

        debug!(docs = docs.len(), "Working set replaced");
        self.working_set = WorkingSet::load(category.clone(), docs);
        Ok(&self.working_set)
    }

    /// Set the pending slug of the entry at `index`. No I/O.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the working set.
    #[track_caller]
    pub fn edit_slug(&mut self, index: usize, value: impl Into<String>) {
        let len = self.working_set.len();
        match self.working_set.entry_mut(index) {
            Some(entry) => entry.edited_slug = value.into(),
            None => panic!("edit index {index} out of range for working set of {len} docs"),
        }
    }

    /// Set the pending slug of the entry whose synced slug is `current_slug`.
    ///
    /// Returns `false` when no entry has that slug.
    pub fn edit_slug_of(&mut self, current_slug: &str, value: impl Into<String>) -> bool {
        match self.working_set.position_of(current_slug) {
            Some(index) => {
                self.edit_slug(index, value);
                true
            }
            None => false,
        }
    }

    /// Submit every diverging edit as an independent update.
    ///
    /// Updates run concurrently and the method returns only once all of them
    /// have resolved. Each result is applied to its own entry only; entries
    /// without a pending edit are neither called nor marked.
    #[instrument(skip(self))]
    pub async fn commit(&mut self) -> CommitReport {
        let pending: Vec<(usize, String, String)> = self
            .working_set
            .dirty_indices()
            .into_iter()
            .filter_map(|index| {
                let entry = self.working_set.get(index)?;
                Some((index, entry.slug().to_string(), entry.edited_slug.clone()))
            })
            .collect();

        if pending.is_empty() {
            debug!("Nothing to commit");
            return CommitReport::default();
        }

        let api = &self.api;
        let credential = &self.credential;
        let results = join_all(
            pending
                .iter()
                .map(|(_, from, to)| api.update_doc_slug(credential, from, to)),
        )
        .await;

        let mut report = CommitReport::with_capacity(pending.len());
        for ((index, from, to), result) in pending.into_iter().zip(results) {
            let Some(entry) = self.working_set.entry_mut(index) else {
                continue;
            };
            match result {
                Ok(remote) => {
                    if remote.slug != to {
                        warn!(
                            from = %from,
                            sent = %to,
                            echoed = %remote.slug,
                            "Remote echoed a different slug; keeping the value sent"
                        );
                    }
                    entry.mark_success(to.clone());
                    report.add_success(index, from, to);
                }
                Err(e) => {
                    warn!(from = %from, to = %to, error = %e, "Slug update failed");
                    entry.mark_failure(e.to_string());
                    report.add_failure(index, from, to, e.to_string());
                }
            }
        }

        info!(
            attempted = report.attempted(),
            succeeded = report.succeeded,
            failed = report.failed,
            "Commit finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use docslug_core::{Doc, DocsError};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::working_set::UpdateOutcome;

    /// In-memory `DocsApi` that records every update call.
    #[derive(Default)]
    struct MockApi {
        docs: Mutex<HashMap<String, DocsResult<Vec<Doc>>>>,
        update_failures: Mutex<HashMap<String, DocsError>>,
        updates: Mutex<Vec<(String, String)>>,
    }

    impl MockApi {
        fn with_docs(self, category: &str, slugs: &[&str]) -> Self {
            let docs = slugs.iter().map(|s| Doc::new(*s, s.to_uppercase())).collect();
            self.docs
                .lock()
                .unwrap()
                .insert(category.to_string(), Ok(docs));
            self
        }

        fn with_listing_error(self, category: &str, error: DocsError) -> Self {
            self.docs
                .lock()
                .unwrap()
                .insert(category.to_string(), Err(error));
            self
        }

        fn fail_update_of(self, slug: &str, error: DocsError) -> Self {
            self.update_failures
                .lock()
                .unwrap()
                .insert(slug.to_string(), error);
            self
        }

        fn updates(&self) -> Vec<(String, String)> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocsApi for MockApi {
        async fn list_guide_categories(&self, _: &Credential) -> DocsResult<Vec<Category>> {
            Ok(vec![category("guides")])
        }

        async fn list_docs(&self, _: &Credential, category_slug: &str) -> DocsResult<Vec<Doc>> {
            self.docs
                .lock()
                .unwrap()
                .get(category_slug)
                .cloned()
                .unwrap_or(Err(DocsError::Upstream { status: 404 }))
        }

        async fn update_doc_slug(
            &self,
            _: &Credential,
            current_slug: &str,
            new_slug: &str,
        ) -> DocsResult<Doc> {
            self.updates
                .lock()
                .unwrap()
                .push((current_slug.to_string(), new_slug.to_string()));
            if let Some(error) = self.update_failures.lock().unwrap().get(current_slug) {
                return Err(error.clone());
            }
            Ok(Doc::new(new_slug, current_slug.to_uppercase()))
        }
    }

    fn category(slug: &str) -> Category {
        serde_json::from_value(json!({"slug": slug, "title": slug, "type": "guide"})).unwrap()
    }

    fn reconciler(api: MockApi) -> (Arc<MockApi>, Reconciler<Arc<MockApi>>) {
        let api = Arc::new(api);
        let credential = Credential::new("test-key").unwrap();
        (api.clone(), Reconciler::new(api, credential))
    }

    #[tokio::test]
    async fn test_select_category_initializes_entries() {
        let (_, mut engine) = reconciler(MockApi::default().with_docs("guides", &["a", "b"]));

        let set = engine.select_category(&category("guides")).await.unwrap();

        assert_eq!(set.len(), 2);
        for entry in set.entries() {
            assert_eq!(entry.edited_slug, entry.slug());
            assert_eq!(entry.update_outcome, UpdateOutcome::Unset);
        }
    }

    #[tokio::test]
    async fn test_failed_selection_keeps_previous_working_set() {
        let (_, mut engine) = reconciler(
            MockApi::default()
                .with_docs("guides", &["a", "b"])
                .with_listing_error("broken", DocsError::Upstream { status: 500 }),
        );
        engine.select_category(&category("guides")).await.unwrap();
        engine.edit_slug(1, "b-edited");
        let before = engine.working_set().clone();

        let result = engine.select_category(&category("broken")).await;

        assert_eq!(result.unwrap_err(), DocsError::Upstream { status: 500 });
        assert_eq!(engine.working_set(), &before);
        assert_eq!(engine.working_set().entries()[1].edited_slug, "b-edited");
    }

    #[tokio::test]
    async fn test_reselection_resets_outcomes() {
        let (_, mut engine) = reconciler(
            MockApi::default()
                .with_docs("guides", &["a"])
                .fail_update_of("a", DocsError::Upstream { status: 409 }),
        );
        engine.select_category(&category("guides")).await.unwrap();
        engine.edit_slug(0, "b");
        engine.commit().await;
        assert_eq!(
            engine.working_set().entries()[0].update_outcome,
            UpdateOutcome::Failure
        );

        engine.select_category(&category("guides")).await.unwrap();

        let entry = &engine.working_set().entries()[0];
        assert_eq!(entry.update_outcome, UpdateOutcome::Unset);
        assert_eq!(entry.edited_slug, "a");
        assert!(entry.last_error.is_none());
    }

    #[tokio::test]
    async fn test_edit_slug_touches_only_target() {
        let (_, mut engine) = reconciler(MockApi::default().with_docs("guides", &["a", "b", "c"]));
        engine.select_category(&category("guides")).await.unwrap();
        let before = engine.working_set().clone();

        engine.edit_slug(1, "b2");

        let after = engine.working_set();
        assert_eq!(after.entries()[1].edited_slug, "b2");
        assert_eq!(after.entries()[1].slug(), "b");
        assert_eq!(after.entries()[0], before.entries()[0]);
        assert_eq!(after.entries()[2], before.entries()[2]);
    }

    #[tokio::test]
    #[should_panic(expected = "out of range")]
    async fn test_edit_slug_out_of_range_panics() {
        let (_, mut engine) = reconciler(MockApi::default().with_docs("guides", &["a"]));
        engine.select_category(&category("guides")).await.unwrap();
        engine.edit_slug(5, "x");
    }

    #[tokio::test]
    async fn test_edit_slug_of_unknown_slug() {
        let (_, mut engine) = reconciler(MockApi::default().with_docs("guides", &["a"]));
        engine.select_category(&category("guides")).await.unwrap();

        assert!(!engine.edit_slug_of("missing", "x"));
        assert!(engine.edit_slug_of("a", "x"));
        assert_eq!(engine.working_set().entries()[0].edited_slug, "x");
    }

    #[tokio::test]
    async fn test_commit_without_edits_makes_no_calls() {
        let (api, mut engine) = reconciler(MockApi::default().with_docs("guides", &["a"]));
        engine.select_category(&category("guides")).await.unwrap();

        let report = engine.commit().await;

        assert!(api.updates().is_empty());
        assert_eq!(report.attempted(), 0);
        assert_eq!(
            engine.working_set().entries()[0].update_outcome,
            UpdateOutcome::Unset
        );
    }

    #[tokio::test]
    async fn test_commit_calls_only_changed_entries() {
        let (api, mut engine) = reconciler(MockApi::default().with_docs("guides", &["a", "c"]));
        engine.select_category(&category("guides")).await.unwrap();
        engine.edit_slug(0, "b");

        let report = engine.commit().await;

        assert_eq!(api.updates(), vec![("a".to_string(), "b".to_string())]);
        assert_eq!(report.attempted(), 1);

        let entries = engine.working_set().entries();
        assert_eq!(entries[0].slug(), "b");
        assert_eq!(entries[0].edited_slug, "b");
        assert_eq!(entries[0].update_outcome, UpdateOutcome::Success);
        assert_eq!(entries[1].update_outcome, UpdateOutcome::Unset);
    }

    #[tokio::test]
    async fn test_commit_failure_preserves_slug_and_edit() {
        let (_, mut engine) = reconciler(
            MockApi::default()
                .with_docs("guides", &["a"])
                .fail_update_of("a", DocsError::Transport("connection reset".into())),
        );
        engine.select_category(&category("guides")).await.unwrap();
        engine.edit_slug(0, "b");

        let report = engine.commit().await;

        let entry = &engine.working_set().entries()[0];
        assert_eq!(entry.slug(), "a");
        assert_eq!(entry.edited_slug, "b");
        assert_eq!(entry.update_outcome, UpdateOutcome::Failure);
        assert_eq!(report.failed, 1);
        assert_eq!(
            report.items[0].error.as_deref(),
            Some("Transport error: connection reset")
        );
    }

    #[tokio::test]
    async fn test_mixed_batch_outcomes_are_independent() {
        let (api, mut engine) = reconciler(
            MockApi::default()
                .with_docs("guides", &["a", "b", "c"])
                .fail_update_of("a", DocsError::Upstream { status: 400 }),
        );
        engine.select_category(&category("guides")).await.unwrap();
        engine.edit_slug(0, "a2");
        engine.edit_slug(2, "c2");

        let report = engine.commit().await;

        assert_eq!(api.updates().len(), 2);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);

        let entries = engine.working_set().entries();
        assert_eq!(entries[0].slug(), "a");
        assert_eq!(entries[0].update_outcome, UpdateOutcome::Failure);
        assert_eq!(entries[1].update_outcome, UpdateOutcome::Unset);
        assert_eq!(entries[2].slug(), "c2");
        assert_eq!(entries[2].update_outcome, UpdateOutcome::Success);
    }

    #[tokio::test]
    async fn test_retry_after_failure_succeeds() {
        let (api, mut engine) = reconciler(
            MockApi::default()
                .with_docs("guides", &["a"])
                .fail_update_of("a", DocsError::Upstream { status: 503 }),
        );
        engine.select_category(&category("guides")).await.unwrap();
        engine.edit_slug(0, "b");
        engine.commit().await;

        api.update_failures.lock().unwrap().clear();
        let report = engine.commit().await;

        assert_eq!(report.succeeded, 1);
        let entry = &engine.working_set().entries()[0];
        assert_eq!(entry.slug(), "b");
        assert_eq!(entry.update_outcome, UpdateOutcome::Success);
        assert_eq!(api.updates().len(), 2);
    }

    #[tokio::test]
    async fn test_success_keeps_sent_slug_over_remote_echo() {
        struct NormalizingApi;

        #[async_trait]
        impl DocsApi for NormalizingApi {
            async fn list_guide_categories(&self, _: &Credential) -> DocsResult<Vec<Category>> {
                Ok(vec![])
            }

            async fn list_docs(&self, _: &Credential, _: &str) -> DocsResult<Vec<Doc>> {
                Ok(vec![Doc::new("a", "A")])
            }

            async fn update_doc_slug(
                &self,
                _: &Credential,
                _: &str,
                new_slug: &str,
            ) -> DocsResult<Doc> {
                Ok(Doc::new(new_slug.to_lowercase(), "A"))
            }
        }

        let mut engine = Reconciler::new(NormalizingApi, Credential::new("k").unwrap());
        engine.select_category(&category("guides")).await.unwrap();
        engine.edit_slug(0, "Mixed-Case");
        engine.commit().await;

        assert_eq!(engine.working_set().entries()[0].slug(), "Mixed-Case");
    }
}
