//! Contract for the three docs operations.

use std::sync::Arc;

use async_trait::async_trait;

use crate::credential::Credential;
use crate::error::DocsResult;
use crate::models::{Category, Doc};

/// Operations against the remote documentation system.
///
/// Implementations are stateless translators: each call maps to exactly one
/// outbound request, with no retries and no caching.
#[async_trait]
pub trait DocsApi: Send + Sync {
    /// List categories whose kind is `guide`, in remote order.
    async fn list_guide_categories(&self, credential: &Credential) -> DocsResult<Vec<Category>>;

    /// List the docs of one category, in remote order.
    async fn list_docs(&self, credential: &Credential, category_slug: &str)
        -> DocsResult<Vec<Doc>>;

    /// Change the slug of the doc currently identified by `current_slug`.
    ///
    /// An empty `new_slug` fails with [`DocsError::MissingPayload`]
    /// before any request is made.
    ///
    /// [`DocsError::MissingPayload`]: crate::DocsError::MissingPayload
    async fn update_doc_slug(
        &self,
        credential: &Credential,
        current_slug: &str,
        new_slug: &str,
    ) -> DocsResult<Doc>;
}

#[async_trait]
impl<T: DocsApi + ?Sized> DocsApi for Arc<T> {
    async fn list_guide_categories(&self, credential: &Credential) -> DocsResult<Vec<Category>> {
        (**self).list_guide_categories(credential).await
    }

    async fn list_docs(
        &self,
        credential: &Credential,
        category_slug: &str,
    ) -> DocsResult<Vec<Doc>> {
        (**self).list_docs(credential, category_slug).await
    }

    async fn update_doc_slug(
        &self,
        credential: &Credential,
        current_slug: &str,
        new_slug: &str,
    ) -> DocsResult<Doc> {
        (**self)
            .update_doc_slug(credential, current_slug, new_slug)
            .await
    }
}
