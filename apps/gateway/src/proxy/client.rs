//! HTTP client for the upstream docs API.

use async_trait::async_trait;
use docslug_core::{Category, Credential, Doc, DocsApi, DocsError, DocsResult, UpdateSlugRequest};
use reqwest::{header, Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

use crate::config::UpstreamConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::routes::metrics::{record_upstream_call, CallOutcome, UpstreamOperation};

/// Translates gateway calls into authenticated upstream requests.
///
/// Stateless: one call is exactly one outbound request, never retried and
/// never cached.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Create a new upstream client from configuration.
    pub fn new(config: &UpstreamConfig) -> GatewayResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GatewayError::Config(format!("Invalid upstream URL '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Config(format!(
                "Invalid upstream URL '{}'",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Upstream URL for the given path segments, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Attach upstream authentication and send, mapping failures.
    async fn send(
        &self,
        operation: UpstreamOperation,
        request: RequestBuilder,
        credential: &Credential,
    ) -> DocsResult<Response> {
        let start = Instant::now();
        let result = request
            .header(header::AUTHORIZATION, credential.basic_authorization())
            .header(header::ACCEPT, "application/json")
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                record_upstream_call(operation, CallOutcome::Status(status), start.elapsed());
                if response.status().is_success() {
                    return Ok(response);
                }
                warn!(operation = operation.as_str(), status, "Upstream rejected request");
                Err(DocsError::Upstream { status })
            }
            Err(e) => {
                record_upstream_call(operation, CallOutcome::Transport, start.elapsed());
                warn!(operation = operation.as_str(), error = %e, "Upstream unreachable");
                Err(map_reqwest_error(e))
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> DocsResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| DocsError::Transport(format!("Invalid upstream response: {e}")))
    }
}

/// Map reqwest errors onto the transport class, without leaking the URL.
fn map_reqwest_error(error: reqwest::Error) -> DocsError {
    if error.is_timeout() {
        DocsError::Transport("Upstream request timed out".to_string())
    } else if error.is_connect() {
        DocsError::Transport("Could not connect to upstream".to_string())
    } else {
        DocsError::Transport(error.without_url().to_string())
    }
}

#[async_trait]
impl DocsApi for UpstreamClient {
    #[instrument(skip_all)]
    async fn list_guide_categories(&self, credential: &Credential) -> DocsResult<Vec<Category>> {
        let url = self.endpoint(&["categories"]);
        debug!(%url, "Fetching categories");

        let response = self
            .send(UpstreamOperation::ListCategories, self.client.get(url), credential)
            .await?;
        let categories: Vec<Category> = Self::decode(response).await?;
        let total = categories.len();
        let guides = Category::retain_guides(categories);

        debug!(total, guides = guides.len(), "Filtered categories to guides");
        Ok(guides)
    }

    #[instrument(skip(self, credential))]
    async fn list_docs(
        &self,
        credential: &Credential,
        category_slug: &str,
    ) -> DocsResult<Vec<Doc>> {
        let url = self.endpoint(&["categories", category_slug, "docs"]);
        debug!(%url, "Fetching docs");

        let response = self
            .send(UpstreamOperation::ListDocs, self.client.get(url), credential)
            .await?;
        Self::decode(response).await
    }

    #[instrument(skip(self, credential))]
    async fn update_doc_slug(
        &self,
        credential: &Credential,
        current_slug: &str,
        new_slug: &str,
    ) -> DocsResult<Doc> {
        if new_slug.is_empty() {
            return Err(DocsError::MissingPayload);
        }
        let url = self.endpoint(&["docs", current_slug]);
        debug!(%url, "Updating doc slug");

        let request = self
            .client
            .put(url)
            .json(&UpdateSlugRequest::new(new_slug));
        let response = self.send(UpstreamOperation::UpdateDoc, request, credential).await?;
        Self::decode(response).await
    }
}
