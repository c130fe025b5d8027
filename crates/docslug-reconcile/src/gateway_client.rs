//! HTTP client for the docslug gateway's `/api` surface.

use std::time::Duration;

use async_trait::async_trait;
use docslug_core::{
    Category, Credential, Doc, DocsApi, DocsError, DocsResult, UpdateSlugRequest, API_KEY_HEADER,
};
use reqwest::{Client, Response, Url};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

/// Error body produced by the gateway.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// [`DocsApi`] over HTTP, sending the credential as `x-api-key`.
///
/// Gateway error responses are mapped back onto the same [`DocsError`]
/// variants the gateway reported.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: Url,
    client: Client,
}

impl GatewayClient {
    /// Client for the gateway at `base_url` (e.g. `http://localhost:5001`).
    pub fn new(base_url: &str, timeout: Duration) -> DocsResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DocsError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Self::with_http_client(base_url, client)
    }

    /// Client with a pre-built `reqwest::Client`.
    pub fn with_http_client(base_url: &str, client: Client) -> DocsResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DocsError::Transport(format!("Invalid gateway URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DocsError::Transport(format!(
                "Invalid gateway URL '{base_url}'"
            )));
        }
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> DocsResult<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| DocsError::Transport(format!("Invalid gateway response: {e}")));
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        Err(DocsError::from_response(
            status.as_u16(),
            body.error.as_deref(),
            body.message.as_deref(),
        ))
    }
}

fn transport(error: reqwest::Error) -> DocsError {
    DocsError::Transport(error.without_url().to_string())
}

#[async_trait]
impl DocsApi for GatewayClient {
    async fn list_guide_categories(&self, credential: &Credential) -> DocsResult<Vec<Category>> {
        let url = self.endpoint(&["api", "categories"]);
        debug!(%url, "Listing categories");
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, credential.expose())
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }

    async fn list_docs(
        &self,
        credential: &Credential,
        category_slug: &str,
    ) -> DocsResult<Vec<Doc>> {
        let url = self.endpoint(&["api", "categories", category_slug, "docs"]);
        debug!(%url, "Listing docs");
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, credential.expose())
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }

    async fn update_doc_slug(
        &self,
        credential: &Credential,
        current_slug: &str,
        new_slug: &str,
    ) -> DocsResult<Doc> {
        if new_slug.is_empty() {
            return Err(DocsError::MissingPayload);
        }
        let url = self.endpoint(&["api", "docs", current_slug]);
        debug!(%url, new_slug, "Updating doc slug");
        let response = self
            .client
            .put(url)
            .header(API_KEY_HEADER, credential.expose())
            .json(&UpdateSlugRequest::new(new_slug))
            .send()
            .await
            .map_err(transport)?;
        Self::decode(response).await
    }
}
