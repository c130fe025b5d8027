//! `/api` routes: categories, docs and slug updates.
//!
//! Every handler is a thin translation of one inbound request into one
//! [`DocsApi`] call. Bodies are relayed as JSON, errors go through
//! [`GatewayError`].

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use docslug_core::{Category, Doc, DocsApi, DocsError, UpdateSlugRequest};
use std::sync::Arc;
use tracing::info;

use crate::error::GatewayResult;
use crate::middleware::ApiKey;

/// Shared state of the `/api` routes.
#[derive(Clone)]
pub struct DocsState {
    pub api: Arc<dyn DocsApi>,
}

impl DocsState {
    pub fn new(api: Arc<dyn DocsApi>) -> Self {
        Self { api }
    }
}

/// Create the `/api` routes.
pub fn docs_routes(state: DocsState) -> Router {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/:slug/docs", get(list_docs))
        .route("/api/docs/:slug", put(update_doc))
        .with_state(state)
}

/// `GET /api/categories`: guide categories only.
async fn list_categories(
    State(state): State<DocsState>,
    ApiKey(credential): ApiKey,
) -> GatewayResult<Json<Vec<Category>>> {
    let categories = state.api.list_guide_categories(&credential).await?;
    info!(count = categories.len(), "Listed guide categories");
    Ok(Json(categories))
}

/// `GET /api/categories/{slug}/docs`.
async fn list_docs(
    State(state): State<DocsState>,
    ApiKey(credential): ApiKey,
    Path(slug): Path<String>,
) -> GatewayResult<Json<Vec<Doc>>> {
    let docs = state.api.list_docs(&credential, &slug).await?;
    info!(category = %slug, count = docs.len(), "Listed docs");
    Ok(Json(docs))
}

/// `PUT /api/docs/{slug}` with `{"slug": "<new>"}`.
///
/// The body is read raw so that a missing key is reported before any body
/// problem, and so that an absent, empty or malformed body all count as a
/// missing slug.
async fn update_doc(
    State(state): State<DocsState>,
    ApiKey(credential): ApiKey,
    Path(slug): Path<String>,
    body: Bytes,
) -> GatewayResult<Json<Doc>> {
    let request: UpdateSlugRequest = serde_json::from_slice(&body).unwrap_or_default();
    let new_slug = request.new_slug().ok_or(DocsError::MissingPayload)?;

    let doc = state.api.update_doc_slug(&credential, &slug, new_slug).await?;
    info!(from = %slug, to = %new_slug, "Updated doc slug");
    Ok(Json(doc))
}
