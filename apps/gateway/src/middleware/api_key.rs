//! Caller credential extraction.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use docslug_core::{Credential, DocsError, API_KEY_HEADER};

use crate::error::GatewayError;

/// The caller's `x-api-key`, required on every `/api` route.
///
/// Rejection happens before the handler runs, so a request without a key
/// never reaches the upstream.
#[derive(Debug, Clone)]
pub struct ApiKey(pub Credential);

#[async_trait]
impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = match parts.headers.get(API_KEY_HEADER) {
            Some(value) => Some(value.to_str().map_err(|_| DocsError::MissingCredential)?),
            None => None,
        };
        Ok(ApiKey(Credential::from_header(value)?))
    }
}
