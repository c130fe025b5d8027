//! Unconditional `OPTIONS` handling.
//!
//! `CorsLayer` only answers requests that look like CORS preflights (an
//! `Origin` plus `Access-Control-Request-Method`). Any other `OPTIONS`
//! request is answered here with an empty 200 so that preflight never fails,
//! whatever path or headers it carries.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};

/// Layer answering every `OPTIONS` request with an empty 200.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreflightLayer;

impl<S> Layer<S> for PreflightLayer {
    type Service = PreflightService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PreflightService { inner }
    }
}

/// Service wrapper produced by [`PreflightLayer`].
#[derive(Debug, Clone)]
pub struct PreflightService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for PreflightService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        if request.method() == Method::OPTIONS {
            return Box::pin(async { Ok(StatusCode::OK.into_response()) });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}
