//! docslug core
//!
//! Types shared by the credential-translating gateway and the batch
//! reconciliation engine:
//!
//! - [`Category`] and [`Doc`], the remote entities as the ReadMe API serves them
//! - [`Credential`], the caller-supplied API key and its Basic auth translation
//! - [`DocsError`], the single error taxonomy every operation reports
//! - [`DocsApi`], the three operations the engine performs through the gateway

pub mod api;
pub mod credential;
pub mod error;
pub mod models;

pub use api::DocsApi;
pub use credential::{Credential, API_KEY_HEADER};
pub use error::{DocsError, DocsResult};
pub use models::{Category, CategoryKind, Doc, UpdateSlugRequest};
