//! Caller credential and its translation into upstream authentication.

use std::fmt;

use crate::error::{DocsError, DocsResult};

/// Header carrying the caller's API key on gateway requests.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Opaque API key supplied by the caller for one session.
///
/// Never empty. The key is redacted from `Debug` output so it can travel
/// through `tracing` fields safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a caller-supplied key, rejecting absent (empty) values.
    pub fn new(key: impl Into<String>) -> DocsResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(DocsError::MissingCredential);
        }
        Ok(Self(key))
    }

    /// Build from an optional header value.
    pub fn from_header(value: Option<&str>) -> DocsResult<Self> {
        value.map_or(Err(DocsError::MissingCredential), Self::new)
    }

    /// Raw key, for forwarding as the `x-api-key` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value for the remote system.
    ///
    /// The key is the Basic username and the password is empty.
    pub fn basic_authorization(&self) -> String {
        use base64::{engine::general_purpose::STANDARD, Engine};
        format!("Basic {}", STANDARD.encode(format!("{}:", self.0)))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}
