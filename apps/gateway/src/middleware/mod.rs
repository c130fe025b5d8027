//! Gateway middleware components.

pub mod api_key;
pub mod preflight;

pub use api_key::ApiKey;
pub use preflight::PreflightLayer;
