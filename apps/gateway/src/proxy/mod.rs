//! Upstream communication.

pub mod client;

pub use client::UpstreamClient;
