//! Batch slug reconciliation.
//!
//! The [`Reconciler`] owns a [`WorkingSet`] of docs for one category, lets the
//! caller edit slugs locally, and on [`Reconciler::commit`] submits only the
//! entries whose edited slug diverges from the synced one. Every update is
//! independent: one failure never blocks, delays or rolls back another.
//!
//! All I/O goes through a [`DocsApi`](docslug_core::DocsApi); in production
//! that is a [`GatewayClient`] talking to the docslug gateway.

pub mod gateway_client;
pub mod reconciler;
pub mod report;
pub mod working_set;

pub use gateway_client::GatewayClient;
pub use reconciler::Reconciler;
pub use report::{CommitItem, CommitReport};
pub use working_set::{DocEntry, UpdateOutcome, WorkingSet};
