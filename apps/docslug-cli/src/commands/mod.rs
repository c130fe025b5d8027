//! Subcommand implementations and the options they share.

pub mod categories;
pub mod docs;
pub mod rename;

use clap::Args;
use docslug_core::{Category, Credential};
use docslug_reconcile::{GatewayClient, Reconciler};
use std::time::Duration;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Options accepted by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base URL of the docslug gateway
    #[arg(
        long,
        env = "DOCSLUG_GATEWAY_URL",
        default_value = "http://localhost:5001",
        global = true
    )]
    pub gateway_url: String,

    /// ReadMe API key, forwarded as x-api-key
    #[arg(long, env = "DOCSLUG_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub timeout_secs: u64,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Build a reconciliation session against the configured gateway.
    pub fn session(&self) -> CliResult<Reconciler<GatewayClient>> {
        let key = self.api_key.as_deref().ok_or(CliError::MissingApiKey)?;
        let credential = Credential::new(key)?;

        if self.timeout_secs == 0 {
            return Err(CliError::Validation(
                "--timeout-secs must be greater than 0".to_string(),
            ));
        }

        let client = GatewayClient::new(&self.gateway_url, Duration::from_secs(self.timeout_secs))
            .map_err(|e| CliError::Validation(e.to_string()))?;
        debug!(gateway = %client.base_url(), "Session created");

        Ok(Reconciler::new(client, credential))
    }
}

/// Resolve a guide category by slug.
pub(crate) async fn find_category(
    session: &Reconciler<GatewayClient>,
    slug: &str,
) -> CliResult<Category> {
    session
        .list_categories()
        .await?
        .into_iter()
        .find(|c| c.slug == slug)
        .ok_or_else(|| CliError::Validation(format!("Unknown guide category '{slug}'")))
}
