//! `docslug rename <category> <OLD=NEW>...`

use clap::Args;
use docslug_reconcile::{CommitReport, GatewayClient, Reconciler, UpdateOutcome};
use std::str::FromStr;
use tracing::info;

use super::{find_category, GlobalArgs};
use crate::error::{CliError, CliResult};
use crate::output::{print_failure, print_json, print_success, print_warning};

/// One requested rename, written `OLD=NEW` on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugEdit {
    pub from: String,
    pub to: String,
}

impl FromStr for SlugEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once('=')
            .ok_or_else(|| format!("expected OLD=NEW, got '{s}'"))?;
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() {
            return Err(format!("missing current slug in '{s}'"));
        }
        if to.is_empty() {
            return Err(format!("missing new slug in '{s}'"));
        }
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Arguments for the rename command
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Slug of the guide category holding the docs
    pub category: String,

    /// Renames to apply, as current-slug=new-slug
    #[arg(required = true, value_name = "OLD=NEW")]
    pub edits: Vec<SlugEdit>,
}

/// Rename docs within one category and report each outcome.
pub async fn execute(args: RenameArgs, global: &GlobalArgs) -> CliResult<()> {
    let mut session = global.session()?;
    let category = find_category(&session, &args.category).await?;
    session.select_category(&category).await?;

    apply_edits(&mut session, &args.edits)?;

    let report = session.commit().await;
    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "Rename finished"
    );

    if global.json {
        print_json(&report)?;
    } else {
        print_report(&session, &report);
    }

    if report.all_succeeded() {
        Ok(())
    } else {
        Err(CliError::PartialFailure {
            failed: report.failed,
            attempted: report.attempted(),
        })
    }
}

/// Stage every edit locally. Fails before any update if a slug is unknown.
fn apply_edits(session: &mut Reconciler<GatewayClient>, edits: &[SlugEdit]) -> CliResult<()> {
    let category = session
        .working_set()
        .category()
        .map(|c| c.slug.clone())
        .unwrap_or_default();

    if let Some(missing) = edits
        .iter()
        .find(|e| session.working_set().position_of(&e.from).is_none())
    {
        return Err(CliError::Validation(format!(
            "No doc with slug '{}' in category '{category}'",
            missing.from
        )));
    }

    for edit in edits {
        session.edit_slug_of(&edit.from, edit.to.clone());
    }
    Ok(())
}

fn print_report(session: &Reconciler<GatewayClient>, report: &CommitReport) {
    if report.attempted() == 0 {
        print_warning("No slug changes to commit.");
        return;
    }

    for item in &report.items {
        let status = session
            .working_set()
            .get(item.index)
            .and_then(|e| e.status_message())
            .unwrap_or_default();
        let line = format!("{} -> {}: {}", item.from, item.to, status);
        match item.outcome {
            UpdateOutcome::Success => print_success(&line),
            _ => print_failure(&line),
        }
    }

    println!();
    println!("Summary:");
    println!("  Updated: {}", report.succeeded);
    if report.failed > 0 {
        println!("  Failed:  {}", report.failed);
    }
}
