//! `docslug docs <category>`

use clap::Args;

use super::{find_category, GlobalArgs};
use crate::error::CliResult;
use crate::output::{print_json, table};

/// Arguments for the docs command
#[derive(Args, Debug)]
pub struct DocsArgs {
    /// Slug of the guide category
    pub category: String,
}

/// List the docs of one guide category.
pub async fn execute(args: DocsArgs, global: &GlobalArgs) -> CliResult<()> {
    let mut session = global.session()?;
    let category = find_category(&session, &args.category).await?;
    let working_set = session.select_category(&category).await?;

    if global.json {
        print_json(working_set)?;
    } else if working_set.is_empty() {
        println!("No docs in '{}'.", category.slug);
    } else {
        println!("{} ({})", category.title, category.slug);
        println!();
        table::print_doc_table(working_set.entries().iter().map(|e| &e.doc));
        println!();
        println!("{} docs", working_set.len());
    }
    Ok(())
}
