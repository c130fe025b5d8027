//! `docslug categories`

use clap::Args;
use tracing::info;

use super::GlobalArgs;
use crate::error::CliResult;
use crate::output::{print_json, table};

/// Arguments for the categories command
#[derive(Args, Debug)]
pub struct CategoriesArgs {}

/// List guide categories.
pub async fn execute(_args: CategoriesArgs, global: &GlobalArgs) -> CliResult<()> {
    let session = global.session()?;
    let categories = session.list_categories().await?;
    info!(count = categories.len(), "Fetched guide categories");

    if global.json {
        print_json(&categories)?;
    } else if categories.is_empty() {
        println!("No guide categories found.");
    } else {
        table::print_category_table(&categories);
        println!();
        println!("{} guide categories", categories.len());
    }
    Ok(())
}
