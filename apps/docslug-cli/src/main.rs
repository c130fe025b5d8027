//! docslug CLI - batch doc slug renames through the docslug gateway
//!
//! This CLI enables editors to:
//! - List the guide categories of a ReadMe project
//! - List the docs of a category
//! - Rename several doc slugs in one run and see each outcome

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::GlobalArgs;
use error::CliResult;

/// docslug CLI - ReadMe doc slug management
#[derive(Parser)]
#[command(name = "docslug")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List guide categories
    Categories(commands::categories::CategoriesArgs),

    /// List the docs of a guide category
    Docs(commands::docs::DocsArgs),

    /// Rename doc slugs within a category
    Rename(commands::rename::RenameArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let global = cli.global;
    match cli.command {
        Commands::Categories(args) => commands::categories::execute(args, &global).await,
        Commands::Docs(args) => commands::docs::execute(args, &global).await,
        Commands::Rename(args) => commands::rename::execute(args, &global).await,
    }
}

/// Log to stderr so stdout stays parseable. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
