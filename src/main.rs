// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, run one session.
// - Returns `anyhow::Result` so any session error ends the process with a
//   message and a non-zero status.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::debug;

use dewey_shelf::prompt::TerminalPrompter;
use dewey_shelf::store::load_collection;
use dewey_shelf::ui::{find_session, print_records, recommend_session, sort_session};
use dewey_shelf::{CatalogClient, LibraryError};

mod cli;

use cli::{Args, Mode};

fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let Some(mode) = args.mode() else {
        Args::command().print_help()?;
        return Ok(());
    };

    let mut prompter = TerminalPrompter::new();

    match mode {
        Mode::Sort(count) => {
            let count = usize::try_from(count).map_err(|_| {
                LibraryError::InvalidArgument(format!(
                    "expected 1 or more books, got a non-positive number ({count})"
                ))
            })?;
            let catalog = CatalogClient::from_env()?;
            sort_session(&catalog, count, &args.output, &mut prompter)?;
        }
        Mode::Find(path) => {
            let collection = load_collection(&path)?;
            let catalog = CatalogClient::from_env()?;
            let results = find_session(&collection, &catalog, &mut prompter)?;
            print_records(&results)?;
        }
        Mode::Recommend(path) => {
            let collection = load_collection(&path)?;
            let picks = recommend_session(&collection, &mut prompter, &mut rand::thread_rng())?;
            print_records(&picks)?;
        }
    }

    Ok(())
}
