// CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use dewey_shelf::store::DEFAULT_INVENTORY;

/// A tool for managing a Dewey Decimal library of random books.
///
/// Books are fetched from Open Library (override the host with
/// `OPEN_LIBRARY_URL`), shelved by hand, and saved for later searching.
#[derive(Parser, Debug)]
#[command(name = "dewey-shelf")]
#[command(author, version, about)]
#[command(group(ArgGroup::new("mode").args(["sort", "find", "recommend"])))]
#[command(after_help = "\
Examples:
  dewey-shelf -s 10          # create, sort a collection of 10 books
  dewey-shelf -f file.json   # search collection based on author or title
  dewey-shelf -r file.json   # recommend a random book of a chosen category")]
pub struct Args {
    /// Sort mode: fetch COUNT random books and shelve them
    #[arg(short, long, value_name = "COUNT", allow_negative_numbers = true)]
    pub sort: Option<i64>,

    /// Find mode: search a saved collection by author or title
    #[arg(short, long, value_name = "FILE")]
    pub find: Option<PathBuf>,

    /// Recommend mode: pick random books of a chosen category
    #[arg(short, long, value_name = "FILE")]
    pub recommend: Option<PathBuf>,

    /// Where sort mode saves the collection
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_INVENTORY)]
    pub output: PathBuf,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// What the operator asked for.
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Sort(i64),
    Find(PathBuf),
    Recommend(PathBuf),
}

impl Args {
    /// The selected mode, if any. clap guarantees at most one is set.
    pub fn mode(&self) -> Option<Mode> {
        if let Some(count) = self.sort {
            Some(Mode::Sort(count))
        } else if let Some(path) = &self.find {
            Some(Mode::Find(path.clone()))
        } else {
            self.recommend.clone().map(Mode::Recommend)
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
