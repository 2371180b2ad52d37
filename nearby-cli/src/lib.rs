//! Command-line interface for nearby-place search.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod categories;
mod error;
mod search;

pub use error::CliError;

use categories::write_categories;
use search::{SearchArgs, run_search};

const ARG_LATITUDE: &str = "latitude";
const ARG_LONGITUDE: &str = "longitude";
const ARG_CATEGORY: &str = "category";
const ARG_RADIUS_MILES: &str = "radius-miles";
const ARG_ZOOM: &str = "zoom";
const ARG_ENDPOINT: &str = "endpoint";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_CATEGORY: &str = "NEARBY_CMDS_SEARCH_CATEGORY";

/// Run the nearby CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// search fails, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Search(args) => run_search(args),
        Command::Categories => {
            let mut stdout = std::io::stdout().lock();
            write_categories(&mut stdout)
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "nearby",
    about = "Find places of a category around a location",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search for places of one category within a radius.
    Search(SearchArgs),
    /// List the supported categories and their map-data tags.
    Categories,
}

#[cfg(test)]
mod tests;
