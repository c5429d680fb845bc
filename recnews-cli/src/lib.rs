//! Command-line interface for serving recnews recommendations.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod recommend;

pub use error::CliError;
use recommend::RecommendArgs;

const ARG_USER_ID: &str = "user-id";
const ARG_DATABASE: &str = "database";
const ARG_STRATEGY: &str = "strategy";
const ARG_TOP_K: &str = "top-k";
const ARG_TOP_P: &str = "top-p";
const ARG_USE_HISTORY: &str = "use-history";
const ARG_RANK: &str = "rank";
const ENV_USER_ID: &str = "RECNEWS_CMDS_RECOMMEND_USER_ID";

/// Database read when neither flags, environment, nor files name one.
const DEFAULT_DATABASE: &str = "recnews.db";

/// Run the recnews CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// snapshot cannot be loaded or built, or no recommendations are produced.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => recommend::run_recommend(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "recnews",
    about = "Hybrid news recommendations from a warehouse snapshot",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend articles for one reader.
    Recommend(RecommendArgs),
}

#[cfg(test)]
mod tests;
