use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Draws an ICPC-style practice set from the AOJ-ICPC archive, skipping
/// problems your rivals have already solved.
#[derive(Debug, Parser)]
#[command(name = "aoj-icpc-set", version, about)]
pub struct Cli {
    /// TOML config with `[query]` and `[quota]` tables.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Parse a saved archive page instead of fetching one.
    #[arg(short, long, value_name = "HTML")]
    pub input: Option<PathBuf>,
    /// Extra rival handle (repeatable).
    #[arg(short, long = "rival", value_name = "HANDLE")]
    pub rivals: Vec<String>,
    /// Keep problems grouped by tier.
    #[arg(long)]
    pub no_shuffle: bool,
    /// Print tier, title and source next to each judge id.
    #[arg(short, long)]
    pub details: bool,
    /// Print the query URL and exit.
    #[arg(long)]
    pub print_url: bool,
    /// Increase logging verbosity (-v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_should_be_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_should_collect_rivals() {
        let cli = Cli::parse_from([
            "aoj-icpc-set",
            "-r",
            "otera",
            "--rival",
            "mitei",
            "--no-shuffle",
            "-vv",
        ]);
        assert_eq!(cli.rivals, ["otera", "mitei"]);
        assert!(cli.no_shuffle);
        assert_eq!(cli.verbose, 2);
        assert!(cli.config.is_none());
    }
}
