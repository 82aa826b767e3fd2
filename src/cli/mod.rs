//! Command-line parsing for the EIA series fetcher.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fetch/merge code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::DEFAULT_KEY_ENV;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "eia", version, about = "Fetch and merge EIA time-series")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one or more series and merge them on shared report dates.
    Query(QueryArgs),
    /// Fetch the weekly petroleum inventory preset.
    Weekly(CommonArgs),
    /// List the weekly petroleum preset identifiers and nicknames.
    Catalog,
}

#[derive(Debug, Args, Clone)]
pub struct QueryArgs {
    /// Series identifiers, e.g. PET.WCESTUS1.W.
    #[arg(required = true, value_name = "SERIES_ID")]
    pub series: Vec<String>,

    /// Display name for a series, as ID=NAME. When given, every series needs one.
    #[arg(short = 'n', long = "nickname", value_name = "ID=NAME", value_parser = parse_nickname)]
    pub nicknames: Vec<(String, String)>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by every fetching command.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Read the API key from the first line of this file.
    #[arg(long, value_name = "PATH", conflicts_with = "key_env")]
    pub key_file: Option<PathBuf>,

    /// Read the API key from this environment variable (.env is loaded first).
    #[arg(long, value_name = "VAR")]
    pub key_env: Option<String>,

    /// Series endpoint. Defaults to $EIA_BASE_URL, then the public v1 endpoint.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Issue the per-series requests concurrently.
    #[arg(long)]
    pub parallel: bool,

    /// Number of value rows to print.
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    /// Print every value row.
    #[arg(long, conflicts_with = "rows")]
    pub all_rows: bool,

    /// Export the merged value table to CSV.
    #[arg(long = "export-values", value_name = "CSV")]
    pub export_values: Option<PathBuf>,

    /// Export the metadata table to JSON.
    #[arg(long = "export-metadata", value_name = "JSON")]
    pub export_metadata: Option<PathBuf>,
}

impl CommonArgs {
    pub fn key_env_or_default(&self) -> &str {
        self.key_env.as_deref().unwrap_or(DEFAULT_KEY_ENV)
    }

    pub fn row_limit(&self) -> Option<usize> {
        if self.all_rows { None } else { Some(self.rows) }
    }
}

fn parse_nickname(raw: &str) -> Result<(String, String), String> {
    let (id, name) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=NAME, got '{raw}'"))?;
    if id.is_empty() || name.is_empty() {
        return Err(format!("expected ID=NAME with both parts non-empty, got '{raw}'"));
    }
    Ok((id.to_string(), name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_with_nicknames() {
        let cli = Cli::parse_from([
            "eia", "query", "ID1", "ID2", "-n", "ID1=Oil", "--nickname", "ID2=Gas", "--parallel",
        ]);
        let Command::Query(args) = cli.command else {
            panic!("expected query");
        };
        assert_eq!(args.series, vec!["ID1", "ID2"]);
        assert_eq!(
            args.nicknames,
            vec![("ID1".to_string(), "Oil".to_string()), ("ID2".to_string(), "Gas".to_string())]
        );
        assert!(args.common.parallel);
        assert_eq!(args.common.row_limit(), Some(20));
    }

    #[test]
    fn query_requires_a_series() {
        assert!(Cli::try_parse_from(["eia", "query"]).is_err());
    }

    #[test]
    fn nickname_needs_separator() {
        assert!(parse_nickname("ID1Oil").is_err());
        assert!(parse_nickname("=Oil").is_err());
        assert_eq!(parse_nickname("ID1=Crude=Oil").unwrap().1, "Crude=Oil");
    }

    #[test]
    fn key_file_conflicts_with_key_env() {
        assert!(Cli::try_parse_from(["eia", "weekly", "--key-file", "k.txt", "--key-env", "X"]).is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["eia", "catalog", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }
}
