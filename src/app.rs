//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs the tracing subscriber
//! - resolves configuration (flags, environment, `.env`)
//! - runs the query and prints/exports the tables

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, CommonArgs, QueryArgs};
use crate::data::WEEKLY_PETROLEUM;
use crate::data::catalog::weekly_petroleum_request;
use crate::domain::{BASE_URL_ENV, CredentialSource, DEFAULT_BASE_URL, FetchConfig, SeriesRequest};
use crate::error::AppError;

pub mod pipeline;

/// Metadata fields shown in the terminal summary.
const SUMMARY_FIELDS: &[&str] = &["name", "units", "f", "end"];

/// Entry point for the `eia` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Query(args) => handle_query(args),
        Command::Weekly(args) => handle_weekly(args),
        Command::Catalog => {
            print!("{}", format_catalog());
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_query(args: QueryArgs) -> Result<(), AppError> {
    let request = request_from_args(&args)?;
    run_and_print(request, &args.common)
}

fn handle_weekly(args: CommonArgs) -> Result<(), AppError> {
    run_and_print(weekly_petroleum_request(), &args)
}

fn run_and_print(request: SeriesRequest, args: &CommonArgs) -> Result<(), AppError> {
    let config = fetch_config_from_args(args);
    let run = pipeline::run_query(request, &config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.request, &run.values, &run.metadata)
    );
    println!("{}", crate::report::format_values(&run.values, args.row_limit()));
    println!("{}", crate::report::format_metadata(&run.metadata, SUMMARY_FIELDS));

    if let Some(path) = &args.export_values {
        crate::io::write_values_csv(path, &run.values)?;
        tracing::info!(path = %path.display(), "wrote value table");
    }
    if let Some(path) = &args.export_metadata {
        crate::io::write_metadata_json(path, &run.metadata)?;
        tracing::info!(path = %path.display(), "wrote metadata table");
    }

    Ok(())
}

/// Resolve flags plus environment into a [`FetchConfig`].
pub fn fetch_config_from_args(args: &CommonArgs) -> FetchConfig {
    dotenvy::dotenv().ok();
    let base_url = args
        .base_url
        .clone()
        .or_else(|| std::env::var(BASE_URL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let credential = match &args.key_file {
        Some(path) => CredentialSource::File(path.clone()),
        None => CredentialSource::Env(args.key_env_or_default().to_string()),
    };

    FetchConfig {
        base_url,
        credential,
        parallel: args.parallel,
    }
}

/// Build the request: plain identifiers, or the nickname form when any
/// `--nickname` is given (then every identifier must have exactly one).
pub fn request_from_args(args: &QueryArgs) -> Result<SeriesRequest, AppError> {
    if args.nicknames.is_empty() {
        return Ok(SeriesRequest::ByIdentifier(args.series.clone()));
    }

    for (id, _) in &args.nicknames {
        if !args.series.contains(id) {
            return Err(AppError::invalid_input(format!(
                "Nickname given for '{id}', which is not a requested series."
            )));
        }
    }

    let mut pairs = Vec::with_capacity(args.series.len());
    for id in &args.series {
        let mut names = args.nicknames.iter().filter(|(nid, _)| nid == id);
        let Some((_, name)) = names.next() else {
            return Err(AppError::invalid_input(format!("Missing --nickname for series '{id}'.")));
        };
        if names.next().is_some() {
            return Err(AppError::invalid_input(format!("More than one --nickname for series '{id}'.")));
        }
        pairs.push((id.clone(), name.clone()));
    }

    Ok(SeriesRequest::WithNicknames(pairs))
}

fn format_catalog() -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<32} {}\n", "series_id", "nickname"));
    for (id, nick) in WEEKLY_PETROLEUM {
        out.push_str(&format!("{id:<32} {nick}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::error::ErrorKind;

    fn query_args(argv: &[&str]) -> QueryArgs {
        let mut full = vec!["eia", "query"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Query(args) => args,
            _ => panic!("expected query"),
        }
    }

    #[test]
    fn plain_ids_give_identifier_form() {
        let req = request_from_args(&query_args(&["ID1", "ID2"])).unwrap();
        assert_eq!(req, SeriesRequest::by_identifier(["ID1", "ID2"]));
    }

    #[test]
    fn nicknames_follow_series_order() {
        let req = request_from_args(&query_args(&["ID1", "ID2", "-n", "ID2=Gas", "-n", "ID1=Oil"])).unwrap();
        assert_eq!(req, SeriesRequest::with_nicknames([("ID1", "Oil"), ("ID2", "Gas")]));
    }

    #[test]
    fn partial_nicknames_are_rejected() {
        let err = request_from_args(&query_args(&["ID1", "ID2", "-n", "ID1=Oil"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn nickname_for_unknown_series_is_rejected() {
        let err = request_from_args(&query_args(&["ID1", "-n", "ID1=Oil", "-n", "ID9=Gas"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn key_file_flag_selects_file_source() {
        let args = query_args(&["ID1", "--key-file", "key.txt", "--base-url", "http://localhost:9/series/"]);
        let config = fetch_config_from_args(&args.common);
        assert_eq!(config.credential, CredentialSource::File("key.txt".into()));
        assert_eq!(config.base_url, "http://localhost:9/series/");
    }

    #[test]
    fn base_url_prefers_flag_then_env() {
        let args = query_args(&["ID1"]);
        // SAFETY: no other test reads or writes EIA_BASE_URL.
        unsafe { std::env::set_var(BASE_URL_ENV, "http://mirror.test/series/") };
        let from_env = fetch_config_from_args(&args.common);
        unsafe { std::env::remove_var(BASE_URL_ENV) };
        assert_eq!(from_env.base_url, "http://mirror.test/series/");
        assert_eq!(from_env.credential, CredentialSource::Env("EIA_API_KEY".into()));

        let flag = query_args(&["ID1", "--base-url", "http://flag.test/series/"]);
        unsafe { std::env::set_var(BASE_URL_ENV, "http://mirror.test/series/") };
        let from_flag = fetch_config_from_args(&flag.common);
        unsafe { std::env::remove_var(BASE_URL_ENV) };
        assert_eq!(from_flag.base_url, "http://flag.test/series/");
    }

    #[test]
    fn catalog_lists_every_preset_series() {
        let out = format_catalog();
        assert_eq!(out.lines().count(), WEEKLY_PETROLEUM.len() + 1);
        assert!(out.contains("PET.WCESTUS1.W"));
    }
}
