//! petadopt - pet adoption platform CLI
//!
//! Browse and manage listings, submit adoption requests, run the kit shop,
//! and walk through the email verification flow against a JSON data file.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use petadopt_core::config::Config;
use petadopt_core::error::exit_codes;
use petadopt_shelter::response::ResponseStatus;
use petadopt_shelter::{ApiResponse, ShelterError};
use std::path::PathBuf;
use std::process::ExitCode;

mod app;
mod commands;
mod logging;

use app::App;
use commands::{adopt, animals, auth, kits, matching};

/// Pet adoption platform CLI
#[derive(Parser)]
#[command(name = "petadopt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to .petadopt.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON data file, overrides [storage] data_file
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a query fuzzily matches a location
    Match(matching::MatchArgs),

    /// Manage adoption listings
    Animals {
        #[command(subcommand)]
        command: animals::AnimalsCommand,
    },

    /// Submit and review adoption requests
    Adopt {
        #[command(subcommand)]
        command: adopt::AdoptCommand,
    },

    /// Manage the kit shop
    Kits {
        #[command(subcommand)]
        command: kits::KitsCommand,
    },

    /// Sign up, verify email, and log in
    Auth {
        #[command(subcommand)]
        command: auth::AuthCommand,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, format),
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config,
        data,
        format,
        verbose,
        command,
    } = cli;

    let config = Config::load(config.as_deref())?;
    logging::init(&config.schema.logging, verbose)?;

    for warning in &config.warnings {
        tracing::warn!(field = %warning.field, "{}", warning.message);
    }

    let search = config.schema.search;
    let open = || App::open(config, data, format);

    match command {
        Commands::Match(args) => matching::run(&args, &search, format),
        Commands::Animals { command } => animals::run(&open()?, command),
        Commands::Adopt { command } => adopt::run(&open()?, command),
        Commands::Kits { command } => kits::run(&open()?, command),
        Commands::Auth { command } => auth::run(&open()?, command),
    }
}

/// Print the failure and pick an exit code from its error code.
///
/// In JSON mode the response envelope also goes to stdout, so scripts see
/// every outcome in the same shape.
fn report(err: &anyhow::Error, format: OutputFormat) -> ExitCode {
    let (code, body) = if let Some(shelter) = err.downcast_ref::<ShelterError>() {
        let (_, body) = ApiResponse::from_error(shelter);
        (shelter.code().exit_code(), serde_json::to_value(body))
    } else if let Some(core) = err.downcast_ref::<petadopt_core::Error>() {
        let body = ApiResponse::from_report(core.to_report());
        (core.code.exit_code(), serde_json::to_value(body))
    } else {
        let body = ApiResponse::<()> {
            status: ResponseStatus::Error,
            message: Some(format!("{:#}", err)),
            results: None,
            data: None,
        };
        (exit_codes::FAILURE, serde_json::to_value(body))
    };

    if format == OutputFormat::Json {
        if let Ok(json) = body.and_then(|body| serde_json::to_string_pretty(&body)) {
            println!("{}", json);
        }
    }

    eprintln!("{} {:#}", "Error:".red().bold(), err);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
