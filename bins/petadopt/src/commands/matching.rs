//! `petadopt match`

use crate::OutputFormat;
use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use petadopt_cli::output::Status;
use petadopt_core::ResultExt;
use petadopt_search::{levenshtein_distance, normalize_text, MatchConfig, MAX_THRESHOLD};
use serde::Serialize;

#[derive(Args)]
pub struct MatchArgs {
    /// Stored text, e.g. a listing's location
    pub source: String,

    /// Text the user typed
    pub query: String,

    /// Override the accepted edit distance
    #[arg(long)]
    pub max_distance: Option<usize>,

    /// Override the length pre-filter
    #[arg(long)]
    pub max_length_gap: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchReport {
    source: String,
    query: String,
    normalized_source: String,
    normalized_query: String,
    distance: usize,
    matched: bool,
}

pub fn run(args: &MatchArgs, configured: &MatchConfig, format: OutputFormat) -> Result<()> {
    let config = MatchConfig::new(
        args.max_length_gap.unwrap_or(configured.max_length_gap),
        args.max_distance.unwrap_or(configured.max_distance),
    );
    config
        .validate()
        .map_err(petadopt_core::Error::from)
        .with_suggestion(format!("Thresholds must be at most {}", MAX_THRESHOLD))?;

    let normalized_source = normalize_text(&args.source);
    let normalized_query = normalize_text(&args.query);
    let report = MatchReport {
        distance: levenshtein_distance(&normalized_source, &normalized_query),
        matched: config.matches(&args.source, &args.query),
        source: args.source.clone(),
        query: args.query.clone(),
        normalized_source,
        normalized_query,
    };

    if format == OutputFormat::Json {
        crate::app::print_json(&petadopt_shelter::ApiResponse::success(report))?;
        return Ok(());
    }

    let verdict = format!("\"{}\" vs \"{}\"", report.query, report.source);
    if report.matched {
        Status::success(&format!("match: {}", verdict));
    } else {
        Status::info(&format!("no match: {}", verdict));
    }
    println!(
        "  {} {}  {} {}/{}",
        "distance".dimmed(),
        report.distance,
        "thresholds".dimmed(),
        config.max_length_gap,
        config.max_distance
    );
    Ok(())
}
