use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use appscan_core::config::{resolve_with_base, Config, Settings};
use appscan_core::types::{AppListing, ListingComparison, Review};
use appscan_keywords::{Lexicon, TargetingClassifier, TargetingVerdict, Thresholds};
use appscan_similarity::{compare_listings, NameMatcher};

/// One row of the cross-catalog comparison sheet.
#[derive(Debug, Deserialize)]
struct ListingPair {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    left_title: String,
    #[serde(default)]
    left_description: String,
    #[serde(default)]
    right_title: String,
    #[serde(default)]
    right_description: String,
}

#[derive(Debug, Serialize)]
struct ComparisonRow<'a> {
    id: Option<&'a str>,
    #[serde(flatten)]
    metrics: ListingComparison,
}

/// A listing with the reviews collected for it, if any.
#[derive(Debug, Deserialize)]
struct ListingRecord {
    #[serde(flatten)]
    listing: AppListing,
    #[serde(default)]
    reviews: Option<Vec<Review>>,
}

#[derive(Debug, Serialize)]
struct VerdictRow<'a> {
    id: &'a str,
    #[serde(flatten)]
    verdict: TargetingVerdict,
}

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <compare|match|classify> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn input_path(args: &[String], usage: &str) -> anyhow::Result<PathBuf> {
    let raw = args.first().with_context(|| format!("Usage: {usage}"))?;
    Ok(resolve_with_base(&env::current_dir()?, raw))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn compare(args: &[String]) -> anyhow::Result<()> {
    let path = input_path(args, "appscan compare <pairs.json>")?;
    let pairs: Vec<ListingPair> = read_json(&path)?;
    let pb = ProgressBar::new(pairs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pairs ({percent}%)")?
            .progress_chars("#>-"),
    );
    for pair in &pairs {
        let metrics = compare_listings(&pair.left_title, &pair.left_description, &pair.right_title, &pair.right_description);
        let row = ComparisonRow { id: pair.id.as_deref(), metrics };
        let line = serde_json::to_string(&row)?;
        pb.suspend(|| println!("{line}"));
        pb.inc(1);
    }
    pb.finish_and_clear();
    tracing::info!(pairs = pairs.len(), "comparison complete");
    Ok(())
}

fn match_names(args: &[String], settings: &Settings) -> anyhow::Result<()> {
    let usage = "appscan match <name-a> <name-b> [max_distance]";
    let (a, b) = match (args.first(), args.get(1)) {
        (Some(a), Some(b)) => (a, b),
        _ => anyhow::bail!("Usage: {usage}"),
    };
    let max_distance = match args.get(2) {
        Some(raw) => raw.parse().with_context(|| format!("max_distance must be an integer, got '{raw}'"))?,
        None => settings.matching.max_distance,
    };
    let matcher = NameMatcher::new(max_distance);
    let distance = matcher.match_distance(a, b);
    let matched = matcher.is_likely_match(a, b);
    println!("{}", serde_json::json!({ "match": matched, "distance": distance, "max_distance": max_distance }));
    Ok(())
}

fn classify(args: &[String], settings: &Settings) -> anyhow::Result<()> {
    let path = input_path(args, "appscan classify <listings.json>")?;
    let records: Vec<ListingRecord> = read_json(&path)?;
    let lexicon = Lexicon::try_from(settings.lexicon.clone())?;
    let classifier = TargetingClassifier::new(&lexicon, Thresholds::from(&settings.scoring));

    let reviews: HashMap<String, Vec<Review>> = records
        .iter()
        .filter_map(|r| r.reviews.clone().map(|v| (r.listing.id.clone(), v)))
        .collect();

    let mut targeted = 0usize;
    for record in &records {
        let verdict = classifier.classify_listing(&record.listing, &reviews);
        if verdict.targeted {
            targeted += 1;
        }
        let row = VerdictRow { id: &record.listing.id, verdict };
        println!("{}", serde_json::to_string(&row)?);
    }
    tracing::info!(listings = records.len(), targeted, "classification complete");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "compare" => compare(&args)?,
        "match" => match_names(&args, &settings)?,
        "classify" => classify(&args, &settings)?,
        _ => { eprintln!("Unknown command: {}", cmd); std::process::exit(1); }
    }
    Ok(())
}
