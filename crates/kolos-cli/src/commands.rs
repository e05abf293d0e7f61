//! Offline access to the extractor and signal generator.
//!
//! Each command returns the pretty-printed JSON it would write to stdout.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use kolos_core::{extract_profile, generate_signals, ProfileRecord, SignalRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PipelineOutput {
    profile: ProfileRecord,
    signals: Vec<SignalRecord>,
}

/// Read a file, or stdin when no path is given.
fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn signal_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Utc::now().date_naive())
}

pub(crate) fn extract_json(transcript: &str) -> anyhow::Result<String> {
    let profile = extract_profile(transcript);
    tracing::debug!(empty = profile.is_empty(), "profile extracted");
    Ok(serde_json::to_string_pretty(&profile)?)
}

pub(crate) fn signals_json(profile_json: &str, date: NaiveDate) -> anyhow::Result<String> {
    let profile: ProfileRecord =
        serde_json::from_str(profile_json).context("input is not a profile JSON document")?;
    let signals = generate_signals(&profile, date);
    tracing::debug!(count = signals.len(), "signals generated");
    Ok(serde_json::to_string_pretty(&signals)?)
}

pub(crate) fn pipeline_json(transcript: &str, date: NaiveDate) -> anyhow::Result<String> {
    let profile = extract_profile(transcript);
    let signals = generate_signals(&profile, date);
    Ok(serde_json::to_string_pretty(&PipelineOutput { profile, signals })?)
}

pub(crate) fn run_extract(file: Option<&Path>) -> anyhow::Result<String> {
    extract_json(&read_input(file)?)
}

pub(crate) fn run_signals(file: Option<&Path>, date: Option<NaiveDate>) -> anyhow::Result<String> {
    signals_json(&read_input(file)?, signal_date(date))
}

pub(crate) fn run_pipeline(file: Option<&Path>, date: Option<NaiveDate>) -> anyhow::Result<String> {
    pipeline_json(&read_input(file)?, signal_date(date))
}
