//! Best-effort profile extraction from free-form call transcripts.
//!
//! Each field has its own case-insensitive pattern, searched independently.
//! A field is populated only when its pattern matches; nothing here ever
//! fails. False positives and misses are expected for natural-language input.

use std::sync::LazyLock;

use regex::Regex;

use crate::profile::ProfileRecord;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)name is ([A-Z][a-z]+(?: [A-Z][a-z]+)?)").expect("valid name regex")
});

static ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:role|position|title) (?:is|as)(?: as)? ([^,.]+)").expect("valid role regex")
});

static INDUSTRIES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)industr(?:y|ies)[:\s]+([^.]+)").expect("valid industries regex")
});

static REGIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)regions?[:\s]+([^.]+)").expect("valid regions regex"));

static GOALS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)goals?[:\s]+([^,.]+)").expect("valid goals regex"));

static CHECK_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:check size|investment|raise)[:\s]+(\$?[\d.]+[MBK]?)")
        .expect("valid check size regex")
});

static CAPITAL_ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:capital role|preferred|equity|co-gp)[:\s]+([^,.]+)")
        .expect("valid capital role regex")
});

/// Matches a list segment that starts another field, e.g. `region: Europe`.
/// Ends a comma-separated list so `industries: Tech, Health, region: EU`
/// does not swallow the region.
static FIELD_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?:and|my|our|the)\s+)*(?:name is|(?:role|position|title) (?:is|as)|(?:industr(?:y|ies)|regions?|goals?|check size|investment|raise|capital role|preferred|equity|co-gp)[:\s])",
    )
    .expect("valid field label regex")
});

/// Extract a [`ProfileRecord`] from a call transcript.
///
/// Fields whose pattern does not match are left as `None`; an empty or
/// unrecognisable transcript yields an empty record.
#[must_use]
pub fn extract_profile(transcript: &str) -> ProfileRecord {
    ProfileRecord {
        name: capture(&NAME_RE, transcript),
        role: capture(&ROLE_RE, transcript),
        industries: capture_list(&INDUSTRIES_RE, transcript),
        regions: capture_list(&REGIONS_RE, transcript),
        goals: capture(&GOALS_RE, transcript),
        check_size: capture(&CHECK_SIZE_RE, transcript),
        capital_role: capture(&CAPITAL_ROLE_RE, transcript),
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    let value = re.captures(text)?.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn capture_list(re: &Regex, text: &str) -> Option<Vec<String>> {
    let raw = re.captures(text)?.get(1)?.as_str();
    let items = split_list(raw);
    (!items.is_empty()).then_some(items)
}

/// Split a comma-separated list, trimming segments. The first segment is
/// always kept; later segments stop at the first one that opens another
/// field.
fn split_list(raw: &str) -> Vec<String> {
    let mut segments = raw.split(',').map(str::trim);
    segments
        .next()
        .into_iter()
        .chain(segments.take_while(|segment| !FIELD_LABEL_RE.is_match(segment)))
        .filter(|segment| !segment.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
