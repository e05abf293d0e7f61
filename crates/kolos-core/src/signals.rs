//! Deterministic signal generation from a [`ProfileRecord`].
//!
//! A fixed sequence of rules each contributes at most one templated
//! recommendation. The result always holds between 1 and [`MAX_SIGNALS`]
//! records, in rule order. The only time dependency is the `date` stamped on
//! each record, which callers pass in.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::{text_or, ProfileRecord};

/// Upper bound on records returned by one generation call.
pub const MAX_SIGNALS: usize = 3;

const DEFAULT_CHECK_SIZE: &str = "$5M";
const DEFAULT_ROLE: &str = "Investor";
const DEFAULT_GOALS: &str = "strategic investment opportunities";
const DEFAULT_CAPITAL_ROLE: &str = "Co-GP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    #[serde(rename = "Family Office")]
    FamilyOffice,
    #[serde(rename = "Operator-Investor")]
    OperatorInvestor,
    #[serde(rename = "Platform")]
    Platform,
    #[serde(rename = "General Opportunity")]
    GeneralOpportunity,
}

impl SignalType {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SignalType::FamilyOffice => "Family Office",
            SignalType::OperatorInvestor => "Operator-Investor",
            SignalType::Platform => "Platform",
            SignalType::GeneralOpportunity => "General Opportunity",
        }
    }

    /// Fixed relationship / opportunity / access ratings for this type.
    #[must_use]
    pub fn roa(self) -> (u8, u8, u8) {
        match self {
            SignalType::FamilyOffice => (4, 4, 4),
            SignalType::OperatorInvestor => (3, 4, 4),
            SignalType::Platform => (3, 3, 5),
            SignalType::GeneralOpportunity => (3, 3, 3),
        }
    }

    #[must_use]
    pub fn overall(self) -> f64 {
        match self {
            SignalType::FamilyOffice => 4.0,
            SignalType::OperatorInvestor | SignalType::Platform => 3.7,
            SignalType::GeneralOpportunity => 3.0,
        }
    }

    /// Renders the ratings as `R:<n>, O:<n>, A:<n>`.
    #[must_use]
    pub fn roa_label(self) -> String {
        let (r, o, a) = self.roa();
        format!("R:{r}, O:{o}, A:{a}")
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One templated recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub signal_headline_source: String,
    pub check_size_focus: String,
    pub capital_role: String,
    pub why_fit: String,
    pub what_to_pitch: String,
    pub next_step: String,
    #[serde(rename = "scores_R_O_A")]
    pub scores_roa: String,
    pub overall: f64,
}

/// Profile values with defaults applied.
struct Inputs<'a> {
    today: NaiveDate,
    industries: &'a [String],
    regions: &'a [String],
    check_size: &'a str,
    role: &'a str,
    goals: String,
    capital_role: &'a str,
}

impl<'a> Inputs<'a> {
    fn new(profile: &'a ProfileRecord, today: NaiveDate) -> Self {
        Self {
            today,
            industries: profile.industries(),
            regions: profile.regions(),
            check_size: text_or(profile.check_size.as_deref(), DEFAULT_CHECK_SIZE),
            role: text_or(profile.role.as_deref(), DEFAULT_ROLE),
            goals: text_or(profile.goals.as_deref(), DEFAULT_GOALS).to_lowercase(),
            capital_role: text_or(profile.capital_role.as_deref(), DEFAULT_CAPITAL_ROLE),
        }
    }

    fn record(
        &self,
        signal_type: SignalType,
        headline: String,
        why_fit: String,
        what_to_pitch: String,
        next_step: &str,
    ) -> SignalRecord {
        SignalRecord {
            date: self.today,
            signal_type,
            signal_headline_source: headline,
            check_size_focus: self.check_size.to_owned(),
            capital_role: self.capital_role.to_owned(),
            why_fit,
            what_to_pitch,
            next_step: next_step.to_owned(),
            scores_roa: signal_type.roa_label(),
            overall: signal_type.overall(),
        }
    }
}

/// Generate recommendations for `profile`, stamped with `today`.
///
/// Same profile and date always give the same output.
#[must_use]
pub fn generate_signals(profile: &ProfileRecord, today: NaiveDate) -> Vec<SignalRecord> {
    let inputs = Inputs::new(profile, today);
    let mut signals = Vec::with_capacity(MAX_SIGNALS);

    if let Some(signal) = family_office(&inputs) {
        signals.push(signal);
    }
    if let Some(signal) = operator_investor(&inputs) {
        signals.push(signal);
    }
    if signals.len() < MAX_SIGNALS {
        signals.push(platform(&inputs));
    }
    // Rules above always leave at least the platform record; kept so the
    // non-empty guarantee does not hinge on that guard.
    if signals.is_empty() {
        signals.push(general_opportunity(&inputs));
    }

    signals.truncate(MAX_SIGNALS);
    signals
}

/// [`generate_signals`] stamped with the current UTC date.
#[must_use]
pub fn generate_signals_now(profile: &ProfileRecord) -> Vec<SignalRecord> {
    generate_signals(profile, Utc::now().date_naive())
}

fn family_office(inputs: &Inputs<'_>) -> Option<SignalRecord> {
    let industry = inputs.industries.first()?;
    let region_clause = inputs
        .regions
        .first()
        .map(|region| format!(" with {region} presence"))
        .unwrap_or_default();

    Some(inputs.record(
        SignalType::FamilyOffice,
        format!(
            "Family office recently closed {industry} deal matching your {} check size",
            inputs.check_size
        ),
        format!(
            "Strong track record in {industry} sector{region_clause}. Their investment thesis aligns with {}",
            inputs.goals
        ),
        format!(
            "Present your {} background and {} as a strategic fit for their portfolio",
            inputs.role, inputs.goals
        ),
        "Schedule introductory call this week via warm introduction",
    ))
}

fn operator_investor(inputs: &Inputs<'_>) -> Option<SignalRecord> {
    let region = inputs.regions.first()?;
    let industry_clause = if inputs.industries.is_empty() {
        String::new()
    } else {
        format!(" in {}", inputs.industries.join(" and "))
    };

    Some(inputs.record(
        SignalType::OperatorInvestor,
        format!(
            "Operator-investor active in {region} market seeking {} partnerships",
            inputs.capital_role
        ),
        format!(
            "Geographic focus matches your {region} strategy. They bring operational expertise{industry_clause} that complements your capital"
        ),
        format!(
            "Discuss {} and explore {} structure for {region} opportunities",
            inputs.goals, inputs.capital_role
        ),
        "Send personalized outreach email with deal flow summary",
    ))
}

fn platform(inputs: &Inputs<'_>) -> SignalRecord {
    let industry_clause = if inputs.industries.is_empty() {
        String::new()
    } else {
        format!(" {}", inputs.industries.join(", "))
    };
    let region_clause = if inputs.regions.is_empty() {
        String::new()
    } else {
        format!(" and {}", inputs.regions.join(", "))
    };

    inputs.record(
        SignalType::Platform,
        format!(
            "Investment platform matching {} profiles with {} capital seeking {} opportunities",
            inputs.role, inputs.check_size, inputs.capital_role
        ),
        format!(
            "Platform specializes in connecting {} professionals with capital partners. Their network includes{industry_clause} sector focus{region_clause} presence",
            inputs.role
        ),
        format!(
            "Introduce your {} and explore platform benefits for deal sourcing and capital access",
            inputs.goals
        ),
        "Complete platform profile and request introduction to 2-3 relevant connections",
    )
}

fn general_opportunity(inputs: &Inputs<'_>) -> SignalRecord {
    inputs.record(
        SignalType::GeneralOpportunity,
        format!(
            "Investment opportunity matching {} check size and {} structure",
            inputs.check_size, inputs.capital_role
        ),
        format!(
            "Opportunity aligns with your investment profile and {}",
            inputs.goals
        ),
        format!("Present your {} background and investment thesis", inputs.role),
        "Schedule exploratory call to discuss fit",
    )
}

#[cfg(test)]
#[path = "signals_test.rs"]
mod tests;
