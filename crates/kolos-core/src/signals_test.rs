use super::*;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

fn profile(industries: &[&str], regions: &[&str]) -> ProfileRecord {
    let list = |items: &[&str]| {
        (!items.is_empty())
            .then(|| items.iter().map(|s| (*s).to_string()).collect::<Vec<String>>())
    };
    ProfileRecord {
        industries: list(industries),
        regions: list(regions),
        ..ProfileRecord::default()
    }
}

fn types(signals: &[SignalRecord]) -> Vec<SignalType> {
    signals.iter().map(|s| s.signal_type).collect()
}

#[test]
fn industries_and_regions_yield_three_signals_in_rule_order() {
    let signals = generate_signals(&profile(&["Tech", "Healthcare"], &["North America"]), day());

    assert_eq!(
        types(&signals),
        vec![
            SignalType::FamilyOffice,
            SignalType::OperatorInvestor,
            SignalType::Platform
        ]
    );
    assert!(signals[0].signal_headline_source.contains("Tech"));
    assert!(signals[1].signal_headline_source.contains("North America"));
}

#[test]
fn empty_profile_yields_single_platform_signal_with_defaults() {
    let signals = generate_signals(&ProfileRecord::default(), day());

    assert_eq!(signals.len(), 1);
    let platform = &signals[0];
    assert_eq!(platform.signal_type, SignalType::Platform);
    assert_eq!(platform.check_size_focus, "$5M");
    assert_eq!(platform.capital_role, "Co-GP");
    assert_eq!(
        platform.signal_headline_source,
        "Investment platform matching Investor profiles with $5M capital seeking Co-GP opportunities"
    );
    assert_eq!(
        platform.why_fit,
        "Platform specializes in connecting Investor professionals with capital partners. Their network includes sector focus presence"
    );
    assert_eq!(
        platform.what_to_pitch,
        "Introduce your strategic investment opportunities and explore platform benefits for deal sourcing and capital access"
    );
}

#[test]
fn industry_only_profile_yields_family_office_then_platform() {
    let signals = generate_signals(&profile(&["Fintech"], &[]), day());

    assert_eq!(
        types(&signals),
        vec![SignalType::FamilyOffice, SignalType::Platform]
    );
    assert_eq!(
        signals[0].why_fit,
        "Strong track record in Fintech sector. Their investment thesis aligns with strategic investment opportunities"
    );
}

#[test]
fn region_only_profile_yields_operator_investor_then_platform() {
    let signals = generate_signals(&profile(&[], &["Europe", "MENA"]), day());

    assert_eq!(
        types(&signals),
        vec![SignalType::OperatorInvestor, SignalType::Platform]
    );
    assert_eq!(
        signals[0].why_fit,
        "Geographic focus matches your Europe strategy. They bring operational expertise that complements your capital"
    );
    assert!(signals[1].why_fit.ends_with("sector focus and Europe, MENA presence"));
}

#[test]
fn templates_substitute_profile_values() {
    let record = ProfileRecord {
        name: Some("Jane Doe".to_string()),
        role: Some("Family Office Principal".to_string()),
        industries: Some(vec!["Tech".to_string(), "Healthcare".to_string()]),
        regions: Some(vec!["North America".to_string()]),
        goals: Some("Co-Investing In Growth Rounds".to_string()),
        check_size: Some("$25M".to_string()),
        capital_role: Some("LP".to_string()),
    };
    let signals = generate_signals(&record, day());

    let family = &signals[0];
    assert_eq!(
        family.signal_headline_source,
        "Family office recently closed Tech deal matching your $25M check size"
    );
    assert_eq!(
        family.why_fit,
        "Strong track record in Tech sector with North America presence. Their investment thesis aligns with co-investing in growth rounds"
    );
    assert_eq!(
        family.what_to_pitch,
        "Present your Family Office Principal background and co-investing in growth rounds as a strategic fit for their portfolio"
    );

    let operator = &signals[1];
    assert_eq!(
        operator.signal_headline_source,
        "Operator-investor active in North America market seeking LP partnerships"
    );
    assert!(operator
        .why_fit
        .contains("operational expertise in Tech and Healthcare that"));
    assert_eq!(
        operator.what_to_pitch,
        "Discuss co-investing in growth rounds and explore LP structure for North America opportunities"
    );

    let platform = &signals[2];
    assert!(platform
        .why_fit
        .ends_with("Their network includes Tech, Healthcare sector focus and North America presence"));

    for signal in &signals {
        assert_eq!(signal.check_size_focus, "$25M");
        assert_eq!(signal.capital_role, "LP");
        assert_eq!(signal.date, day());
    }
}

#[test]
fn empty_strings_fall_back_to_defaults() {
    let record = ProfileRecord {
        role: Some(String::new()),
        check_size: Some(String::new()),
        capital_role: Some(String::new()),
        goals: Some(String::new()),
        ..ProfileRecord::default()
    };
    let signals = generate_signals(&record, day());
    assert_eq!(signals[0].check_size_focus, "$5M");
    assert_eq!(signals[0].capital_role, "Co-GP");
    assert!(signals[0].signal_headline_source.contains("Investor profiles"));
}

#[test]
fn scores_are_fixed_per_type() {
    let signals = generate_signals(&profile(&["Tech"], &["Asia"]), day());
    let scores: Vec<(&str, f64)> = signals
        .iter()
        .map(|s| (s.scores_roa.as_str(), s.overall))
        .collect();
    assert_eq!(
        scores,
        vec![("R:4, O:4, A:4", 4.0), ("R:3, O:4, A:4", 3.7), ("R:3, O:3, A:5", 3.7)]
    );
    assert_eq!(SignalType::GeneralOpportunity.roa_label(), "R:3, O:3, A:3");
    assert!((SignalType::GeneralOpportunity.overall() - 3.0).abs() < f64::EPSILON);
}

#[test]
fn output_is_always_between_one_and_three_and_never_falls_back() {
    let cases = [
        profile(&[], &[]),
        profile(&["A"], &[]),
        profile(&[], &["B"]),
        profile(&["A", "C", "D"], &["B", "E"]),
        ProfileRecord {
            industries: Some(Vec::new()),
            regions: Some(Vec::new()),
            ..ProfileRecord::default()
        },
    ];
    for case in &cases {
        let signals = generate_signals(case, day());
        assert!(
            (1..=MAX_SIGNALS).contains(&signals.len()),
            "bad length for {case:?}"
        );
        assert!(
            !types(&signals).contains(&SignalType::GeneralOpportunity),
            "fallback rule fired for {case:?}"
        );
        assert_eq!(signals.last().map(|s| s.signal_type), Some(SignalType::Platform));
    }
}

#[test]
fn fallback_rule_renders_general_opportunity() {
    let record = ProfileRecord::default();
    let signal = general_opportunity(&Inputs::new(&record, day()));
    assert_eq!(signal.signal_type, SignalType::GeneralOpportunity);
    assert_eq!(
        signal.signal_headline_source,
        "Investment opportunity matching $5M check size and Co-GP structure"
    );
    assert_eq!(
        signal.why_fit,
        "Opportunity aligns with your investment profile and strategic investment opportunities"
    );
    assert_eq!(
        signal.what_to_pitch,
        "Present your Investor background and investment thesis"
    );
    assert_eq!(signal.next_step, "Schedule exploratory call to discuss fit");
    assert_eq!(signal.scores_roa, "R:3, O:3, A:3");
}

#[test]
fn same_profile_and_date_is_idempotent() {
    let record = profile(&["Energy"], &["Texas"]);
    assert_eq!(generate_signals(&record, day()), generate_signals(&record, day()));

    let later = NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date");
    let a = generate_signals(&record, day());
    let b = generate_signals(&record, later);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_ne!(x.date, y.date);
        assert_eq!(
            SignalRecord {
                date: y.date,
                ..x.clone()
            },
            *y
        );
    }
}

#[test]
fn signal_record_serializes_with_external_field_names() {
    let signals = generate_signals(&ProfileRecord::default(), day());
    let json = serde_json::to_value(&signals[0]).expect("serialize");
    assert_eq!(json["date"], "2025-03-14");
    assert_eq!(json["type"], "Platform");
    assert_eq!(json["scores_R_O_A"], "R:3, O:3, A:5");
    assert_eq!(json["overall"], 3.7);
    assert_eq!(json["next_step"], "Complete platform profile and request introduction to 2-3 relevant connections");
}
