//! Transcript intake: extract a profile, store it, and derive signals.

use kolos_airtable::AirtableClient;
use kolos_core::{extract_profile, generate_signals_now, ProfileRecord, SignalRecord};

/// What one intake run produced. `member_id` is `None` and `signals` empty
/// when the store rejected the profile.
#[derive(Debug)]
pub(crate) struct IntakeOutcome {
    pub profile: ProfileRecord,
    pub member_id: Option<String>,
    pub signals: Vec<SignalRecord>,
}

/// Runs extraction, persistence, and signal generation for one transcript.
///
/// Store failures are logged and folded into the outcome; nothing here
/// returns an error because the webhook must always be acknowledged.
pub(crate) async fn ingest_transcript(
    store: &AirtableClient,
    transcript: &str,
    call_id: Option<&str>,
) -> IntakeOutcome {
    let profile = extract_profile(transcript);
    let call_id = call_id.unwrap_or_default();

    match store.create_member(&profile).await {
        Ok(member_id) => {
            let signals = generate_signals_now(&profile);
            tracing::info!(
                call_id,
                member_id = %member_id,
                signals = signals.len(),
                "transcript ingested"
            );
            IntakeOutcome {
                profile,
                member_id: Some(member_id),
                signals,
            }
        }
        Err(e) => {
            tracing::error!(call_id, error = %e, "failed to store member from transcript");
            IntakeOutcome {
                profile,
                member_id: None,
                signals: Vec::new(),
            }
        }
    }
}
