//! Airtable REST payloads for the members table.
//!
//! Column names are PascalCase in the table (`Name`, `CheckSize`, ...).
//! Every column is optional on read because Airtable omits empty cells.

use chrono::{DateTime, Utc};
use kolos_core::ProfileRecord;
use serde::{Deserialize, Serialize};

/// A member row as returned to API callers: store id, creation time, and
/// the profile fields flattened alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub profile: ProfileRecord,
}

/// Column values written when a member is created.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct NewMemberFields<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub industries: &'a [String],
    pub regions: &'a [String],
    pub goals: &'a str,
    pub check_size: &'a str,
    pub capital_role: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewMemberFields<'a> {
    pub(crate) fn from_profile(profile: &'a ProfileRecord, created_at: DateTime<Utc>) -> Self {
        Self {
            name: profile
                .name
                .as_deref()
                .filter(|name| !name.is_empty())
                .unwrap_or("Unknown"),
            role: profile.role.as_deref().unwrap_or_default(),
            industries: profile.industries(),
            regions: profile.regions(),
            goals: profile.goals.as_deref().unwrap_or_default(),
            check_size: profile.check_size.as_deref().unwrap_or_default(),
            capital_role: profile.capital_role.as_deref().unwrap_or_default(),
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRecordRequest<'a> {
    pub fields: NewMemberFields<'a>,
    /// Lets Airtable add unseen multi-select options (new industries or
    /// regions) instead of rejecting the row.
    pub typecast: bool,
}

/// Column values as read back from Airtable.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MemberFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub industries: Option<Vec<String>>,
    #[serde(default)]
    pub regions: Option<Vec<String>>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub check_size: Option<String>,
    #[serde(default)]
    pub capital_role: Option<String>,
    /// Kept as text; rows edited by hand may hold a value that is not a
    /// timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl MemberFields {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref()?.parse().ok()
    }

    pub(crate) fn into_profile(self) -> ProfileRecord {
        ProfileRecord {
            name: non_empty(self.name),
            role: non_empty(self.role),
            industries: self.industries.filter(|v| !v.is_empty()),
            regions: self.regions.filter(|v| !v.is_empty()),
            goals: non_empty(self.goals),
            check_size: non_empty(self.check_size),
            capital_role: non_empty(self.capital_role),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// One record envelope: `{ "id": "rec...", "createdTime": "...", "fields": {...} }`.
#[derive(Debug, Deserialize)]
pub(crate) struct AirtableRecord {
    pub id: String,
    #[serde(default, rename = "createdTime")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fields: MemberFields,
}

/// `created_at` prefers the `CreatedAt` column (the list sort key) over
/// Airtable's system `createdTime`.
impl From<AirtableRecord> for MemberRecord {
    fn from(record: AirtableRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.fields.created_at().or(record.created_time),
            profile: record.fields.into_profile(),
        }
    }
}

/// A page of records from the list endpoint. `offset` is present while more
/// pages remain.
#[derive(Debug, Deserialize)]
pub(crate) struct ListRecordsResponse {
    #[serde(default)]
    pub records: Vec<AirtableRecord>,
    #[serde(default)]
    pub offset: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_member_fields_apply_write_defaults() {
        let profile = ProfileRecord::default();
        let now = "2025-01-02T03:04:05Z".parse().expect("timestamp");
        let fields = NewMemberFields::from_profile(&profile, now);
        let json = serde_json::to_value(&fields).expect("serialize");
        assert_eq!(json["Name"], "Unknown");
        assert_eq!(json["Role"], "");
        assert_eq!(json["Industries"], serde_json::json!([]));
        assert_eq!(json["CheckSize"], "");
        assert_eq!(json["CreatedAt"], "2025-01-02T03:04:05Z");

        let blank_name = ProfileRecord {
            name: Some(String::new()),
            ..ProfileRecord::default()
        };
        let json = serde_json::to_value(NewMemberFields::from_profile(&blank_name, now))
            .expect("serialize");
        assert_eq!(json["Name"], "Unknown");
    }

    #[test]
    fn created_at_column_wins_over_system_created_time() {
        let record: AirtableRecord = serde_json::from_value(serde_json::json!({
            "id": "rec1",
            "createdTime": "2025-01-02T03:04:05.000Z",
            "fields": { "CreatedAt": "2025-02-01T10:00:00.000Z" }
        }))
        .expect("deserialize");
        let member = MemberRecord::from(record);
        assert_eq!(
            member.created_at,
            Some("2025-02-01T10:00:00Z".parse().expect("timestamp"))
        );
    }

    #[test]
    fn unparseable_created_at_falls_back_to_created_time() {
        let record: AirtableRecord = serde_json::from_value(serde_json::json!({
            "id": "rec2",
            "createdTime": "2025-01-02T03:04:05.000Z",
            "fields": { "CreatedAt": "last tuesday" }
        }))
        .expect("deserialize");
        let member = MemberRecord::from(record);
        assert_eq!(
            member.created_at,
            Some("2025-01-02T03:04:05Z".parse().expect("timestamp"))
        );
    }

    #[test]
    fn record_with_blank_cells_becomes_sparse_profile() {
        let record: AirtableRecord = serde_json::from_value(serde_json::json!({
            "id": "rec123",
            "createdTime": "2025-01-02T03:04:05.000Z",
            "fields": {
                "Name": "Jane Doe",
                "Role": "",
                "Industries": ["Tech"],
                "Regions": []
            }
        }))
        .expect("deserialize");

        let member = MemberRecord::from(record);
        assert_eq!(member.id, "rec123");
        assert!(member.created_at.is_some());
        assert_eq!(member.profile.name.as_deref(), Some("Jane Doe"));
        assert!(member.profile.role.is_none());
        assert_eq!(member.profile.industries(), ["Tech".to_string()]);
        assert!(member.profile.regions.is_none());
    }

    #[test]
    fn member_record_flattens_profile_fields() {
        let member = MemberRecord {
            id: "recABC".to_string(),
            created_at: None,
            profile: ProfileRecord {
                check_size: Some("$5M".to_string()),
                ..ProfileRecord::default()
            },
        };
        let json = serde_json::to_value(&member).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "id": "recABC", "checkSize": "$5M" })
        );
    }
}
