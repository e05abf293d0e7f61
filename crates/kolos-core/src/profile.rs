use serde::{Deserialize, Serialize};

/// Structured profile for one member, produced by transcript extraction or
/// submitted directly.
///
/// Every field is optional. Absent fields are omitted when serialized and
/// are filled with fixed defaults at signal-generation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital_role: Option<String>,
}

impl ProfileRecord {
    /// True when no field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.industries.is_none()
            && self.regions.is_none()
            && self.goals.is_none()
            && self.check_size.is_none()
            && self.capital_role.is_none()
    }

    /// Industries in stated order; empty when absent.
    #[must_use]
    pub fn industries(&self) -> &[String] {
        self.industries.as_deref().unwrap_or_default()
    }

    /// Regions in stated order; empty when absent.
    #[must_use]
    pub fn regions(&self) -> &[String] {
        self.regions.as_deref().unwrap_or_default()
    }
}

/// Returns the value when it is present and non-empty, otherwise `default`.
pub(crate) fn text_or<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_empty() {
        assert!(ProfileRecord::default().is_empty());
        assert!(ProfileRecord::default().industries().is_empty());
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_fields() {
        let profile = ProfileRecord {
            check_size: Some("$10M".to_string()),
            capital_role: Some("LP".to_string()),
            ..ProfileRecord::default()
        };
        let json = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "checkSize": "$10M", "capitalRole": "LP" })
        );
    }

    #[test]
    fn deserializes_partial_form_submission() {
        let profile: ProfileRecord = serde_json::from_str(
            r#"{"name":"Ada Lovelace","industries":["Fintech"],"checkSize":"$2M"}"#,
        )
        .expect("deserialize");
        assert_eq!(profile.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(profile.industries(), ["Fintech".to_string()]);
        assert!(profile.regions.is_none());
        assert_eq!(profile.check_size.as_deref(), Some("$2M"));
    }

    #[test]
    fn text_or_treats_empty_string_as_absent() {
        assert_eq!(text_or(Some(""), "Investor"), "Investor");
        assert_eq!(text_or(None, "Investor"), "Investor");
        assert_eq!(text_or(Some("Founder"), "Investor"), "Founder");
    }
}
