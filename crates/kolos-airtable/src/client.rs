//! HTTP client for the Airtable REST API, scoped to one members table.
//!
//! Wraps `reqwest` with bearer auth, URL construction for
//! `{api}/{base_id}/{table}`, and typed response decoding. Non-2xx answers
//! surface as [`AirtableError::Status`]; there is no retry.

use std::time::Duration;

use chrono::Utc;
use kolos_core::ProfileRecord;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::AirtableError;
use crate::types::{
    AirtableRecord, CreateRecordRequest, ListRecordsResponse, MemberRecord, NewMemberFields,
};

const DEFAULT_BASE_URL: &str = "https://api.airtable.com/v0/";
const CREATED_AT_FIELD: &str = "CreatedAt";

/// Client for one Airtable members table.
///
/// Use [`AirtableClient::new`] for production or
/// [`AirtableClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct AirtableClient {
    client: Client,
    api_key: String,
    table_url: Url,
}

impl AirtableClient {
    /// Creates a client against the public Airtable API.
    ///
    /// # Errors
    ///
    /// Returns [`AirtableError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        base_id: &str,
        table: &str,
        timeout_secs: u64,
    ) -> Result<Self, AirtableError> {
        Self::with_base_url(api_key, base_id, table, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AirtableError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`AirtableError::InvalidBaseUrl`] if `base_url` cannot hold
    /// path segments.
    pub fn with_base_url(
        api_key: &str,
        base_id: &str,
        table: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AirtableError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("kolos/0.1 (member-store)")
            .build()?;

        let invalid = |reason: String| AirtableError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };

        let mut table_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        table_url
            .path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(base_id)
            .push(table);

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            table_url,
        })
    }

    /// Stores a profile as a new row and returns the Airtable record id.
    ///
    /// Absent text fields are written as empty strings, absent lists as
    /// empty arrays, and a missing name as `Unknown`. `CreatedAt` is set to
    /// the current time.
    ///
    /// # Errors
    ///
    /// - [`AirtableError::Http`] on network failure.
    /// - [`AirtableError::Status`] if Airtable rejects the row.
    /// - [`AirtableError::Deserialize`] if the response is not a record.
    pub async fn create_member(&self, profile: &ProfileRecord) -> Result<String, AirtableError> {
        let body = CreateRecordRequest {
            fields: NewMemberFields::from_profile(profile, Utc::now()),
            typecast: true,
        };
        let request = self.client.post(self.table_url.clone()).json(&body);
        let record: AirtableRecord = self.send_json(request, "create member").await?;

        tracing::info!(member_id = %record.id, "member saved to airtable");
        Ok(record.id)
    }

    /// Fetches one member by record id. Returns `Ok(None)` when Airtable
    /// answers 404.
    ///
    /// # Errors
    ///
    /// - [`AirtableError::Http`] on network failure.
    /// - [`AirtableError::Status`] on any other non-2xx status.
    /// - [`AirtableError::Deserialize`] if the response is not a record.
    pub async fn get_member(&self, id: &str) -> Result<Option<MemberRecord>, AirtableError> {
        let mut url = self.table_url.clone();
        url.path_segments_mut()
            .map_err(|()| AirtableError::InvalidBaseUrl {
                url: self.table_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .push(id);

        let response = self.authorize(self.client.get(url)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let record: AirtableRecord = Self::decode(response, &format!("get member {id}")).await?;
        Ok(Some(record.into()))
    }

    /// Returns the most recently created member, if any.
    ///
    /// # Errors
    ///
    /// Same as [`AirtableClient::list_members`].
    pub async fn latest_member(&self) -> Result<Option<MemberRecord>, AirtableError> {
        let page = self.list_page(Some(1), None).await?;
        Ok(page.records.into_iter().next().map(Into::into))
    }

    /// Returns every member, newest first, following Airtable's `offset`
    /// cursor until all pages are read.
    ///
    /// # Errors
    ///
    /// - [`AirtableError::Http`] on network failure.
    /// - [`AirtableError::Status`] on a non-2xx status.
    /// - [`AirtableError::Deserialize`] if a page does not match the
    ///   expected shape.
    pub async fn list_members(&self) -> Result<Vec<MemberRecord>, AirtableError> {
        let mut members = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let page = self.list_page(None, offset.as_deref()).await?;
            members.extend(page.records.into_iter().map(MemberRecord::from));
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        tracing::debug!(count = members.len(), "listed airtable members");
        Ok(members)
    }

    /// Builds the list URL: sorted by `CreatedAt` descending, optionally
    /// capped and continued from an `offset` cursor.
    fn list_url(&self, max_records: Option<u32>, offset: Option<&str>) -> Url {
        let mut url = self.table_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("sort[0][field]", CREATED_AT_FIELD);
            pairs.append_pair("sort[0][direction]", "desc");
            if let Some(max) = max_records {
                pairs.append_pair("maxRecords", &max.to_string());
            }
            if let Some(offset) = offset {
                pairs.append_pair("offset", offset);
            }
        }
        url
    }

    async fn list_page(
        &self,
        max_records: Option<u32>,
        offset: Option<&str>,
    ) -> Result<ListRecordsResponse, AirtableError> {
        let url = self.list_url(max_records, offset);
        self.send_json(self.client.get(url), "list members").await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.api_key)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, AirtableError> {
        let response = self.authorize(request).send().await?;
        Self::decode(response, context).await
    }

    /// Asserts a 2xx status and parses the body as `T`.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        context: &str,
    ) -> Result<T, AirtableError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AirtableError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| AirtableError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> AirtableClient {
        AirtableClient::with_base_url("pat-test", "appBase", "Members", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn table_url_appends_base_and_table() {
        let client = test_client("https://api.airtable.com/v0/");
        assert_eq!(
            client.table_url.as_str(),
            "https://api.airtable.com/v0/appBase/Members"
        );
    }

    #[test]
    fn table_url_tolerates_missing_trailing_slash() {
        let client = test_client("https://api.airtable.com/v0");
        assert_eq!(
            client.table_url.as_str(),
            "https://api.airtable.com/v0/appBase/Members"
        );
    }

    #[test]
    fn table_url_percent_encodes_table_names() {
        let client =
            AirtableClient::with_base_url("k", "appBase", "Member Profiles", 30, DEFAULT_BASE_URL)
                .expect("client");
        assert_eq!(
            client.table_url.as_str(),
            "https://api.airtable.com/v0/appBase/Member%20Profiles"
        );
    }

    #[test]
    fn list_url_sorts_newest_first() {
        let client = test_client(DEFAULT_BASE_URL);
        let url = client.list_url(Some(1), None);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("sort[0][field]".to_string(), "CreatedAt".to_string()),
                ("sort[0][direction]".to_string(), "desc".to_string()),
                ("maxRecords".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn list_url_carries_offset_cursor() {
        let client = test_client(DEFAULT_BASE_URL);
        let url = client.list_url(None, Some("itrNext/rec1"));
        assert!(url
            .query_pairs()
            .any(|(k, v)| k == "offset" && v == "itrNext/rec1"));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = AirtableClient::with_base_url("k", "b", "t", 30, "not a url").unwrap_err();
        assert!(matches!(err, AirtableError::InvalidBaseUrl { .. }));
    }
}
