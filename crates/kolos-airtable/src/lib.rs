//! Airtable-backed member store.
//!
//! Persists [`kolos_core::ProfileRecord`]s as rows of a single Airtable table
//! and reads them back as [`MemberRecord`]s.

pub mod client;
pub mod error;
pub mod types;

pub use client::AirtableClient;
pub use error::AirtableError;
pub use types::MemberRecord;
