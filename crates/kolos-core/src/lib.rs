//! Core domain for Kolos: profile extraction from call transcripts, signal
//! generation, and application configuration.
//!
//! Extraction and generation are pure functions with no I/O; everything
//! that talks to the outside world lives in the sibling crates.

pub mod app_config;
pub mod config;
pub mod error;
pub mod extract;
pub mod profile;
pub mod signals;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use extract::extract_profile;
pub use profile::ProfileRecord;
pub use signals::{generate_signals, generate_signals_now, SignalRecord, SignalType, MAX_SIGNALS};
