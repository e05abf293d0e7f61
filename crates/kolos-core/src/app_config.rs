use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub airtable_table_name: String,
    pub airtable_api_url: String,
    pub retell_api_key: Option<String>,
    pub retell_agent_id: Option<String>,
    pub retell_api_url: String,
    pub http_timeout_secs: u64,
    pub event_buffer: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("airtable_api_key", &"[redacted]")
            .field("airtable_base_id", &self.airtable_base_id)
            .field("airtable_table_name", &self.airtable_table_name)
            .field("airtable_api_url", &self.airtable_api_url)
            .field(
                "retell_api_key",
                &self.retell_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("retell_agent_id", &self.retell_agent_id)
            .field("retell_api_url", &self.retell_api_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("event_buffer", &self.event_buffer)
            .finish()
    }
}
