use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_COMPILE_BASE_URL;

/// Transport configuration for compile requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileApiConfig {
    /// Base URL of the compile server; `/compile` is appended when missing.
    pub base_url: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout. `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for CompileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COMPILE_BASE_URL.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl CompileApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}
