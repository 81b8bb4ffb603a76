use reqwest::Client;
use std::time::Duration;

use crate::constants::{
    GEOCODING_API_BASE, OPEN_METEO_API_BASE, REQUEST_TIMEOUT_SECS, TAVILY_API_BASE, USER_AGENT,
};

/// Base URLs of the upstream HTTP APIs
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub geocoding: String,
    pub forecast: String,
    pub search: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: GEOCODING_API_BASE.to_string(),
            forecast: OPEN_METEO_API_BASE.to_string(),
            search: TAVILY_API_BASE.to_string(),
        }
    }
}

/// Runtime configuration shared by every toolset
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoints: Endpoints,
    pub request_timeout: Duration,
    /// Registers the web search tool when set
    pub tavily_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            tavily_api_key: None,
        }
    }
}

impl Config {
    pub fn with_tavily_api_key(mut self, key: Option<String>) -> Self {
        // An exported-but-empty variable counts as unset
        self.tavily_api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the HTTP client used for every outbound request
    pub fn http_client(&self) -> reqwest::Result<Client> {
        Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.request_timeout)
            .build()
    }
}
