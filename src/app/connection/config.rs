//! Archive client settings
//!
//! Only the HTTP transport is tunable. FTP connections take nothing from
//! here beyond the credentials handed to the factory.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::{http, limits};
use crate::errors::TransportResult;

/// Settings shared by every HTTP index page scraper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Whole request timeout, body included
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Requests per second, per connection
    pub rate_limit_rps: u32,
    /// CSS selector of file anchors in archive index pages
    pub archive_selector: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
            archive_selector: http::ARCHIVE_ITEM_SELECTOR.to_string(),
        }
    }
}

impl ClientConfig {
    /// HTTP client for index page requests
    pub fn build_http_client(&self) -> TransportResult<Client> {
        let client = Client::builder()
            .cookie_store(true) // archive logins redirect through a session cookie
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .pool_idle_timeout(http::POOL_IDLE_TIMEOUT)
            .user_agent(http::USER_AGENT)
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_constants() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, http::DEFAULT_TIMEOUT);
        assert_eq!(config.rate_limit_rps, limits::DEFAULT_RATE_LIMIT_RPS);
        assert_eq!(config.archive_selector, "a.archiveItemText");
    }

    #[test]
    fn test_builds_client_with_short_timeouts() {
        let config = ClientConfig {
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(1),
            ..Default::default()
        };
        assert!(config.build_http_client().is_ok());
    }
}
