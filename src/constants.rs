//! Application constants for RINEX Lister
//!
//! This module centralizes the constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names for authentication
pub mod env {
    /// Environment variable name for the data center username
    pub const USERNAME: &str = "IGS_USERNAME";

    /// Environment variable name for the data center password
    pub const PASSWORD: &str = "IGS_PASSWORD";
}

/// FTP transport constants
pub mod ftp {
    /// User name sent when no credentials are configured
    pub const ANONYMOUS_USER: &str = "anonymous";

    /// Password sent with the anonymous user
    pub const ANONYMOUS_PASSWORD: &str = "anonymous@";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "RINEX-Lister/0.1.0 (GNSS Data Availability)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// CSS selector for file anchors in CDDIS archive index pages
    pub const ARCHIVE_ITEM_SELECTOR: &str = "a.archiveItemText";
}

/// Rate limiting configuration
pub mod limits {
    /// Default rate limit for HTTP directory requests (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 5;
}

/// Directory listing defaults
pub mod listing {
    /// Hour searched when the caller names none
    pub const DEFAULT_HOUR: u8 = 0;

    /// Largest valid hour of day
    pub const MAX_HOUR: u8 = 23;
}

/// Data availability thresholds
pub mod availability {
    /// Days into the past searched by default
    pub const DEFAULT_LOOKBACK_DAYS: u32 = 60;

    /// A station whose newest file is older than this many days is stale
    pub const STALE_AFTER_DAYS: u32 = 10;

    /// A station whose newest file is older than this many days is unhealthy
    pub const UNHEALTHY_AFTER_DAYS: u32 = 30;
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_FILE: &str = "rinex-lister.toml";

    /// Directory name under the user config dir
    pub const APP_DIR: &str = "rinex-lister";

    /// System-wide configuration file (Unix only)
    #[cfg(unix)]
    pub const SYSTEM_FILE: &str = "/etc/rinex-lister/config.toml";
}

// Re-export commonly used constants at module level for convenience
pub use env::{PASSWORD as ENV_PASSWORD, USERNAME as ENV_USERNAME};
pub use http::USER_AGENT;
pub use limits::DEFAULT_RATE_LIMIT_RPS;
