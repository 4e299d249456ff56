//! Error types for RINEX Lister
//!
//! Errors are split by the layer that raises them. Configuration errors are
//! fatal to a run; filename and transport errors are absorbed where they occur
//! so that one bad entry or one unreachable directory never ends an
//! enumeration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while classifying a RINEX filename
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    /// Neither the long nor the short naming convention matched
    #[error("Unrecognized RINEX file name: {name}")]
    Unrecognized { name: String },

    /// A pattern matched but one of its captured tokens is not valid
    #[error("Invalid {field} in RINEX file name: {value}")]
    InvalidToken { field: &'static str, value: String },

    /// A sampling period was given for a file with no data span
    #[error("Sampling period {value} given without a data span")]
    RateWithoutSpan { value: String },
}

impl FilenameError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidToken {
            field,
            value: value.into(),
        }
    }
}

/// Transport-level errors from FTP or HTTP connections
#[derive(Error, Debug)]
pub enum TransportError {
    /// FTP control channel error
    #[error("FTP error: {0}")]
    Ftp(#[from] suppaftp::FtpError),

    /// FTP server could not be reached or refused the login
    #[error("FTP login to {address} failed: {source}")]
    Login {
        address: String,
        #[source]
        source: suppaftp::FtpError,
    },

    /// HTTP request failed
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },

    /// CSS selector could not be compiled
    #[error("Invalid CSS selector: {selector}")]
    InvalidSelector { selector: String },

    /// URL could not be built for a directory
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// The blocking FTP task panicked or was cancelled
    #[error("Blocking transport task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// File retrieval is not part of this tool
    #[error("Download of {path} is not implemented")]
    DownloadNotImplemented { path: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Both explicit dates and a start/end range were supplied
    #[error("Cannot specify dates and start/end")]
    ConflictingDates,

    /// No transport exists for the data center's protocol
    #[error("Protocol {protocol} not implemented for data center {data_center}")]
    UnsupportedProtocol {
        protocol: String,
        data_center: String,
    },

    /// A value could not be parsed into one of the known enumerations
    #[error("Invalid value for {field}: {value}. Expected one of: {expected}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Station registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Registry file could not be read
    #[error("Failed to read site registry {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Registry file contained no station names
    #[error("Site registry {path} is empty")]
    Empty { path: PathBuf },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Filename classification error
    #[error(transparent)]
    Filename(#[from] FilenameError),

    /// Transport error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Station registry error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// JSON output error
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Whether the enumeration can carry on past this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Filename(_) => true,
            AppError::Transport(TransportError::DownloadNotImplemented { .. }) => false,
            AppError::Transport(_) => true,
            AppError::Config(_) | AppError::Registry(_) => false,
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Filename(_) => "classification",
            AppError::Transport(_) => "transport",
            AppError::Config(_) => "config",
            AppError::Registry(_) => "registry",
            AppError::Json(_) => "output",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Filename classification result type alias
pub type FilenameResult<T> = std::result::Result<T, FilenameError>;

/// Transport result type alias
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Registry result type alias
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
