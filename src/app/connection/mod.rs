//! Transport-independent directory listings
//!
//! A [`Connection`] lists the file names in one remote directory of one data
//! center. Listing failures never surface as errors: an unreachable server,
//! a missing directory or a refused request all read as "nothing here".
//! Connections are created through a [`ConnectionFactory`] so the crawler can
//! be driven by stubs in tests.

pub mod config;
pub mod ftp;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::defines::{DataCenter, Protocol};
use crate::auth::Credentials;
use crate::errors::{AppError, ConfigError, Result, TransportResult};

pub use config::ClientConfig;
pub use ftp::FtpConnection;
pub use http::{extract_archive_items, HttpConnection};

/// Session with one data center
#[async_trait]
pub trait Connection: Send + Sync {
    /// Data center this connection talks to
    fn data_center(&self) -> DataCenter;

    /// File names in `directory`; empty when it cannot be listed
    async fn list(&self, directory: &str) -> Vec<String>;

    /// Contents of the file at `path`
    async fn download(&self, path: &str) -> TransportResult<Vec<u8>>;
}

/// Creates connections for data centers
pub trait ConnectionFactory: Send + Sync {
    fn connect(&self, data_center: DataCenter) -> Result<Arc<dyn Connection>>;
}

/// Builds FTP or HTTP connections from a data center's protocol
#[derive(Debug, Clone, Default)]
pub struct TransportFactory {
    credentials: Credentials,
    config: ClientConfig,
}

impl TransportFactory {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Self {
        Self {
            credentials,
            config,
        }
    }
}

impl ConnectionFactory for TransportFactory {
    fn connect(&self, data_center: DataCenter) -> Result<Arc<dyn Connection>> {
        match (data_center.protocol(), data_center) {
            (Protocol::Ftp, _) => Ok(Arc::new(FtpConnection::new(
                data_center,
                self.credentials.clone(),
            ))),
            // only the CDDIS index page layout is known
            (Protocol::Https, DataCenter::Cddis) => Ok(Arc::new(HttpConnection::new(
                data_center,
                self.credentials.clone(),
                &self.config,
            )?)),
            (protocol, _) => Err(AppError::Config(ConfigError::UnsupportedProtocol {
                protocol: protocol.to_string(),
                data_center: data_center.to_string(),
            })),
        }
    }
}
