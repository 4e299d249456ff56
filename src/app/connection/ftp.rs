//! FTP directory listings
//!
//! An FTP control channel accepts one command at a time, so every listing
//! holds the connection's lock for the whole `CWD` + `NLST` exchange. The
//! blocking client runs on tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use suppaftp::{FtpError, FtpStream};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::Connection;
use crate::app::defines::DataCenter;
use crate::auth::Credentials;
use crate::errors::{TransportError, TransportResult};

/// Control channel state, guarded by the connection's lock
enum Session {
    Closed,
    Open(FtpStream),
    /// the server refused the credentials; no further logins are attempted
    Rejected,
}

/// One FTP control channel to a data center, opened on first use
pub struct FtpConnection {
    data_center: DataCenter,
    address: String,
    credentials: Credentials,
    session: Arc<Mutex<Session>>,
}

impl FtpConnection {
    pub fn new(data_center: DataCenter, credentials: Credentials) -> Self {
        let address = format!("{}:{}", data_center.domain(), data_center.port());
        Self::with_address(data_center, address, credentials)
    }

    /// Connection to `address` (`host:port`) in place of the data center's server
    pub fn with_address(
        data_center: DataCenter,
        address: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            data_center,
            address: address.into(),
            credentials,
            session: Arc::new(Mutex::new(Session::Closed)),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn try_list(&self, directory: &str) -> TransportResult<Vec<String>> {
        let mut guard = Arc::clone(&self.session).lock_owned().await;
        let address = self.address.clone();
        let (user, password) = self.credentials.ftp_login();
        let directory = directory.to_string();

        tokio::task::spawn_blocking(move || {
            list_blocking(&mut guard, &address, &user, &password, &directory)
        })
        .await?
    }
}

fn list_blocking(
    session: &mut Session,
    address: &str,
    user: &str,
    password: &str,
    directory: &str,
) -> TransportResult<Vec<String>> {
    let login_error = |source: FtpError| TransportError::Login {
        address: address.to_string(),
        source,
    };

    let mut stream = match std::mem::replace(session, Session::Closed) {
        Session::Open(stream) => stream,
        Session::Rejected => {
            *session = Session::Rejected;
            debug!("Login to {} was refused; not listing {}", address, directory);
            return Ok(Vec::new());
        }
        Session::Closed => {
            let mut stream = FtpStream::connect(address).map_err(login_error)?;
            if let Err(source) = stream.login(user, password) {
                if matches!(source, FtpError::UnexpectedResponse(_)) {
                    *session = Session::Rejected;
                }
                return Err(login_error(source));
            }
            info!("Logged in to {} as {}", address, user);
            stream
        }
    };

    let listing = stream.cwd(directory).and_then(|_| stream.nlst(None));
    // a broken control channel is dropped so the next listing logs in again
    if !matches!(listing, Err(FtpError::ConnectionError(_))) {
        *session = Session::Open(stream);
    }
    Ok(listing?)
}

#[async_trait]
impl Connection for FtpConnection {
    fn data_center(&self) -> DataCenter {
        self.data_center
    }

    async fn list(&self, directory: &str) -> Vec<String> {
        match self.try_list(directory).await {
            Ok(names) => {
                debug!(
                    "{}: {} entries in {}",
                    self.data_center,
                    names.len(),
                    directory
                );
                names
            }
            Err(e @ TransportError::Login { .. }) => {
                warn!("{}: {}", self.data_center, e);
                Vec::new()
            }
            Err(TransportError::Ftp(FtpError::UnexpectedResponse(response))) => {
                // missing directories and permission errors are routine
                debug!(
                    "{}: cannot list {}: {:?}",
                    self.data_center, directory, response.status
                );
                Vec::new()
            }
            Err(e) => {
                warn!("{}: listing {} failed: {}", self.data_center, directory, e);
                Vec::new()
            }
        }
    }

    async fn download(&self, path: &str) -> TransportResult<Vec<u8>> {
        Err(TransportError::DownloadNotImplemented {
            path: path.to_string(),
        })
    }
}
