//! Data center credentials
//!
//! Most IGS archives accept anonymous FTP. Credentials are resolved from the
//! command line first, then from `IGS_USERNAME` / `IGS_PASSWORD` (a `.env`
//! file is loaded at startup), and finally a missing password is prompted for
//! when stdin is a terminal.

use std::env;
use std::fmt;
use std::io;

use crate::constants::{env as env_constants, ftp};

/// Username and password sent to a data center
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: Option<String>,
    password: Option<String>,
}

impl Credentials {
    /// No credentials; FTP connections log in anonymously
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: Some(username.into()),
            password,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.username.is_none()
    }

    /// Login pair for an FTP control channel
    pub fn ftp_login(&self) -> (String, String) {
        match &self.username {
            Some(user) => (user.clone(), self.password.clone().unwrap_or_default()),
            None => (
                ftp::ANONYMOUS_USER.to_string(),
                ftp::ANONYMOUS_PASSWORD.to_string(),
            ),
        }
    }

    /// Read credentials from the environment
    pub fn from_env() -> Self {
        let username = env::var(env_constants::USERNAME)
            .ok()
            .filter(|u| !u.is_empty());
        let password = env::var(env_constants::PASSWORD).ok();
        Self { username, password }
    }

    /// Combine explicit values with the environment, command line first.
    ///
    /// When a username is known but no password, and stdin is a terminal,
    /// the password is prompted for.
    pub fn resolve(username: Option<String>, password: Option<String>) -> io::Result<Self> {
        let from_env = Self::from_env();
        let username = username.or(from_env.username);
        let password = password.or(from_env.password);

        let password = match (&username, password) {
            (Some(user), None) if atty::is(atty::Stream::Stdin) => {
                let prompt = format!("Password for {}: ", user);
                Some(rpassword::prompt_password(prompt)?)
            }
            (_, password) => password,
        };

        Ok(Self { username, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
