//! Credentials for data center archives
//!
//! # Examples
//!
//! ```rust,no_run
//! use rinex_lister::auth::Credentials;
//!
//! # fn example() -> std::io::Result<()> {
//! // Flags first, then IGS_USERNAME / IGS_PASSWORD
//! let credentials = Credentials::resolve(None, None)?;
//! if credentials.is_anonymous() {
//!     println!("Using anonymous FTP");
//! }
//! # Ok(())
//! # }
//! ```

pub mod credentials;

pub use credentials::Credentials;
