//! Records produced by a directory crawl

use serde::Serialize;

use super::search::DirectorySearchKey;
use crate::app::defines::{DataCenter, Protocol};
use crate::app::file::RinexFilename;

/// A listed file name, classified when it follows a RINEX convention
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ListedFile {
    Classified(RinexFilename),
    Unrecognized(String),
}

impl ListedFile {
    pub fn name(&self) -> &str {
        match self {
            Self::Classified(file) => file.name(),
            Self::Unrecognized(name) => name,
        }
    }

    pub fn classified(&self) -> Option<&RinexFilename> {
        match self {
            Self::Classified(file) => Some(file),
            Self::Unrecognized(_) => None,
        }
    }
}

/// One file found on a data center
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub protocol: Protocol,
    pub domain: &'static str,
    pub port: u16,
    pub data_center: DataCenter,
    /// Directory the file was listed in
    pub directory: String,
    /// Search key that led to the directory
    pub key: DirectorySearchKey,
    pub file: ListedFile,
    /// Size in bytes, when the transport reports one
    pub size: Option<u64>,
}

impl Listing {
    pub fn new(key: DirectorySearchKey, directory: impl Into<String>, file: ListedFile) -> Self {
        let data_center = key.data_center;
        Self {
            protocol: data_center.protocol(),
            domain: data_center.domain(),
            port: data_center.port(),
            data_center,
            directory: directory.into(),
            key,
            file,
            size: None,
        }
    }

    /// Remote path of the file
    pub fn path(&self) -> String {
        format!("{}/{}", self.directory.trim_end_matches('/'), self.file.name())
    }

    /// Full URL of the file
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.protocol.scheme(),
            self.domain,
            self.port,
            self.path()
        )
    }

    /// Whether the file name was classified as RINEX data
    pub fn is_gnss_data(&self) -> bool {
        matches!(self.file, ListedFile::Classified(_))
    }
}
