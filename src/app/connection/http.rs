//! HTTP directory listings scraped from archive index pages
//!
//! The archive renders each directory as an HTML page whose file entries are
//! anchors with a known CSS class. Failed requests, non-success statuses and
//! unparseable pages all read as an empty directory; there are no retries.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{clock::DefaultClock, state::InMemoryState, Jitter, Quota, RateLimiter};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::config::ClientConfig;
use super::Connection;
use crate::app::defines::DataCenter;
use crate::auth::Credentials;
use crate::errors::{TransportError, TransportResult};

type DirectLimiter = RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>;

/// Index page scraper for one data center
pub struct HttpConnection {
    data_center: DataCenter,
    base_url: String,
    client: Client,
    rate_limiter: DirectLimiter,
    credentials: Credentials,
    selector: String,
}

impl HttpConnection {
    /// Creates a connection using a client built from `config`
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the HTTP client cannot be built or the
    /// archive selector does not compile
    pub fn new(
        data_center: DataCenter,
        credentials: Credentials,
        config: &ClientConfig,
    ) -> TransportResult<Self> {
        Selector::parse(&config.archive_selector).map_err(|_| TransportError::InvalidSelector {
            selector: config.archive_selector.clone(),
        })?;

        Ok(Self {
            data_center,
            base_url: data_center.base_url(),
            client: config.build_http_client()?,
            rate_limiter: build_rate_limiter(config.rate_limit_rps),
            credentials,
            selector: config.archive_selector.clone(),
        })
    }

    /// Serve index pages from `base_url` in place of the data center's site
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of a directory's index page
    pub fn directory_url(&self, directory: &str) -> TransportResult<Url> {
        let url = format!("{}/{}/", self.base_url, directory.trim_matches('/'));
        Url::parse(&url).map_err(|e| TransportError::InvalidUrl {
            url,
            error: e.to_string(),
        })
    }

    /// Fetches a directory page with rate limiting
    async fn get_page(&self, url: &Url) -> TransportResult<String> {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
            .await;

        let mut request = self.client.get(url.as_str());
        if let Some(username) = self.credentials.username() {
            request = request.basic_auth(username, self.credentials.password());
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(TransportError::ServerError {
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await?;
        tracing::debug!("Fetched index page: {}", url);
        Ok(text)
    }

    async fn try_list(&self, directory: &str) -> TransportResult<Vec<String>> {
        let url = self.directory_url(directory)?;
        let page = self.get_page(&url).await?;
        extract_archive_items(&page, &self.selector)
    }
}

/// Text of every anchor matching `selector`
pub fn extract_archive_items(html: &str, selector: &str) -> TransportResult<Vec<String>> {
    let selector = Selector::parse(selector).map_err(|_| TransportError::InvalidSelector {
        selector: selector.to_string(),
    })?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|anchor| anchor.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

/// A zero rate is raised to one request per second
fn build_rate_limiter(rate_limit_rps: u32) -> DirectLimiter {
    let rps = NonZeroU32::new(rate_limit_rps).unwrap_or(NonZeroU32::MIN);
    RateLimiter::direct(Quota::per_second(rps))
}

#[async_trait]
impl Connection for HttpConnection {
    fn data_center(&self) -> DataCenter {
        self.data_center
    }

    async fn list(&self, directory: &str) -> Vec<String> {
        match self.try_list(directory).await {
            Ok(names) => {
                tracing::debug!(
                    "{}: {} entries in {}",
                    self.data_center,
                    names.len(),
                    directory
                );
                names
            }
            Err(TransportError::ServerError { status }) => {
                tracing::info!(
                    "{}: HTTP {} listing {}",
                    self.data_center,
                    status,
                    directory
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("{}: listing {} failed: {}", self.data_center, directory, e);
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

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_PAGE: &str = r##"
        <html><body>
        <div class="archiveDir">
          <a class="archiveDirTextLink" href="../">Parent</a>
          <a class="archiveItemText" href="ABMF00GLP_R_20230700000_01D_30S_MO.crx.gz">
            ABMF00GLP_R_20230700000_01D_30S_MO.crx.gz
          </a>
          <span class="fileInfo">2023:03:12 01:05:44 1.2MB</span>
          <a class="archiveItemText" href="abmf0700.23d.gz">abmf0700.23d.gz</a>
          <a class="archiveItemText" href="#"></a>
        </div>
        </body></html>
    "##;

    #[test]
    fn test_extracts_archive_items_only() {
        let names = extract_archive_items(INDEX_PAGE, "a.archiveItemText").unwrap();
        assert_eq!(
            names,
            vec![
                "ABMF00GLP_R_20230700000_01D_30S_MO.crx.gz".to_string(),
                "abmf0700.23d.gz".to_string(),
            ]
        );
    }

    #[test]
    fn test_page_without_items() {
        let names = extract_archive_items("<html><body>Not Found</body></html>", "a.archiveItemText")
            .unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_invalid_selector() {
        let result = extract_archive_items(INDEX_PAGE, "a[");
        assert!(matches!(result, Err(TransportError::InvalidSelector { .. })));
    }

    #[test]
    fn test_directory_url() {
        let connection = HttpConnection::new(
            DataCenter::Cddis,
            Credentials::anonymous(),
            &ClientConfig::default(),
        )
        .unwrap();
        let url = connection
            .directory_url("/archive/gnss/data/daily/2023/070/23d")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cddis.nasa.gov/archive/gnss/data/daily/2023/070/23d/"
        );
    }

    #[test]
    fn test_directory_url_with_base_url() {
        let connection = HttpConnection::new(
            DataCenter::Cddis,
            Credentials::anonymous(),
            &ClientConfig::default(),
        )
        .unwrap()
        .with_base_url("http://127.0.0.1:8080/");
        let url = connection.directory_url("/archive/2023/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/archive/2023/");
    }

    #[tokio::test]
    async fn test_rate_limiter_zero_is_raised() {
        let rate_limiter = build_rate_limiter(0);
        rate_limiter.until_ready().await;
    }
}
