//! Counters for one crawl

use serde::{Deserialize, Serialize};

/// What a crawl did, reset at the start of every run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingStats {
    /// Search keys taken from the search space
    pub keys_searched: usize,
    /// Directories listed through a connection
    pub directories_listed: usize,
    /// Keys whose directory had already been listed in this run
    pub revisits_skipped: usize,
    /// Keys the data center has no directory for
    pub unsupported_keys: usize,
    /// Keys skipped because no connection could be made
    pub connection_failures: usize,
    /// File names returned by listings
    pub files_seen: usize,
    /// File names matching no RINEX convention
    pub unrecognized: usize,
    /// Classified files rejected by the filters
    pub filtered: usize,
    /// Listings produced
    pub yielded: usize,
}

impl ListingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// One line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} directories listed ({} revisits skipped, {} unsupported), \
             {} files seen, {} unrecognized, {} filtered, {} listed",
            self.directories_listed,
            self.revisits_skipped,
            self.unsupported_keys,
            self.files_seen,
            self.unrecognized,
            self.filtered,
            self.yielded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mentions_counts() {
        let stats = ListingStats {
            directories_listed: 3,
            files_seen: 40,
            unrecognized: 2,
            yielded: 7,
            ..Default::default()
        };
        let summary = stats.summary();
        assert!(summary.starts_with("3 directories listed"));
        assert!(summary.contains("40 files seen"));
        assert!(summary.ends_with("7 listed"));
    }
}
