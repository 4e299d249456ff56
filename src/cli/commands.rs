//! Command handlers for RINEX Lister CLI
//!
//! This module implements the command handlers that coordinate between CLI
//! arguments, the loaded configuration and the core crawl.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Days, NaiveDate, Utc};
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::app::defines::DataType;
use crate::app::{
    AvailabilityReport, AvailabilityTracker, DirectoryListing, ListedFile, Listing,
    ListingOptions, SiteDirectory, TransportFactory,
};
use crate::auth::Credentials;
use crate::cli::{AvailabilityArgs, CrawlSpinner, CredentialArgs, ListArgs};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Handle the list command
///
/// Prints one line per file found, or one JSON object per file with `--json`.
pub async fn handle_list(args: ListArgs, config: &AppConfig, quiet: bool) -> Result<()> {
    let start_time = Instant::now();

    let options = args.apply(config.listing.to_listing_options()?);
    let mut listing = DirectoryListing::new(options, transport(&args.credentials, config)?)?;

    let spinner = CrawlSpinner::start("Listing directories...", quiet);
    let mut found = 0;
    {
        let mut stream = listing.stream();
        while let Some(entry) = stream.next().await {
            let line = if args.json {
                serde_json::to_string(&entry)?
            } else {
                format_row(&entry)
            };
            spinner.println(line);
            found += 1;
            spinner.update(found);
        }
    }
    spinner.finish();

    info!(
        "{} in {:?}",
        listing.stats().summary(),
        start_time.elapsed()
    );
    if found == 0 {
        warn!("No files matched the search");
    }
    Ok(())
}

/// Handle the availability command
///
/// Lists the lookback window, keeps the newest observation file per known
/// site and prints the sites grouped by health.
pub async fn handle_availability(
    args: AvailabilityArgs,
    config: &AppConfig,
    quiet: bool,
) -> Result<()> {
    let start_time = Instant::now();

    let sites_file = args
        .sites
        .clone()
        .or_else(|| config.availability.sites_file.clone())
        .ok_or_else(|| {
            AppError::generic("No site file given; use --sites or [availability] sites_file")
        })?;
    let sites = SiteDirectory::load(&sites_file)?;
    info!("Checking availability against {} sites", sites.len());

    let today = Utc::now().date_naive();
    let options = availability_options(&args, config, today)?;
    let mut listing = DirectoryListing::new(options, transport(&args.credentials, config)?)?;
    let mut tracker = AvailabilityTracker::new(sites);

    let spinner = CrawlSpinner::start("Listing directories...", quiet);
    let mut found = 0;
    {
        let mut stream = listing.stream();
        while let Some(entry) = stream.next().await {
            if tracker.record(&entry) {
                found += 1;
                spinner.update(found);
            }
        }
    }
    spinner.finish();
    info!(
        "{} in {:?}",
        listing.stats().summary(),
        start_time.elapsed()
    );

    let report = tracker.report(today, config.availability.thresholds());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Search options for an availability run ending `today`
pub fn availability_options(
    args: &AvailabilityArgs,
    config: &AppConfig,
    today: NaiveDate,
) -> Result<ListingOptions> {
    let lookback = args.lookback.unwrap_or(config.availability.lookback_days);
    let start = today
        .checked_sub_days(Days::new(lookback.into()))
        .ok_or_else(|| {
            AppError::generic(format!("Lookback of {} days is out of range", lookback))
        })?;

    let mut options = config
        .listing
        .to_listing_options()?
        .with_stations(args.stations.iter().cloned())
        .with_range(Some(start), Some(today))
        // plain and Hatanaka compressed observations
        .with_data_types([DataType::MixedObs, DataType::HatanakaObs]);

    if !args.data_centers.is_empty() {
        options = options.with_data_centers(args.data_centers.iter().copied());
    }
    if !args.rinex_versions.is_empty() {
        options = options.with_rinex_versions(args.rinex_versions.iter().copied());
    }
    if !args.data_rates.is_empty() {
        options = options.with_data_rates(args.data_rates.iter().copied());
    }
    Ok(options)
}

fn transport(credentials: &CredentialArgs, config: &AppConfig) -> Result<Arc<TransportFactory>> {
    let credentials =
        Credentials::resolve(credentials.username.clone(), credentials.password.clone())?;
    debug!("Using credentials: {:?}", credentials);
    Ok(Arc::new(TransportFactory::new(
        credentials,
        config.client.to_runtime_config(),
    )))
}

/// `STATION VERSION RATE DATE FILENAME CENTER SIZE`, size empty when unknown
pub fn format_row(entry: &Listing) -> String {
    let size = entry.size.map(|s| s.to_string()).unwrap_or_default();
    let row = match &entry.file {
        ListedFile::Classified(file) => format!(
            "{} {} {} {} {} {} {}",
            file.station(),
            file.rinex_version().slug(),
            file.data_rate().unwrap_or(entry.key.data_rate).slug(),
            file.date(),
            file.name(),
            entry.data_center,
            size
        ),
        ListedFile::Unrecognized(name) => {
            format!("- - - - {} {} {}", name, entry.data_center, size)
        }
    };
    row.trim_end().to_string()
}

fn print_report(report: &AvailabilityReport) {
    for (label, group) in [
        ("healthy", &report.healthy),
        ("stale", &report.stale),
        ("unhealthy", &report.unhealthy),
    ] {
        for status in group {
            println!("{} {} {}", status.site, status.last, label);
        }
    }
    println!("Ignored {} stations.", report.ignored.len());
    println!("Updated {} stations.", report.updated());
}
