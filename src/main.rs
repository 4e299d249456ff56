//! RINEX Lister CLI application
//!
//! Command-line interface for listing RINEX files on IGS data centers and
//! reporting per-station data availability.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use rinex_lister::cli::{handle_availability, handle_list, Cli, Commands};
use rinex_lister::config::AppConfig;
use rinex_lister::errors::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &config);

    info!("RINEX Lister v{} starting", env!("CARGO_PKG_VERSION"));

    let quiet = cli.global.quiet;
    match cli.command {
        Commands::List(args) => {
            info!("Executing list command");
            handle_list(args, &config, quiet).await
        }
        Commands::Availability(args) => {
            info!("Executing availability command");
            handle_availability(args, &config, quiet).await
        }
    }
}

/// Initialize logging from CLI verbosity, falling back to the configured level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let flagged = cli.global.quiet || cli.global.verbose || cli.global.very_verbose;
    let level = if flagged {
        cli.log_level().to_string().to_lowercase()
    } else {
        config.logging.level.clone()
    };

    let mut filter = EnvFilter::from_default_env();
    match format!("rinex_lister={}", level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring log level '{}': {}", level, e),
    }

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
