//! mysql-check: a liveness probe for MySQL.
//!
//! This is the application entry point. It initializes tracing, loads the YAML
//! configuration, builds the connection string and router, and serves the
//! probe until shut down.

use clap::{CommandFactory, Parser};
use tracing::Level;
use tracing_subscriber::{
    filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use mysql_check::config::{
    Config, ConfigError, DEBUG_LOG_FILTER, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER,
};
use mysql_check::http::start_server;
use mysql_check::{create_router, AppState, Dsn};

/// mysql-check: HTTP health probe for a writable MySQL node
#[derive(Parser, Debug)]
#[command(name = "mysql-check", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log check results and failure details
    #[arg(short, long)]
    debug: bool,

    /// Log level filter (e.g., "mysql_check=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

/// Info stream on stdout, warnings and errors with source location on stderr.
fn init_tracing(args: &Args) {
    // Priority: CLI > env > default
    let log_filter = args
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| {
            if args.debug {
                DEBUG_LOG_FILTER.to_string()
            } else {
                DEFAULT_LOG_FILTER.to_string()
            }
        });

    let info_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_filter(filter_fn(|meta| {
            meta.is_span() || *meta.level() > Level::WARN
        }));

    let error_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter_fn(|meta| {
            meta.is_span() || *meta.level() <= Level::WARN
        }));

    tracing_subscriber::registry()
        .with(EnvFilter::new(&log_filter))
        .with(info_layer)
        .with(error_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(&args);

    // A config failure ends the process without starting the server, exit code 0
    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            if matches!(e, ConfigError::Io(_)) {
                eprint!("{}", Args::command().render_help());
            }
            tracing::error!(error = %e, path = %args.config, "Failed to load configuration");
            return Ok(());
        }
    };

    let dsn = Dsn::from_config(&config);
    tracing::info!(dsn = ?dsn, debug = args.debug, "Loaded configuration");

    let state = AppState::new(dsn, args.debug);
    let app = create_router(state);

    start_server(app, &config.http_address)
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, address = %config.http_address, "HTTP server failed");
        })?;

    tracing::info!("Server stopped");
    Ok(())
}
