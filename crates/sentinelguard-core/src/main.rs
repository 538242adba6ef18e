//! SentinelGuard CLI
//!
//! Command-line interface for the SentinelGuard alert intake service.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use sentinelguard::api::HttpServer;
use sentinelguard::models::{Alert, AlertQuery, Severity};
use sentinelguard::service::AlertService;
use sentinelguard::store::AlertStore;
use sentinelguard::Config;

/// SentinelGuard - security alert intake
#[derive(Parser)]
#[command(name = "sentinelguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SENTINELGUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (for commands that support it)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Alert data file (overrides configuration)
    #[arg(long, global = true, env = "SENTINELGUARD_DATA_FILE")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// HTTP port
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Directory containing static files
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Inspect stored alerts
    Alerts {
        #[command(subcommand)]
        command: AlertsCommands,
    },
}

#[derive(Subcommand)]
enum AlertsCommands {
    /// List stored alerts
    List {
        /// Only show alerts of this severity (LOW, MEDIUM, HIGH)
        #[arg(long)]
        severity: Option<Severity>,

        /// Show only the most recent N alerts
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(data_file) = cli.data_file {
        config.storage.data_file = data_file;
    }

    init_tracing(&config, cli.verbose);

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(static_dir) = static_dir {
                config.server.static_dir = static_dir;
            }
            run_serve(config).await
        }
        Commands::Alerts { command } => run_alerts(&config, command, cli.format).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &Config, verbose: bool) {
    let log_level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run_serve(config: Config) -> anyhow::Result<()> {
    info!(
        port = config.server.port,
        data_file = %config.storage.data_file.display(),
        window_ms = config.rate_limit.window_ms,
        max_requests = config.rate_limit.max_requests,
        "Starting SentinelGuard"
    );

    let alerts = AlertService::from_config(&config);
    let server = HttpServer::new(alerts, config);

    server.serve(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Ctrl+C received, shutting down...");
    }
}

async fn run_alerts(
    config: &Config,
    command: AlertsCommands,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        AlertsCommands::List { severity, limit } => {
            let store = AlertStore::new(config.storage.data_file.clone());
            let alerts = AlertQuery { severity, limit }.apply(store.read_all().await);

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&alerts)?),
                OutputFormat::Text => print_alerts(&alerts),
            }
        }
    }
    Ok(())
}

fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("No alerts stored.");
        return;
    }

    for alert in alerts {
        println!(
            "{}  {:<6}  {:<20}  {}",
            alert.time.format("%Y-%m-%d %H:%M:%S"),
            alert.severity,
            alert.alert_type,
            alert.message
        );
    }
    println!();
    println!("{} alert(s)", alerts.len());
}
