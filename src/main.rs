use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rollcall::api::ApiServer;
use rollcall::config::Config;
use rollcall::roster::RosterService;

#[derive(Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Legislator roster extraction and read API",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the roster API
    Serve {
        /// Address to bind, overriding the config
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// Extract the roster once and print it as JSON
    Fetch {
        /// Only members who took office before this date (YYYY-MM-DD)
        #[arg(long)]
        before: Option<String>,

        /// Print the party breakdown instead of the records
        #[arg(long, default_value = "false", conflicts_with_all = ["before", "report"])]
        parties: bool,

        /// Print the extraction report instead of the records
        #[arg(long, default_value = "false", conflicts_with = "before")]
        report: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    config.validate().context("Invalid configuration")?;

    setup_tracing(&config.logging.level, &config.logging.format, cli.verbose)?;

    tracing::info!(source = %config.source.url, "rollcall starting");

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(addr) = bind {
                config.server.bind_address = addr;
            }
            serve(config).await?;
        }
        Commands::Fetch {
            before,
            parties,
            report,
        } => {
            fetch(&config, before, parties, report).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env();
            Ok(config)
        }
        None => Config::from_env(),
    }
}

fn setup_tracing(level: &str, format: &str, verbose: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("rollcall=debug,tower_http=debug,info")
        } else {
            tracing_subscriber::EnvFilter::new(format!("rollcall={level},warn"))
        }
    });

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
    }

    Ok(())
}

async fn serve(config: Config) -> Result<()> {
    let service = Arc::new(RosterService::with_http(&config)?);
    let server = ApiServer::new(config.server.clone(), service);

    println!("Roster API");
    println!("  Bind address: {}", server.bind_address());
    println!("  Source: {}", config.source.url);
    println!("  Cache TTL: {}s", config.cache.ttl_secs);

    server.start_with_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn fetch(config: &Config, before: Option<String>, parties: bool, report: bool) -> Result<()> {
    let service = RosterService::with_http(config)?;

    let output = if parties {
        serde_json::to_string_pretty(&service.party_breakdown().await)?
    } else if report {
        let snapshot = service.snapshot().await;
        match &snapshot.report {
            Some(report) => serde_json::to_string_pretty(report)?,
            None => anyhow::bail!("No extraction report: the fallback roster was served"),
        }
    } else if let Some(date) = before {
        serde_json::to_string_pretty(&service.filter_by_tenure_before(&date).await?)?
    } else {
        serde_json::to_string_pretty(&service.get_roster().await)?
    };

    println!("{output}");
    Ok(())
}
