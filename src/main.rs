//! Legal Scenario Simulator - contract clause outcomes for startup episodes.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use legal_simulator::app::{build_service, open_history, AppError};
use legal_simulator::config::{AppConfig, ConfigLoader};
use legal_simulator::display;
use legal_simulator::server::ApiServer;

#[derive(Parser)]
#[command(
    name = "legal-simulator",
    about = "Simulate VC, founder and balanced contract outcomes for startup episodes",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve {
        /// Host address to bind to.
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on.
        #[arg(short, long)]
        port: Option<u16>,
        /// Do not record simulations even if history is enabled.
        #[arg(long)]
        no_history: bool,
    },
    /// List episodes.
    Episodes,
    /// Generate the three scenarios for an episode.
    Simulate {
        /// Episode id, e.g. S1E1.
        episode_id: String,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the markdown export for an episode.
    Export {
        /// Episode id, e.g. S1E1.
        episode_id: String,
    },
    /// Show recently recorded simulations.
    History {
        /// Maximum number of rows to show.
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let loader = path.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    Ok(loader.load()?)
}

async fn serve(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
    no_history: bool,
) -> Result<(), AppError> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let service = build_service(&config, !no_history).await?;
    tracing::info!(
        episodes = service.catalog().episodes().len(),
        clauses = service.catalog().clauses().len(),
        history = service.history().is_some(),
        "Catalog loaded"
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C");
        }
        signal_cancel.cancel();
    });

    let service = Arc::new(service);
    ApiServer::new(Arc::clone(&service), cancel)
        .with_config(config.server)
        .run()
        .await?;
    service.flush_history().await;
    Ok(())
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_history,
        } => serve(config, host, port, no_history).await,
        Commands::Episodes => {
            let service = build_service(&config, false).await?;
            display::print_episodes(service.episodes());
            Ok(())
        }
        Commands::Simulate { episode_id, json } => {
            let service = build_service(&config, true).await?;
            let result = service.simulate(&episode_id).await?;
            service.flush_history().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                display::print_simulation(&result);
            }
            Ok(())
        }
        Commands::Export { episode_id } => {
            let service = build_service(&config, false).await?;
            print!("{}", service.export(&episode_id)?);
            Ok(())
        }
        Commands::History { limit } => {
            let store = open_history(&config).await?.ok_or(AppError::HistoryDisabled)?;
            let records = store.recent_simulations(limit).await?;
            display::print_history(&records);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
