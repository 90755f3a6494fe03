//! Dynamic Content Showcase
//!
//! HTTP block host and one-shot render/plan commands.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use showcase_kernel::config::Config;
use showcase_kernel::state::AppState;
use showcase_kernel::{cli, routes};

/// Dynamic content showcase block host.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default).
    Serve,

    /// Render a block once against a fixture file and print the HTML.
    Render {
        /// Fixture file with content types, taxonomies and items.
        #[arg(long)]
        fixtures: PathBuf,

        /// Block attributes as a JSON object.
        #[arg(long, default_value = "{}")]
        attributes: String,

        /// Block name (default: the showcase block).
        #[arg(long)]
        block: Option<String>,
    },

    /// Print the query plan for a set of attributes as JSON.
    Plan {
        /// Fixture file with content types and taxonomies.
        #[arg(long)]
        fixtures: PathBuf,

        /// Block attributes as a JSON object.
        #[arg(long, default_value = "{}")]
        attributes: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    init_tracing();

    let config = Config::from_env().context("failed to load configuration")?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Render {
            fixtures,
            attributes,
            block,
        } => {
            let html = cli::render(
                &fixtures,
                &attributes,
                block.as_deref(),
                &config.no_results_text,
            )
            .await?;
            println!("{html}");
            Ok(())
        }
        Command::Plan {
            fixtures,
            attributes,
        } => {
            println!("{}", cli::plan(&fixtures, &attributes)?);
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    info!(port = config.port, "Starting Dynamic Content Showcase");

    let state = AppState::new(&config)
        .await
        .context("failed to initialize application state")?;

    info!(blocks = state.blocks().len(), "Blocks registered");

    let app = routes::app(state).layer(routes::cors_layer(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,sqlx=warn"));

    // Logs go to stderr so one-shot command output stays clean.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
