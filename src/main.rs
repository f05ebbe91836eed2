use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaultboard::api::{self, AppState};
use vaultboard::config::VaultConfig;

#[derive(Parser)]
#[command(name = "vaultboard")]
#[command(about = "Approval workflow dashboard over a filesystem vault")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Vaultboard server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Vault root (overrides the VAULT_PATH environment variable)
        #[arg(short, long)]
        vault: Option<PathBuf>,
    },
    /// Create the vault directory layout and exit
    Init {
        /// Vault root (overrides the VAULT_PATH environment variable)
        #[arg(short, long)]
        vault: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "vaultboard=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn resolve_config(vault: Option<PathBuf>) -> VaultConfig {
    match vault {
        Some(root) => VaultConfig::new(root),
        None => VaultConfig::from_env(),
    }
}

async fn serve(port: u16, vault: Option<PathBuf>) -> anyhow::Result<()> {
    let config = resolve_config(vault);
    config.ensure_layout()?;
    tracing::info!("Serving vault at {}", config.root().display());

    let app = api::create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Vaultboard listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Serve { port, vault }) => serve(port, vault).await?,
        Some(Commands::Init { vault }) => {
            let config = resolve_config(vault);
            config.ensure_layout()?;
            println!("Vault layout ready at {}", config.root().display());
        }
        None => serve(5000, None).await?,
    }

    Ok(())
}
