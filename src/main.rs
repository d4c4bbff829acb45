use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vote_ledger::api::{self, AppState};
use vote_ledger::config::{loader::RosterConfig, AppConfig};
use vote_ledger::ledger::Ledger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vote_ledger=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting vote ledger");

    // Load configuration
    let config = AppConfig::load()?;
    let roster = RosterConfig::load(config.roster_path.as_deref())?;
    info!("Configuration loaded ({} candidates)", roster.candidates.len());

    // Ledger state is in-memory only; every start begins from a fresh genesis
    let ledger = Ledger::new();
    info!("Ledger initialized with genesis {}", ledger.head_hash());

    let app = api::router(AppState::new(ledger, roster));

    let addr = config.socket_addr()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
