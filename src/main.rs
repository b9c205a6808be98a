use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use prime_boxing::config::{Cli, Config};
use prime_boxing::state::AppState;
use prime_boxing::{db, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;
    tracing::info!("Database: {}", config.database_target().describe());

    // Initialize database. The postgres driver blocks, so keep it off the
    // async workers.
    let pool = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || -> anyhow::Result<db::DbPool> {
            let pool = db::create_pool(config.database_target())?;
            db::run_migrations(&pool)?;
            if db::bootstrap(&pool, &config.admin)? {
                tracing::info!("Seeded admin account {:?} and demo content", config.admin.username);
            }
            Ok(pool)
        })
        .await??
    };

    let state = AppState {
        db: pool,
        config: config.clone(),
    };
    let app = routes::app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
