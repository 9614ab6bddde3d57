//! hagwon-web - academy website content service
//!
//! Serves the public browse API, the admin mutation API, and published
//! media for the academy website.

use anyhow::Result;
use clap::Parser;
use hagwon_common::config::Config;
use hagwon_web::{build_router, AppState};
use std::net::SocketAddr;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "hagwon-web", about = "Academy website content service")]
struct Args {
    /// Folder holding the database and media store
    #[arg(long)]
    root_folder: Option<String>,

    /// HTTP listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting hagwon-web v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::load(args.root_folder.as_deref(), args.port);
    config.ensure_directories()?;

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match hagwon_common::db::init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    info!("Media directory: {}", config.media_dir().display());

    let port = config.port;
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("hagwon-web listening on http://{}", addr);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
