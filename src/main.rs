use anyhow::Context;
use interview_bank::api::router;
use interview_bank::config::{AppConfig, ENV_MONGO_URI};
use interview_bank::storage::{MemoryStore, MongoStore, RecordStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: {} [--bind <addr:port>] [--memory]", args[0]);
        eprintln!("Example: {} --bind 127.0.0.1:5000", args[0]);
        eprintln!(
            "Set {} to a MongoDB connection string; without it records are kept in memory.",
            ENV_MONGO_URI
        );
        std::process::exit(1);
    }

    let config = AppConfig::from_env()?.apply_args(&args[1..])?;

    // 1. Store (connect once, shared by every request):
    match config.mongo_uri.as_deref() {
        Some(uri) if !config.use_memory_store => {
            let store = MongoStore::connect(uri)
                .await
                .context("Unable to connect to MongoDB")?;
            serve(Arc::new(store), &config).await
        }
        _ => {
            tracing::warn!(
                "No document store configured ({} unset or --memory); records will not survive a restart",
                ENV_MONGO_URI
            );
            serve(Arc::new(MemoryStore::new()), &config).await
        }
    }
}

async fn serve<S: RecordStore>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    tracing::info!("Using {} store", store.name());

    // 2. HTTP Router:
    let app = router(store, config.cors_origin.clone());

    // 3. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Unable to bind {}", config.bind_addr))?;

    tracing::info!("Server is running on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app).await?;

    Ok(())
}
