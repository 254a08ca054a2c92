//! Leadflow CRM backend
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────────┐    ┌────────────┐
//! │  Config  │───▶│ Gateway  │───▶│ CRM services │───▶│ CrmStore   │
//! │  (YAML)  │    │  (axum)  │    │ lead / order │    │ BlobStore  │
//! └──────────┘    └──────────┘    └──────────────┘    └────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use leadflow::blob::{BlobStore, LocalBlobStore, MemoryBlobStore};
use leadflow::config::{AppConfig, StorageBackend, StorageConfig, StoreBackend, StoreConfig};
use leadflow::crm::{CrmStore, MemoryStore, PgStore};
use leadflow::db::Database;
use leadflow::gateway::{self, AppState};
use leadflow::logging::init_logging;

/// Leadflow - lead pipeline and order tracking service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config environment; loads config/{env}.yaml
    #[arg(short, long, env = "LEADFLOW_ENV", default_value = "dev")]
    env: String,

    /// Override the gateway port
    #[arg(long, env = "LEADFLOW_PORT")]
    port: Option<u16>,

    /// Override the document store backend (postgres, memory)
    #[arg(long)]
    store: Option<StoreBackend>,

    /// Override the blob storage backend (local, memory)
    #[arg(long)]
    storage: Option<StorageBackend>,
}

async fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn CrmStore>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let url = config
                .postgres_url
                .as_deref()
                .context("store.postgres_url (or LEADFLOW_POSTGRES_URL) is required")?;
            let db = Database::connect(url, config)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db.init_schema()
                .await
                .context("Failed to initialize schema")?;
            Ok(Arc::new(PgStore::new(&db)))
        }
    }
}

fn build_blob_store(config: &StorageConfig) -> Arc<dyn BlobStore> {
    match config.backend {
        StorageBackend::Local => Arc::new(LocalBlobStore::new(&config.root_dir, &config.bucket)),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory blob storage; files are lost on exit");
            Arc::new(MemoryBlobStore::new(&config.bucket))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.env)?;
    if let Some(port) = args.port {
        config.gateway.port = port;
    }
    if let Some(store) = args.store {
        config.store.backend = store;
    }
    if let Some(storage) = args.storage {
        config.storage.backend = storage;
    }

    let _log_guard = init_logging(&config.logging);
    tracing::info!(
        env = %args.env,
        version = env!("GIT_HASH"),
        store = ?config.store.backend,
        storage = ?config.storage.backend,
        bucket = %config.storage.bucket,
        "Starting leadflow"
    );

    let store = build_store(&config.store).await?;
    let blobs = build_blob_store(&config.storage);
    let state = Arc::new(AppState::new(store, blobs));

    gateway::run_server(&config.gateway, state).await
}
