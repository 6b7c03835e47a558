use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, DatabaseConfig, StorageKind};
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes::{self, ServerState};
use service::{
    record::{JsonRecordRepository, RecordRepository, RecordService, SeaOrmRecordRepository},
    runtime,
    upload::UploadSink,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Storage client opened at startup and closed on shutdown.
pub struct Storage {
    pub repo: Arc<dyn RecordRepository>,
    db: Option<DatabaseConnection>,
}

impl Storage {
    /// Connect to the backend named by `database.url`. Postgres is migrated on connect.
    pub async fn open(cfg: &DatabaseConfig) -> anyhow::Result<Self> {
        match cfg.storage_kind()? {
            StorageKind::Postgres(_) => {
                let db = models::db::connect_and_migrate(cfg).await?;
                info!(backend = "postgres", "storage opened");
                Ok(Self { repo: Arc::new(SeaOrmRecordRepository { db: db.clone() }), db: Some(db) })
            }
            StorageKind::JsonFile(path) => {
                let repo = JsonRecordRepository::open(&path).await?;
                info!(backend = "json", path = %path.display(), "storage opened");
                Ok(Self { repo: Arc::new(repo), db: None })
            }
        }
    }

    pub async fn close(self) -> anyhow::Result<()> {
        if let Some(db) = self.db {
            models::db::close(db).await?;
        }
        info!("storage closed");
        Ok(())
    }
}

/// Assemble the router for an opened storage and the upload settings.
pub fn build_app(storage: &Storage, cfg: &AppConfig) -> Router {
    let state = ServerState {
        records: RecordService::new(Arc::clone(&storage.repo)),
        uploads: UploadSink::new(&cfg.uploads.dir),
        upload_field: cfg.uploads.field_name.clone(),
        body_limit: cfg.uploads.max_body_bytes,
    };
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "shutdown signal received");
}

/// Public entry: open storage, serve until a shutdown signal, then close storage.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let data_file = match cfg.database.storage_kind()? {
        StorageKind::JsonFile(path) => Some(path),
        StorageKind::Postgres(_) => None,
    };
    runtime::ensure_env(&cfg.uploads.dir, data_file.as_deref()).await?;

    let storage = Storage::open(&cfg.database).await?;
    let app = build_app(&storage, &cfg);

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, upload_dir = %cfg.uploads.dir, "server started");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // close storage even when serving failed
    storage.close().await?;
    served?;
    Ok(())
}
