use anyhow::{Context, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    Statement, TransactionTrait,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::models::{NewUser, User};

pub mod repositories;

pub use repositories::user::{StoreError, StoreResult, UserRepository};

/// Owner of the single database handle.
///
/// Opened once at startup, cloned into request state, closed on shutdown.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 1, Duration::from_secs(10)).await
    }

    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::with_pool_options(
            &config.url,
            config.max_connections,
            Duration::from_secs(config.connect_timeout_seconds),
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self> {
        if let Some(path_str) = sqlite_file_path(db_url) {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(connect_timeout)
            .acquire_timeout(connect_timeout)
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .with_context(|| format!("Failed to connect to database at {db_url}"))?;

        info!(
            "Database connected ({:?}, pool max {})",
            conn.get_database_backend(),
            max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Releases the handle. Clones still held elsewhere become unusable.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    pub async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        self.conn.begin().await
    }

    fn user_repo(&self) -> UserRepository<'_, DatabaseConnection> {
        UserRepository::new(&self.conn)
    }

    pub async fn provision_users_table(&self) -> StoreResult<()> {
        self.user_repo().create_table().await
    }

    pub async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn get_user(&self, id: i32) -> StoreResult<Option<User>> {
        self.user_repo().get(id).await
    }

    pub async fn insert_user(&self, user: &NewUser) -> StoreResult<i32> {
        self.user_repo().insert(user).await
    }
}

/// Filesystem path behind a `sqlite:` URL, or `None` for other backends
/// and in-memory databases.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url.strip_prefix("sqlite:")?;
    if rest.contains(":memory:") || rest.contains("mode=memory") {
        return None;
    }
    let path = rest.trim_start_matches("//");
    let path = path.split('?').next().unwrap_or(path);
    (!path.is_empty()).then_some(path)
}
