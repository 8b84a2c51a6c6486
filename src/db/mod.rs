use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::models::trip::{SavedTrip, Trip};

pub mod migrator;
pub mod repositories;

pub use repositories::SavedTripRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Trip {0} is already stored")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

/// Durable store of saved trips, keyed by trip id.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Inserts `trip`, stamping `created_at`. Fails with
    /// [`RepositoryError::Duplicate`] if the id is already stored.
    async fn create(&self, trip: &Trip) -> Result<SavedTrip, RepositoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<SavedTrip>, RepositoryError>;

    /// Newest first.
    async fn find_many(&self, limit: u64, offset: u64) -> Result<Vec<SavedTrip>, RepositoryError>;

    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        let (max_connections, min_connections) = if in_memory {
            // Every pooled connection must see the same in-memory database.
            (1, 1)
        } else {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
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

    #[must_use]
    pub fn trips(&self) -> SavedTripRepository {
        SavedTripRepository::new(self.conn.clone())
    }
}
