//! # Database Pool Management
//!
//! Opens the SQLite file behind the key-value store and hands out
//! repositories that share one pool.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  DbConfig::new(path)            DbConfig::in_memory()                  │
//! │         │                               │                               │
//! │         └──────────────┬────────────────┘                               │
//! │                        ▼                                                │
//! │  Database::new(config).await   open (create if missing) + migrate      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  health_check()                SELECT 1 before the page boots          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  kv() / inventory() / session()   one page load reads, each mutation   │
//! │                        │           writes                               │
//! │                        ▼                                                │
//! │  close().await                                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File-backed databases run in WAL mode so a reader never blocks the
//! write that follows a page mutation. In-memory databases keep SQLite's
//! default journal.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::inventory::InventoryRepository;
use crate::repository::kv::KvRepository;
use crate::repository::session::SessionRepository;

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the store lives and how its pool behaves.
///
/// Fields are public; adjust with struct update syntax:
/// ```rust,ignore
/// let config = DbConfig { run_migrations: false, ..DbConfig::in_memory() };
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,

    /// Pool size. One page session rarely holds more than one connection.
    pub max_connections: u32,

    /// How long to wait for a free connection.
    pub acquire_timeout: Duration,

    /// Idle connections above one are closed after this long.
    pub idle_timeout: Duration,

    /// Apply pending migrations while connecting.
    pub run_migrations: bool,
}

impl DbConfig {
    /// A file-backed store; the file is created on first connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// A private store that vanishes with its pool (tests, dry runs).
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(MEMORY_PATH),
            // A second connection would open a second, empty database
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let url = format!("sqlite://{}?mode=rwc", self.database_path.display());

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .create_if_missing(true);

        if self.is_in_memory() {
            return Ok(options);
        }

        Ok(options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the store. Clones share one pool.
///
/// ```text
/// Database ──┬── kv()         raw key/value strings
///            ├── inventory()  productos + categorias as one unit
///            └── session()    isAdmin flag
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pub(crate) pool: SqlitePool,
}

impl Database {
    /// Opens the store described by `config`, migrating it unless disabled.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening inventory store");

        let options = config.connect_options()?;
        debug!(in_memory = config.is_in_memory(), "Connection options ready");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };

        if config.run_migrations {
            migrations::run_migrations(&db.pool).await?;
        } else {
            warn!("Migrations disabled; the store may lack its tables");
        }

        info!(max_connections = config.max_connections, "Inventory store ready");
        Ok(db)
    }

    pub fn kv(&self) -> KvRepository {
        KvRepository::new(self.pool.clone())
    }

    /// Products and categories, loaded and saved together.
    ///
    /// ```rust,ignore
    /// let inventory = db.inventory().load().await?;
    /// ```
    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone())
    }

    pub fn session(&self) -> SessionRepository {
        SessionRepository::new(self.pool.clone())
    }

    /// True when the store answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the pool; repositories fail afterwards.
    pub async fn close(&self) {
        info!("Closing inventory store");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_is_healthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_closed_database_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_file_database_is_created_on_connect() {
        let dir = std::env::temp_dir().join(format!("stockroom-pool-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("stockroom.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.kv().set("isAdmin", "true").await.unwrap();
        db.close().await;

        assert!(path.exists());
        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(reopened.kv().get("isAdmin").await.unwrap().as_deref(), Some("true"));
        reopened.close().await;
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_memory_path_detection() {
        assert!(DbConfig::in_memory().is_in_memory());
        assert!(!DbConfig::new("/tmp/stockroom.db").is_in_memory());
        assert_eq!(DbConfig::in_memory().max_connections, 1);
    }
}
