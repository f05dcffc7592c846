//! # stockroom-db: Storage Layer for Stockroom
//!
//! Durable storage for the inventory page. The page's state lives under three
//! string keys in a single SQLite table; this crate owns the table, the pool,
//! and the JSON formats stored under each key.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Page command (submit_product_form)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   stockroom-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ KvRepository   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ InventoryRepo  │    │ 001_kv.sql   │  │   │
//! │  │   │               │    │ SessionRepo    │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   kv_store:  productos │ categorias │ isAdmin                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Key-value, inventory and session repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("stockroom.db")).await?;
//!
//! let mut inventory = db.inventory().load().await?;
//! inventory.ensure_category("Grains");
//! db.inventory().save(&inventory).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::inventory::InventoryRepository;
pub use repository::kv::KvRepository;
pub use repository::session::SessionRepository;
