//! # Repository Module
//!
//! Storage repositories for Stockroom.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InventoryRepository          SessionRepository                        │
//! │  load() / save(&Inventory)    admin_flag() / set_admin_flag(bool)      │
//! │       │  JSON documents            │  "true" / "false"                 │
//! │       ▼                            ▼                                    │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  KvRepository   get(key) / set(key, value) / remove(key)         │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kv_store (key TEXT PRIMARY KEY, value TEXT)                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`KvRepository`](kv::KvRepository) - Raw string storage
//! - [`InventoryRepository`](inventory::InventoryRepository) - Products and categories
//! - [`SessionRepository`](session::SessionRepository) - The admin flag

pub mod inventory;
pub mod kv;
pub mod session;
