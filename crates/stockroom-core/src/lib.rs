//! # stockroom-core: Pure State Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom. It owns the inventory state and
//! every decision the page makes about it, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Page (HTML + events)                         │   │
//! │  │    Inventory panel ── Add/Edit panel ── Categories panel       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               apps/web (controller + renderer)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ inventory │  │   form    │  │   modal   │  │  access   │  │   │
//! │  │   │ products  │  │ Create/   │  │  panels   │  │  guest /  │  │   │
//! │  │   │ categories│  │ Edit      │  │  backdrop │  │  admin    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                       ┌───────────┐                            │   │
//! │  │                       │   view    │ table / list snapshots     │   │
//! │  │                       └───────────┘                            │   │
//! │  │   NO I/O • NO DATABASE • NO HTML                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db (Storage Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Category, Unit and their ids
//! - [`inventory`] - The ordered product/category state store
//! - [`form`] - Add/edit form state machine and lenient parsing
//! - [`modal`] - Panel and backdrop visibility
//! - [`access`] - Guest/admin presentation gate
//! - [`view`] - Render-ready snapshots
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::form::{FormFields, ProductForm};
//! use stockroom_core::inventory::Inventory;
//!
//! let mut inventory = Inventory::new();
//! let mut form = ProductForm::new();
//! form.set_fields(FormFields {
//!     name: "Rice".into(),
//!     price: "2.5".into(),
//!     quantity: "4".into(),
//!     unit: "kg".into(),
//!     category: "Grains".into(),
//! });
//!
//! let submission = form.submit();
//! let id = inventory
//!     .add_or_update_product(submission.draft, submission.edit)
//!     .unwrap();
//!
//! assert_eq!(inventory.product(id).unwrap().total(), 10.0);
//! assert!(inventory.contains_category("Grains"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod error;
pub mod form;
pub mod inventory;
pub mod modal;
pub mod types;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use access::{AccessDecision, Visibility};
pub use error::{CoreError, CoreResult, ValidationError};
pub use form::{FormFields, FormMode, ProductForm, Submission};
pub use inventory::{CategoryRenamePolicy, Inventory, RemovedCategory, RenameOutcome};
pub use modal::{Modal, ModalManager};
pub use types::*;
pub use view::{CategoryListView, ProductTableView};

// =============================================================================
// Storage Keys
// =============================================================================

/// Storage key holding the JSON array of products.
pub const PRODUCTS_KEY: &str = "productos";

/// Storage key holding the JSON array of category names.
pub const CATEGORIES_KEY: &str = "categorias";

/// Storage key holding the stringified admin flag.
pub const ADMIN_FLAG_KEY: &str = "isAdmin";
