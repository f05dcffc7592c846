//! # Commands Module
//!
//! The page's event handlers. Each command borrows the [`InventoryApp`]
//! mutably, performs one user action, and persists before returning.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Form submit, edit, delete
//! ├── category.rs  ◄─── Rename, delete
//! ├── modal.rs     ◄─── Open/close panels, backdrop click
//! └── session.rs   ◄─── Logout
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Page event (click "Delete" on row 6f1c...)                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  delete_product(&mut app, &mut dialogs, id)                            │
//! │         │                                                               │
//! │         ├── dialogs.confirm(..) == false ──► Ok(None), nothing changes │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  app.inventory.remove_product(id)?   (stockroom-core)                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  app.persist().await?                (stockroom-db, one transaction)   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Ok(Some(removed)) ──► caller re-renders                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering is never done by a command; callers ask the app for fresh
//! views (or the whole page) afterwards.
//!
//! [`InventoryApp`]: crate::state::InventoryApp

pub mod category;
pub mod modal;
pub mod product;
pub mod session;
