//! # State Module
//!
//! - [`app::InventoryApp`] - The page's owned state and storage handle
//! - [`config::AppConfig`] - Startup configuration

pub mod app;
pub mod config;

pub use app::{InventoryApp, PageSnapshot};
pub use config::{AppConfig, ConfigError};
