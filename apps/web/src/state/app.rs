//! # Application State
//!
//! One owned value holding everything the page knows. Commands borrow it
//! mutably, so handlers never overlap.
//!
//! ## What Lives Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         InventoryApp                                    │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌────────────────┐ │
//! │  │  Inventory   │ │ ProductForm  │ │ ModalManager │ │ AccessDecision │ │
//! │  │  products    │ │ fields       │ │ open panels  │ │ privileged?    │ │
//! │  │  categories  │ │ Create/Edit  │ │ raised panel │ │ guest?         │ │
//! │  └──────┬───────┘ └──────────────┘ └──────────────┘ └────────────────┘ │
//! │         │ persist() after every mutation                               │
//! │         ▼                                                               │
//! │  ┌──────────────┐ ┌──────────────┐                                     │
//! │  │   Database   │ │  AppConfig   │                                     │
//! │  └──────────────┘ └──────────────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Load both collections (corrupt data aborts startup)
//! 2. Read the stored admin flag
//! 3. Evaluate the access gate against the page query
//! 4. Guest mode: overwrite the stored flag with `false`

use serde::Serialize;
use stockroom_core::view::{CategoryListView, ProductTableView};
use stockroom_core::{
    AccessDecision, FormFields, Inventory, Modal, ModalManager, ProductForm, Visibility,
};
use stockroom_db::Database;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::state::config::AppConfig;

/// The page's state and its storage handle.
#[derive(Debug)]
pub struct InventoryApp {
    db: Database,
    config: AppConfig,
    pub(crate) inventory: Inventory,
    pub(crate) form: ProductForm,
    pub(crate) modals: ModalManager,
    pub(crate) access: AccessDecision,
}

impl InventoryApp {
    /// Boots the page against `db`.
    ///
    /// ## Arguments
    /// * `query` - The page URL query string (e.g. `"?role=guest"`)
    pub async fn start(db: Database, config: AppConfig, query: &str) -> AppResult<Self> {
        let inventory = db.inventory().load().await?;

        let stored_flag = db.session().admin_flag().await?;
        let access = AccessDecision::evaluate(query, stored_flag.as_deref());

        if access.revoke_stored_flag {
            db.session().set_admin_flag(false).await?;
        }

        info!(
            products = inventory.products().len(),
            categories = inventory.categories().len(),
            privileged = access.privileged,
            guest = access.guest,
            "Inventory page started"
        );

        Ok(InventoryApp {
            db,
            config,
            inventory,
            form: ProductForm::new(),
            modals: ModalManager::new(),
            access,
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn modals(&self) -> &ModalManager {
        &self.modals
    }

    pub fn access(&self) -> AccessDecision {
        self.access
    }

    pub fn visibility(&self) -> Visibility {
        self.access.visibility()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Builds the grouped product table for the current state.
    pub fn product_table(&self) -> ProductTableView {
        ProductTableView::build(&self.inventory, &self.visibility())
    }

    /// Builds the category list for the current state.
    pub fn category_list(&self) -> CategoryListView {
        CategoryListView::build(&self.inventory, &self.visibility())
    }

    /// Writes both collections to storage.
    pub(crate) async fn persist(&self) -> AppResult<()> {
        self.db.inventory().save(&self.inventory).await?;
        debug!("Inventory persisted");
        Ok(())
    }

    /// Everything the page shows, as one serializable value.
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            access: self.access,
            visibility: self.visibility(),
            table: self.product_table(),
            categories: self.category_list(),
            form: self.form.fields().clone(),
            submit_label: self.form.submit_label().to_string(),
            editing: self.form.is_editing(),
            open_modals: self.modals.open_modals(),
            raised_modal: Modal::ALL.into_iter().find(|m| self.modals.is_raised(*m)),
            backdrop_visible: self.modals.backdrop_visible(),
        }
    }
}

/// Serializable view of the whole page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub access: AccessDecision,
    pub visibility: Visibility,
    pub table: ProductTableView,
    pub categories: CategoryListView,
    pub form: FormFields,
    pub submit_label: String,
    pub editing: bool,
    pub open_modals: Vec<Modal>,
    pub raised_modal: Option<Modal>,
    pub backdrop_visible: bool,
}
