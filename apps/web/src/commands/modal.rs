//! # Panel Commands
//!
//! Opening, closing and backdrop clicks. Leaving the add/edit panel any way
//! other than submitting abandons an edit in progress.

use stockroom_core::view::{CategoryListView, ProductTableView};
use stockroom_core::Modal;
use tracing::debug;

use crate::state::InventoryApp;

/// Opens the inventory panel and returns a freshly built table.
pub fn show_inventory(app: &mut InventoryApp) -> ProductTableView {
    debug!("show_inventory command");
    app.modals.open(Modal::Inventory);
    app.product_table()
}

/// Opens the add/edit panel for a new product.
pub fn show_add(app: &mut InventoryApp) {
    debug!("show_add command");
    app.modals.open(Modal::AddEdit);
}

/// Opens the categories panel and returns a freshly built list.
pub fn show_categories(app: &mut InventoryApp) -> CategoryListView {
    debug!("show_categories command");
    app.modals.open(Modal::Categories);
    app.category_list()
}

/// A panel's own close control.
///
/// ## Returns
/// `true` if the panel was open.
pub fn close_modal(app: &mut InventoryApp, modal: Modal) -> bool {
    debug!(%modal, "close_modal command");
    let was_open = app.modals.close(modal);
    if modal == Modal::AddEdit {
        cancel_edit(app);
    }
    was_open
}

/// Backdrop click: closes every panel.
///
/// ## Returns
/// The panels that were open.
pub fn click_backdrop(app: &mut InventoryApp) -> Vec<Modal> {
    debug!("click_backdrop command");
    let closed = app.modals.close_all();
    if closed.contains(&Modal::AddEdit) {
        cancel_edit(app);
    }
    closed
}

fn cancel_edit(app: &mut InventoryApp) {
    if let Some(abandoned) = app.form.cancel() {
        debug!(product_id = %abandoned, "Edit abandoned");
    }
}
