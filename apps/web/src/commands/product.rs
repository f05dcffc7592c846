//! # Product Commands
//!
//! Form submission, edit and delete.
//!
//! ## Form Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            edit_product(id)                                            │
//! │   ┌────────┐ ─────────────────────────────► ┌──────────────┐           │
//! │   │ Create │                                 │  Edit(id)    │           │
//! │   │        │ ◄───────────────────────────── │              │           │
//! │   └────────┘   submit_product_form(..)       └──────────────┘           │
//! │      │  ▲      close_modal(AddEdit) / click_backdrop (cancel)          │
//! │      └──┘                                                              │
//! │   submit_product_form(..) appends                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockroom_core::{FormFields, FormMode, Modal, Product, ProductId};
use tracing::{debug, info, warn};

use crate::dialog::Dialogs;
use crate::error::{AppError, AppResult};
use crate::state::InventoryApp;

/// Alert shown after a product is appended.
pub const ADDED_MESSAGE: &str = "Product added successfully.";

/// Alert shown after an edit is applied.
pub const UPDATED_MESSAGE: &str = "Product updated successfully.";

/// Confirmation asked before a product is removed.
pub const DELETE_PRODUCT_QUESTION: &str = "Are you sure you want to delete this product?";

/// Submits the add/edit form.
///
/// ## What This Does
/// 1. Takes `fields` as the form's current values
/// 2. Parses them leniently (never rejects input)
/// 3. Appends, or overwrites the product being edited
/// 4. Persists, alerts, and closes the add/edit panel
///
/// The form is back in Create mode afterwards, even when the edited
/// product vanished in the meantime (`NotFound`).
pub async fn submit_product_form(
    app: &mut InventoryApp,
    dialogs: &mut dyn Dialogs,
    fields: FormFields,
) -> AppResult<ProductId> {
    app.form.set_fields(fields);
    let submission = app.form.submit();
    let editing = submission.edit.is_some();

    debug!(editing, name = %submission.draft.name, "submit_product_form command");

    let id = app
        .inventory
        .add_or_update_product(submission.draft, submission.edit)
        .map_err(|e| {
            warn!(error = %e, "Form submission rejected");
            AppError::from(e)
        })?;

    app.persist().await?;

    if editing {
        info!(product_id = %id, "Product updated");
        dialogs.alert(UPDATED_MESSAGE);
    } else {
        info!(product_id = %id, "Product added");
        dialogs.alert(ADDED_MESSAGE);
    }

    app.modals.close(Modal::AddEdit);
    Ok(id)
}

/// Starts editing a product: fills the form and raises the add/edit panel.
///
/// ## Returns
/// The field values now in the form.
pub fn edit_product(app: &mut InventoryApp, id: ProductId) -> AppResult<FormFields> {
    debug!(product_id = %id, "edit_product command");

    let product = app
        .inventory
        .product(id)
        .ok_or_else(|| AppError::not_found("Product", id))?;

    app.form.begin_edit(product);
    app.modals.open_raised(Modal::AddEdit);

    Ok(app.form.fields().clone())
}

/// Deletes a product after confirmation.
///
/// ## Returns
/// * `Ok(Some(product))` - Removed and persisted
/// * `Ok(None)` - The user declined; nothing changed
pub async fn delete_product(
    app: &mut InventoryApp,
    dialogs: &mut dyn Dialogs,
    id: ProductId,
) -> AppResult<Option<Product>> {
    debug!(product_id = %id, "delete_product command");

    if app.inventory.product(id).is_none() {
        return Err(AppError::not_found("Product", id));
    }

    if !dialogs.confirm(DELETE_PRODUCT_QUESTION) {
        debug!(product_id = %id, "Product deletion declined");
        return Ok(None);
    }

    let removed = app.inventory.remove_product(id)?;
    app.persist().await?;

    // An edit of the removed product can no longer be applied
    if app.form.mode() == FormMode::Edit(id) {
        app.form.cancel();
    }

    info!(product_id = %id, name = %removed.name, "Product deleted");
    Ok(Some(removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::ScriptedDialogs;
    use crate::error::ErrorCode;
    use crate::state::AppConfig;
    use stockroom_db::{Database, DbConfig};

    async fn app() -> InventoryApp {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.session().set_admin_flag(true).await.unwrap();
        InventoryApp::start(db, AppConfig::default(), "").await.unwrap()
    }

    fn fields(name: &str, price: &str, quantity: &str, category: &str) -> FormFields {
        FormFields {
            name: name.to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
            unit: "kg".to_string(),
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_appends_and_alerts() {
        let mut app = app().await;
        let mut dialogs = ScriptedDialogs::new();

        let id = submit_product_form(&mut app, &mut dialogs, fields("Rice", "2.5", "4", " Grains "))
            .await
            .unwrap();

        let product = app.inventory().product(id).unwrap();
        assert_eq!(product.category, "Grains");
        assert_eq!(dialogs.alerts(), [ADDED_MESSAGE.to_string()]);
        assert!(!app.modals().is_open(Modal::AddEdit));
    }

    #[tokio::test]
    async fn test_edit_then_submit_overwrites_in_place() {
        let mut app = app().await;
        let mut dialogs = ScriptedDialogs::new();
        let rice = submit_product_form(&mut app, &mut dialogs, fields("Rice", "2.5", "4", "Grains"))
            .await
            .unwrap();
        let oats = submit_product_form(&mut app, &mut dialogs, fields("Oats", "1", "1", "Grains"))
            .await
            .unwrap();

        let loaded = edit_product(&mut app, rice).unwrap();
        assert_eq!(loaded.name, "Rice");
        assert_eq!(app.form().submit_label(), "Save");
        assert!(app.modals().is_raised(Modal::AddEdit));

        let mut changed = loaded;
        changed.price = "3".to_string();
        submit_product_form(&mut app, &mut dialogs, changed).await.unwrap();

        let products = app.inventory().products();
        assert_eq!(products[0].id, rice);
        assert_eq!(products[0].price, 3.0);
        assert_eq!(products[1].id, oats);
        assert_eq!(products[1].price, 1.0);
        assert_eq!(app.form().submit_label(), "Add Product");
        assert_eq!(dialogs.alerts().last().map(String::as_str), Some(UPDATED_MESSAGE));
    }

    #[tokio::test]
    async fn test_declined_delete_changes_nothing() {
        let mut app = app().await;
        let mut dialogs = ScriptedDialogs::new().answer_confirm(false);
        let id = submit_product_form(&mut app, &mut dialogs, fields("Rice", "2.5", "4", "Grains"))
            .await
            .unwrap();

        let removed = delete_product(&mut app, &mut dialogs, id).await.unwrap();

        assert!(removed.is_none());
        assert_eq!(app.inventory().products().len(), 1);
        assert_eq!(dialogs.questions(), [DELETE_PRODUCT_QUESTION.to_string()]);
    }

    #[tokio::test]
    async fn test_delete_of_edited_product_cancels_edit() {
        let mut app = app().await;
        let mut dialogs = ScriptedDialogs::new().answer_confirm(true);
        let id = submit_product_form(&mut app, &mut dialogs, fields("Rice", "2.5", "4", "Grains"))
            .await
            .unwrap();
        edit_product(&mut app, id).unwrap();

        delete_product(&mut app, &mut dialogs, id).await.unwrap();

        assert!(!app.form().is_editing());
        assert!(app.inventory().products().is_empty());
        assert!(app.inventory().contains_category("Grains"));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let mut app = app().await;
        let mut dialogs = ScriptedDialogs::new().answer_confirm(true);

        let err = delete_product(&mut app, &mut dialogs, ProductId::new())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(dialogs.questions().is_empty());
    }
}
