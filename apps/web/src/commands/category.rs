//! # Category Commands
//!
//! Rename (via prompt) and delete (via confirm). Deleting a category takes
//! every product filed under its name with it.

use stockroom_core::{CategoryId, FormMode, RemovedCategory, RenameOutcome};
use tracing::{debug, info, warn};

use crate::dialog::Dialogs;
use crate::error::{AppError, AppResult};
use crate::state::InventoryApp;

/// Prompt shown when renaming a category.
pub const RENAME_CATEGORY_PROMPT: &str = "Edit category:";

/// Confirmation asked before a category is removed.
pub const DELETE_CATEGORY_QUESTION: &str = "Are you sure you want to delete this category?";

/// Renames a category to whatever the user types.
///
/// ## Behavior
/// - Prompt dismissed or left blank → `Unchanged`, nothing persisted
/// - Name taken by another category → `ValidationError`
/// - Products follow the configured rename policy
pub async fn rename_category(
    app: &mut InventoryApp,
    dialogs: &mut dyn Dialogs,
    id: CategoryId,
) -> AppResult<RenameOutcome> {
    debug!(category_id = %id, "rename_category command");

    let current = app
        .inventory
        .category(id)
        .map(|c| c.name.clone())
        .ok_or_else(|| AppError::not_found("Category", id))?;

    let Some(new_name) = dialogs.prompt(RENAME_CATEGORY_PROMPT, &current) else {
        debug!(category_id = %id, "Rename dismissed");
        return Ok(RenameOutcome::Unchanged);
    };

    let policy = app.config().category_rename;
    let outcome = app
        .inventory
        .rename_category(id, &new_name, policy)
        .map_err(|e| {
            warn!(category_id = %id, error = %e, "Rename rejected");
            AppError::from(e)
        })?;

    if let RenameOutcome::Renamed {
        from,
        to,
        products_moved,
    } = &outcome
    {
        app.persist().await?;
        info!(from = %from, to = %to, products_moved, %policy, "Category renamed");
    }

    Ok(outcome)
}

/// Deletes a category and its products after confirmation.
///
/// ## Returns
/// * `Ok(Some(removed))` - Removed and persisted
/// * `Ok(None)` - The user declined; nothing changed
pub async fn delete_category(
    app: &mut InventoryApp,
    dialogs: &mut dyn Dialogs,
    id: CategoryId,
) -> AppResult<Option<RemovedCategory>> {
    debug!(category_id = %id, "delete_category command");

    if app.inventory.category(id).is_none() {
        return Err(AppError::not_found("Category", id));
    }

    if !dialogs.confirm(DELETE_CATEGORY_QUESTION) {
        debug!(category_id = %id, "Category deletion declined");
        return Ok(None);
    }

    let removed = app.inventory.remove_category(id)?;
    app.persist().await?;

    if let FormMode::Edit(editing) = app.form.mode() {
        if removed.products.iter().any(|p| p.id == editing) {
            app.form.cancel();
        }
    }

    info!(
        category = %removed.category.name,
        products_removed = removed.products.len(),
        "Category deleted"
    );
    Ok(Some(removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::ScriptedDialogs;
    use crate::error::ErrorCode;
    use crate::state::AppConfig;
    use stockroom_core::{CategoryRenamePolicy, ProductDraft, Unit};
    use stockroom_db::{Database, DbConfig};

    async fn app_with(policy: CategoryRenamePolicy) -> InventoryApp {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = AppConfig {
            category_rename: policy,
            ..AppConfig::default()
        };
        let mut app = InventoryApp::start(db, config, "").await.unwrap();
        for (name, category) in [("Rice", "Grains"), ("Oats", "Grains"), ("Milk", "Dairy")] {
            app.inventory
                .add_or_update_product(
                    ProductDraft {
                        name: name.to_string(),
                        price: 1.0,
                        quantity: Some(1),
                        unit: Unit::Piece,
                        category: category.to_string(),
                    },
                    None,
                )
                .unwrap();
        }
        app
    }

    fn grains(app: &InventoryApp) -> CategoryId {
        app.inventory().categories()[0].id
    }

    #[tokio::test]
    async fn test_rename_cascades_and_persists() {
        let mut app = app_with(CategoryRenamePolicy::Cascade).await;
        let mut dialogs = ScriptedDialogs::new().answer_prompt(Some("Cereals"));
        let id = grains(&app);

        let outcome = rename_category(&mut app, &mut dialogs, id).await.unwrap();

        assert!(matches!(outcome, RenameOutcome::Renamed { products_moved: 2, .. }));
        let stored = app.db().inventory().load().await.unwrap();
        assert!(stored.contains_category("Cereals"));
        assert_eq!(stored.products_in("Cereals").count(), 2);
    }

    #[tokio::test]
    async fn test_rename_detach_leaves_products_behind() {
        let mut app = app_with(CategoryRenamePolicy::Detach).await;
        let mut dialogs = ScriptedDialogs::new().answer_prompt(Some("Cereals"));
        let id = grains(&app);

        rename_category(&mut app, &mut dialogs, id).await.unwrap();

        assert_eq!(app.inventory().products_in("Grains").count(), 2);
        assert_eq!(app.product_table().row_count(), 1);
    }

    #[tokio::test]
    async fn test_dismissed_prompt_is_unchanged() {
        let mut app = app_with(CategoryRenamePolicy::Cascade).await;
        let mut dialogs = ScriptedDialogs::new().answer_prompt(None);
        let id = grains(&app);

        let outcome = rename_category(&mut app, &mut dialogs, id).await.unwrap();

        assert_eq!(outcome, RenameOutcome::Unchanged);
        assert!(app.inventory().contains_category("Grains"));
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_is_rejected() {
        let mut app = app_with(CategoryRenamePolicy::Cascade).await;
        let mut dialogs = ScriptedDialogs::new().answer_prompt(Some("Dairy"));
        let id = grains(&app);

        let err = rename_category(&mut app, &mut dialogs, id).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_delete_category_takes_its_products() {
        let mut app = app_with(CategoryRenamePolicy::Cascade).await;
        let mut dialogs = ScriptedDialogs::new().answer_confirm(true);
        let id = grains(&app);

        let removed = delete_category(&mut app, &mut dialogs, id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(removed.products.len(), 2);
        assert!(!app.inventory().contains_category("Grains"));
        let names: Vec<&str> = app.inventory().products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Milk"]);
        assert_eq!(dialogs.questions(), [DELETE_CATEGORY_QUESTION.to_string()]);
    }

    #[tokio::test]
    async fn test_declined_category_delete_keeps_everything() {
        let mut app = app_with(CategoryRenamePolicy::Cascade).await;
        let mut dialogs = ScriptedDialogs::new().answer_confirm(false);
        let id = grains(&app);

        assert!(delete_category(&mut app, &mut dialogs, id).await.unwrap().is_none());
        assert_eq!(app.inventory().products().len(), 3);
    }
}
