//! # Page Shell
//!
//! The whole page for the current state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <header>  [Inventory]  [Add Product]*  [Categories]*  [Log out]       │
//! │                                                                         │
//! │  #inventoryModal   table (thead + #productList)                        │
//! │  #agregarModal     #productForm (name/price/quantity/unit/category)    │
//! │  #categoriesModal  #categoryList                                       │
//! │  #overlay          shared backdrop                                     │
//! │                                                                         │
//! │  * only when privileged                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Panel and backdrop `display` follow the modal manager; the raised panel
//! gets the top z-index.

use stockroom_core::view::unit_options;
use stockroom_core::{FormFields, Modal, ModalManager, Visibility};

use super::{escape_html, render_category_list, render_category_options, render_product_table};
use crate::state::InventoryApp;

const RAISED_Z_INDEX: u32 = 1002;

/// Render the full page.
pub fn render_page(app: &InventoryApp) -> String {
    let modals = app.modals();
    let visibility = app.visibility();
    let table = app.product_table();
    let categories = app.category_list();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Inventory</title>
</head>
<body>
{header}
<div id="inventoryModal" class="modal" style="{inventory_style}">
    <button id="closeInventoryModal" class="modal-close" data-action="close-modal" data-modal="inventory">&times;</button>
    <h2>Inventory</h2>
    <table>
        <thead>
            <tr><th>Name</th><th>Price</th><th>Quantity</th><th>Unit</th><th>Total</th><th>Actions</th></tr>
        </thead>
        <tbody id="productList">
{product_rows}        </tbody>
    </table>
</div>
<div id="agregarModal" class="modal" style="{add_style}">
    <button id="closeAgregarModal" class="modal-close" data-action="close-modal" data-modal="add_edit">&times;</button>
{form}
</div>
<div id="categoriesModal" class="modal" style="{categories_style}">
    <button id="closeCategoriesModal" class="modal-close" data-action="close-modal" data-modal="categories">&times;</button>
    <h2>Categories</h2>
    <ul id="categoryList">
{category_items}    </ul>
</div>
<div id="overlay" data-action="click-backdrop" style="{overlay_style}"></div>
</body>
</html>
"#,
        header = render_header(&visibility),
        inventory_style = modal_style(modals, Modal::Inventory),
        product_rows = render_product_table(&table),
        add_style = modal_style(modals, Modal::AddEdit),
        form = render_form(
            app.form().fields(),
            app.form().submit_label(),
            &render_category_options(&categories)
        ),
        categories_style = modal_style(modals, Modal::Categories),
        category_items = render_category_list(&categories),
        overlay_style = display(modals.backdrop_visible()),
    )
}

fn render_header(visibility: &Visibility) -> String {
    let add_button = if visibility.show_create {
        r#"
    <button id="showAgregar" data-action="show-add">Add Product</button>"#
    } else {
        ""
    };
    let categories_button = if visibility.show_categories {
        r#"
    <button id="showCategories" data-action="show-categories">Categories</button>"#
    } else {
        ""
    };

    format!(
        r#"<header>
    <button id="showInventory" data-action="show-inventory">Inventory</button>{add_button}{categories_button}
    <button id="logout" data-action="logout">Log out</button>
</header>"#,
        add_button = add_button,
        categories_button = categories_button
    )
}

fn render_form(fields: &FormFields, submit_label: &str, category_options: &str) -> String {
    let unit_choices: String = unit_options()
        .iter()
        .map(|option| {
            let selected = if option.code == fields.unit { " selected" } else { "" };
            format!(
                r#"<option value="{code}"{selected}>{label}</option>"#,
                code = escape_html(&option.code),
                selected = selected,
                label = escape_html(&option.label)
            )
        })
        .collect();

    format!(
        r#"    <form id="productForm" data-action="submit-product">
        <input id="nombre" name="name" placeholder="Name" value="{name}">
        <input id="precio" name="price" placeholder="Price" value="{price}">
        <input id="cantidad" name="quantity" placeholder="Quantity" value="{quantity}">
        <select id="unidad" name="unit">{unit_choices}</select>
        <input id="categoria" name="category" list="categoryOptions" placeholder="Category" value="{category}">
        <datalist id="categoryOptions">{category_options}</datalist>
        <button type="submit">{submit_label}</button>
    </form>"#,
        name = escape_html(&fields.name),
        price = escape_html(&fields.price),
        quantity = escape_html(&fields.quantity),
        unit_choices = unit_choices,
        category = escape_html(&fields.category),
        category_options = category_options,
        submit_label = escape_html(submit_label)
    )
}

fn modal_style(modals: &ModalManager, modal: Modal) -> String {
    let base = display(modals.is_open(modal));
    if modals.is_raised(modal) {
        format!("{} z-index: {};", base, RAISED_Z_INDEX)
    } else {
        base.to_string()
    }
}

fn display(visible: bool) -> &'static str {
    if visible {
        "display: block;"
    } else {
        "display: none;"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::modal::show_inventory;
    use crate::commands::product::edit_product;
    use crate::state::AppConfig;
    use stockroom_core::{ProductDraft, Unit};
    use stockroom_db::{Database, DbConfig};

    async fn app(query: &str, admin: bool) -> InventoryApp {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.session().set_admin_flag(admin).await.unwrap();
        let mut app = InventoryApp::start(db, AppConfig::default(), query).await.unwrap();
        app.inventory
            .add_or_update_product(
                ProductDraft {
                    name: "Rice".into(),
                    price: 2.5,
                    quantity: Some(4),
                    unit: Unit::Kilogram,
                    category: "Grains".into(),
                },
                None,
            )
            .unwrap();
        app
    }

    #[tokio::test]
    async fn test_admin_page_shows_entry_points() {
        let app = app("", true).await;

        let html = render_page(&app);

        assert!(html.contains(r#"id="showAgregar""#));
        assert!(html.contains(r#"id="showCategories""#));
        assert!(html.contains("delete-product"));
    }

    #[tokio::test]
    async fn test_guest_page_hides_gated_controls() {
        let app = app("?role=guest", true).await;

        let html = render_page(&app);

        assert!(html.contains(r#"id="showInventory""#));
        assert!(!html.contains(r#"id="showAgregar""#));
        assert!(!html.contains(r#"id="showCategories""#));
        assert!(!html.contains("delete-product"));
        assert!(!html.contains("delete-category"));
    }

    #[tokio::test]
    async fn test_closed_panels_hide_backdrop() {
        let app = app("", true).await;

        let html = render_page(&app);

        assert!(html.contains(r#"<div id="overlay" data-action="click-backdrop" style="display: none;">"#));
        assert!(html.contains(r#"<div id="inventoryModal" class="modal" style="display: none;">"#));
    }

    #[tokio::test]
    async fn test_edit_raises_add_panel_and_relabels_submit() {
        let mut app = app("", true).await;
        show_inventory(&mut app);
        let id = app.inventory().products()[0].id;
        edit_product(&mut app, id).unwrap();

        let html = render_page(&app);

        assert!(html.contains(r#"<div id="agregarModal" class="modal" style="display: block; z-index: 1002;">"#));
        assert!(html.contains(r#"<div id="overlay" data-action="click-backdrop" style="display: block;">"#));
        assert!(html.contains(r#"<button type="submit">Save</button>"#));
        assert!(html.contains(r#"value="Rice""#));
        assert!(html.contains(r#"<option value="kg" selected>Kilogram</option>"#));
    }

    #[tokio::test]
    async fn test_render_is_pure() {
        let app = app("", true).await;

        assert_eq!(render_page(&app), render_page(&app));
    }
}
