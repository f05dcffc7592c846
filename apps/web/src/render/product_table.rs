//! Product table renderer.

use stockroom_core::view::{CategorySection, ProductRow, ProductTableView};

use super::escape_html;

/// Render the table body: one header row per category, then its products.
pub fn render_product_table(view: &ProductTableView) -> String {
    view.sections
        .iter()
        .map(|section| render_section(section, view.show_delete))
        .collect()
}

fn render_section(section: &CategorySection, show_delete: bool) -> String {
    let rows: String = section
        .rows
        .iter()
        .map(|row| render_row(row, show_delete))
        .collect();

    format!(
        r#"<tr class="category-header"><td colspan="6">{category}</td></tr>
{rows}"#,
        category = escape_html(&section.category),
        rows = rows
    )
}

fn render_row(row: &ProductRow, show_delete: bool) -> String {
    let id = row.id.to_string();

    let delete_button = if show_delete {
        format!(
            r#" <button class="btn-delete" data-action="delete-product" data-id="{id}">Delete</button>"#,
            id = id
        )
    } else {
        String::new()
    };

    format!(
        r#"<tr data-product-id="{id}">
    <td>{name}</td>
    <td>{price}</td>
    <td>{quantity}</td>
    <td>{unit}</td>
    <td>{total}</td>
    <td><button class="btn-edit" data-action="edit-product" data-id="{id}">Edit</button>{delete_button}</td>
</tr>
"#,
        id = id,
        name = escape_html(&row.name),
        price = escape_html(&row.price),
        quantity = escape_html(&row.quantity),
        unit = escape_html(&row.unit),
        total = escape_html(&row.total),
        delete_button = delete_button
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{Inventory, ProductDraft, Unit, Visibility};

    fn visibility(privileged: bool) -> Visibility {
        Visibility {
            show_create: privileged,
            show_categories: privileged,
            show_delete: privileged,
        }
    }

    fn inventory() -> Inventory {
        let mut inventory = Inventory::new();
        for (name, category) in [("Rice", "Grains"), ("Milk", "Dairy"), ("Oats", "Grains")] {
            inventory
                .add_or_update_product(
                    ProductDraft {
                        name: name.to_string(),
                        price: 2.5,
                        quantity: Some(4),
                        unit: Unit::Kilogram,
                        category: category.to_string(),
                    },
                    None,
                )
                .unwrap();
        }
        inventory
    }

    #[test]
    fn test_one_header_per_category_in_order() {
        let html = render_product_table(&ProductTableView::build(&inventory(), &visibility(true)));

        assert_eq!(html.matches("category-header").count(), 2);
        let grains = html.find(">Grains<").unwrap();
        let dairy = html.find(">Dairy<").unwrap();
        assert!(grains < dairy);
        assert!(html.find("Oats").unwrap() < dairy);
    }

    #[test]
    fn test_totals_have_two_decimals() {
        let html = render_product_table(&ProductTableView::build(&inventory(), &visibility(true)));

        assert!(html.contains("<td>2.50</td>"));
        assert!(html.contains("<td>10.00</td>"));
    }

    #[test]
    fn test_delete_buttons_absent_when_not_privileged() {
        let html = render_product_table(&ProductTableView::build(&inventory(), &visibility(false)));

        assert!(!html.contains("delete-product"));
        assert_eq!(html.matches("edit-product").count(), 3);
    }

    #[test]
    fn test_names_are_escaped() {
        let mut inventory = Inventory::new();
        inventory
            .add_or_update_product(
                ProductDraft {
                    name: "<script>alert(1)</script>".to_string(),
                    price: 1.0,
                    quantity: Some(1),
                    unit: Unit::Piece,
                    category: "A&B".to_string(),
                },
                None,
            )
            .unwrap();

        let html = render_product_table(&ProductTableView::build(&inventory, &visibility(true)));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(">A&amp;B<"));
    }

    #[test]
    fn test_empty_inventory_renders_nothing() {
        let html = render_product_table(&ProductTableView::build(&Inventory::new(), &visibility(true)));

        assert!(html.is_empty());
    }
}
