//! Category list renderer.

use stockroom_core::view::CategoryListView;

use super::escape_html;

/// Render the category `<li>` items with their edit (and, when allowed,
/// delete) controls.
pub fn render_category_list(view: &CategoryListView) -> String {
    view.items
        .iter()
        .map(|item| {
            let id = item.id.to_string();
            let delete_button = if view.show_delete {
                format!(
                    r#" <button class="btn-delete" data-action="delete-category" data-id="{id}">Delete</button>"#,
                    id = id
                )
            } else {
                String::new()
            };

            format!(
                r#"<li data-category-id="{id}"><span class="category-name">{name}</span> <button class="btn-edit" data-action="edit-category" data-id="{id}">Edit</button>{delete_button}</li>
"#,
                id = id,
                name = escape_html(&item.name),
                delete_button = delete_button
            )
        })
        .collect()
}

/// Render the `<option>` suggestions for the category input.
pub fn render_category_options(view: &CategoryListView) -> String {
    view.options
        .iter()
        .map(|name| format!(r#"<option value="{}"></option>"#, escape_html(name)))
        .collect()
}
