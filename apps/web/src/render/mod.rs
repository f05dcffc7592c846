//! # HTML Rendering
//!
//! Turns core view models into HTML fragments. Every function here is pure:
//! the same view renders to the same string, and all interpolated text is
//! escaped.
//!
//! - [`product_table`] - `<tbody>` rows of the grouped inventory table
//! - [`category_list`] - Category `<li>` items and `<datalist>` options
//! - [`page`] - The full page shell

pub mod category_list;
pub mod page;
pub mod product_table;

pub use category_list::{render_category_list, render_category_options};
pub use page::render_page;
pub use product_table::render_product_table;

/// Escapes text for HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
