//! # View Models
//!
//! Render-ready snapshots of the inventory. Building a view never mutates
//! state, so building twice from unchanged state yields equal views.
//!
//! ## Product Table Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         Grains              ◄── one header per       │
//! ├──────────┬───────┬──────────┬──────┬───────┬─────────────────┤ non-  │
//! │ Rice     │ 2.50  │ 4        │ kg   │ 10.00 │ [Edit] [Delete] │ empty │
//! │ Oats     │ 1.20  │ 10       │ kg   │ 12.00 │ [Edit] [Delete] │ cat.  │
//! ├──────────┴───────┴──────────┴──────┴───────┴─────────────────┤       │
//! │                         Dairy                                │       │
//! ├──────────┬───────┬──────────┬──────┬───────┬─────────────────┤       │
//! │ Milk     │ 0.99  │ 12       │ l    │ 11.88 │ [Edit] [Delete] │       │
//! └──────────┴───────┴──────────┴──────┴───────┴─────────────────┘       │
//!   Sections follow category-list order; rows follow product order.
//!   Categories with no products get no header.
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::access::Visibility;
use crate::inventory::Inventory;
use crate::types::{CategoryId, Product, ProductId, Unit};

// =============================================================================
// Product Table
// =============================================================================

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRow {
    #[ts(as = "String")]
    pub id: ProductId,
    pub name: String,
    /// Price with two decimals.
    pub price: String,
    pub quantity: String,
    pub unit: String,
    /// price × quantity with two decimals.
    pub total: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        ProductRow {
            id: product.id,
            name: product.name.clone(),
            price: format_amount(product.price),
            quantity: format_quantity(product.quantity),
            unit: product.unit.code().to_string(),
            total: format_amount(product.total()),
        }
    }
}

/// A category header and its rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategorySection {
    pub category: String,
    pub rows: Vec<ProductRow>,
}

/// The grouped product table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductTableView {
    pub sections: Vec<CategorySection>,
    pub show_delete: bool,
}

impl ProductTableView {
    /// Groups products by category, skipping empty categories.
    ///
    /// Products whose category is not in the list are not shown.
    pub fn build(inventory: &Inventory, visibility: &Visibility) -> Self {
        let sections = inventory
            .categories()
            .iter()
            .filter_map(|category| {
                let rows: Vec<ProductRow> = inventory
                    .products_in(&category.name)
                    .map(ProductRow::from)
                    .collect();
                (!rows.is_empty()).then(|| CategorySection {
                    category: category.name.clone(),
                    rows,
                })
            })
            .collect();

        ProductTableView {
            sections,
            show_delete: visibility.show_delete,
        }
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }
}

// =============================================================================
// Category List
// =============================================================================

/// One entry of the category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryItem {
    #[ts(as = "String")]
    pub id: CategoryId,
    pub name: String,
}

/// Category list plus the form's category suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryListView {
    pub items: Vec<CategoryItem>,
    /// Suggestion values for the category input, same order as `items`.
    pub options: Vec<String>,
    pub show_delete: bool,
}

impl CategoryListView {
    pub fn build(inventory: &Inventory, visibility: &Visibility) -> Self {
        let items: Vec<CategoryItem> = inventory
            .categories()
            .iter()
            .map(|c| CategoryItem {
                id: c.id,
                name: c.name.clone(),
            })
            .collect();
        let options = items.iter().map(|i| i.name.clone()).collect();

        CategoryListView {
            items,
            options,
            show_delete: visibility.show_delete,
        }
    }
}

// =============================================================================
// Unit Selector
// =============================================================================

/// One `<option>` of the unit selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnitOption {
    pub code: String,
    pub label: String,
}

/// The fixed unit choices, in selector order.
pub fn unit_options() -> Vec<UnitOption> {
    Unit::CHOICES
        .iter()
        .map(|u| UnitOption {
            code: u.code().to_string(),
            label: u.label().to_string(),
        })
        .collect()
}

// =============================================================================
// Formatting
// =============================================================================

/// Two-decimal display of an amount; non-finite values show as `NaN` or
/// `Infinity`.
///
/// Exact halves round away from zero (`10.125` → `10.13`). Negative zero
/// prints as `0.00`; small negatives keep their sign (`-0.001` → `-0.00`).
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value.abs() >= 1e21 {
        // Whole numbers only up here; no cents to round
        format!("{:.2}", value)
    } else {
        round_half_up(value)
    }
}

/// Two decimals from the exact decimal expansion of `value`.
fn round_half_up(value: f64) -> String {
    // An f64 has at most 1074 fractional binary digits, so this is exact
    let exact = format!("{:.1074}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut digits = fraction.chars().filter_map(|c| c.to_digit(10));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().unwrap_or(0) >= 5;

    let whole: u128 = whole.parse().unwrap_or(0);
    let cents = whole * 100 + u128::from(tenths * 10 + hundredths) + u128::from(round_up);

    // -0.0 is not below zero, so negative zero prints unsigned
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

// =============================================================================
// Unit Tests
// =============================================================================
