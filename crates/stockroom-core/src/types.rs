//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductDraft   │──►│    Product      │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  price          │   │  + draft fields │   │  name           │       │
//! │  │  quantity       │   └─────────────────┘   └─────────────────┘       │
//! │  │  unit           │            │                     ▲                │
//! │  │  category ──────┼────────────┴── copy of name ─────┘                │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are generated when a record enters memory (load or create) and are
//! never persisted. They exist so a deferred action (an edit started before
//! a delete) still targets the record the user picked, whatever its position.
//!
//! ## Invalid Numbers
//! Price and quantity are not validated. A price that fails to parse is NaN
//! and a quantity that fails to parse is `None`; both serialize as JSON
//! `null` and come back the same way.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

// =============================================================================
// Identifiers
// =============================================================================

/// Stable handle for a product within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a fresh id.
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }

    /// Parses an id rendered into a page control.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(ProductId)
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Stable handle for a category within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Generates a fresh id.
    pub fn new() -> Self {
        CategoryId(Uuid::new_v4())
    }

    /// Parses an id rendered into a page control.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(CategoryId)
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Unit
// =============================================================================

/// Unit of measure offered by the form's unit selector.
///
/// Stored as its short code. Codes outside the fixed set load as
/// [`Unit::Other`] so older data is never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    /// Counted pieces.
    #[default]
    Piece,
    Kilogram,
    Gram,
    Liter,
    Milliliter,
    Pound,
    Box,
    Pack,
    /// Any code not in the fixed set, kept verbatim.
    Other(String),
}

impl Unit {
    /// The fixed choices, in selector order.
    pub const CHOICES: [Unit; 8] = [
        Unit::Piece,
        Unit::Kilogram,
        Unit::Gram,
        Unit::Liter,
        Unit::Milliliter,
        Unit::Pound,
        Unit::Box,
        Unit::Pack,
    ];

    /// Short code as stored and shown in the table.
    pub fn code(&self) -> &str {
        match self {
            Unit::Piece => "unidad",
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Liter => "l",
            Unit::Milliliter => "ml",
            Unit::Pound => "lb",
            Unit::Box => "caja",
            Unit::Pack => "paquete",
            Unit::Other(code) => code,
        }
    }

    /// Human label for the selector.
    pub fn label(&self) -> &str {
        match self {
            Unit::Piece => "Piece",
            Unit::Kilogram => "Kilogram",
            Unit::Gram => "Gram",
            Unit::Liter => "Liter",
            Unit::Milliliter => "Milliliter",
            Unit::Pound => "Pound",
            Unit::Box => "Box",
            Unit::Pack => "Pack",
            Unit::Other(code) => code,
        }
    }
}

impl From<String> for Unit {
    fn from(code: String) -> Self {
        match code.as_str() {
            "unidad" => Unit::Piece,
            "kg" => Unit::Kilogram,
            "g" => Unit::Gram,
            "l" => Unit::Liter,
            "ml" => Unit::Milliliter,
            "lb" => Unit::Pound,
            "caja" => Unit::Box,
            "paquete" => Unit::Pack,
            _ => Unit::Other(code),
        }
    }
}

impl From<&str> for Unit {
    fn from(code: &str) -> Self {
        Unit::from(code.to_string())
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Product
// =============================================================================

/// User-entered product fields, without an identity.
///
/// This is what a form submission produces and what storage holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,

    /// Unit price. NaN when the entry was not a number.
    #[serde(with = "nan_as_null")]
    #[ts(type = "number | null")]
    pub price: f64,

    /// Stock on hand. `None` when the entry was not a number.
    pub quantity: Option<i64>,

    #[ts(as = "String")]
    pub unit: Unit,

    /// Category name (a copy, not a reference).
    pub category: String,
}

/// A product held in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Session-stable identifier.
    #[ts(as = "String")]
    pub id: ProductId,

    pub name: String,

    #[serde(with = "nan_as_null")]
    #[ts(type = "number | null")]
    pub price: f64,

    pub quantity: Option<i64>,

    #[ts(as = "String")]
    pub unit: Unit,

    pub category: String,
}

impl Product {
    /// Builds a product from a draft under the given id.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Product {
            id,
            name: draft.name,
            price: draft.price,
            quantity: draft.quantity,
            unit: draft.unit,
            category: draft.category,
        }
    }

    /// Returns the user-entered fields.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            unit: self.unit.clone(),
            category: self.category.clone(),
        }
    }

    /// Line value: price × quantity. NaN if either input is invalid.
    pub fn total(&self) -> f64 {
        match self.quantity {
            Some(qty) => self.price * qty as f64,
            None => f64::NAN,
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A named grouping label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    #[ts(as = "String")]
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: CategoryId::new(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Serde helpers
// =============================================================================

/// Serializes NaN/infinite floats as `null` and reads `null` back as NaN.
///
/// JSON has no NaN, and serde_json refuses non-finite floats.
pub mod nan_as_null {
    use super::*;

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(price: f64, quantity: Option<i64>) -> ProductDraft {
        ProductDraft {
            name: "Rice".to_string(),
            price,
            quantity,
            unit: Unit::Kilogram,
            category: "Grains".to_string(),
        }
    }

    #[test]
    fn test_unit_codes_round_trip_through_strings() {
        for unit in Unit::CHOICES {
            let code: String = unit.clone().into();
            assert_eq!(Unit::from(code), unit);
        }
    }

    #[test]
    fn test_unknown_unit_is_kept_verbatim() {
        let unit = Unit::from("docena");
        assert_eq!(unit, Unit::Other("docena".to_string()));
        assert_eq!(unit.code(), "docena");
    }

    #[test]
    fn test_total_is_price_times_quantity() {
        let product = Product::from_draft(ProductId::new(), draft(2.5, Some(4)));
        assert!((product.total() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_is_nan_for_invalid_inputs() {
        let product = Product::from_draft(ProductId::new(), draft(f64::NAN, Some(4)));
        assert!(product.total().is_nan());

        let product = Product::from_draft(ProductId::new(), draft(2.5, None));
        assert!(product.total().is_nan());
    }

    #[test]
    fn test_nan_price_serializes_as_null() {
        let json = serde_json::to_value(draft(f64::NAN, None)).unwrap();
        assert!(json["price"].is_null());
        assert!(json["quantity"].is_null());

        let back: ProductDraft = serde_json::from_value(json).unwrap();
        assert!(back.price.is_nan());
        assert_eq!(back.quantity, None);
    }

    #[test]
    fn test_ids_parse_from_their_display_form() {
        let id = ProductId::new();
        assert_eq!(ProductId::parse(&id.to_string()), Some(id));
        assert_eq!(ProductId::parse("row-3"), None);
    }
}
