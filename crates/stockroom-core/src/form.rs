//! # Product Form
//!
//! The add/edit form and its two-mode state machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Form Modes                                           │
//! │                                                                         │
//! │            submit (append)                                              │
//! │              ┌──────┐                                                   │
//! │              ▼      │        begin_edit(product)                        │
//! │         ┌──────────────┐ ─────────────────────────► ┌──────────────┐   │
//! │  start ►│    Create    │                            │  Edit(id)    │   │
//! │         └──────────────┘ ◄───────────────────────── └──────────────┘   │
//! │                              submit (overwrite id)        │  ▲         │
//! │                              cancel (panel dismissed)     └──┘         │
//! │                                                      begin_edit(other) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Parsing
//! Fields are raw strings. Submission parses them leniently and never
//! rejects: price takes the longest leading decimal number (NaN if none),
//! quantity takes the leading integer (`None` if none), the category is
//! trimmed, everything else is taken verbatim.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, ProductDraft, ProductId, Unit};

/// Submit control label in Create mode.
pub const CREATE_LABEL: &str = "Add Product";

/// Submit control label in Edit mode.
pub const EDIT_LABEL: &str = "Save";

// =============================================================================
// Fields
// =============================================================================

/// Raw form field values as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormFields {
    pub name: String,
    pub price: String,
    pub quantity: String,
    /// Unit selector value (a unit code).
    pub unit: String,
    pub category: String,
}

impl Default for FormFields {
    fn default() -> Self {
        FormFields {
            name: String::new(),
            price: String::new(),
            quantity: String::new(),
            unit: Unit::default().code().to_string(),
            category: String::new(),
        }
    }
}

impl FormFields {
    /// Fills the fields from a stored product.
    pub fn from_product(product: &Product) -> Self {
        FormFields {
            name: product.name.clone(),
            price: price_text(product.price),
            quantity: product
                .quantity
                .map(|q| q.to_string())
                .unwrap_or_default(),
            unit: product.unit.code().to_string(),
            category: product.category.clone(),
        }
    }

    /// Parses the fields into a draft. Never fails.
    ///
    /// Fields filled by [`FormFields::from_product`] parse back to the same
    /// product.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            price: parse_leading_float(&self.price),
            quantity: parse_leading_int(&self.quantity),
            unit: Unit::from(self.unit.as_str()),
            category: self.category.trim().to_string(),
        }
    }
}

/// Price as the form shows it; spelled so that [`parse_leading_float`]
/// reads it back unchanged.
fn price_text(price: f64) -> String {
    if price == f64::INFINITY {
        "Infinity".to_string()
    } else if price == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        price.to_string()
    }
}

// =============================================================================
// Mode
// =============================================================================

/// Which operation the next submission performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(ProductId),
}

/// A parsed submission, ready for the inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub draft: ProductDraft,
    /// Product to overwrite; `None` appends.
    pub edit: Option<ProductId>,
}

// =============================================================================
// Form
// =============================================================================

/// The add/edit form.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    fields: FormFields,
    mode: FormMode,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Replaces the field values (user typing).
    pub fn set_fields(&mut self, fields: FormFields) {
        self.fields = fields;
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => CREATE_LABEL,
            FormMode::Edit(_) => EDIT_LABEL,
        }
    }

    /// Create → Edit: loads `product` into the fields and remembers its id.
    ///
    /// Calling this while already editing switches to the new product.
    pub fn begin_edit(&mut self, product: &Product) {
        self.fields = FormFields::from_product(product);
        self.mode = FormMode::Edit(product.id);
    }

    /// Parses the fields, then resets the form to Create mode.
    pub fn submit(&mut self) -> Submission {
        let draft = self.fields.to_draft();
        let edit = match self.mode {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        };
        self.reset();
        Submission { draft, edit }
    }

    /// Edit → Create without applying anything.
    ///
    /// ## Returns
    /// The abandoned product id if an edit was in progress.
    pub fn cancel(&mut self) -> Option<ProductId> {
        let abandoned = match self.mode {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        };
        if abandoned.is_some() {
            self.reset();
        }
        abandoned
    }

    fn reset(&mut self) {
        self.fields = FormFields::default();
        self.mode = FormMode::Create;
    }
}

// =============================================================================
// Lenient number parsing
// =============================================================================

/// Parses the longest leading decimal number, ignoring leading whitespace.
///
/// `"2.5kg"` → 2.5, `"  .5"` → 0.5, `"1e3x"` → 1000, `"abc"` → NaN.
pub fn parse_leading_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Parses the leading base-10 integer, ignoring leading whitespace.
///
/// `"4.7"` → 4, `"12 boxes"` → 12, `"x"` → `None`. Values beyond `i64`
/// saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let magnitude = digits[..len].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// Unit Tests
// =============================================================================
