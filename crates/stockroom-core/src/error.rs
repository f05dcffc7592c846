//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Inventory operation failures                   │
//! │  └── ValidationError  - Rejected user input                            │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError          - Storage failures                               │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── AppError         - What the page sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Page                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Form input itself is deliberately NOT validated: invalid prices and
//! quantities are stored as-is. `ValidationError` only covers the category
//! rename path, where an accepted value would corrupt grouping.

use thiserror::Error;

use crate::types::{CategoryId, ProductId};

// =============================================================================
// Core Error
// =============================================================================

/// Inventory operation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product carries this id.
    ///
    /// ## When This Occurs
    /// - An edit was started, then the product was deleted before submit
    /// - A rendered row was acted on after its product was removed
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// No category carries this id.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Duplicate value (e.g., renaming onto an existing category).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Value is not one of the accepted choices.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Duplicate {
            field: "category".to_string(),
            value: "Grains".to_string(),
        };
        assert_eq!(err.to_string(), "category 'Grains' already exists");

        let err = ValidationError::NotAllowed {
            field: "rename policy".to_string(),
            allowed: vec!["cascade".to_string(), "detach".to_string()],
        };
        assert_eq!(
            err.to_string(),
            r#"rename policy must be one of: ["cascade", "detach"]"#
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Duplicate {
            field: "category".to_string(),
            value: "Dairy".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
