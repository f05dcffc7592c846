//! # Inventory State
//!
//! The owned application state: two ordered collections, products and
//! categories, mutated only through the operations below.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Operations                                 │
//! │                                                                         │
//! │  Page Action            Operation                   State Change        │
//! │  ───────────            ─────────                   ────────────        │
//! │                                                                         │
//! │  Submit (create) ──────► add_or_update(d, None) ──► products.push      │
//! │                                                      + ensure category  │
//! │  Submit (edit) ────────► add_or_update(d, Some) ──► products[id] = d   │
//! │                                                      + ensure category  │
//! │  Delete product ───────► remove_product(id) ──────► products.remove    │
//! │                                                                         │
//! │  Rename category ──────► rename_category(id, n) ──► categories[id] = n │
//! │                                                      (+ cascade policy) │
//! │  Delete category ──────► remove_category(id) ─────► categories.remove  │
//! │                                                      + products.retain  │
//! │                                                                         │
//! │  NOTE: the caller persists after every successful mutation.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! Both collections keep insertion order. Category order drives the
//! grouping order of the product table; product order drives row order
//! within a group. Lookups go through ids, never positions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Category, CategoryId, Product, ProductDraft, ProductId};

// =============================================================================
// Rename Policy
// =============================================================================

/// What renaming a category does to products filed under the old name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryRenamePolicy {
    /// Products carrying the old name are moved to the new name.
    #[default]
    Cascade,

    /// Products keep the old name and drop out of the grouped table until a
    /// category with that name exists again.
    Detach,
}

impl fmt::Display for CategoryRenamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryRenamePolicy::Cascade => write!(f, "cascade"),
            CategoryRenamePolicy::Detach => write!(f, "detach"),
        }
    }
}

impl FromStr for CategoryRenamePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cascade" => Ok(CategoryRenamePolicy::Cascade),
            "detach" => Ok(CategoryRenamePolicy::Detach),
            _ => Err(ValidationError::NotAllowed {
                field: "category_rename".to_string(),
                allowed: vec!["cascade".to_string(), "detach".to_string()],
            }),
        }
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Result of a category rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The new name was empty; nothing changed.
    Unchanged,

    /// The category was renamed.
    Renamed {
        from: String,
        to: String,
        /// Products whose category field was rewritten.
        products_moved: usize,
    },
}

/// Everything a category deletion took with it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedCategory {
    pub category: Category,
    pub products: Vec<Product>,
}

// =============================================================================
// Inventory
// =============================================================================

/// Products and categories, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the in-memory state from persisted records, assigning fresh ids.
    ///
    /// Records are taken as stored: a product whose category is missing from
    /// `categories` is kept (it simply does not show in the grouped table).
    pub fn from_records(products: Vec<ProductDraft>, categories: Vec<String>) -> Self {
        Inventory {
            products: products
                .into_iter()
                .map(|draft| Product::from_draft(ProductId::new(), draft))
                .collect(),
            categories: categories.into_iter().map(Category::new).collect(),
        }
    }

    /// Returns the persistable form of both collections, in order.
    pub fn to_records(&self) -> (Vec<ProductDraft>, Vec<String>) {
        (
            self.products.iter().map(Product::to_draft).collect(),
            self.categories.iter().map(|c| c.name.clone()).collect(),
        )
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Products filed under `name`, in collection order.
    pub fn products_in<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| p.category == name)
    }

    pub fn contains_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.categories.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Appends `name` to the category list unless an equal name exists.
    ///
    /// ## Returns
    /// The id of the existing or newly added category.
    pub fn ensure_category(&mut self, name: &str) -> CategoryId {
        if let Some(existing) = self.categories.iter().find(|c| c.name == name) {
            return existing.id;
        }

        let category = Category::new(name);
        let id = category.id;
        self.categories.push(category);
        id
    }

    /// Creates a product, or overwrites the one named by `edit` in place.
    ///
    /// ## Behavior
    /// - `edit = None`: appends a new product with a fresh id
    /// - `edit = Some(id)`: replaces that product's fields, keeping its id
    ///   and position
    /// - Either way, the draft's category is ensured in the category list
    ///
    /// ## Errors
    /// `ProductNotFound` if `edit` names a product that no longer exists.
    /// Nothing is changed in that case, not even the category list.
    pub fn add_or_update_product(
        &mut self,
        draft: ProductDraft,
        edit: Option<ProductId>,
    ) -> CoreResult<ProductId> {
        match edit {
            Some(id) => {
                let position = self
                    .position_of_product(id)
                    .ok_or(CoreError::ProductNotFound(id))?;
                self.ensure_category(&draft.category);
                self.products[position] = Product::from_draft(id, draft);
                Ok(id)
            }
            None => {
                self.ensure_category(&draft.category);
                let id = ProductId::new();
                self.products.push(Product::from_draft(id, draft));
                Ok(id)
            }
        }
    }

    /// Removes a product. Later products keep their ids.
    pub fn remove_product(&mut self, id: ProductId) -> CoreResult<Product> {
        let position = self
            .position_of_product(id)
            .ok_or(CoreError::ProductNotFound(id))?;
        Ok(self.products.remove(position))
    }

    /// Renames a category.
    ///
    /// ## Rules
    /// - The new name is trimmed; an empty result leaves everything unchanged
    /// - Renaming onto another category's name is rejected
    /// - Renaming to the current name is a successful no-op rename
    /// - Products follow the rename only under [`CategoryRenamePolicy::Cascade`]
    pub fn rename_category(
        &mut self,
        id: CategoryId,
        new_name: &str,
        policy: CategoryRenamePolicy,
    ) -> CoreResult<RenameOutcome> {
        let position = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(CoreError::CategoryNotFound(id))?;

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(RenameOutcome::Unchanged);
        }

        if self
            .categories
            .iter()
            .any(|c| c.id != id && c.name == new_name)
        {
            return Err(ValidationError::Duplicate {
                field: "category".to_string(),
                value: new_name.to_string(),
            }
            .into());
        }

        let old_name = std::mem::replace(&mut self.categories[position].name, new_name.to_string());

        let mut products_moved = 0;
        if policy == CategoryRenamePolicy::Cascade && old_name != new_name {
            for product in self.products.iter_mut().filter(|p| p.category == old_name) {
                product.category = new_name.to_string();
                products_moved += 1;
            }
        }

        Ok(RenameOutcome::Renamed {
            from: old_name,
            to: new_name.to_string(),
            products_moved,
        })
    }

    /// Removes a category and every product filed under its name.
    pub fn remove_category(&mut self, id: CategoryId) -> CoreResult<RemovedCategory> {
        let position = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(CoreError::CategoryNotFound(id))?;

        let category = self.categories.remove(position);

        let (removed, kept): (Vec<Product>, Vec<Product>) = std::mem::take(&mut self.products)
            .into_iter()
            .partition(|p| p.category == category.name);
        self.products = kept;

        Ok(RemovedCategory {
            category,
            products: removed,
        })
    }

    fn position_of_product(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Unit;

    fn draft(name: &str, category: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: 1.0,
            quantity: Some(1),
            unit: Unit::Piece,
            category: category.to_string(),
        }
    }

    fn category_names(inventory: &Inventory) -> Vec<&str> {
        inventory.categories().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_add_appends_new_category_once() {
        let mut inventory = Inventory::new();

        inventory.add_or_update_product(draft("Rice", "Grains"), None).unwrap();
        inventory.add_or_update_product(draft("Oats", "Grains"), None).unwrap();

        assert_eq!(inventory.products().len(), 2);
        assert_eq!(category_names(&inventory), vec!["Grains"]);
    }

    #[test]
    fn test_edit_replaces_only_target() {
        let mut inventory = Inventory::new();
        let first = inventory.add_or_update_product(draft("Rice", "Grains"), None).unwrap();
        let second = inventory.add_or_update_product(draft("Milk", "Dairy"), None).unwrap();
        let third = inventory.add_or_update_product(draft("Oats", "Grains"), None).unwrap();
        let before = inventory.clone();

        let mut edited = draft("Brown Rice", "Grains");
        edited.price = 3.25;
        inventory.add_or_update_product(edited, Some(second)).unwrap();

        assert_eq!(inventory.product(first), before.product(first));
        assert_eq!(inventory.product(third), before.product(third));
        let changed = inventory.product(second).unwrap();
        assert_eq!(changed.name, "Brown Rice");
        assert_eq!(inventory.products()[1].id, second);
    }

    #[test]
    fn test_edit_can_introduce_category() {
        let mut inventory = Inventory::new();
        let id = inventory.add_or_update_product(draft("Rice", "Grains"), None).unwrap();

        inventory.add_or_update_product(draft("Rice", "Pantry"), Some(id)).unwrap();

        assert_eq!(category_names(&inventory), vec!["Grains", "Pantry"]);
    }

    #[test]
    fn test_edit_of_removed_product_fails_without_side_effects() {
        let mut inventory = Inventory::new();
        let id = inventory.add_or_update_product(draft("Rice", "Grains"), None).unwrap();
        inventory.remove_product(id).unwrap();

        let result = inventory.add_or_update_product(draft("Rice", "Pantry"), Some(id));

        assert!(matches!(result, Err(CoreError::ProductNotFound(_))));
        assert!(!inventory.contains_category("Pantry"));
    }

    #[test]
    fn test_remove_product_keeps_other_ids_valid() {
        let mut inventory = Inventory::new();
        let first = inventory.add_or_update_product(draft("Rice", "Grains"), None).unwrap();
        let second = inventory.add_or_update_product(draft("Oats", "Grains"), None).unwrap();

        inventory.remove_product(first).unwrap();

        // A delete queued against `second` before the first removal still lands.
        let removed = inventory.remove_product(second).unwrap();
        assert_eq!(removed.name, "Oats");
        assert!(inventory.products().is_empty());
    }

    #[test]
    fn test_remove_category_cascades_to_matching_products_only() {
        let mut inventory = Inventory::new();
        inventory.add_or_update_product(draft("Rice", "Grains"), None).unwrap();
        inventory.add_or_update_product(draft("Milk", "Dairy"), None).unwrap();
        inventory.add_or_update_product(draft("Oats", "Grains"), None).unwrap();
        let grains = inventory.categories()[0].id;

        let removed = inventory.remove_category(grains).unwrap();

        assert_eq!(removed.category.name, "Grains");
        assert_eq!(removed.products.len(), 2);
        assert_eq!(category_names(&inventory), vec!["Dairy"]);
        assert_eq!(inventory.products().len(), 1);
        assert_eq!(inventory.products()[0].name, "Milk");
    }

    #[test]
    fn test_rename_cascade_moves_products() {
        let mut inventory = Inventory::new();
        inventory.add_or_update_product(draft("Rice", "Grains"), None).unwrap();
        let id = inventory.categories()[0].id;

        let outcome = inventory
            .rename_category(id, " Cereals ", CategoryRenamePolicy::Cascade)
            .unwrap();

        assert_eq!(
            outcome,
            RenameOutcome::Renamed {
                from: "Grains".to_string(),
                to: "Cereals".to_string(),
                products_moved: 1,
            }
        );
        assert_eq!(inventory.products()[0].category, "Cereals");
    }

    #[test]
    fn test_rename_detach_leaves_products_on_old_name() {
        let mut inventory = Inventory::new();
        inventory.add_or_update_product(draft("Rice", "Grains"), None).unwrap();
        let id = inventory.categories()[0].id;

        inventory
            .rename_category(id, "Cereals", CategoryRenamePolicy::Detach)
            .unwrap();

        assert_eq!(category_names(&inventory), vec!["Cereals"]);
        assert_eq!(inventory.products()[0].category, "Grains");
    }

    #[test]
    fn test_rename_to_blank_is_unchanged() {
        let mut inventory = Inventory::new();
        let id = inventory.ensure_category("Grains");

        let outcome = inventory
            .rename_category(id, "   ", CategoryRenamePolicy::Cascade)
            .unwrap();

        assert_eq!(outcome, RenameOutcome::Unchanged);
        assert_eq!(category_names(&inventory), vec!["Grains"]);
    }

    #[test]
    fn test_rename_onto_existing_name_is_rejected() {
        let mut inventory = Inventory::new();
        let grains = inventory.ensure_category("Grains");
        inventory.ensure_category("Dairy");

        let result = inventory.rename_category(grains, "Dairy", CategoryRenamePolicy::Cascade);

        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn test_records_round_trip_preserves_order() {
        let mut inventory = Inventory::new();
        inventory.ensure_category("Empty");
        inventory.add_or_update_product(draft("Rice", "Grains"), None).unwrap();
        inventory.add_or_update_product(draft("Milk", "Dairy"), None).unwrap();

        let (products, categories) = inventory.to_records();
        let reloaded = Inventory::from_records(products.clone(), categories.clone());

        assert_eq!(reloaded.to_records(), (products, categories));
    }

    #[test]
    fn test_rename_policy_parsing() {
        assert_eq!(
            "Cascade".parse::<CategoryRenamePolicy>().unwrap(),
            CategoryRenamePolicy::Cascade
        );
        assert_eq!(
            "detach".parse::<CategoryRenamePolicy>().unwrap(),
            CategoryRenamePolicy::Detach
        );
        assert!("merge".parse::<CategoryRenamePolicy>().is_err());
    }
}
