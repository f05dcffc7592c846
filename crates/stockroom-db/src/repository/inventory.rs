//! # Inventory Repository
//!
//! Loads and saves the two inventory collections.
//!
//! ## Stored Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  key          value                                                     │
//! │  ──────────   ─────────────────────────────────────────────────────────  │
//! │  productos    [{"nombre":"Rice","precio":2.5,"cantidad":4,              │
//! │                 "unidad":"kg","categoria":"Grains"}, ...]               │
//! │  categorias   ["Grains","Dairy", ...]                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Ids are never stored; every load assigns fresh ones. A price or
//! quantity that was not a number is stored as `null`.
//!
//! Both keys are written in one transaction, so a crash never leaves a
//! product list that disagrees with the category list it was saved with.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use stockroom_core::types::nan_as_null;
use stockroom_core::{Inventory, ProductDraft, Unit, CATEGORIES_KEY, PRODUCTS_KEY};

use crate::error::{DbError, DbResult};
use crate::repository::kv::KvRepository;

/// A product as persisted under `productos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredProduct {
    #[serde(rename = "nombre")]
    name: String,

    #[serde(rename = "precio", with = "nan_as_null")]
    price: f64,

    #[serde(rename = "cantidad", default, deserialize_with = "lenient_quantity")]
    quantity: Option<i64>,

    #[serde(rename = "unidad")]
    unit: Unit,

    #[serde(rename = "categoria")]
    category: String,
}

impl From<StoredProduct> for ProductDraft {
    fn from(stored: StoredProduct) -> Self {
        ProductDraft {
            name: stored.name,
            price: stored.price,
            quantity: stored.quantity,
            unit: stored.unit,
            category: stored.category,
        }
    }
}

impl From<ProductDraft> for StoredProduct {
    fn from(draft: ProductDraft) -> Self {
        StoredProduct {
            name: draft.name,
            price: draft.price,
            quantity: draft.quantity,
            unit: draft.unit,
            category: draft.category,
        }
    }
}

/// Reads any JSON number as a quantity, clamped into `i64`.
///
/// Older saves hold whatever the integer parse produced, including huge
/// values written in exponent form (`1e+20`). Anything that is not a number
/// reads as `None`.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct QuantityVisitor;

    impl<'de> Visitor<'de> for QuantityVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a quantity")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(i64::try_from(value).unwrap_or(i64::MAX)))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            // `as` saturates at the i64 bounds
            Ok((!value.is_nan()).then(|| value.trunc() as i64))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, inner: D2) -> Result<Self::Value, D2::Error> {
            inner.deserialize_any(self)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(QuantityVisitor)
}

/// Repository for the product and category collections.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    kv: KvRepository,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository {
            kv: KvRepository::new(pool),
        }
    }

    /// Loads the inventory.
    ///
    /// ## Behavior
    /// - Absent key (or a stored `null`) → empty collection
    /// - Malformed value → `DbError::Corrupt`; nothing is loaded
    pub async fn load(&self) -> DbResult<Inventory> {
        let products: Vec<StoredProduct> = self.read_array(PRODUCTS_KEY).await?;
        let categories: Vec<String> = self.read_array(CATEGORIES_KEY).await?;

        info!(
            products = products.len(),
            categories = categories.len(),
            "Inventory loaded"
        );

        Ok(Inventory::from_records(
            products.into_iter().map(ProductDraft::from).collect(),
            categories,
        ))
    }

    /// Saves both collections in full, atomically.
    pub async fn save(&self, inventory: &Inventory) -> DbResult<()> {
        let (drafts, categories) = inventory.to_records();
        let products: Vec<StoredProduct> = drafts.into_iter().map(StoredProduct::from).collect();

        let products_json =
            serde_json::to_string(&products).map_err(|e| DbError::Serialization(e.to_string()))?;
        let categories_json =
            serde_json::to_string(&categories).map_err(|e| DbError::Serialization(e.to_string()))?;

        self.kv
            .set_many(&[
                (PRODUCTS_KEY, products_json),
                (CATEGORIES_KEY, categories_json),
            ])
            .await?;

        debug!(
            products = products.len(),
            categories = categories.len(),
            "Inventory saved"
        );
        Ok(())
    }

    async fn read_array<T>(&self, key: &str) -> DbResult<Vec<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(raw) = self.kv.get(key).await? else {
            return Ok(Vec::new());
        };

        let parsed: Option<Vec<T>> = serde_json::from_str(&raw).map_err(|e| {
            warn!(key = %key, error = %e, "Stored value is corrupt");
            DbError::corrupt(key, e)
        })?;

        Ok(parsed.unwrap_or_default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockroom_core::CategoryRenamePolicy;

    fn draft(name: &str, price: f64, quantity: Option<i64>, category: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price,
            quantity,
            unit: Unit::Kilogram,
            category: category.to_string(),
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_storage_loads_empty_inventory() {
        let db = db().await;

        let inventory = db.inventory().load().await.unwrap();

        assert!(inventory.is_empty());
        assert!(inventory.categories().is_empty());
    }

    #[tokio::test]
    async fn test_stored_null_loads_empty() {
        let db = db().await;
        db.kv().set(PRODUCTS_KEY, "null").await.unwrap();

        let inventory = db.inventory().load().await.unwrap();

        assert!(inventory.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_records_and_order() {
        let db = db().await;
        let mut inventory = Inventory::new();
        inventory.ensure_category("Dairy");
        inventory
            .add_or_update_product(draft("Rice", 2.5, Some(4), "Grains"), None)
            .unwrap();
        inventory
            .add_or_update_product(draft("Milk", 0.99, Some(12), "Dairy"), None)
            .unwrap();

        db.inventory().save(&inventory).await.unwrap();
        let loaded = db.inventory().load().await.unwrap();

        assert_eq!(loaded.to_records(), inventory.to_records());
    }

    #[tokio::test]
    async fn test_stored_format_uses_original_keys() {
        let db = db().await;
        let mut inventory = Inventory::new();
        inventory
            .add_or_update_product(draft("Rice", 2.5, Some(4), "Grains"), None)
            .unwrap();

        db.inventory().save(&inventory).await.unwrap();

        let products = db.kv().get(PRODUCTS_KEY).await.unwrap().unwrap();
        assert_eq!(
            products,
            r#"[{"nombre":"Rice","precio":2.5,"cantidad":4,"unidad":"kg","categoria":"Grains"}]"#
        );
        let categories = db.kv().get(CATEGORIES_KEY).await.unwrap().unwrap();
        assert_eq!(categories, r#"["Grains"]"#);
    }

    #[tokio::test]
    async fn test_invalid_numbers_round_trip_as_null() {
        let db = db().await;
        let mut inventory = Inventory::new();
        inventory
            .add_or_update_product(draft("Mystery", f64::NAN, None, "Misc"), None)
            .unwrap();

        db.inventory().save(&inventory).await.unwrap();
        let raw = db.kv().get(PRODUCTS_KEY).await.unwrap().unwrap();
        assert!(raw.contains(r#""precio":null"#));
        assert!(raw.contains(r#""cantidad":null"#));

        let loaded = db.inventory().load().await.unwrap();
        let product = &loaded.products()[0];
        assert!(product.price.is_nan());
        assert_eq!(product.quantity, None);
    }

    #[tokio::test]
    async fn test_malformed_value_is_corrupt() {
        let db = db().await;
        db.kv().set(CATEGORIES_KEY, "{not json").await.unwrap();

        let err = db.inventory().load().await.unwrap_err();

        assert!(matches!(err, DbError::Corrupt { ref key, .. } if key == CATEGORIES_KEY));
    }

    #[tokio::test]
    async fn test_unknown_unit_survives_reload() {
        let db = db().await;
        db.kv()
            .set(
                PRODUCTS_KEY,
                r#"[{"nombre":"Rope","precio":3,"cantidad":2,"unidad":"m","categoria":"Tools"}]"#,
            )
            .await
            .unwrap();

        let loaded = db.inventory().load().await.unwrap();

        assert_eq!(loaded.products()[0].unit, Unit::Other("m".to_string()));
    }

    #[tokio::test]
    async fn test_out_of_range_quantity_is_clamped() {
        let db = db().await;
        db.kv()
            .set(
                PRODUCTS_KEY,
                r#"[{"nombre":"Screws","precio":0.01,"cantidad":1e+20,"unidad":"unidad","categoria":"Tools"},
                    {"nombre":"Bolts","precio":0.02,"cantidad":100000000000000000000,"unidad":"unidad","categoria":"Tools"},
                    {"nombre":"Nuts","precio":0.03,"cantidad":-1e+30,"unidad":"unidad","categoria":"Tools"}]"#,
            )
            .await
            .unwrap();

        let loaded = db.inventory().load().await.unwrap();

        let quantities: Vec<Option<i64>> = loaded.products().iter().map(|p| p.quantity).collect();
        assert_eq!(quantities, vec![Some(i64::MAX), Some(i64::MAX), Some(i64::MIN)]);
    }

    #[tokio::test]
    async fn test_non_numeric_or_missing_quantity_loads_as_none() {
        let db = db().await;
        db.kv()
            .set(
                PRODUCTS_KEY,
                r#"[{"nombre":"A","precio":1,"cantidad":"4","unidad":"kg","categoria":"X"},
                    {"nombre":"B","precio":1,"cantidad":[1],"unidad":"kg","categoria":"X"},
                    {"nombre":"C","precio":1,"unidad":"kg","categoria":"X"},
                    {"nombre":"D","precio":1,"cantidad":2.9,"unidad":"kg","categoria":"X"}]"#,
            )
            .await
            .unwrap();

        let loaded = db.inventory().load().await.unwrap();

        let quantities: Vec<Option<i64>> = loaded.products().iter().map(|p| p.quantity).collect();
        assert_eq!(quantities, vec![None, None, None, Some(2)]);
    }

    #[tokio::test]
    async fn test_saved_rename_is_visible_after_reload() {
        let db = db().await;
        let mut inventory = Inventory::new();
        inventory
            .add_or_update_product(draft("Rice", 2.5, Some(4), "Grains"), None)
            .unwrap();
        let id = inventory.categories()[0].id;
        inventory
            .rename_category(id, "Cereals", CategoryRenamePolicy::Cascade)
            .unwrap();

        db.inventory().save(&inventory).await.unwrap();
        let loaded = db.inventory().load().await.unwrap();

        assert!(loaded.contains_category("Cereals"));
        assert_eq!(loaded.products()[0].category, "Cereals");
    }
}
