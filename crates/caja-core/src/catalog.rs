//! # Product Catalog
//!
//! The managed collection of products. The catalog is the *only* owner of
//! `Product` values: the cart and the ledger hold frozen copies, never
//! references into this collection.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                            Catalog                                  │
//! │                                                                     │
//! │  create(draft)      validate ► unique code ► assign id ► append     │
//! │  update(id, draft)  validate ► unique code ► full replace, id kept  │
//! │  delete(id)         remove, idempotent (double delete is a no-op)   │
//! │  find_by_id / find_by_code (case-insensitive exact)                 │
//! │  search(text, material)   accent-stripped substring match           │
//! │  low_stock()        stock <= minStock, most critical first          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Id Assignment
//! Ids are milliseconds since the epoch, bumped past the current maximum
//! on collision. Time-derived so restored backups and fresh creates never
//! clash, monotonic so two creates in the same millisecond stay unique.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductDraft};
use crate::validation::validate_draft;

// =============================================================================
// Catalog
// =============================================================================

/// The product set. Serializes transparently as a plain array, which is
/// the `products` field of the state blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// All products, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // -------------------------------------------------------------------------
    // Create / Update / Delete
    // -------------------------------------------------------------------------

    /// Validates the draft, assigns a fresh id and appends the product.
    ///
    /// Fails with a [`ValidationError`](crate::ValidationError) naming the
    /// offending field, or with [`CoreError::DuplicateCode`] if another
    /// product already uses the code. Nothing is mutated on failure.
    pub fn create(&mut self, draft: ProductDraft) -> CoreResult<Product> {
        validate_draft(&draft)?;
        self.check_code_unique(&draft.code, None)?;

        let product = draft.into_product(self.next_id());
        self.products.push(product.clone());
        Ok(product)
    }

    /// Fully replaces the product's fields, keeping its id.
    ///
    /// Same validation as [`Catalog::create`]. Fails with
    /// [`CoreError::ProductNotFound`] if the id is absent.
    pub fn update(&mut self, id: i64, draft: ProductDraft) -> CoreResult<Product> {
        validate_draft(&draft)?;
        self.check_code_unique(&draft.code, Some(id))?;

        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        *slot = draft.into_product(id);
        Ok(slot.clone())
    }

    /// Removes the product. Returns whether anything was removed; a second
    /// delete of the same id is a harmless no-op.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Looks a product up by id.
    pub fn find_by_id(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Mutable lookup by id. Reserved for the commit protocol's stock
    /// decrement; everything else goes through `update`.
    pub(crate) fn product_mut(&mut self, id: i64) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Looks a product up by code, case-insensitively. This is the barcode
    /// scanner's exact-match path.
    pub fn find_by_code(&self, code: &str) -> Option<&Product> {
        let code = code.trim();
        self.products
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(code) || normalize(&p.code) == normalize(code))
    }

    /// Filtered substring search over name, code, brand and category.
    ///
    /// Text matching is accent-stripped and case-folded ("lápiz" matches
    /// "lapiz" and vice versa). `material` restricts to a category tag;
    /// `None` means all categories. Empty text matches everything.
    pub fn search(&self, text: &str, material: Option<&str>) -> Vec<&Product> {
        let query = normalize(text);

        self.products
            .iter()
            .filter(|p| {
                let matches_text = query.is_empty()
                    || normalize(&p.name).contains(&query)
                    || normalize(&p.code).contains(&query)
                    || normalize(p.brand.as_deref().unwrap_or("")).contains(&query)
                    || normalize(p.material_type.as_deref().unwrap_or("")).contains(&query);

                let matches_material = match material {
                    None => true,
                    Some(m) => p.material_type.as_deref() == Some(m),
                };

                matches_text && matches_material
            })
            .collect()
    }

    /// Products at or below their restock threshold, most critical first.
    ///
    /// Ordering is ascending `stock / minStock`, so the product scarcest
    /// relative to its own threshold sorts first. The sort is stable, so
    /// equal ratios keep catalog order.
    pub fn low_stock(&self) -> Vec<&Product> {
        let mut low: Vec<&Product> = self.products.iter().filter(|p| p.is_low_stock()).collect();
        low.sort_by(|a, b| a.restock_ratio().total_cmp(&b.restock_ratio()));
        low
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Rejects a code already used by a *different* product.
    fn check_code_unique(&self, code: &str, exempt_id: Option<i64>) -> CoreResult<()> {
        let code = code.trim();
        let clash = self.products.iter().any(|p| {
            Some(p.id) != exempt_id
                && (p.code.eq_ignore_ascii_case(code) || normalize(&p.code) == normalize(code))
        });

        if clash {
            return Err(CoreError::DuplicateCode {
                code: code.to_string(),
            });
        }
        Ok(())
    }

    /// Fresh product id: current epoch milliseconds, bumped past the
    /// existing maximum so same-millisecond creates stay unique.
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let max = self.products.iter().map(|p| p.id).max().unwrap_or(0);
        now.max(max + 1)
    }
}

// =============================================================================
// Text Normalization
// =============================================================================

/// Lowercases and strips Spanish diacritics for search comparisons.
///
/// Covers the Latin-1 accented range the catalog data actually contains;
/// anything else passes through unchanged.
pub(crate) fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(code: &str, name: &str) -> ProductDraft {
        ProductDraft {
            code: code.to_string(),
            name: name.to_string(),
            brand: None,
            material_type: Some("Escolar".to_string()),
            buy_price: 800.0,
            sell_price: 1000.0,
            stock: 5,
            min_stock: 2,
        }
    }

    #[test]
    fn test_create_assigns_fresh_id_and_find_by_id_round_trips() {
        let mut catalog = Catalog::new();
        let created = catalog.create(draft("A1", "Cuaderno")).unwrap();

        assert!(created.id > 0);
        let found = catalog.find_by_id(created.id).unwrap();
        assert_eq!(found, &created);
        assert_eq!(found.code, "A1");
        assert_eq!(found.sell_price, 1000.0);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut catalog = Catalog::new();
        let a = catalog.create(draft("A1", "Cuaderno")).unwrap();
        let b = catalog.create(draft("B2", "Lápiz")).unwrap();
        let c = catalog.create(draft("C3", "Borrador")).unwrap();

        assert!(b.id > a.id);
        assert!(c.id > b.id);
    }

    #[test]
    fn test_create_rejects_invalid_draft_without_mutation() {
        let mut catalog = Catalog::new();
        let mut bad = draft("A1", "Cuaderno");
        bad.sell_price = -10.0;

        assert!(catalog.create(bad).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_create_rejects_duplicate_code_case_insensitive() {
        let mut catalog = Catalog::new();
        catalog.create(draft("A1", "Cuaderno")).unwrap();

        let err = catalog.create(draft("a1", "Otro")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateCode { .. }));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_update_preserves_id_and_replaces_fields() {
        let mut catalog = Catalog::new();
        let created = catalog.create(draft("A1", "Cuaderno")).unwrap();

        let mut new_fields = draft("A1", "Cuaderno Norma");
        new_fields.sell_price = 1500.0;
        new_fields.stock = 9;
        let updated = catalog.update(created.id, new_fields).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Cuaderno Norma");
        assert_eq!(updated.sell_price, 1500.0);
        assert_eq!(catalog.find_by_id(created.id).unwrap().stock, 9);
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let mut catalog = Catalog::new();
        let err = catalog.update(404, draft("A1", "Cuaderno")).unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[test]
    fn test_update_may_keep_own_code_but_not_steal_anothers() {
        let mut catalog = Catalog::new();
        let a = catalog.create(draft("A1", "Cuaderno")).unwrap();
        catalog.create(draft("B2", "Lápiz")).unwrap();

        // Re-submitting its own code is fine.
        assert!(catalog.update(a.id, draft("A1", "Cuaderno 2")).is_ok());

        // Taking B2's code is a conflict.
        let err = catalog.update(a.id, draft("B2", "Cuaderno 3")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateCode { .. }));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut catalog = Catalog::new();
        let created = catalog.create(draft("A1", "Cuaderno")).unwrap();

        assert!(catalog.delete(created.id));
        assert!(!catalog.delete(created.id)); // double delete: no-op
        assert!(catalog.find_by_id(created.id).is_none());
    }

    #[test]
    fn test_find_by_code_case_insensitive() {
        let mut catalog = Catalog::new();
        catalog.create(draft("Abc-123", "Cuaderno")).unwrap();

        assert!(catalog.find_by_code("abc-123").is_some());
        assert!(catalog.find_by_code("ABC-123").is_some());
        assert!(catalog.find_by_code("nope").is_none());
    }

    #[test]
    fn test_search_strips_accents_both_ways() {
        let mut catalog = Catalog::new();
        catalog.create(draft("L1", "Lápiz Mirado")).unwrap();

        assert_eq!(catalog.search("lapiz", None).len(), 1);
        assert_eq!(catalog.search("LÁPIZ", None).len(), 1);
        assert_eq!(catalog.search("mirado", None).len(), 1);
        assert_eq!(catalog.search("tinta", None).len(), 0);
    }

    #[test]
    fn test_search_matches_brand_and_category() {
        let mut catalog = Catalog::new();
        let mut d = draft("L1", "Lápiz");
        d.brand = Some("Norma".to_string());
        d.material_type = Some("Oficina".to_string());
        catalog.create(d).unwrap();

        assert_eq!(catalog.search("norma", None).len(), 1);
        assert_eq!(catalog.search("oficina", None).len(), 1);
    }

    #[test]
    fn test_search_category_filter() {
        let mut catalog = Catalog::new();
        catalog.create(draft("E1", "Cuaderno")).unwrap(); // Escolar
        let mut d = draft("O1", "Grapadora");
        d.material_type = Some("Oficina".to_string());
        catalog.create(d).unwrap();

        assert_eq!(catalog.search("", None).len(), 2);
        assert_eq!(catalog.search("", Some("Escolar")).len(), 1);
        assert_eq!(catalog.search("grapadora", Some("Escolar")).len(), 0);
    }

    #[test]
    fn test_low_stock_orders_by_criticality() {
        let mut catalog = Catalog::new();

        let mut healthy = draft("H", "Sano");
        healthy.stock = 50;
        healthy.min_stock = 5;
        catalog.create(healthy).unwrap();

        let mut at_threshold = draft("T", "Al límite");
        at_threshold.stock = 4;
        at_threshold.min_stock = 4; // ratio 1.0
        catalog.create(at_threshold).unwrap();

        let mut depleted = draft("D", "Agotado");
        depleted.stock = 0;
        depleted.min_stock = 3; // ratio 0.0
        catalog.create(depleted).unwrap();

        let mut halfway = draft("M", "Medio");
        halfway.stock = 2;
        halfway.min_stock = 4; // ratio 0.5
        catalog.create(halfway).unwrap();

        let low: Vec<&str> = catalog.low_stock().iter().map(|p| p.code.as_str()).collect();
        assert_eq!(low, vec!["D", "M", "T"]);
    }

    #[test]
    fn test_low_stock_ties_keep_catalog_order() {
        let mut catalog = Catalog::new();
        for code in ["X", "Y"] {
            let mut d = draft(code, code);
            d.stock = 1;
            d.min_stock = 2; // same ratio
            catalog.create(d).unwrap();
        }

        let low: Vec<&str> = catalog.low_stock().iter().map(|p| p.code.as_str()).collect();
        assert_eq!(low, vec!["X", "Y"]);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Lápiz Ñoño"), "lapiz nono");
        assert_eq!(normalize("CAFÉ"), "cafe");
        assert_eq!(normalize("abc-123"), "abc-123");
    }
}
