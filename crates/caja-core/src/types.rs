//! # Domain Types
//!
//! Core domain types used throughout Caja POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌────────────────┐    ┌────────────────┐    ┌────────────────┐    │
//! │  │    Product     │    │    CartLine    │    │      Sale      │    │
//! │  │  ────────────  │    │  ────────────  │    │  ────────────  │    │
//! │  │  id (i64)      │───►│  product_id    │───►│  id (i64)      │    │
//! │  │  code          │    │  name (frozen) │    │  date          │    │
//! │  │  sell_price    │    │  price(frozen) │    │  items (snap)  │    │
//! │  │  stock         │    │  qty           │    │  total (i64)   │    │
//! │  └────────────────┘    └────────────────┘    └────────────────┘    │
//! │    owned by Catalog      owned by Cart         owned by Ledger     │
//! │    mutable in place      transient             immutable           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Identity Rule
//! Cart and Sale hold *copies* of product data (name, price), never live
//! references. Editing or deleting a product after the fact can never
//! rewrite a pending cart line or a committed sale.
//!
//! ## Serialized Shape
//! All types rename to `camelCase` so the persisted blob and the
//! import/export documents keep the shape the web view already speaks
//! (`sellPrice`, `minStock`, `materialType`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product with its stock accounting fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, immutable once assigned.
    ///
    /// Assigned by the catalog from a time-derived, monotonically
    /// increasing source (milliseconds since the epoch, bumped on
    /// collision).
    pub id: i64,

    /// Human/barcode identifier. Matched case-insensitively on lookup;
    /// uniqueness is enforced (case-insensitively) at create/update time.
    pub code: String,

    /// Display name shown in the inventory, cart and receipt.
    pub name: String,

    /// Optional brand tag.
    pub brand: Option<String>,

    /// Category tag used by the inventory filter pills.
    pub material_type: Option<String>,

    /// Purchase price. Kept for reference only; no cost-of-goods math.
    pub buy_price: f64,

    /// Unit sale price. Captured into a cart line at add time.
    pub sell_price: f64,

    /// Current stock. Decremented only at sale-commit time.
    pub stock: i64,

    /// Low-stock threshold: `stock <= min_stock` flags the product.
    pub min_stock: i64,
}

impl Product {
    /// Checks whether the product is at or below its restock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    /// Checks whether the product has no sellable stock.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }

    /// Scarcity of this product relative to its own threshold.
    ///
    /// Lower is more critical; the restock alert list sorts ascending on
    /// this. A threshold of zero is treated as one to keep the ratio
    /// finite.
    pub fn restock_ratio(&self) -> f64 {
        self.stock as f64 / self.min_stock.max(1) as f64
    }
}

/// Input fields for creating or updating a product.
///
/// Everything a [`Product`] has except the id, which the catalog owns.
/// An update fully replaces the record with these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub brand: Option<String>,
    pub material_type: Option<String>,
    pub buy_price: f64,
    pub sell_price: f64,
    pub stock: i64,
    pub min_stock: i64,
}

impl ProductDraft {
    /// Materializes the draft into a product under the given id.
    pub(crate) fn into_product(self, id: i64) -> Product {
        Product {
            id,
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            brand: self
                .brand
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
            material_type: self.material_type,
            buy_price: self.buy_price,
            sell_price: self.sell_price,
            stock: self.stock,
            min_stock: self.min_stock,
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A pending sale line: one product, a quantity, and the price it was
/// added at.
///
/// ## Price Freezing
/// `price` and `name` are captured from the product at the moment of the
/// add call and never re-read. A later price edit does not reprice a
/// pending cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Id of the product this line was created from.
    pub product_id: i64,

    /// Product name at add time (frozen).
    pub name: String,

    /// Unit sale price at add time (frozen).
    pub price: f64,

    /// Quantity, always > 0. The cart holds at most one line per product;
    /// repeated adds increment this.
    pub qty: i64,
}

impl CartLine {
    /// Rounded line subtotal: `round(price × qty)`.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::line_total(self.price, self.qty)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed, immutable sale.
///
/// Membership in the ledger is append-only: there is no update or delete.
/// `items` is a deep snapshot of the cart at commit time, so later cart
/// or catalog mutation cannot retroactively alter it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique, time-derived identifier.
    pub id: i64,

    /// Completion timestamp.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    /// Frozen cart lines.
    pub items: Vec<CartLine>,

    /// Rounded sum of `price × qty` over `items`. Always recomputed from
    /// the items at commit time, never copied from display state.
    pub total: i64,
}

impl Sale {
    /// Receipt folio: the last 6 digits of the sale id.
    pub fn folio(&self) -> String {
        let digits = self.id.to_string();
        let start = digits.len().saturating_sub(6);
        digits[start..].to_string()
    }

    /// The sale total as [`Money`].
    #[inline]
    pub fn total_money(&self) -> Money {
        Money::from_pesos(self.total)
    }
}

// =============================================================================
// Company Profile
// =============================================================================

/// Business identity fields printed on receipts.
///
/// Persisted under its own storage key, separate from the sales state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    /// Colombian tax id (NIT).
    pub nit: String,
    pub address: String,
    pub phone: String,
    pub thank_you_message: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "Mi Negocio".to_string(),
            nit: "900.000.000-0".to_string(),
            address: "Calle Falsa 123".to_string(),
            phone: "555-5555".to_string(),
            thank_you_message: "¡Gracias por su compra!".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
