//! # Cart
//!
//! The transient pending sale: an ordered list of lines awaiting commit.
//!
//! ## Invariants
//! - At most one line per product id; repeated adds increment `qty`
//! - A line's qty never exceeds the product's stock *at the moment of the
//!   add or increment* (the engine re-checks nothing at commit: commit is
//!   synchronous with the last accept, see the concurrency model)
//! - Price and name are frozen at add time
//!
//! ## Accept Path
//! ```text
//!  add(product, qty)
//!       │
//!       ├── qty <= 0?            → ValidationError (qty must be positive)
//!       ├── stock <= 0?          → InsufficientStock { available: 0 }
//!       ├── in_cart + qty > stock → InsufficientStock { available }
//!       │                           (available = stock - in_cart, so the
//!       │                            caller can retry with the cap)
//!       └── OK → increment existing line, or push a new frozen line
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, Product};
use crate::validation::validate_quantity;

// =============================================================================
// Cart
// =============================================================================

/// The pending sale. Serializes transparently as a plain array, which is
/// the `cart` field of the state blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// The pending lines, in add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (unique products, not total units).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Quantity already pending for a product, 0 if absent.
    pub fn qty_for(&self, product_id: i64) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.qty)
            .unwrap_or(0)
    }

    /// Adds `qty` units of the product, merging into an existing line.
    ///
    /// Fails with [`CoreError::InsufficientStock`] if the product is out
    /// of stock or the combined quantity would exceed it; the cart is left
    /// unchanged and the error carries the maximum quantity still
    /// addable. Price and name are captured from the product now and
    /// never re-read.
    pub fn add(&mut self, product: &Product, qty: i64) -> CoreResult<()> {
        validate_quantity(qty)?;

        let in_cart = self.qty_for(product.id);
        if product.stock <= 0 || in_cart + qty > product.stock {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: (product.stock - in_cart).max(0),
                requested: qty,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.qty += qty;
        } else {
            self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                price: product.sell_price,
                qty,
            });
        }
        Ok(())
    }

    /// Removes the line at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    /// Empties the cart. Called by the engine after a successful commit,
    /// or explicitly by the user.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Grand total: each line subtotal rounded, the sum rounded again.
    ///
    /// Line subtotals are already whole pesos, so the outer rounding is
    /// the identity here; it is kept in the contract so a committed
    /// Sale.total and the displayed cart total can never drift apart.
    pub fn compute_total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Detaches the lines, leaving the cart empty. Used by the engine to
    /// snapshot the committed lines without cloning.
    pub(crate) fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64, stock: i64) -> Product {
        Product {
            id,
            code: format!("P{}", id),
            name: format!("Producto {}", id),
            brand: None,
            material_type: None,
            buy_price: price * 0.7,
            sell_price: price,
            stock,
            min_stock: 2,
        }
    }

    #[test]
    fn test_add_within_stock_succeeds() {
        let mut cart = Cart::new();
        let p = product(1, 1000.0, 5);

        cart.add(&p, 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product_id, 1);
        assert_eq!(cart.lines()[0].qty, 3);
        assert_eq!(cart.lines()[0].price, 1000.0);
    }

    #[test]
    fn test_add_beyond_stock_fails_and_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let p = product(1, 1000.0, 5);

        let err = cart.add(&p, 6).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 5);
                assert_eq!(requested, 6);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_out_of_stock_fails_regardless_of_qty() {
        let mut cart = Cart::new();
        let p = product(1, 1000.0, 0);

        for qty in [1, 5, 100] {
            let err = cart.add(&p, qty).unwrap_err();
            assert!(matches!(
                err,
                CoreError::InsufficientStock { available: 0, .. }
            ));
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut cart = Cart::new();
        let p = product(1, 1000.0, 5);

        cart.add(&p, 2).unwrap();
        cart.add(&p, 2).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].qty, 4);

        // One more unit fits, two do not.
        let err = cart.add(&p, 2).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { available: 1, .. }
        ));
        cart.add(&p, 1).unwrap();
        assert_eq!(cart.lines()[0].qty, 5);
    }

    #[test]
    fn test_add_zero_or_negative_qty_rejected() {
        let mut cart = Cart::new();
        let p = product(1, 1000.0, 5);

        assert!(cart.add(&p, 0).is_err());
        assert!(cart.add(&p, -1).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut cart = Cart::new();
        let mut p = product(1, 1000.0, 5);

        cart.add(&p, 1).unwrap();
        p.sell_price = 9999.0; // later edit must not reprice the line

        assert_eq!(cart.lines()[0].price, 1000.0);
        assert_eq!(cart.compute_total().pesos(), 1000);
    }

    #[test]
    fn test_remove_by_index_ignores_out_of_range() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000.0, 5), 1).unwrap();
        cart.add(&product(2, 500.0, 5), 1).unwrap();

        cart.remove(99); // ignored
        assert_eq!(cart.len(), 2);

        cart.remove(0);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product_id, 2);
    }

    #[test]
    fn test_compute_total_rounds_per_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 333.4, 10), 3).unwrap(); // 1000.2 → 1000
        cart.add(&product(2, 0.6, 10), 1).unwrap(); // 0.6 → 1

        assert_eq!(cart.compute_total().pesos(), 1001);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000.0, 5), 2).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.compute_total(), Money::zero());
    }
}
