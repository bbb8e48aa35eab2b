//! # Transaction Engine — Sale Commit Protocol
//!
//! Converts the pending cart into a committed sale. This is the one place
//! where stock is decremented, so the protocol is spelled out in full:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       commit_sale(&mut State)                       │
//! │                                                                     │
//! │  1. cart empty?            → EmptyCart (informational no-op)        │
//! │  2. total = cart total     (recomputed, never copied from display)  │
//! │  3. build Sale             fresh time-derived id, now(), deep       │
//! │                            snapshot of the cart lines               │
//! │  4. decrement stock        one pass over the snapshot; a product    │
//! │                            deleted while in cart is skipped and     │
//! │                            reported in the outcome                  │
//! │  5. ledger.append(sale)                                             │
//! │  6. cart.clear()           (implicit: the snapshot detaches lines)  │
//! │  7. caller persists        (caja-store saves after every mutation)  │
//! │  8. return the Sale        for receipt rendering                    │
//! │                                                                     │
//! │  Single-threaded, run-to-completion: no other core operation can    │
//! │  observe a partial application of steps 3–6.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Invariant
//! `Product.stock` is decremented here and only here — exactly once per
//! sale, by exactly the committed quantities. The cart's accept path
//! already guaranteed each line's qty fit the stock at add time.

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::state::State;
use crate::types::Sale;

// =============================================================================
// Commit Outcome
// =============================================================================

/// What a successful commit produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitOutcome {
    /// The immutable sale snapshot, ready for receipt rendering.
    pub sale: Sale,

    /// Ids of cart lines whose product no longer existed at commit time.
    ///
    /// Their stock cannot be decremented (the product is gone), but the
    /// sale still records the line as sold at its frozen price. Empty in
    /// normal operation; the service layer logs these as a data-integrity
    /// warning.
    pub missing_products: Vec<i64>,
}

// =============================================================================
// Commit Protocol
// =============================================================================

/// Commits the pending cart as a sale.
///
/// Returns [`CoreError::EmptyCart`] (a no-op signal, nothing mutated) if
/// there is nothing to commit. On success the cart is empty, the ledger
/// is one sale longer, and every surviving product's stock has dropped by
/// its committed quantity.
pub fn commit_sale(state: &mut State) -> CoreResult<CommitOutcome> {
    // 1. Precondition: something to sell.
    if state.cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    // 2. Total from the cart's own lines.
    let total = state.cart.compute_total();

    // 3. Snapshot: detaching the lines freezes them and empties the cart
    //    in one move (steps 3 and 6 of the protocol).
    let items = state.cart.take_lines();
    let sale = Sale {
        id: next_sale_id(state),
        date: Utc::now(),
        items,
        total: total.pesos(),
    };

    // 4. Decrement stock, once per line. A product deleted after it was
    //    added to the cart is skipped: there is no stock left to account
    //    for, but the sale keeps the line.
    let mut missing_products = Vec::new();
    for line in &sale.items {
        match state.catalog.product_mut(line.product_id) {
            Some(product) => product.stock -= line.qty,
            None => missing_products.push(line.product_id),
        }
    }

    // 5. Append to the ledger.
    state.ledger.append(sale.clone());

    // 8. Emit the snapshot for the receipt.
    Ok(CommitOutcome {
        sale,
        missing_products,
    })
}

/// Fresh sale id: epoch milliseconds, bumped past the last recorded sale
/// so two commits in the same millisecond stay unique and ordered.
fn next_sale_id(state: &State) -> i64 {
    let now = Utc::now().timestamp_millis();
    match state.ledger.last_id() {
        Some(last) => now.max(last + 1),
        None => now,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductDraft;

    fn draft(code: &str, price: f64, stock: i64) -> ProductDraft {
        ProductDraft {
            code: code.to_string(),
            name: format!("Producto {}", code),
            brand: None,
            material_type: None,
            buy_price: price * 0.7,
            sell_price: price,
            stock,
            min_stock: 2,
        }
    }

    #[test]
    fn test_commit_empty_cart_is_a_no_op_signal() {
        let mut state = State::new();
        state.catalog.create(draft("A1", 1000.0, 5)).unwrap();

        let err = commit_sale(&mut state).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));

        // Nothing mutated: catalog intact, ledger still empty.
        assert_eq!(state.catalog.len(), 1);
        assert!(state.ledger.is_empty());
        assert_eq!(state.catalog.products()[0].stock, 5);
    }

    #[test]
    fn test_commit_decrements_stock_appends_and_clears() {
        let mut state = State::new();
        let a = state.catalog.create(draft("A1", 1000.0, 5)).unwrap();
        let b = state.catalog.create(draft("B2", 333.4, 10)).unwrap();

        state.cart.add(&a, 3).unwrap();
        state.cart.add(&b, 3).unwrap();

        let outcome = commit_sale(&mut state).unwrap();

        // Total = round(1000×3) + round(333.4×3) = 3000 + 1000.
        assert_eq!(outcome.sale.total, 4000);
        assert_eq!(outcome.sale.items.len(), 2);
        assert!(outcome.missing_products.is_empty());

        // Stock dropped by exactly the committed quantities.
        assert_eq!(state.catalog.find_by_id(a.id).unwrap().stock, 2);
        assert_eq!(state.catalog.find_by_id(b.id).unwrap().stock, 7);

        // Cart cleared, ledger grew by exactly one.
        assert!(state.cart.is_empty());
        assert_eq!(state.ledger.len(), 1);
        assert_eq!(state.ledger.sales()[0], outcome.sale);
    }

    #[test]
    fn test_commit_scenario_from_the_counter() {
        // Product{code:"A1", sellPrice:1000, stock:5, minStock:2}, add 3.
        let mut state = State::new();
        let p = state.catalog.create(draft("A1", 1000.0, 5)).unwrap();
        state.cart.add(&p, 3).unwrap();

        let outcome = commit_sale(&mut state).unwrap();

        assert_eq!(outcome.sale.total, 3000);
        let after = state.catalog.find_by_id(p.id).unwrap();
        assert_eq!(after.stock, 2);
        // 2 <= 2: the product now shows up in the low-stock list.
        assert!(state.catalog.low_stock().iter().any(|lp| lp.id == p.id));
    }

    #[test]
    fn test_commit_skips_and_reports_deleted_product() {
        let mut state = State::new();
        let kept = state.catalog.create(draft("K1", 500.0, 5)).unwrap();
        let doomed = state.catalog.create(draft("D1", 1000.0, 5)).unwrap();

        state.cart.add(&kept, 1).unwrap();
        state.cart.add(&doomed, 2).unwrap();
        state.catalog.delete(doomed.id);

        let outcome = commit_sale(&mut state).unwrap();

        // The sale still records both lines at their frozen prices.
        assert_eq!(outcome.sale.items.len(), 2);
        assert_eq!(outcome.sale.total, 2500);

        // The gap is reported, and the surviving product was decremented.
        assert_eq!(outcome.missing_products, vec![doomed.id]);
        assert_eq!(state.catalog.find_by_id(kept.id).unwrap().stock, 4);
    }

    #[test]
    fn test_sale_total_recomputed_from_items() {
        let mut state = State::new();
        let p = state.catalog.create(draft("A1", 333.4, 10)).unwrap();
        state.cart.add(&p, 3).unwrap();

        let expected = state.cart.compute_total().pesos();
        let outcome = commit_sale(&mut state).unwrap();

        let from_items: i64 = outcome
            .sale
            .items
            .iter()
            .map(|l| l.subtotal().pesos())
            .sum();
        assert_eq!(outcome.sale.total, from_items);
        assert_eq!(outcome.sale.total, expected);
    }

    #[test]
    fn test_sale_ids_strictly_increase() {
        let mut state = State::new();
        let p = state.catalog.create(draft("A1", 1000.0, 100)).unwrap();

        let mut last = 0;
        for _ in 0..3 {
            state.cart.add(&p, 1).unwrap();
            let outcome = commit_sale(&mut state).unwrap();
            assert!(outcome.sale.id > last);
            last = outcome.sale.id;
        }
    }

    #[test]
    fn test_committed_sale_is_decoupled_from_later_mutation() {
        let mut state = State::new();
        let p = state.catalog.create(draft("A1", 1000.0, 5)).unwrap();
        state.cart.add(&p, 1).unwrap();

        let outcome = commit_sale(&mut state).unwrap();

        // Mutate the product afterwards; the snapshot must not move.
        state
            .catalog
            .update(p.id, draft("A1", 9999.0, 50))
            .unwrap();
        let recorded = state.ledger.find_by_id(outcome.sale.id).unwrap();
        assert_eq!(recorded.items[0].price, 1000.0);
        assert_eq!(recorded.total, 1000);
    }
}
