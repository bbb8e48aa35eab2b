//! # Dashboard Aggregator
//!
//! Pure derived-read statistics over catalog + ledger. Everything here is
//! recomputed on demand from the current state: no caches, no incremental
//! counters to fall out of sync.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::state::State;
use crate::types::{Product, Sale};
use crate::{DASHBOARD_RECENT_SALES, RESTOCK_ALERT_LIMIT};

// =============================================================================
// Summary Types
// =============================================================================

/// The headline numbers the dashboard cards show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_count: usize,
    /// Rounded revenue for the requested day, in whole pesos.
    pub revenue: i64,
}

/// The all-time best seller by cumulative units sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TopSeller {
    pub name: String,
    pub units: i64,
}

// =============================================================================
// Aggregations
// =============================================================================

/// Number of products in the catalog.
pub fn total_product_count(state: &State) -> usize {
    state.catalog.len()
}

/// Number of products at or below their restock threshold.
pub fn low_stock_count(state: &State) -> usize {
    state
        .catalog
        .products()
        .iter()
        .filter(|p| p.is_low_stock())
        .count()
}

/// Rounded sum of sale totals whose date falls on the given calendar day.
///
/// Day bucketing truncates the sale timestamp to its ISO date, the same
/// boundary the stored `date` strings imply.
pub fn revenue_for_day(state: &State, day: NaiveDate) -> Money {
    state
        .ledger
        .sales()
        .iter()
        .filter(|s| s.date.date_naive() == day)
        .map(Sale::total_money)
        .sum()
}

/// The headline card numbers for the given day.
pub fn stats(state: &State, day: NaiveDate) -> DashboardStats {
    DashboardStats {
        total_products: total_product_count(state),
        low_stock_count: low_stock_count(state),
        revenue: revenue_for_day(state, day).pesos(),
    }
}

/// Product name with the highest cumulative quantity across all recorded
/// sale items, with how many units it moved.
///
/// Ties resolve to the name first encountered while walking the ledger in
/// order — the aggregation map is insertion-ordered for exactly this.
pub fn top_seller_by_volume(state: &State) -> Option<TopSeller> {
    let mut volume: IndexMap<&str, i64> = IndexMap::new();
    for sale in state.ledger.sales() {
        for item in &sale.items {
            *volume.entry(item.name.as_str()).or_insert(0) += item.qty;
        }
    }

    volume
        .into_iter()
        .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })
        .map(|(name, units)| TopSeller {
            name: name.to_string(),
            units,
        })
}

/// The dashboard's recent-sales strip: last few sales, most recent first.
pub fn recent_sales(state: &State) -> Vec<&Sale> {
    state.ledger.recent(DASHBOARD_RECENT_SALES)
}

/// The most critical low-stock products, capped for the alert panel.
pub fn restock_alerts(state: &State) -> Vec<&Product> {
    let mut alerts = state.catalog.low_stock();
    alerts.truncate(RESTOCK_ALERT_LIMIT);
    alerts
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CartLine, ProductDraft};
    use chrono::{TimeZone, Utc};

    fn draft(code: &str, stock: i64, min_stock: i64) -> ProductDraft {
        ProductDraft {
            code: code.to_string(),
            name: format!("Producto {}", code),
            brand: None,
            material_type: None,
            buy_price: 700.0,
            sell_price: 1000.0,
            stock,
            min_stock,
        }
    }

    fn sale_on(state: &mut State, id: i64, day: (i32, u32, u32), lines: Vec<(&str, i64)>) {
        let items: Vec<CartLine> = lines
            .into_iter()
            .map(|(name, qty)| CartLine {
                product_id: 0,
                name: name.to_string(),
                price: 100.0,
                qty,
            })
            .collect();
        let total: i64 = items.iter().map(|l| l.subtotal().pesos()).sum();
        state.ledger.append(crate::types::Sale {
            id,
            date: Utc.with_ymd_and_hms(day.0, day.1, day.2, 12, 0, 0).unwrap(),
            items,
            total,
        });
    }

    #[test]
    fn test_counts() {
        let mut state = State::new();
        state.catalog.create(draft("A", 10, 2)).unwrap();
        state.catalog.create(draft("B", 1, 2)).unwrap();
        state.catalog.create(draft("C", 0, 2)).unwrap();

        assert_eq!(total_product_count(&state), 3);
        assert_eq!(low_stock_count(&state), 2);
    }

    #[test]
    fn test_revenue_for_day_buckets_by_calendar_day() {
        let mut state = State::new();
        sale_on(&mut state, 1, (2026, 8, 22), vec![("X", 3)]); // 300
        sale_on(&mut state, 2, (2026, 8, 23), vec![("X", 5)]); // 500
        sale_on(&mut state, 3, (2026, 8, 23), vec![("Y", 2)]); // 200

        let day = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        assert_eq!(revenue_for_day(&state, day).pesos(), 700);

        let empty = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert!(revenue_for_day(&state, empty).is_zero());
    }

    #[test]
    fn test_top_seller_by_volume() {
        // [{X:2}], [{Y:5}], [{X:4}] → X with 6.
        let mut state = State::new();
        sale_on(&mut state, 1, (2026, 8, 20), vec![("X", 2)]);
        sale_on(&mut state, 2, (2026, 8, 21), vec![("Y", 5)]);
        sale_on(&mut state, 3, (2026, 8, 22), vec![("X", 4)]);

        let top = top_seller_by_volume(&state).unwrap();
        assert_eq!(top.name, "X");
        assert_eq!(top.units, 6);
    }

    #[test]
    fn test_top_seller_tie_goes_to_first_encountered() {
        let mut state = State::new();
        sale_on(&mut state, 1, (2026, 8, 20), vec![("First", 3)]);
        sale_on(&mut state, 2, (2026, 8, 21), vec![("Second", 3)]);

        assert_eq!(top_seller_by_volume(&state).unwrap().name, "First");
    }

    #[test]
    fn test_top_seller_empty_ledger_is_none() {
        let state = State::new();
        assert!(top_seller_by_volume(&state).is_none());
    }

    #[test]
    fn test_recent_sales_capped_and_reversed() {
        let mut state = State::new();
        for id in 1..=5 {
            sale_on(&mut state, id, (2026, 8, 20), vec![("X", 1)]);
        }

        let ids: Vec<i64> = recent_sales(&state).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }

    #[test]
    fn test_restock_alerts_capped_at_five_most_critical() {
        let mut state = State::new();
        // Seven low-stock products with distinct criticality.
        for (i, stock) in [0, 1, 2, 3, 4, 5, 6].iter().enumerate() {
            state
                .catalog
                .create(draft(&format!("P{}", i), *stock, 10))
                .unwrap();
        }

        let alerts = restock_alerts(&state);
        assert_eq!(alerts.len(), RESTOCK_ALERT_LIMIT);
        assert_eq!(alerts[0].stock, 0); // scarcest first
        assert_eq!(alerts[4].stock, 4);
    }
}
