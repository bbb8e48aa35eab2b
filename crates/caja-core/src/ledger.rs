//! # Sale Ledger
//!
//! Append-only history of completed sales. Sales arrive fully formed from
//! the engine and are never updated or deleted.

use serde::{Deserialize, Serialize};

use crate::types::Sale;

/// The ordered sale history. Serializes transparently as a plain array,
/// which is the `sales` field of the state blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    sales: Vec<Sale>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// All sales, oldest first.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Number of recorded sales.
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    /// Checks if no sales have been recorded.
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Appends a completed sale. No further validation: the engine is the
    /// only producer and hands over fully formed snapshots.
    pub fn append(&mut self, sale: Sale) {
        self.sales.push(sale);
    }

    /// Looks a sale up by id, for receipt re-display.
    pub fn find_by_id(&self, id: i64) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// The last `n` sales, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&Sale> {
        self.sales.iter().rev().take(n).collect()
    }

    /// Id of the most recent sale, if any. The engine uses this to keep
    /// time-derived sale ids strictly increasing.
    pub(crate) fn last_id(&self) -> Option<i64> {
        self.sales.last().map(|s| s.id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
