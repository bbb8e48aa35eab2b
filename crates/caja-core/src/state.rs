//! # Global State
//!
//! The single aggregate the whole system mutates: catalog + ledger + cart.
//!
//! ## Lifecycle
//! ```text
//!  startup ── gateway.load() ──► State (or State::new() if absent,
//!      │                               persisted immediately)
//!      ▼
//!  core operations mutate it ──► gateway.save() after every mutation
//!      │
//!      ▼
//!  reset / import ──► wholesale replacement, never a merge
//! ```
//!
//! There is exactly one instance per process, owned by the service shell.
//! The view layer never touches these fields; it goes through the
//! documented operations so the stock-accounting invariants hold.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::ledger::Ledger;

/// The whole persisted data set.
///
/// Serializes to the `{ "products": [...], "sales": [...], "cart": [...] }`
/// document the export/import interface speaks. `cart` is defaulted on
/// deserialize so older backups without a pending cart still import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(rename = "products")]
    pub catalog: Catalog,

    #[serde(rename = "sales")]
    pub ledger: Ledger,

    #[serde(default)]
    pub cart: Cart,
}

impl State {
    /// A clean, empty state: no products, no sales, empty cart.
    pub fn new() -> Self {
        State::default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
