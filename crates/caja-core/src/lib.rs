//! # caja-core: Pure Business Logic for Caja POS
//!
//! This crate is the **heart** of Caja POS. It contains the sales
//! transaction and inventory-consistency engine with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Caja POS Architecture                        │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  View Layer (web UI, external)              │   │
//! │  │    Inventory UI ──► POS/Cart UI ──► Receipt ──► Dashboard   │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                    │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │                caja-store :: PosService                     │   │
//! │  │     operation dispatch + save-after-every-mutation          │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                    │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              ★ caja-core (THIS CRATE) ★                     │   │
//! │  │                                                             │   │
//! │  │  ┌─────────┐ ┌──────┐ ┌────────┐ ┌────────┐ ┌───────────┐  │   │
//! │  │  │ catalog │ │ cart │ │ engine │ │ ledger │ │ dashboard │  │   │
//! │  │  └─────────┘ └──────┘ └────────┘ └────────┘ └───────────┘  │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO STORAGE • NO RENDERING • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, Sale, CompanyProfile)
//! - [`money`] - Rounded integer COP amounts and es-CO display formatting
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//! - [`catalog`] - The managed product collection
//! - [`cart`] - The transient pending sale
//! - [`ledger`] - Append-only sale history
//! - [`engine`] - The cart → sale commit protocol
//! - [`state`] - The aggregate State blob
//! - [`dashboard`] - Derived read-only statistics
//! - [`receipt`] - Receipt data contract for the view layer
//!
//! ## Design Principles
//!
//! 1. **Single owner**: `State` is mutated only through the documented
//!    operations; the view layer never touches fields directly
//! 2. **Snapshots over references**: Cart and Sale hold frozen copies of
//!    product data, never live references
//! 3. **Recomputed totals**: a Sale total is always recomputed from its
//!    own items, never copied from display state
//! 4. **Explicit errors**: all failures are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod money;
pub mod receipt;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use caja_core::Product` instead of
// `use caja_core::types::Product`.

pub use cart::Cart;
pub use catalog::Catalog;
pub use engine::{commit_sale, CommitOutcome};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::Ledger;
pub use money::Money;
pub use receipt::{Receipt, ReceiptLine};
pub use state::State;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// How many low-stock products the dashboard surfaces as restock alerts.
///
/// ## Business Reason
/// The alert panel shows only the most critical items; everything else
/// is reachable through the full inventory view.
pub const RESTOCK_ALERT_LIMIT: usize = 5;

/// How many completed sales the dashboard shows as "recent".
pub const DASHBOARD_RECENT_SALES: usize = 3;

/// How many completed sales the POS history panel shows.
pub const HISTORY_RECENT_SALES: usize = 5;
