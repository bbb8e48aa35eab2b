//! # Money Module
//!
//! Rounded integer COP amounts and their display formatting.
//!
//! ## The Rounding Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Prices are stored as floats (legacy data), but COP has no          │
//! │  fractional sub-unit in display, so every amount that leaves the    │
//! │  engine is a rounded integer peso count:                            │
//! │                                                                     │
//! │    line subtotal = round(price × qty)      ← rounded per line       │
//! │    sale total    = round(Σ line subtotals) ← rounded again          │
//! │                                                                     │
//! │  Both roundings are independent. A committed Sale.total is always   │
//! │  recomputed from its own items, never copied from display state.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use caja_core::money::Money;
//!
//! let subtotal = Money::line_total(1250.0, 3);
//! assert_eq!(subtotal.pesos(), 3750);
//! assert_eq!(subtotal.to_string(), "$ 3.750");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole Colombian pesos.
///
/// ## Design Decisions
/// - **i64 (signed)**: totals never go negative through normal flow, but a
///   signed carrier keeps arithmetic honest and debuggable
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Rounding at the boundary**: float prices enter through
///   [`Money::round_from`] / [`Money::line_total`] and stay integers after
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole pesos.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos)
    }

    /// Rounds a float amount to the nearest whole peso.
    ///
    /// Half-way cases round away from zero, which matches the rounding the
    /// legacy data was produced with for non-negative amounts.
    #[inline]
    pub fn round_from(amount: f64) -> Self {
        Money(amount.round() as i64)
    }

    /// Computes a rounded line subtotal: `round(price × qty)`.
    #[inline]
    pub fn line_total(price: f64, qty: i64) -> Self {
        Money::round_from(price * qty as f64)
    }

    /// Returns the amount in whole pesos.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0
    }

    /// Zero pesos.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the es-CO currency style: `$ 1.234.567`.
///
/// COP shows no fractional digits; thousands groups are dot-separated.
/// This is the Money/Format utility the dashboard and receipts use.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}$ {}", sign, group_thousands(self.0.unsigned_abs()))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Formats an unsigned number with dot-separated thousands groups.
fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut groups = Vec::new();
    while value > 0 {
        groups.push((value % 1000) as u16);
        value /= 1000;
    }

    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(group) = groups.pop() {
        out.push('.');
        out.push_str(&format!("{:03}", group));
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
