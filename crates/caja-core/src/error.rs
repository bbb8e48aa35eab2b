//! # Error Types
//!
//! Domain-specific error types for caja-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  caja-core errors (this file)                                       │
//! │  ├── CoreError        - business rule violations                    │
//! │  └── ValidationError  - input validation failures                   │
//! │                                                                     │
//! │  caja-store errors (separate crate)                                 │
//! │  ├── StoreError       - blob store / import document failures       │
//! │  └── ServiceError     - Core ∪ Store, what the view layer sees      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, available stock, ...)
//! 3. Errors are enum variants, never String
//! 4. No condition is fatal: every path returns control to the caller

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant is recovered locally and leaves state unmutated; the
/// caller gets a clear signal instead of a crash.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id or code does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Sale id does not exist in the ledger.
    #[error("Sale not found: {0}")]
    SaleNotFound(i64),

    /// Another product already uses this code (case-insensitive).
    #[error("Product code '{code}' already exists")]
    DuplicateCode { code: String },

    /// Cart add/increment would exceed available stock.
    ///
    /// `available` is the maximum quantity the caller could still add
    /// (stock minus what the cart already holds), so the UI can offer a
    /// retry with the cap.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Commit attempted with no cart lines.
    ///
    /// Informational no-op, not a hard failure: nothing was mutated and
    /// the UI just tells the cashier the cart is empty.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Reported before any business logic runs; the message always names the
/// offending field.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field is negative where it must not be.
    #[error("{field} must be non-negative")]
    MustBeNonNegative { field: String },

    /// A numeric field is not a finite number (NaN or infinite).
    #[error("{field} is not a valid number")]
    NotANumber { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Quantity must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
