//! # Store Error Types
//!
//! ## Design Principles
//! Same rules as caja-core: `thiserror` enums, context in messages, no
//! condition fatal. A persistence failure is surfaced, never swallowed —
//! but it also never rolls back the in-memory state that produced it.

use thiserror::Error;

use caja_core::CoreError;

// =============================================================================
// Store Error
// =============================================================================

/// Failures at the storage boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be read or written (missing directory,
    /// quota exceeded, permissions, ...).
    #[error("Storage failure: {0}")]
    Persistence(#[from] std::io::Error),

    /// A stored blob exists but does not deserialize.
    #[error("Stored data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// An import document is structurally invalid. State is untouched.
    #[error("Invalid import document: {reason}")]
    ImportStructure { reason: String },
}

// =============================================================================
// Service Error
// =============================================================================

/// Everything a PosService operation can report: a business rule
/// violation from caja-core or a storage failure from this crate.
///
/// This is the error type the view layer sees.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Whether this is the empty-cart signal: an informational no-op the
    /// view layer reports as a hint, not as a failure.
    pub fn is_empty_cart(&self) -> bool {
        matches!(self, ServiceError::Core(CoreError::EmptyCart))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
