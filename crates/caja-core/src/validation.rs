//! # Validation Module
//!
//! Field validation for catalog input.
//!
//! All validators run *before* any state mutation: a create or update that
//! fails validation leaves the catalog exactly as it was. Error messages
//! name the offending field using its serialized (camelCase) spelling so
//! the view layer can highlight the matching input.

use crate::error::ValidationError;
use crate::types::ProductDraft;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code (human/barcode identifier).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 64 characters
///
/// Uniqueness against the rest of the catalog is checked separately by
/// [`crate::catalog::Catalog`], which owns the full product set.
pub fn validate_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 64,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price field: finite and non-negative. Zero is allowed
/// (giveaway items exist).
pub fn validate_price(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock count: must be >= 0.
pub fn validate_stock(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a cart quantity: must be strictly positive.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Draft Validator
// =============================================================================

/// Validates a full product draft for create/update.
///
/// Checks run in field order and report the first failure, naming the
/// field, so the caller can surface one actionable message at a time.
pub fn validate_draft(draft: &ProductDraft) -> ValidationResult<()> {
    validate_code(&draft.code)?;
    validate_name(&draft.name)?;
    validate_price("buyPrice", draft.buy_price)?;
    validate_price("sellPrice", draft.sell_price)?;
    validate_stock("stock", draft.stock)?;
    validate_stock("minStock", draft.min_stock)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
