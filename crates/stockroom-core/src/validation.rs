//! # Validation Module
//!
//! Input validation utilities for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (out of scope)                                  │
//! │  ├── Numeric keyboard, basic format hints                              │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Quantity text parsed as a non-negative integer                    │
//! │  └── New-item payload checks before insertion                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage collaborator                                         │
//! │  └── Rejects updates for unknown ids                                   │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::types::NewItem;
use crate::MAX_ITEM_NAME_LEN;

// =============================================================================
// Quantity Parsing
// =============================================================================

/// Parses a sale quantity from the raw text the user typed.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must parse as an integer
/// - Must not be negative (zero is a valid, if pointless, sale)
///
/// A failure is a recoverable [`CoreError::InvalidQuantity`] carrying the
/// offending input, so the caller can re-prompt.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("4").unwrap(), 4);
/// assert_eq!(parse_quantity(" 0 ").unwrap(), 0);
/// assert!(parse_quantity("abc").is_err());
/// assert!(parse_quantity("-3").is_err());
/// ```
pub fn parse_quantity(input: &str) -> CoreResult<i64> {
    let parsed = input.trim().parse::<i64>().map_err(|_| CoreError::InvalidQuantity {
        input: input.to_string(),
    })?;

    if parsed < 0 {
        return Err(CoreError::InvalidQuantity {
            input: input.to_string(),
        });
    }

    Ok(parsed)
}

// =============================================================================
// New-Item Validation
// =============================================================================

/// Validates an item payload before it is handed to the store for insertion.
///
/// ## Rules
/// - Name must not be empty (after trimming) and must fit on a receipt row
/// - Stock quantity must not be negative
/// - Price must not be negative
pub fn validate_new_item(item: &NewItem) -> ValidationResult<()> {
    let name = item.name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    if item.quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    if item.price_cents < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
