//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule failures (not found, stock)      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-store errors (separate crate)                               │
//! │  └── StoreError       - Document store failures                        │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP clients see ({ "error": ... })       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The account has no collection of the given kind.
    ///
    /// ## When This Occurs
    /// - Account id was never registered
    /// - The account's entry was removed from the document by hand
    #[error("{collection} not found for account {account_id}")]
    CollectionNotFound {
        collection: String,
        account_id: String,
    },

    /// Client id does not resolve inside the account's directory.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Product id does not resolve inside the account's catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invoice id does not resolve inside the account's invoices.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// Insufficient stock to complete an invoice.
    ///
    /// ## User Workflow
    /// ```text
    /// POST /api/invoices/:userId  { items: [{ productId: A, quantity: 5 }] }
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Widget", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// 400 { "error": "Insufficient stock for Widget: available 3, requested 5" }
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a CollectionNotFound error.
    pub fn collection_not_found(collection: impl Into<String>, account_id: impl Into<String>) -> Self {
        CoreError::CollectionNotFound {
            collection: collection.into(),
            account_id: account_id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// They are raised before any document is touched.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value could not be read as a number.
    #[error("{field} must be a valid number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Value must be a whole number.
    #[error("{field} must be a whole number")]
    NotAnInteger { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// An order was submitted without any line items.
    #[error("items must contain at least one line")]
    EmptyOrder,
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
