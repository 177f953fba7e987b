//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate holds the domain types and every rule that does not need I/O:
//! input coercion, the invoice-creation transaction and the sales reports.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /api/register  /api/inventory  /api/invoices  /api/reports   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockroom-store (JSON documents)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ invoicing │  │ reporting │  │ validation│  │   │
//! │  │   │  Product  │  │  Order    │  │ SaleRecord│  │  coercion │  │   │
//! │  │   │  Invoice  │  │  stock    │  │  Summary  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Account, Product, Client, Invoice, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Input coercion and field rules
//! - [`invoicing`] - All-or-nothing invoice creation over a catalog
//! - [`reporting`] - Sales report and per-product summary
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::validation::parse_quantity;
//! use stockroom_core::NumericInput;
//!
//! // Numeric strings are coerced, garbage is rejected
//! assert_eq!(parse_quantity(&NumericInput::Text("12".into())).unwrap(), 12);
//! assert!(parse_quantity(&NumericInput::Text("twelve".into())).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoicing;
pub mod reporting;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use invoicing::{prepare_invoice, Order, OrderLine};
pub use reporting::{sales_report, sales_summary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product or client name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Prefix of the human-readable invoice number (`INV-<unix millis>`).
pub const INVOICE_NUMBER_PREFIX: &str = "INV";
