//! # stockroom-store: Document Store for Stockroom
//!
//! Persists accounts, catalogs, client directories and invoices as four
//! JSON documents in a data directory.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/invoices/:userId)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockroom-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐                       │   │
//! │  │   │    Store      │    │  Repositories │                       │   │
//! │  │   │  (store.rs)   │    │               │                       │   │
//! │  │   │               │    │ AccountRepo   │                       │   │
//! │  │   │ load / save   │◄───│ ProductRepo   │                       │   │
//! │  │   │ write_lock    │    │ ClientRepo    │                       │   │
//! │  │   │               │    │ InvoiceRepo   │                       │   │
//! │  │   └───────────────┘    └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data_dir/{users,inventory,clients,invoices}.json                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Document load/save and the single-writer lock
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("./data")).await?;
//! let account = store.accounts().register("ana", "secret").await?;
//! let products = store.products().list(&account.id).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{AccountMap, Collection, Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::account::{hash_password, verify_password, AccountRepository};
pub use repository::client::ClientRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::product::ProductRepository;
