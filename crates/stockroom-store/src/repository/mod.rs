//! # Repository Module
//!
//! Document-backed repositories for Stockroom.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  store.products().create(&account_id, fields)                  │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self, account_id)                                           │
//! │  ├── get(&self, account_id, id)                                        │
//! │  ├── create(&self, account_id, fields)                                 │
//! │  ├── update(&self, account_id, id, fields)                             │
//! │  └── delete(&self, account_id, id)                                     │
//! │       │                                                                 │
//! │       │  load / save whole document                                    │
//! │       ▼                                                                 │
//! │  Store (data_dir/*.json)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`account::AccountRepository`] - Registration and credential checks
//! - [`product::ProductRepository`] - Product catalog CRUD
//! - [`client::ClientRepository`] - Client directory CRUD
//! - [`invoice::InvoiceRepository`] - Invoice creation and lookup

pub mod account;
pub mod client;
pub mod invoice;
pub mod product;
