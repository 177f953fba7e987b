//! # Document Store
//!
//! Opening, loading and saving the JSON documents.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Document Store                                  │
//! │                                                                         │
//! │  Server Startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(data_dir) ← Where the documents live                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::open(config).await ← Create dir + missing documents            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │  data_dir/                               │                           │
//! │  │  ├── users.json       [Account]          │                           │
//! │  │  ├── inventory.json   { accountId: [Product] }                      │
//! │  │  ├── clients.json     { accountId: [Client] }                       │
//! │  │  └── invoices.json    { accountId: [Invoice] }                      │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ Every mutation:                                                 │
//! │       ▼                                                                 │
//! │  write_lock() ──► load ──► modify ──► save (tmp + rename) ──► unlock   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//! Each document is shared by every account, so one lock serializes all
//! read-modify-write cycles. Readers take no lock: a save replaces the file
//! with a rename, so a reader sees either the old or the new document.
//!
//! ## Damaged Documents
//! A document that is missing or fails to parse loads as empty and a warning
//! is logged. The next save for that document overwrites it.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::repository::account::AccountRepository;
use crate::repository::client::ClientRepository;
use crate::repository::invoice::InvoiceRepository;
use crate::repository::product::ProductRepository;

/// Per-account collections inside a shared document, keyed by account id.
pub type AccountMap<T> = BTreeMap<String, Vec<T>>;

// =============================================================================
// Configuration
// =============================================================================

/// Document store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the four documents.
    pub data_dir: PathBuf,

    /// Pretty-print documents on save.
    pub pretty: bool,
}

impl StoreConfig {
    /// Creates a configuration for the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            pretty: true,
        }
    }

    /// Sets whether documents are pretty-printed.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

// =============================================================================
// Collections
// =============================================================================

/// The persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// `users.json`: a flat list of accounts.
    Accounts,
    /// `inventory.json`: products per account.
    Inventory,
    /// `clients.json`: clients per account.
    Clients,
    /// `invoices.json`: invoices per account.
    Invoices,
}

impl Collection {
    /// Every document, in initialisation order.
    pub const ALL: [Collection; 4] = [
        Collection::Accounts,
        Collection::Inventory,
        Collection::Clients,
        Collection::Invoices,
    ];

    /// File name inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Accounts => "users.json",
            Collection::Inventory => "inventory.json",
            Collection::Clients => "clients.json",
            Collection::Invoices => "invoices.json",
        }
    }

    /// Contents written on first run.
    fn empty_document(&self) -> &'static str {
        match self {
            Collection::Accounts => "[]",
            _ => "{}",
        }
    }
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug)]
struct StoreInner {
    config: StoreConfig,
    write_lock: Mutex<()>,
}

/// Handle to the document store. Cheap to clone.
///
/// ## Usage
/// ```rust,ignore
/// let store = Store::open(StoreConfig::new("./data")).await?;
/// let products = store.products().list(&account_id).await;
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Opens the store, creating the data directory and any missing
    /// document.
    ///
    /// Existing documents are left untouched, even if damaged.
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(path = %config.data_dir.display(), "Opening document store");

        tokio::fs::create_dir_all(&config.data_dir).await?;

        for collection in Collection::ALL {
            let path = config.data_dir.join(collection.file_name());
            if tokio::fs::try_exists(&path).await? {
                continue;
            }
            tokio::fs::write(&path, collection.empty_document()).await?;
            info!(file = collection.file_name(), "Initialised empty document");
        }

        Ok(Store {
            inner: Arc::new(StoreInner {
                config,
                write_lock: Mutex::new(()),
            }),
        })
    }

    /// Directory holding the documents.
    pub fn data_dir(&self) -> &Path {
        &self.inner.config.data_dir
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir().join(collection.file_name())
    }

    /// Acquires the single-writer lock.
    ///
    /// Hold the guard across the whole load/modify/save cycle.
    pub async fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.inner.write_lock.lock().await
    }

    /// Loads a document.
    ///
    /// Missing or unparseable documents load as `T::default()`.
    pub async fn load<T>(&self, collection: Collection) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(collection);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = collection.file_name(), "Document missing, using empty");
                return T::default();
            }
            Err(e) => {
                warn!(file = collection.file_name(), error = %e, "Failed to read document, using empty");
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                warn!(file = collection.file_name(), error = %e, "Failed to parse document, using empty");
                T::default()
            }
        }
    }

    /// Saves a document atomically (write temp file, then rename over).
    pub async fn save<T>(&self, collection: Collection, value: &T) -> StoreResult<()>
    where
        T: Serialize,
    {
        let bytes = if self.inner.config.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };

        let path = self.path(collection);
        let tmp = self
            .data_dir()
            .join(format!(".{}.{}.tmp", collection.file_name(), Uuid::new_v4()));

        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        debug!(file = collection.file_name(), bytes = bytes.len(), "Document saved");
        Ok(())
    }

    /// Returns the account repository.
    pub fn accounts(&self) -> AccountRepository {
        AccountRepository::new(self.clone())
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    /// Returns the client repository.
    pub fn clients(&self) -> ClientRepository {
        ClientRepository::new(self.clone())
    }

    /// Returns the invoice repository.
    pub fn invoices(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.clone())
    }

    /// Checks that the data directory is still reachable.
    pub async fn health_check(&self) -> bool {
        tokio::fs::metadata(self.data_dir())
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
