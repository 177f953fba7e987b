//! # Invoice Repository
//!
//! Invoice creation and lookup. Creation is the only operation that writes
//! two documents as one logical step.
//!
//! ## Invoice Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Creating an Invoice                                  │
//! │                                                                         │
//! │  write_lock()                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load clients.json + inventory.json                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  prepare_invoice() (stockroom-core)                                    │
//! │  ├── client lookup         ─┐                                           │
//! │  ├── catalog lookup         ├─ any failure: return, nothing written    │
//! │  ├── stock pre-validation  ─┘                                           │
//! │  └── decrement stock in memory + build Invoice                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  save inventory.json ──► append + save invoices.json                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unlock, return Invoice                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Holding the lock across the whole cycle means two concurrent orders for
//! the same product can never both pass the stock check against the same
//! stock level.

use chrono::Utc;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::store::{AccountMap, Collection, Store};
use stockroom_core::{prepare_invoice, Client, CoreError, Invoice, Order, Product};

/// Repository for invoices.
///
/// ## Usage
/// ```rust,ignore
/// let order = Order::from_input(body)?;
/// let invoice = store.invoices().create(&account_id, &order).await?;
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    store: Store,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(store: Store) -> Self {
        InvoiceRepository { store }
    }

    /// Lists an account's invoices in creation order.
    pub async fn list(&self, account_id: &str) -> Vec<Invoice> {
        let mut invoices: AccountMap<Invoice> = self.store.load(Collection::Invoices).await;
        invoices.remove(account_id).unwrap_or_default()
    }

    /// Gets a single invoice.
    pub async fn get(&self, account_id: &str, invoice_id: &str) -> StoreResult<Invoice> {
        self.list(account_id)
            .await
            .into_iter()
            .find(|i| i.id == invoice_id)
            .ok_or_else(|| CoreError::InvoiceNotFound(invoice_id.to_string()).into())
    }

    /// Creates an invoice and decrements stock for every line.
    ///
    /// ## Returns
    /// * `Ok(Invoice)` - Stock decremented and invoice appended
    /// * `Err(StoreError::Core(..))` - Unknown client/product or insufficient
    ///   stock; no document was written
    pub async fn create(&self, account_id: &str, order: &Order) -> StoreResult<Invoice> {
        let _guard = self.store.write_lock().await;

        let clients: AccountMap<Client> = self.store.load(Collection::Clients).await;
        let mut inventory: AccountMap<Product> = self.store.load(Collection::Inventory).await;

        let invoice = prepare_invoice(
            account_id,
            clients.get(account_id).map(Vec::as_slice),
            inventory.get_mut(account_id),
            order,
            Utc::now(),
        )?;

        self.store.save(Collection::Inventory, &inventory).await?;
        debug!(account_id = %account_id, lines = order.lines.len(), "Stock decremented");

        let mut invoices: AccountMap<Invoice> = self.store.load(Collection::Invoices).await;
        invoices
            .entry(account_id.to_string())
            .or_default()
            .push(invoice.clone());
        self.store.save(Collection::Invoices, &invoices).await?;

        info!(
            account_id = %account_id,
            invoice_number = %invoice.invoice_number,
            total = invoice.total,
            "Invoice created"
        );
        Ok(invoice)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
