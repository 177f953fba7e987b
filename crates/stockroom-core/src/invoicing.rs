//! # Invoicing Engine
//!
//! Turns an order into an invoice while decrementing stock, all or nothing.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    prepare_invoice(clients, catalog, order)             │
//! │                                                                         │
//! │  1. Order::from_input   clientId + non-empty items    → ValidationError │
//! │  2. resolve client      directory exists, id found    → NotFound        │
//! │  3. catalog exists                                    → NotFound        │
//! │  4. PRE-VALIDATION      every line: product exists,   → NotFound /      │
//! │     (read only)         stock ≥ cumulative demand       InsufficientStock│
//! │  ─────────────────────  nothing mutated above this line ─────────────── │
//! │  5. COMMIT              stock -= qty, line total = qty × stored price   │
//! │  6. build Invoice       client snapshot, items, subtotal = total        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog passed in is the caller's in-memory copy of the document.
//! On error it is untouched, so the caller simply skips the write. On success
//! the caller persists the catalog first, then appends the returned invoice.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{generate_id, Client, Invoice, InvoiceItem, OrderInput, Product};
use crate::validation::{parse_quantity, required_text, ValidationResult};
use crate::INVOICE_NUMBER_PREFIX;

// =============================================================================
// Order
// =============================================================================

/// One validated order line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: i64,
}

/// A validated invoice request.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub client_id: String,
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Validates the raw request body.
    ///
    /// ## Rules
    /// - `clientId` must be present
    /// - `items` must be a non-empty sequence
    /// - every line needs a `productId` and a positive whole `quantity`
    pub fn from_input(input: OrderInput) -> ValidationResult<Order> {
        let client_id = required_text("clientId", input.client_id)?;

        let items = input.items.unwrap_or_default();
        if items.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }

        let lines = items
            .into_iter()
            .map(|line| {
                let product_id = required_text("productId", line.product_id)?;
                let quantity = line
                    .quantity
                    .as_ref()
                    .ok_or_else(|| ValidationError::required("quantity"))
                    .and_then(parse_quantity)?;

                if quantity <= 0 {
                    return Err(ValidationError::MustBePositive {
                        field: "quantity".to_string(),
                    });
                }

                Ok(OrderLine {
                    product_id,
                    quantity,
                })
            })
            .collect::<ValidationResult<Vec<_>>>()?;

        Ok(Order { client_id, lines })
    }
}

// =============================================================================
// Invoice Preparation
// =============================================================================

/// Validates `order` against the account's clients and catalog, decrements
/// stock in `catalog` and returns the new invoice.
///
/// ## Arguments
/// * `account_id` - Owner of the collections (for error messages)
/// * `clients` - The account's client directory, `None` if it has none
/// * `catalog` - The account's catalog, `None` if it has none
/// * `order` - Validated request
/// * `now` - Creation time, also the source of the invoice number
///
/// ## Failure Semantics
/// The first failing line in input order is reported. Repeated product ids
/// are checked against their cumulative demand.
pub fn prepare_invoice(
    account_id: &str,
    clients: Option<&[Client]>,
    catalog: Option<&mut Vec<Product>>,
    order: &Order,
    now: DateTime<Utc>,
) -> CoreResult<Invoice> {
    let clients = clients.ok_or_else(|| CoreError::collection_not_found("Clients", account_id))?;
    let client = clients
        .iter()
        .find(|c| c.id == order.client_id)
        .ok_or_else(|| CoreError::ClientNotFound(order.client_id.clone()))?;

    let catalog = catalog.ok_or_else(|| CoreError::collection_not_found("Inventory", account_id))?;

    let positions = check_stock(catalog, &order.lines)?;
    let (items, total) = commit_lines(catalog, &order.lines, &positions);

    Ok(Invoice {
        id: generate_id(),
        invoice_number: invoice_number(now),
        client: client.snapshot(),
        items,
        subtotal: total,
        total,
        created_at: now,
    })
}

/// Pre-validation pass. Read only.
///
/// Returns the catalog position of every line's product.
fn check_stock(catalog: &[Product], lines: &[OrderLine]) -> CoreResult<Vec<usize>> {
    let mut demand: HashMap<&str, i64> = HashMap::new();
    let mut positions = Vec::with_capacity(lines.len());

    for line in lines {
        let position = catalog
            .iter()
            .position(|p| p.id == line.product_id)
            .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;
        let product = &catalog[position];

        let requested = demand.entry(product.id.as_str()).or_insert(0);
        let total = requested.checked_add(line.quantity);

        // An overflowing total can never be in stock
        match total {
            Some(total) if product.can_fulfil(total) => *requested = total,
            _ => {
                return Err(CoreError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.quantity,
                    requested: total.unwrap_or(i64::MAX),
                });
            }
        }

        positions.push(position);
    }

    Ok(positions)
}

/// Commit pass. Only reached once every line has been validated.
fn commit_lines(
    catalog: &mut [Product],
    lines: &[OrderLine],
    positions: &[usize],
) -> (Vec<InvoiceItem>, f64) {
    let mut total = 0.0;
    let mut items = Vec::with_capacity(lines.len());

    for (line, &position) in lines.iter().zip(positions) {
        let product = &mut catalog[position];
        product.quantity -= line.quantity;

        let line_total = line.quantity as f64 * product.price;
        total += line_total;

        items.push(InvoiceItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity: line.quantity,
            unit_price: product.price,
            total: line_total,
        });
    }

    (items, total)
}

/// Human-readable invoice number: `INV-<unix millis>`.
pub fn invoice_number(now: DateTime<Utc>) -> String {
    format!("{}-{}", INVOICE_NUMBER_PREFIX, now.timestamp_millis())
}

// =============================================================================
// Unit Tests
// =============================================================================
