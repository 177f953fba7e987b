//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Account      │   │    Product      │   │     Client      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  username       │   │  name           │   │  name, phone    │       │
//! │  │  password_hash  │   │  quantity       │   │  email, address │       │
//! │  └────────┬────────┘   │  price          │   └────────┬────────┘       │
//! │           │ owns       └────────┬────────┘            │ snapshot       │
//! │           ▼                     │ snapshot            ▼                │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Invoice { invoice_number, client: InvoiceClient,               │   │
//! │  │            items: [InvoiceItem], subtotal, total }              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An invoice copies the client's fields and each product's name and price at
//! creation time. Later edits to the source records never change history.
//!
//! ## Wire Format
//! Every type serializes with camelCase field names, which is also the layout
//! of the persisted JSON documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a new entity id (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Account
// =============================================================================

/// A registered account: the root of an isolated data partition.
///
/// `password_hash` holds an argon2 PHC string. Documents written by the
/// legacy plaintext layout store the raw password under `password`; the alias
/// keeps those records loadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    #[serde(alias = "password")]
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Product
// =============================================================================

/// A product in an account's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, copied onto invoice lines.
    pub name: String,

    /// Current stock level.
    pub quantity: i64,

    /// Unit price. Invoices always use this stored value.
    pub price: f64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Creates a product with a fresh id.
    pub fn new(name: String, quantity: i64, price: f64, now: DateTime<Utc>) -> Self {
        Product {
            id: generate_id(),
            name,
            quantity,
            price,
            created_at: now,
            updated_at: None,
        }
    }

    /// Checks if the current stock covers the requested quantity.
    pub fn can_fulfil(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client in an account's directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Client {
    /// Creates a client with a fresh id.
    pub fn new(fields: ClientFields, now: DateTime<Utc>) -> Self {
        Client {
            id: generate_id(),
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
            address: fields.address,
            created_at: now,
            updated_at: None,
        }
    }

    /// Freezes the client's contact fields for an invoice.
    pub fn snapshot(&self) -> InvoiceClient {
        InvoiceClient {
            id: self.id.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// Client details frozen at invoice time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceClient {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

/// A line item in an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceItem {
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub unit_price: f64,
    /// quantity × unit_price.
    pub total: f64,
}

/// An immutable invoice. Invoices are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub client: InvoiceClient,
    pub items: Vec<InvoiceItem>,
    pub subtotal: f64,
    pub total: f64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Reports
// =============================================================================

/// One sold line item, flattened out of its invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleRecord {
    pub invoice_id: String,
    pub invoice_number: String,
    pub client_id: String,
    pub client_name: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total: f64,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
}

/// Sales aggregated per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSummary {
    pub product_id: String,
    pub product_name: String,
    pub total_quantity_sold: i64,
    pub total_revenue: f64,
    /// Number of line items, not distinct invoices.
    pub sales_count: u64,
    /// Unit price of the last line seen for this product.
    pub average_price: f64,
}

// =============================================================================
// Input Types
// =============================================================================

/// A numeric request field as sent by clients: a JSON number or a string.
///
/// Coercion into `i64`/`f64` happens in [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Body of product create/update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub quantity: Option<NumericInput>,
    pub price: Option<NumericInput>,
}

/// Validated product fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

/// Body of client create/update requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Validated client fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// One requested line in an invoice request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub product_id: Option<String>,
    pub quantity: Option<NumericInput>,
}

/// Body of invoice create requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub client_id: Option<String>,
    pub items: Option<Vec<OrderLineInput>>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::new("Widget".to_string(), 10, 2.0, Utc::now());
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["name"], "Widget");
        assert_eq!(json["quantity"], 10);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn test_product_can_fulfil() {
        let product = Product::new("Widget".to_string(), 3, 1.5, Utc::now());
        assert!(product.can_fulfil(3));
        assert!(!product.can_fulfil(4));
    }

    #[test]
    fn test_account_reads_legacy_password_field() {
        let account: Account = serde_json::from_str(
            r#"{ "id": "1700000000000", "username": "ana", "password": "secret" }"#,
        )
        .unwrap();

        assert_eq!(account.password_hash, "secret");
        assert!(account.created_at.is_none());
    }

    #[test]
    fn test_client_defaults_optional_contact_fields() {
        let client: Client = serde_json::from_str(
            r#"{ "id": "c1", "name": "Ana", "phone": "555", "createdAt": "2024-01-01T00:00:00Z" }"#,
        )
        .unwrap();

        assert_eq!(client.email, "");
        assert_eq!(client.address, "");
    }

    #[test]
    fn test_numeric_input_accepts_numbers_and_strings() {
        let input: ProductInput =
            serde_json::from_str(r#"{ "name": "W", "quantity": "7", "price": 2.5 }"#).unwrap();

        assert_eq!(input.quantity, Some(NumericInput::Text("7".to_string())));
        assert_eq!(input.price, Some(NumericInput::Float(2.5)));

        let input: ProductInput = serde_json::from_str(r#"{ "quantity": 7 }"#).unwrap();
        assert_eq!(input.quantity, Some(NumericInput::Integer(7)));
        assert!(input.name.is_none());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
