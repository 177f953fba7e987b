//! # Reporting
//!
//! Read-only views derived from an account's invoice history.
//!
//! ## Reports
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoices ──► flatten line items ──► filter by name ──► sort by date   │
//! │                     │                                  (desc, stable)   │
//! │                     │                                   = sales_report  │
//! │                     ▼                                                   │
//! │               group by productId ──► sort by quantity sold (desc)      │
//! │                                       = sales_summary                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use crate::types::{Invoice, ProductSummary, SaleRecord};

/// Flattens every invoice line into a [`SaleRecord`].
///
/// ## Arguments
/// * `invoices` - The account's invoices in creation order
/// * `product_name` - Optional case-insensitive substring filter; an empty
///   filter matches everything
///
/// ## Ordering
/// Newest sale first. Lines with the same sale date keep their flattened
/// order (`sort_by` is stable).
pub fn sales_report(invoices: &[Invoice], product_name: Option<&str>) -> Vec<SaleRecord> {
    let filter = product_name
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase);

    let mut records: Vec<SaleRecord> = invoices
        .iter()
        .flat_map(|invoice| {
            invoice.items.iter().map(move |item| SaleRecord {
                invoice_id: invoice.id.clone(),
                invoice_number: invoice.invoice_number.clone(),
                client_id: invoice.client.id.clone(),
                client_name: invoice.client.name.clone(),
                product_id: item.product_id.clone(),
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total: item.total,
                sale_date: invoice.created_at,
            })
        })
        .filter(|record| match &filter {
            Some(needle) => record.product_name.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .collect();

    records.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));
    records
}

/// Aggregates sales per product id.
///
/// `average_price` is the unit price of the last line seen for the product
/// (iteration order), not a mean. `product_name` is taken from the first line
/// seen. Sorted by total quantity sold, highest first; ties keep first-seen
/// order.
pub fn sales_summary(invoices: &[Invoice]) -> Vec<ProductSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<ProductSummary> = Vec::new();

    for item in invoices.iter().flat_map(|invoice| invoice.items.iter()) {
        let position = *index.entry(item.product_id.as_str()).or_insert_with(|| {
            summaries.push(ProductSummary {
                product_id: item.product_id.clone(),
                product_name: item.product_name.clone(),
                total_quantity_sold: 0,
                total_revenue: 0.0,
                sales_count: 0,
                average_price: 0.0,
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[position];
        summary.total_quantity_sold = summary.total_quantity_sold.saturating_add(item.quantity);
        summary.total_revenue += item.total;
        summary.sales_count += 1;
        summary.average_price = item.unit_price;
    }

    summaries.sort_by(|a, b| b.total_quantity_sold.cmp(&a.total_quantity_sold));
    summaries
}

// =============================================================================
// Unit Tests
// =============================================================================
