//! # Product Repository
//!
//! Catalog operations on `inventory.json`.
//!
//! ## Lookup Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  inventory.json                                                        │
//! │  {                                                                      │
//! │    "acc-1": [ { id: "p1", name: "Widget", quantity: 10, price: 2 } ],  │
//! │    "acc-2": [ ... ]                                                     │
//! │  }                                                                      │
//! │                                                                         │
//! │  list(acc)          no entry → []                                       │
//! │  get/update/delete  no entry → NotFound("Inventory", acc)               │
//! │                     no id    → NotFound("Product", id)                  │
//! │  create             no entry → entry created                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{AccountMap, Collection, Store};
use stockroom_core::validation::product_fields;
use stockroom_core::{CoreError, Product, ProductFields, ProductInput};

/// Repository for product catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
///
/// let product = repo.create(&account_id, fields).await?;
/// let all = repo.list(&account_id).await;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: Store,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(store: Store) -> Self {
        ProductRepository { store }
    }

    /// Lists an account's products in insertion order.
    pub async fn list(&self, account_id: &str) -> Vec<Product> {
        let mut inventory: AccountMap<Product> = self.store.load(Collection::Inventory).await;
        inventory.remove(account_id).unwrap_or_default()
    }

    /// Gets a single product.
    pub async fn get(&self, account_id: &str, product_id: &str) -> StoreResult<Product> {
        let mut inventory: AccountMap<Product> = self.store.load(Collection::Inventory).await;

        inventory
            .remove(account_id)
            .ok_or_else(|| StoreError::not_found("Inventory", account_id))?
            .into_iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))
    }

    /// Adds a product to the account's catalog.
    pub async fn create(&self, account_id: &str, fields: ProductFields) -> StoreResult<Product> {
        let _guard = self.store.write_lock().await;
        let mut inventory: AccountMap<Product> = self.store.load(Collection::Inventory).await;

        let product = Product::new(fields.name, fields.quantity, fields.price, Utc::now());
        inventory
            .entry(account_id.to_string())
            .or_default()
            .push(product.clone());

        self.store.save(Collection::Inventory, &inventory).await?;

        debug!(account_id = %account_id, product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Replaces a product's name, quantity and price.
    ///
    /// The product is resolved before the body is validated, so a missing
    /// product is `NotFound` whatever the body holds.
    pub async fn update(
        &self,
        account_id: &str,
        product_id: &str,
        input: ProductInput,
    ) -> StoreResult<Product> {
        let _guard = self.store.write_lock().await;
        let mut inventory: AccountMap<Product> = self.store.load(Collection::Inventory).await;

        let product = inventory
            .get_mut(account_id)
            .ok_or_else(|| StoreError::not_found("Inventory", account_id))?
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;

        let fields = product_fields(input).map_err(CoreError::from)?;
        product.name = fields.name;
        product.quantity = fields.quantity;
        product.price = fields.price;
        product.updated_at = Some(Utc::now());
        let updated = product.clone();

        self.store.save(Collection::Inventory, &inventory).await?;

        debug!(account_id = %account_id, product_id = %product_id, "Product updated");
        Ok(updated)
    }

    /// Removes a product. Existing invoices keep their snapshot.
    pub async fn delete(&self, account_id: &str, product_id: &str) -> StoreResult<()> {
        let _guard = self.store.write_lock().await;
        let mut inventory: AccountMap<Product> = self.store.load(Collection::Inventory).await;

        let products = inventory
            .get_mut(account_id)
            .ok_or_else(|| StoreError::not_found("Inventory", account_id))?;

        let position = products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;
        products.remove(position);

        self.store.save(Collection::Inventory, &inventory).await?;

        debug!(account_id = %account_id, product_id = %product_id, "Product deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use stockroom_core::{NumericInput, ValidationError};

    fn widget(quantity: i64) -> ProductFields {
        ProductFields {
            name: "Widget".to_string(),
            quantity,
            price: 2.0,
        }
    }

    fn widget_input(quantity: i64) -> ProductInput {
        ProductInput {
            name: Some("Widget".to_string()),
            quantity: Some(NumericInput::Integer(quantity)),
            price: Some(NumericInput::Float(2.0)),
        }
    }

    #[tokio::test]
    async fn test_product_crud() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).await.unwrap();
        let repo = store.products();

        let created = repo.create("acc", widget(10)).await.unwrap();
        assert_eq!(repo.list("acc").await, vec![created.clone()]);
        assert_eq!(repo.get("acc", &created.id).await.unwrap(), created);

        let updated = repo.update("acc", &created.id, widget_input(4)).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());

        repo.delete("acc", &created.id).await.unwrap();
        assert!(repo.list("acc").await.is_empty());
        assert!(matches!(
            repo.get("acc", &created.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_accounts_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).await.unwrap();
        let repo = store.products();

        let product = repo.create("acc-a", widget(1)).await.unwrap();

        assert!(repo.list("acc-b").await.is_empty());
        assert!(repo.get("acc-b", &product.id).await.is_err());
        assert!(repo.delete("acc-b", &product.id).await.is_err());
        assert_eq!(repo.list("acc-a").await.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_collection_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).await.unwrap();

        let err = store
            .products()
            .update("ghost", "p1", widget_input(1))
            .await
            .unwrap_err();
        match err {
            StoreError::NotFound { entity, id } => {
                assert_eq!(entity, "Inventory");
                assert_eq!(id, "ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_update_resolves_product_before_validating() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).await.unwrap();
        let repo = store.products();
        let created = repo.create("acc", widget(3)).await.unwrap();

        let partial = ProductInput {
            name: Some("W".to_string()),
            ..ProductInput::default()
        };

        let err = repo.update("acc", "missing", partial.clone()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref entity, .. } if entity == "Product"));

        let err = repo.update("acc", &created.id, partial).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert_eq!(repo.get("acc", &created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).await.unwrap();
        let repo = store.products();
        let created = repo.create("acc", widget(1)).await.unwrap();

        assert!(matches!(
            repo.delete("acc", "unknown").await,
            Err(StoreError::NotFound { ref entity, .. }) if entity == "Product"
        ));

        repo.delete("acc", &created.id).await.unwrap();
        assert!(matches!(
            repo.delete("acc", &created.id).await,
            Err(StoreError::NotFound { ref entity, .. }) if entity == "Product"
        ));
    }
}
