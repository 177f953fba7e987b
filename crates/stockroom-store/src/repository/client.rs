//! # Client Repository
//!
//! Client directory operations on `clients.json`. Lookup rules match the
//! product repository: listing an unknown account yields `[]`, every other
//! operation reports `NotFound`.

use chrono::Utc;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{AccountMap, Collection, Store};
use stockroom_core::validation::client_fields;
use stockroom_core::{Client, ClientFields, ClientInput, CoreError};

/// Repository for client directory operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    store: Store,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(store: Store) -> Self {
        ClientRepository { store }
    }

    /// Lists an account's clients in insertion order.
    pub async fn list(&self, account_id: &str) -> Vec<Client> {
        let mut clients: AccountMap<Client> = self.store.load(Collection::Clients).await;
        clients.remove(account_id).unwrap_or_default()
    }

    /// Gets a single client.
    pub async fn get(&self, account_id: &str, client_id: &str) -> StoreResult<Client> {
        let mut clients: AccountMap<Client> = self.store.load(Collection::Clients).await;

        clients
            .remove(account_id)
            .ok_or_else(|| StoreError::not_found("Clients", account_id))?
            .into_iter()
            .find(|c| c.id == client_id)
            .ok_or_else(|| StoreError::not_found("Client", client_id))
    }

    /// Adds a client to the account's directory.
    pub async fn create(&self, account_id: &str, fields: ClientFields) -> StoreResult<Client> {
        let _guard = self.store.write_lock().await;
        let mut clients: AccountMap<Client> = self.store.load(Collection::Clients).await;

        let client = Client::new(fields, Utc::now());
        clients
            .entry(account_id.to_string())
            .or_default()
            .push(client.clone());

        self.store.save(Collection::Clients, &clients).await?;

        debug!(account_id = %account_id, client_id = %client.id, "Client created");
        Ok(client)
    }

    /// Replaces a client's contact fields. The client is resolved before the
    /// body is validated.
    pub async fn update(
        &self,
        account_id: &str,
        client_id: &str,
        input: ClientInput,
    ) -> StoreResult<Client> {
        let _guard = self.store.write_lock().await;
        let mut clients: AccountMap<Client> = self.store.load(Collection::Clients).await;

        let client = clients
            .get_mut(account_id)
            .ok_or_else(|| StoreError::not_found("Clients", account_id))?
            .iter_mut()
            .find(|c| c.id == client_id)
            .ok_or_else(|| StoreError::not_found("Client", client_id))?;

        let fields = client_fields(input).map_err(CoreError::from)?;
        client.name = fields.name;
        client.phone = fields.phone;
        client.email = fields.email;
        client.address = fields.address;
        client.updated_at = Some(Utc::now());
        let updated = client.clone();

        self.store.save(Collection::Clients, &clients).await?;

        debug!(account_id = %account_id, client_id = %client_id, "Client updated");
        Ok(updated)
    }

    /// Removes a client. Existing invoices keep their snapshot.
    pub async fn delete(&self, account_id: &str, client_id: &str) -> StoreResult<()> {
        let _guard = self.store.write_lock().await;
        let mut clients: AccountMap<Client> = self.store.load(Collection::Clients).await;

        let directory = clients
            .get_mut(account_id)
            .ok_or_else(|| StoreError::not_found("Clients", account_id))?;

        let position = directory
            .iter()
            .position(|c| c.id == client_id)
            .ok_or_else(|| StoreError::not_found("Client", client_id))?;
        directory.remove(position);

        self.store.save(Collection::Clients, &clients).await?;

        debug!(account_id = %account_id, client_id = %client_id, "Client deleted");
        Ok(())
    }
}
