//! # Account Repository
//!
//! Registration and credential checks against `users.json`.
//!
//! ## Registration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  register("ana", "pw")                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write_lock ──► users.json: username taken? ──► Duplicate (409)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  argon2 hash ──► append account ──► save users.json                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  inventory.json / clients.json / invoices.json: { id: [] }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::{AccountMap, Collection, Store};
use stockroom_core::{generate_id, Account, Client, Invoice, Product};

/// Repository for accounts.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    store: Store,
}

impl AccountRepository {
    /// Creates a new AccountRepository.
    pub fn new(store: Store) -> Self {
        AccountRepository { store }
    }

    /// Registers a new account and gives it empty collections.
    ///
    /// Credentials must already be validated. Usernames are compared exactly.
    pub async fn register(&self, username: &str, password: &str) -> StoreResult<Account> {
        let _guard = self.store.write_lock().await;

        let mut accounts: Vec<Account> = self.store.load(Collection::Accounts).await;
        if accounts.iter().any(|a| a.username == username) {
            return Err(StoreError::duplicate("username", username));
        }

        let account = Account {
            id: generate_id(),
            username: username.to_string(),
            password_hash: hash_password(password)?,
            created_at: Some(Utc::now()),
        };

        accounts.push(account.clone());
        self.store.save(Collection::Accounts, &accounts).await?;

        self.seed_collection::<Product>(Collection::Inventory, &account.id).await?;
        self.seed_collection::<Client>(Collection::Clients, &account.id).await?;
        self.seed_collection::<Invoice>(Collection::Invoices, &account.id).await?;

        info!(account_id = %account.id, username = %account.username, "Account registered");
        Ok(account)
    }

    /// Returns the account whose credentials match, if any.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<Option<Account>> {
        let accounts: Vec<Account> = self.store.load(Collection::Accounts).await;

        let account = accounts
            .into_iter()
            .find(|a| a.username == username && verify_password(password, &a.password_hash));

        debug!(username = %username, matched = account.is_some(), "Credentials checked");
        Ok(account)
    }

    /// Looks up an account by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Account> {
        let accounts: Vec<Account> = self.store.load(Collection::Accounts).await;

        accounts
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found("Account", id))
    }

    async fn seed_collection<T>(&self, collection: Collection, account_id: &str) -> StoreResult<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut map: AccountMap<T> = self.store.load(collection).await;
        map.entry(account_id.to_string()).or_default();
        self.store.save(collection, &map).await
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password with argon2 and a random salt.
pub fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::PasswordHash(e.to_string()))
}

/// Verifies a password against a stored value.
///
/// Stored values that are not PHC strings are legacy plaintext passwords and
/// are compared directly.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => {
            warn!("Account uses a plaintext password; re-register to upgrade");
            password == stored
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    async fn open_store(dir: &tempfile::TempDir) -> Store {
        Store::open(StoreConfig::new(dir.path())).await.unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_legacy_plaintext_password() {
        assert!(verify_password("secret", "secret"));
        assert!(!verify_password("Secret", "secret"));
    }

    #[tokio::test]
    async fn test_register_creates_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let account = store.accounts().register("ana", "pw").await.unwrap();

        let inventory: AccountMap<Product> = store.load(Collection::Inventory).await;
        let clients: AccountMap<Client> = store.load(Collection::Clients).await;
        let invoices: AccountMap<Invoice> = store.load(Collection::Invoices).await;
        assert_eq!(inventory.get(&account.id).map(Vec::len), Some(0));
        assert_eq!(clients.get(&account.id).map(Vec::len), Some(0));
        assert_eq!(invoices.get(&account.id).map(Vec::len), Some(0));

        let raw = std::fs::read_to_string(dir.path().join("users.json")).unwrap();
        assert!(!raw.contains("\"pw\""));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store.accounts().register("ana", "pw").await.unwrap();
        let err = store.accounts().register("ana", "other").await.unwrap_err();

        assert!(matches!(err, StoreError::Duplicate { .. }));
        let accounts: Vec<Account> = store.load(Collection::Accounts).await;
        assert_eq!(accounts.len(), 1);
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;
        let account = store.accounts().register("ana", "pw").await.unwrap();

        let found = store.accounts().verify_credentials("ana", "pw").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(account.id.clone()));

        assert!(store.accounts().verify_credentials("ana", "nope").await.unwrap().is_none());
        assert!(store.accounts().verify_credentials("bob", "pw").await.unwrap().is_none());

        assert_eq!(store.accounts().get_by_id(&account.id).await.unwrap().username, "ana");
    }

    #[tokio::test]
    async fn test_verify_credentials_accepts_legacy_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("users.json"),
            r#"[{ "id": "1700000000000", "username": "old", "password": "plain" }]"#,
        )
        .unwrap();
        let store = open_store(&dir).await;

        let found = store.accounts().verify_credentials("old", "plain").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some("1700000000000".to_string()));
    }
}
