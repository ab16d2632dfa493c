//! Persistent Store
//!
//! The cart is saved as a JSON array of `{ name, price, qty }` objects under a
//! single key of a string key-value store, the same shape a browser keeps in
//! local storage. Anything that can't be read back is treated as an empty cart.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{cart::Cart, items::LineItem};

/// Default storage key for the cart.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Errors raised by a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading or writing a stored value
    #[error("Store IO error: {0}")]
    Io(#[from] io::Error),

    /// The cart could not be serialized
    #[error("Failed to serialize cart: {0}")]
    Json(#[from] serde_json::Error),

    /// The key can't be mapped onto the store
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A string key-value store scoped to one origin.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backing store can't be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backing store can't be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backing store can't be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, for tests and hosts that manage persistence themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);

        Ok(())
    }
}

/// Store keeping one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored values.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');

        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for DirectoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.root)?;
        fs::write(path, value)?;

        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)?) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Loads and saves a [`Cart`] under one key of a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Wrap a store, keeping the cart under `key`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Storage key the cart lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The wrapped store, mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Load the stored cart.
    ///
    /// Missing, unreadable or malformed data yields an empty cart, as does a
    /// cart whose total can't be represented.
    pub fn load(&self) -> Cart {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored cart");
                return Cart::new();
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read stored cart; starting empty");
                return Cart::new();
            }
        };

        let cart = match serde_json::from_str::<Option<Vec<LineItem>>>(&raw) {
            Ok(items) => Cart::with_items(items.unwrap_or_default()),
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored cart is malformed; starting empty");
                return Cart::new();
            }
        };

        if cart.checked_total().is_none() {
            warn!(key = %self.key, "stored cart total overflows; starting empty");
            return Cart::new();
        }

        cart
    }

    /// Save the cart, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the cart can't be serialized or written.
    pub fn save(&mut self, cart: &Cart) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart.items())?;

        self.store.set_item(&self.key, &raw)?;

        debug!(key = %self.key, lines = cart.len(), "saved cart");

        Ok(())
    }

    /// Remove the stored cart.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store can't be written.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn store_with(raw: &str) -> TestResult<CartStore<MemoryStore>> {
        let mut store = MemoryStore::new();
        store.set_item(DEFAULT_STORAGE_KEY, raw)?;

        Ok(CartStore::new(store, DEFAULT_STORAGE_KEY))
    }

    #[test]
    fn missing_key_loads_empty_cart() {
        let store = CartStore::new(MemoryStore::new(), DEFAULT_STORAGE_KEY);

        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_json_loads_empty_cart() -> TestResult {
        assert!(store_with("{not json")?.load().is_empty());
        assert!(store_with(r#"{"name":"X"}"#)?.load().is_empty());
        assert!(store_with(r#"[{"name":"X","price":"abc","qty":1}]"#)?.load().is_empty());
        assert!(store_with(r#"[{"name":"X","price":1,"qty":-1}]"#)?.load().is_empty());

        Ok(())
    }

    #[test]
    fn overflowing_totals_load_empty_cart() -> TestResult {
        let two_units = r#"[{"name":"X","price":5e28,"qty":2}]"#;
        let two_lines = r#"[{"name":"X","price":5e28,"qty":1},{"name":"Y","price":5e28,"qty":1}]"#;

        assert!(store_with(two_units)?.load().is_empty());
        assert!(store_with(two_lines)?.load().is_empty());

        Ok(())
    }

    #[test]
    fn null_loads_empty_cart() -> TestResult {
        assert!(store_with("null")?.load().is_empty());

        Ok(())
    }

    #[test]
    fn save_then_load_preserves_order_and_values() -> TestResult {
        let mut cart = Cart::new();
        cart.add_or_merge("Scone", Decimal::new(25, 1), 2);
        cart.add_or_merge("Brownies – Dozen (12)", Decimal::new(1800, 2), 1);
        cart.add_or_merge("Muffin", Decimal::new(3, 0), 4);

        let mut store = CartStore::new(MemoryStore::new(), DEFAULT_STORAGE_KEY);
        store.save(&cart)?;

        assert_eq!(store.load(), cart);

        Ok(())
    }

    #[test]
    fn save_writes_stored_layout() -> TestResult {
        let mut cart = Cart::new();
        cart.add_or_merge("Scone", Decimal::new(25, 1), 2);

        let mut store = CartStore::new(MemoryStore::new(), DEFAULT_STORAGE_KEY);
        store.save(&cart)?;

        assert_eq!(
            store.store().get_item(DEFAULT_STORAGE_KEY)?.as_deref(),
            Some(r#"[{"name":"Scone","price":2.5,"qty":2}]"#)
        );

        Ok(())
    }

    #[test]
    fn clear_removes_stored_cart() -> TestResult {
        let mut store = store_with("[]")?;

        store.clear()?;

        assert_eq!(store.store().get_item(DEFAULT_STORAGE_KEY)?, None);

        Ok(())
    }

    #[test]
    fn directory_store_round_trips_values() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = DirectoryStore::new(dir.path().join("storage"));

        assert_eq!(store.get_item("cart")?, None);

        store.set_item("cart", "[]")?;
        assert_eq!(store.get_item("cart")?.as_deref(), Some("[]"));

        store.remove_item("cart")?;
        store.remove_item("cart")?;
        assert_eq!(store.get_item("cart")?, None);

        Ok(())
    }

    #[test]
    fn directory_store_rejects_path_like_keys() {
        let mut store = DirectoryStore::new("unused");

        assert!(matches!(
            store.set_item("../cart", "[]"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.get_item(""), Err(StoreError::InvalidKey(_))));
    }
}
