use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;

/// Key-value persistence for preferences.
/// Platform-specific implementations should provide this.
pub trait PreferenceStore {
    type Error: std::error::Error + 'static;

    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete a value. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the removal.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;

    /// Delete every value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be cleared.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// In-memory store. Used in tests and as the fallback when no durable store exists.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing entries.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned())),
        );
        store
    }

    /// Copy of everything currently stored.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), Self::Error> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

/// Read a key, treating store failures as "absent".
pub fn read_or_none<S: PreferenceStore>(store: &S, key: &str) -> Option<String> {
    store.get(key).unwrap_or_else(|err| {
        log::warn!("preference read `{key}` failed: {err}");
        None
    })
}

/// Write a key, logging failures instead of propagating them.
pub fn write_or_log<S: PreferenceStore>(store: &S, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        log::warn!("preference write `{key}` failed: {err}");
    }
}

/// Remove a key, logging failures instead of propagating them.
pub fn remove_or_log<S: PreferenceStore>(store: &S, key: &str) {
    if let Err(err) = store.remove(key) {
        log::warn!("preference removal `{key}` failed: {err}");
    }
}
