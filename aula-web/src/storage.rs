//! Preference persistence backed by `localStorage`.

use std::cell::Cell;

use aula_core::{MemoryStore, PreferenceStore, keys};
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::dom;

const PROBE_KEY: &str = "__aula_probe__";

#[derive(Debug, thiserror::Error)]
pub enum BrowserStoreError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<JsValue> for BrowserStoreError {
    fn from(value: JsValue) -> Self {
        Self::Storage(dom::js_error_message(&value))
    }
}

/// Origin-scoped store with an in-memory shadow.
///
/// Every write lands in the shadow first. Once `localStorage` fails (quota,
/// revoked permission) the store degrades and serves the rest of the page
/// from the shadow, so reads keep matching what the widget last wrote.
pub struct BrowserStore {
    local: Option<Storage>,
    shadow: MemoryStore,
    degraded: Cell<bool>,
}

impl BrowserStore {
    /// Use `localStorage` if a probe write succeeds, otherwise memory only.
    #[must_use]
    pub fn detect() -> Self {
        match dom::local_storage().and_then(|storage| {
            storage.set_item(PROBE_KEY, "1")?;
            storage.remove_item(PROBE_KEY)?;
            Ok(storage)
        }) {
            Ok(storage) => Self::backed_by(storage),
            Err(err) => {
                log::warn!(
                    "localStorage unusable ({}); preferences will last for this page only",
                    dom::js_error_message(&err)
                );
                Self::memory()
            }
        }
    }

    /// A store that forgets everything when the page goes away.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            local: None,
            shadow: MemoryStore::new(),
            degraded: Cell::new(false),
        }
    }

    fn backed_by(storage: Storage) -> Self {
        let shadow = MemoryStore::new();
        for key in keys::ALL {
            if let Ok(Some(value)) = storage.get_item(key) {
                let _ = shadow.set(key, &value);
            }
        }
        Self {
            local: Some(storage),
            shadow,
            degraded: Cell::new(false),
        }
    }

    /// Whether writes currently reach `localStorage`.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.durable().is_some()
    }

    fn durable(&self) -> Option<&Storage> {
        self.local.as_ref().filter(|_| !self.degraded.get())
    }

    fn degrade(&self, err: &JsValue) -> BrowserStoreError {
        if !self.degraded.replace(true) {
            log::warn!("localStorage stopped working; preferences now last for this page only");
        }
        BrowserStoreError::Storage(dom::js_error_message(err))
    }

    fn shadow_get(&self, key: &str) -> Option<String> {
        self.shadow.get(key).unwrap_or_default()
    }
}

impl PreferenceStore for BrowserStore {
    type Error = BrowserStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let Some(storage) = self.durable() else {
            return Ok(self.shadow_get(key));
        };
        match storage.get_item(key) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.degrade(&err);
                Ok(self.shadow_get(key))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let _ = self.shadow.set(key, value);
        if let Some(storage) = self.durable() {
            storage.set_item(key, value).map_err(|err| self.degrade(&err))?;
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let _ = self.shadow.remove(key);
        if let Some(storage) = self.durable() {
            storage.remove_item(key).map_err(|err| self.degrade(&err))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), Self::Error> {
        let _ = self.shadow.clear();
        if let Some(storage) = self.durable() {
            storage.clear().map_err(|err| self.degrade(&err))?;
        }
        Ok(())
    }
}
