//! Persistence: a small key-value storage seam plus element list load/save.
//!
//! The element collection is stored as a JSON array of element records under
//! one well-known key. Loading fails closed: absent or malformed data yields
//! an empty board, never an error. Saving is best-effort; callers log failures
//! and carry on.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use wasm_bindgen::JsValue;

use crate::element::Element;

/// Error returned by [`Storage`] backends and [`save_elements`].
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// No storage is reachable (no window, storage disabled, private mode).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend rejected the operation (e.g. quota exceeded).
    #[error("storage backend error: {0}")]
    Backend(String),
    /// The element list could not be serialized.
    #[error("failed to serialize elements: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<JsValue> for PersistError {
    fn from(value: JsValue) -> Self {
        Self::Backend(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Key-value string storage.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend can't be read.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn save(&self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), PersistError>;
}

/// In-memory storage, used in tests and when the browser offers none.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// The browser's `window.localStorage`.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Open `window.localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Unavailable`] outside a browser window or when
    /// storage access is denied.
    pub fn open() -> Result<Self, PersistError> {
        let window = web_sys::window().ok_or(PersistError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(inner)) => Ok(Self { inner }),
            Ok(None) | Err(_) => Err(PersistError::Unavailable),
        }
    }
}

impl Storage for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.inner.get_item(key)?)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PersistError> {
        Ok(self.inner.set_item(key, value)?)
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        Ok(self.inner.remove_item(key)?)
    }
}

/// Decode a persisted element list.
///
/// Anything that isn't a JSON array decodes to an empty list. Individual
/// records that don't describe a valid element (unknown type, missing fields,
/// non-finite coordinates) are skipped, as are later records reusing an id
/// already seen.
#[must_use]
pub fn decode_elements(raw: &str) -> Vec<Element> {
    let records = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(records) => records,
        Err(err) => {
            log::warn!("ignoring malformed saved board: {err}");
            return Vec::new();
        }
    };

    let total = records.len();
    let mut seen = HashSet::new();
    let elements: Vec<Element> = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Element>(record) {
            Ok(el) if !el.is_finite() => {
                log::warn!("skipping saved element {} with non-finite geometry", el.id());
                None
            }
            Ok(el) if !seen.insert(el.id()) => {
                log::warn!("skipping saved element with duplicate id {}", el.id());
                None
            }
            Ok(el) => Some(el),
            Err(err) => {
                log::warn!("skipping malformed saved element: {err}");
                None
            }
        })
        .collect();

    if elements.len() < total {
        log::warn!("loaded {} of {total} saved elements", elements.len());
    }
    elements
}

/// Encode an element list for storage.
///
/// # Errors
///
/// Returns [`PersistError::Serialize`] if serialization fails.
pub fn encode_elements(elements: &[Element]) -> Result<String, PersistError> {
    Ok(serde_json::to_string(elements)?)
}

/// Load the element list stored under `key`. Never fails; see [`decode_elements`].
#[must_use]
pub fn load_elements(storage: &dyn Storage, key: &str) -> Vec<Element> {
    match storage.load(key) {
        Ok(Some(raw)) => decode_elements(&raw),
        Ok(None) => Vec::new(),
        Err(err) => {
            log::warn!("could not read saved board {key:?}: {err}");
            Vec::new()
        }
    }
}

/// Serialize and store the element list under `key`.
///
/// # Errors
///
/// Returns the serialization or backend error; callers treat it as non-fatal.
pub fn save_elements(storage: &dyn Storage, key: &str, elements: &[Element]) -> Result<(), PersistError> {
    let raw = encode_elements(elements)?;
    storage.save(key, &raw)
}
