/// Persistence of the link list in chrome.storage.sync

use crate::error::StorageError;
use crate::links::LinkConfig;
use crate::reconcile::{reconcile, Reconciled};
use log::{error, info};
use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;

/// The one key all link data lives under
pub const STORAGE_KEY: &str = "navShortcutLinks";

// Import JS bridge functions
#[wasm_bindgen(module = "/storage.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;
}

/// Raw access to the stored value
#[allow(async_fn_in_trait)]
pub trait LinkStore {
    async fn read(&self) -> Result<Option<Value>, StorageError>;

    async fn write(&self, value: Value) -> Result<(), StorageError>;
}

/// The browser's synchronized storage area
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncStorage;

impl LinkStore for SyncStorage {
    async fn read(&self) -> Result<Option<Value>, StorageError> {
        let stored = getStorage(STORAGE_KEY)
            .await
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))?;

        if stored.is_null() || stored.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(stored)
            .map(Some)
            .map_err(|e| StorageError::Decode(e.to_string()))
    }

    async fn write(&self, value: Value) -> Result<(), StorageError> {
        // Plain objects, not ES Maps: chrome.storage only keeps JSON-shaped data
        let js_value = value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| StorageError::Encode(e.to_string()))?;

        setStorage(STORAGE_KEY, js_value)
            .await
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

/// In-memory store for tests and previews
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<Value>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: Value) -> Self {
        let store = Self::default();
        store.value.replace(Some(value));
        store
    }

    /// Make every following read fail like an unreachable backend.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make every following write fail like an unreachable backend.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn value(&self) -> Option<Value> {
        self.value.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl LinkStore for MemoryStore {
    async fn read(&self) -> Result<Option<Value>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Backend("sync storage unavailable".to_string()));
        }
        Ok(self.value.borrow().clone())
    }

    async fn write(&self, value: Value) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Backend("QUOTA_BYTES_PER_ITEM quota exceeded".to_string()));
        }
        self.value.replace(Some(value));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Load/save of the whole link list over any [`LinkStore`]
#[derive(Debug, Clone, Default)]
pub struct LinkRepository<S> {
    store: S,
}

impl<S: LinkStore> LinkRepository<S> {
    pub fn new(store: S) -> Self {
        LinkRepository { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and reconcile. Never writes.
    pub async fn load(&self) -> Result<Reconciled, StorageError> {
        let raw = self.store.read().await?;
        Ok(reconcile(raw))
    }

    /// Replace the stored list with `config`.
    pub async fn save(&self, config: &LinkConfig) -> Result<(), StorageError> {
        let value = serde_json::to_value(config).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.store.write(value).await
    }

    /// Load, writing the defaults back when they had to be substituted.
    ///
    /// A failed write-back is logged; the defaults are still returned.
    pub async fn load_or_seed(&self) -> Result<LinkConfig, StorageError> {
        let Reconciled { config, seeded } = self.load().await?;
        if seeded {
            match self.save(&config).await {
                Ok(()) => info!("Seeded default links"),
                Err(e) => error!("Failed to store default links: {}", e),
            }
        }
        Ok(config)
    }
}
