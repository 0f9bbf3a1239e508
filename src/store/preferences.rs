// Preference store core.
// Flat key/value map with typed getters, batched edits and synchronous commits.

use std::path::PathBuf;

use parking_lot::{Mutex, RwLock};

use crate::error::{PrefsError, Result};

use super::backend::{Backend, JsonFileBackend, MemoryBackend, PrefMap, PrefValue};
use super::paths;

/// Persistent key/value store shared by every component.
///
/// Reads see the in-memory map. Every write goes through an [`Editor`] whose
/// `commit` applies the changes and persists the whole map before returning.
/// There is no locking across operations: a read followed by a write can
/// interleave with another caller's commit.
pub struct PreferenceStore {
    values: RwLock<PrefMap>,
    backend: Box<dyn Backend>,
    commit_lock: Mutex<()>,
}

impl PreferenceStore {
    /// Open a store backed by a custom backend, loading its current contents.
    pub fn with_backend(backend: impl Backend + 'static) -> Result<Self> {
        let values = backend.load()?;
        tracing::debug!(entries = values.len(), "opened preference store");
        Ok(Self {
            values: RwLock::new(values),
            backend: Box::new(backend),
            commit_lock: Mutex::new(()),
        })
    }

    /// Open a store persisted as JSON at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_backend(JsonFileBackend::new(path))
    }

    /// Open the store at the default location (or `DILBERT_PREFS`).
    pub fn open_default() -> Result<Self> {
        let path = paths::preferences_path()
            .ok_or_else(|| PrefsError::Other("no home directory for preferences".to_string()))?;
        Self::open(path)
    }

    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            values: RwLock::new(PrefMap::new()),
            backend: Box::new(MemoryBackend),
            commit_lock: Mutex::new(()),
        }
    }

    pub fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.read().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// String value for `key`, or `default` when absent or not a string.
    pub fn get_string(&self, key: &str, default: Option<&str>) -> Option<String> {
        match self.values.read().get(key) {
            Some(PrefValue::Str(s)) => Some(s.clone()),
            Some(PrefValue::Bool(_)) => {
                tracing::warn!(key, "expected string preference, found boolean");
                default.map(str::to_string)
            }
            None => default.map(str::to_string),
        }
    }

    /// Boolean value for `key`, or `default` when absent or not a boolean.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.read().get(key) {
            Some(PrefValue::Bool(b)) => *b,
            Some(PrefValue::Str(_)) => {
                tracing::warn!(key, "expected boolean preference, found string");
                default
            }
            None => default,
        }
    }

    pub fn set_string(&self, key: &str, value: &str) -> bool {
        self.edit().put_string(key, value).commit()
    }

    pub fn set_bool(&self, key: &str, value: bool) -> bool {
        self.edit().put_bool(key, value).commit()
    }

    pub fn remove(&self, key: &str) -> bool {
        self.edit().remove(key).commit()
    }

    /// Start a batch of changes that are committed together.
    pub fn edit(&self) -> Editor<'_> {
        Editor {
            store: self,
            ops: Vec::new(),
        }
    }

    /// Copy of the whole map at this instant.
    pub fn snapshot(&self) -> PrefMap {
        self.values.read().clone()
    }

    /// All keys at this instant, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    /// Snapshot of the entries whose key starts with `prefix`, prefix stripped.
    pub fn entries_with_prefix(&self, prefix: &str) -> Vec<(String, PrefValue)> {
        self.values
            .read()
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key[prefix.len()..].to_string(), value.clone()))
            .collect()
    }

    fn apply(&self, ops: Vec<EditOp>) -> bool {
        let _guard = self.commit_lock.lock();

        let snapshot = {
            let mut values = self.values.write();
            for op in &ops {
                match op {
                    EditOp::Put(key, value) => {
                        values.insert(key.clone(), value.clone());
                    }
                    EditOp::Remove(key) => {
                        values.remove(key);
                    }
                }
            }
            values.clone()
        };

        match self.backend.persist(&snapshot) {
            Ok(()) => {
                tracing::debug!(changes = ops.len(), "committed preferences");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, changes = ops.len(), "failed to commit preferences");
                false
            }
        }
    }
}

#[derive(Debug, Clone)]
enum EditOp {
    Put(String, PrefValue),
    Remove(String),
}

/// Pending changes against a [`PreferenceStore`].
#[must_use = "changes are only applied by commit()"]
pub struct Editor<'a> {
    store: &'a PreferenceStore,
    ops: Vec<EditOp>,
}

impl Editor<'_> {
    pub fn put_string(mut self, key: &str, value: &str) -> Self {
        self.ops.push(EditOp::Put(key.to_string(), value.into()));
        self
    }

    pub fn put_bool(mut self, key: &str, value: bool) -> Self {
        self.ops.push(EditOp::Put(key.to_string(), value.into()));
        self
    }

    pub fn remove(mut self, key: &str) -> Self {
        self.ops.push(EditOp::Remove(key.to_string()));
        self
    }

    /// Apply and persist the changes. Returns whether they reached storage;
    /// on `false` the in-memory map still holds the new values.
    pub fn commit(self) -> bool {
        self.store.apply(self.ops)
    }
}
