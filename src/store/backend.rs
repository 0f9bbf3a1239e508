// Persistence backends for the preference map.
// Handles JSON serialization and atomic file replacement.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Str(String),
}

impl PrefValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            PrefValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::Str(s) => Some(s),
            PrefValue::Bool(_) => None,
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::Str(value.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::Str(value)
    }
}

/// Flat key/value map, ordered for stable enumeration and output.
pub type PrefMap = BTreeMap<String, PrefValue>;

/// Where a committed map ends up.
pub trait Backend: Send + Sync {
    /// Load the full map. A backend with nothing stored yields an empty map.
    fn load(&self) -> Result<PrefMap>;

    /// Persist the full map, replacing what was stored.
    fn persist(&self, values: &PrefMap) -> Result<()>;
}

/// Keeps nothing; every commit succeeds.
#[derive(Debug, Default)]
pub struct MemoryBackend;

impl Backend for MemoryBackend {
    fn load(&self) -> Result<PrefMap> {
        Ok(PrefMap::new())
    }

    fn persist(&self, _values: &PrefMap) -> Result<()> {
        Ok(())
    }
}

/// Stores the map as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for JsonFileBackend {
    fn load(&self) -> Result<PrefMap> {
        if !self.path.exists() {
            return Ok(PrefMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(PrefMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn persist(&self, values: &PrefMap) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(values)?;

        // Write atomically via temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_persist_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("nested/prefs.json"));
        assert!(backend.path().ends_with("nested/prefs.json"));

        let mut values = PrefMap::new();
        values.insert("dilbert_current_date".to_string(), "2020-02-02".into());
        values.insert("favorite_2020-02-02".to_string(), true.into());

        backend.persist(&values).unwrap();
        assert_eq!(backend.load().unwrap(), values);
        assert!(!temp_dir.path().join("nested/prefs.tmp").exists());
    }

    #[test]
    fn test_load_missing_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("missing.json"));
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_corrupt_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileBackend::new(path).load().is_err());
    }

    #[test]
    fn test_value_json_shape() {
        let mut values = PrefMap::new();
        values.insert("a".to_string(), true.into());
        values.insert("b".to_string(), "x".into());
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"a":true,"b":"x"}"#);
    }
}
