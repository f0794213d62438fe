//! Key-value preference slots kept in one JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value stored under `key`. Missing and undecodable values are both `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut slots = match self.read_slots() {
            Ok(slots) => slots,
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences {}: {}", self.path.display(), e);
                return None;
            }
        };

        let value = slots.remove(key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("Ignoring undecodable preference {:?}: {}", key, e);
                None
            }
        }
    }

    /// Overwrites the slot `key`, leaving other slots untouched.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut slots = self.read_slots().unwrap_or_else(|e| {
            tracing::warn!("Replacing unreadable preferences {}: {}", self.path.display(), e);
            Map::new()
        });
        slots.insert(key.to_string(), serde_json::to_value(value)?);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&Value::Object(slots))?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn read_slots(&self) -> Result<Map<String, Value>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}
