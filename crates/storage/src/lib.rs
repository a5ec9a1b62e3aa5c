use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::{Db, Tree};
use std::collections::BTreeMap;
use std::path::Path;

pub mod cache;
pub mod context;
pub mod events;

pub use cache::CacheStore;
pub use context::{BlockHeader, Context};
pub use events::{Attribute, Event, EventManager};

/// Storage errors
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Corrupt value under key {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub type KvPair = (Vec<u8>, Vec<u8>);

/// Lazy iterator over the entries of one prefix, ascending by key.
pub type KvIter<'a> = Box<dyn Iterator<Item = Result<KvPair>> + 'a>;

/// A pending write: `Some(value)` sets the key, `None` deletes it.
pub type BatchOp = (Vec<u8>, Option<Vec<u8>>);

/// Ordered byte key-value store.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<()>;
    fn delete(&mut self, key: &[u8]) -> Result<()>;

    /// Entries whose key starts with `prefix`, in ascending key order. Each
    /// call starts a fresh traversal.
    fn iter_prefix<'a>(&'a self, prefix: &[u8]) -> KvIter<'a>;

    /// Apply every write of `batch` atomically.
    fn apply_batch(&mut self, batch: Vec<BatchOp>) -> Result<()>;

    fn has(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Concatenate a namespace prefix and a key.
pub fn prefixed(prefix: &[u8], key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(prefix.len() + key.len());
    out.extend_from_slice(prefix);
    out.extend_from_slice(key);
    out
}

pub fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn decode_json<T: DeserializeOwned>(key: &[u8], bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::Corrupt {
        key: hex::encode(key),
        reason: e.to_string(),
    })
}

/// Sled-backed implementation
pub struct SledStore {
    db: Db,
    state: Tree,
    flush_on_commit: bool,
}

impl SledStore {
    pub fn open<P: AsRef<Path>>(path: P, flush_on_commit: bool) -> Result<Self> {
        let db = sled::open(path.as_ref())?;
        let state = db.open_tree("state")?;
        tracing::debug!(
            target: "storage",
            path = %path.as_ref().display(),
            entries = state.len(),
            "opened sled store"
        );
        Ok(Self {
            db,
            state,
            flush_on_commit,
        })
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }
}

impl KvStore for SledStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.state.get(key)?.map(|v| v.to_vec()))
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.state.insert(key, value)?;
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.state.remove(key)?;
        Ok(())
    }

    fn iter_prefix<'a>(&'a self, prefix: &[u8]) -> KvIter<'a> {
        Box::new(self.state.scan_prefix(prefix).map(|item| {
            let (k, v) = item?;
            Ok((k.to_vec(), v.to_vec()))
        }))
    }

    fn apply_batch(&mut self, batch: Vec<BatchOp>) -> Result<()> {
        let mut sled_batch = sled::Batch::default();
        for (key, value) in batch {
            match value {
                Some(value) => sled_batch.insert(key, value),
                None => sled_batch.remove(key),
            }
        }
        self.state.apply_batch(sled_batch)?;
        if self.flush_on_commit {
            self.db.flush()?;
        }
        Ok(())
    }
}

/// In-memory backend
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.entries.insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn iter_prefix<'a>(&'a self, prefix: &[u8]) -> KvIter<'a> {
        let prefix = prefix.to_vec();
        Box::new(
            self.entries
                .range(prefix.clone()..)
                .take_while(move |(k, _)| k.starts_with(&prefix))
                .map(|(k, v)| Ok((k.clone(), v.clone()))),
        )
    }

    fn apply_batch(&mut self, batch: Vec<BatchOp>) -> Result<()> {
        for (key, value) in batch {
            match value {
                Some(value) => {
                    self.entries.insert(key, value);
                }
                None => {
                    self.entries.remove(&key);
                }
            }
        }
        Ok(())
    }
}
