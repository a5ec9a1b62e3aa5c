//! Execution context handed to keepers.

use crate::cache::CacheStore;
use crate::events::{Event, EventManager};
use crate::{decode_json, encode_json, KvIter, KvStore, Result, StorageError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Block the current state transition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    pub height: u64,
    /// Unix seconds.
    pub time: i64,
}

/// Store access, block header and event sink for one state transition.
pub struct Context<'a> {
    store: &'a mut dyn KvStore,
    header: BlockHeader,
    events: EventManager,
}

impl<'a> Context<'a> {
    pub fn new(store: &'a mut dyn KvStore, header: BlockHeader) -> Self {
        Self {
            store,
            header,
            events: EventManager::default(),
        }
    }

    pub fn header(&self) -> BlockHeader {
        self.header
    }

    pub fn block_time(&self) -> i64 {
        self.header.time
    }

    pub fn block_height(&self) -> u64 {
        self.header.height
    }

    pub fn store(&self) -> &dyn KvStore {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut dyn KvStore {
        &mut *self.store
    }

    pub fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.store.get(key)
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>> {
        self.store
            .get(key)?
            .map(|bytes| decode_json(key, &bytes))
            .transpose()
    }

    pub fn set_json<T: Serialize>(&mut self, key: &[u8], value: &T) -> Result<()> {
        let bytes = encode_json(value)?;
        self.store.set(key, bytes)
    }

    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.store.delete(key)
    }

    pub fn iter_prefix(&self, prefix: &[u8]) -> KvIter<'_> {
        self.store.iter_prefix(prefix)
    }

    /// Decoded values under `prefix`, lazily and in key order.
    pub fn iter_json<'s, T: DeserializeOwned + 's>(
        &'s self,
        prefix: &[u8],
    ) -> impl Iterator<Item = Result<(Vec<u8>, T)>> + 's {
        self.store.iter_prefix(prefix).map(|item| {
            let (key, bytes) = item?;
            let value = decode_json(&key, &bytes)?;
            Ok((key, value))
        })
    }

    pub fn emit(&mut self, event: Event) {
        self.events.emit(event);
    }

    pub fn emit_all(&mut self, events: impl IntoIterator<Item = Event>) {
        self.events.emit_all(events);
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    /// Run `f` against a cached branch of this context. The branch's writes
    /// and events are merged back only when `f` succeeds; on error nothing it
    /// did is observable.
    pub fn atomic<T, E, F>(&mut self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Context<'_>) -> std::result::Result<T, E>,
        E: From<StorageError>,
    {
        let header = self.header;
        let (result, writes, events) = {
            let mut cache = CacheStore::new(&*self.store);
            let mut branch = Context::new(&mut cache, header);
            let result = f(&mut branch);
            let events = branch.take_events();
            drop(branch);
            (result, cache.into_writes(), events)
        };

        match result {
            Ok(value) => {
                let count = writes.len();
                self.store.apply_batch(writes)?;
                self.events.emit_all(events);
                tracing::trace!(target: "storage", writes = count, "committed cached branch");
                Ok(value)
            }
            Err(err) => {
                tracing::trace!(
                    target: "storage",
                    discarded = writes.len(),
                    "discarded cached branch"
                );
                Err(err)
            }
        }
    }
}
