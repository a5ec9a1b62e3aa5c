//! Write-back cache layered over a read-only parent store.
//!
//! Reads see the cache first, then the parent. Writes stay in the cache until
//! the owner takes them with [`CacheStore::into_writes`] and applies them to
//! the parent as one batch; dropping the cache discards them.

use crate::{BatchOp, KvIter, KvPair, KvStore, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::Peekable;

pub struct CacheStore<'p> {
    parent: &'p dyn KvStore,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'p> CacheStore<'p> {
    pub fn new(parent: &'p dyn KvStore) -> Self {
        Self {
            parent,
            writes: BTreeMap::new(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.writes.is_empty()
    }

    pub fn into_writes(self) -> Vec<BatchOp> {
        self.writes.into_iter().collect()
    }
}

impl KvStore for CacheStore<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        match self.writes.get(key) {
            Some(cached) => Ok(cached.clone()),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.writes.insert(key.to_vec(), Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn iter_prefix<'a>(&'a self, prefix: &[u8]) -> KvIter<'a> {
        let owned = prefix.to_vec();
        let cached = self
            .writes
            .range(owned.clone()..)
            .take_while(move |(k, _)| k.starts_with(&owned));
        Box::new(MergeIter {
            parent: self.parent.iter_prefix(prefix).peekable(),
            cached: (Box::new(cached) as CachedIter<'a>).peekable(),
        })
    }

    fn apply_batch(&mut self, batch: Vec<BatchOp>) -> Result<()> {
        self.writes.extend(batch);
        Ok(())
    }
}

type CachedIter<'a> = Box<dyn Iterator<Item = (&'a Vec<u8>, &'a Option<Vec<u8>>)> + 'a>;

/// Ordered merge of parent entries and cached writes; cached entries shadow
/// the parent and cached deletions hide it.
struct MergeIter<'a> {
    parent: Peekable<KvIter<'a>>,
    cached: Peekable<CachedIter<'a>>,
}

enum Step {
    Parent,
    Cached,
    Shadowed,
}

impl Iterator for MergeIter<'_> {
    type Item = Result<KvPair>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match (self.parent.peek(), self.cached.peek()) {
                (None, None) => return None,
                (Some(Err(_)), _) => return self.parent.next(),
                (Some(Ok(_)), None) => Step::Parent,
                (None, Some(_)) => Step::Cached,
                (Some(Ok((pk, _))), Some((ck, _))) => match ck.as_slice().cmp(pk.as_slice()) {
                    Ordering::Less => Step::Cached,
                    Ordering::Equal => Step::Shadowed,
                    Ordering::Greater => Step::Parent,
                },
            };
            match step {
                Step::Parent => return self.parent.next(),
                Step::Shadowed => {
                    self.parent.next();
                }
                Step::Cached => {}
            }
            if let Some((key, Some(value))) = self.cached.next() {
                return Some(Ok((key.clone(), value.clone())));
            }
        }
    }
}
