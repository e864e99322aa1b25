use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::traits::{KeyValue, StateIterator, WorldState};

/// In-memory, `BTreeMap`-based world state.
///
/// Intended for tests and embedding. Keys are kept sorted so range scans
/// come out in ascending order without extra work. Range scans copy the
/// matching entries when opened, so a scan never observes writes made
/// after it started.
pub struct InMemoryWorldState {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryWorldState {
    /// Create a new empty world state.
    pub fn new() -> Self {
        Self::from_entries(BTreeMap::new())
    }

    /// Create a world state pre-populated with `entries`.
    pub fn from_entries(entries: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Remove every key.
    pub fn clear(&self) {
        self.entries.write().expect("lock poisoned").clear();
    }

    /// All keys, in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Copy of every entry.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.entries.read().expect("lock poisoned").clone()
    }
}

impl Default for InMemoryWorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldState for InMemoryWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> StateResult<()> {
        let mut map = self.entries.write().expect("lock poisoned");
        map.insert(key.to_string(), value.to_vec());
        debug!(key, len = value.len(), "state put");
        Ok(())
    }

    fn delete_state(&self, key: &str) -> StateResult<()> {
        let mut map = self.entries.write().expect("lock poisoned");
        if map.remove(key).is_some() {
            debug!(key, "state delete");
        }
        Ok(())
    }

    fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> StateResult<Box<dyn StateIterator + '_>> {
        if !start_key.is_empty() && !end_key.is_empty() && start_key > end_key {
            return Err(StateError::InvalidRange {
                start: start_key.to_string(),
                end: end_key.to_string(),
            });
        }

        let lower = if start_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_key)
        };
        let upper = if end_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end_key)
        };

        let map = self.entries.read().expect("lock poisoned");
        let entries: Vec<KeyValue> = map
            .range::<str, _>((lower, upper))
            .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
            .collect();

        Ok(Box::new(MemoryStateIterator {
            entries: entries.into_iter(),
            closed: false,
        }))
    }
}

impl std::fmt::Debug for InMemoryWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryWorldState")
            .field("key_count", &self.len())
            .finish()
    }
}

/// Scan over a copied range of an [`InMemoryWorldState`].
struct MemoryStateIterator {
    entries: std::vec::IntoIter<KeyValue>,
    closed: bool,
}

impl Iterator for MemoryStateIterator {
    type Item = StateResult<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.entries.next().map(Ok)
    }
}

impl StateIterator for MemoryStateIterator {
    fn close(&mut self) -> StateResult<()> {
        self.closed = true;
        Ok(())
    }
}
