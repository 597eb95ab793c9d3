use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::trace;

use super::Record;

struct Inner<T> {
    data: HashMap<i64, T>,
    next_id: i64,
}

/// Generic in-memory record store keyed by a store-assigned integer id.
///
/// Ids start at 1 and are never reused, even after deletion. Every operation
/// holds the single mutex for its whole duration, reads included.
pub struct Store<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Record> Store<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                data: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    // Each critical section is one map operation, so a poisoned guard still
    // points at consistent data.
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assign the next id to `record`, store it and return the stored copy.
    pub fn create(&self, mut record: T) -> T {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        record.set_id(id);
        inner.data.insert(id, record.clone());
        trace!(id, "record created");
        record
    }

    /// Get record by id.
    pub fn get(&self, id: i64) -> Option<T> {
        self.lock().data.get(&id).cloned()
    }

    /// All stored records, in no particular order.
    pub fn get_all(&self) -> Vec<T> {
        self.lock().data.values().cloned().collect()
    }

    /// Replace the record at `id` wholesale; returns whether it existed.
    ///
    /// The id field of `record` is stored as given, even if it differs from `id`.
    pub fn update(&self, id: i64, record: T) -> bool {
        let mut inner = self.lock();
        match inner.data.get_mut(&id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    /// Remove a record; returns whether it existed.
    pub fn delete(&self, id: i64) -> bool {
        self.lock().data.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Record> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}
