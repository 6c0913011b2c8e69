// store/records.rs - append-only in-memory collections with sequential ids

pub mod model;

use model::Record;
use std::sync::{Mutex, MutexGuard};

/// An append-only list of records of one kind.
///
/// Ids start at 1 and follow insertion order. Nothing is ever updated or removed, so
/// the id of a record is always its position plus one.
#[derive(Debug)]
pub struct ResourceStore<T> {
    records: Mutex<Vec<Record<T>>>,
}

impl<T> Default for ResourceStore<T> {
    fn default() -> Self {
        ResourceStore::new()
    }
}

impl<T> ResourceStore<T> {
    pub fn new() -> Self {
        ResourceStore {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record<T>>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Clone> ResourceStore<T> {
    pub fn append(&self, fields: T) -> Record<T> {
        // id assignment and push share one guard so concurrent appends stay gap-free
        let mut records = self.lock();
        let record = Record {
            id: records.len() as u64 + 1,
            fields,
            created_at: chrono::Utc::now(),
        };
        records.push(record.clone());
        record
    }

    pub fn find_by_id(&self, id: u64) -> Option<Record<T>> {
        self.lock().iter().find(|record| record.id == id).cloned()
    }
}
