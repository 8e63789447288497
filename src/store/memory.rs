//! In-process document store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{Document, DocumentStore, WriteBatch, WriteOp};

type Collection = Vec<(String, Document)>;
type Collections = HashMap<String, Collection>;

/// A [`DocumentStore`] held in memory behind a read/write lock.
///
/// Documents keep insertion order; replacing a document keeps its position.
/// New ids are v4 UUIDs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Collections>> {
        self.collections.read().map_err(|e| EngineError::Store {
            message: format!("store lock poisoned: {}", e),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Collections>> {
        self.collections.write().map_err(|e| EngineError::Store {
            message: format!("store lock poisoned: {}", e),
        })
    }
}

fn upsert(collections: &mut Collections, collection: &str, id: &str, document: Document) {
    let docs = collections.entry(collection.to_string()).or_default();
    match docs.iter_mut().find(|(existing, _)| existing == id) {
        Some((_, slot)) => *slot = document,
        None => docs.push((id.to_string(), document)),
    }
}

fn merge_fields(collections: &mut Collections, collection: &str, id: &str, fields: Document) -> EngineResult<()> {
    let slot = collections
        .get_mut(collection)
        .and_then(|docs| docs.iter_mut().find(|(existing, _)| existing == id))
        .ok_or_else(|| EngineError::DocumentNotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;
    for (key, value) in fields {
        slot.1.insert(key, value);
    }
    Ok(())
}

fn remove(collections: &mut Collections, collection: &str, id: &str) -> bool {
    let Some(docs) = collections.get_mut(collection) else {
        return false;
    };
    let before = docs.len();
    docs.retain(|(existing, _)| existing != id);
    docs.len() != before
}

impl DocumentStore for MemoryStore {
    fn list(&self, collection: &str) -> EngineResult<Vec<(String, Document)>> {
        Ok(self.read()?.get(collection).cloned().unwrap_or_default())
    }

    fn get(&self, collection: &str, id: &str) -> EngineResult<Option<Document>> {
        Ok(self.read()?.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(existing, _)| existing == id)
                .map(|(_, document)| document.clone())
        }))
    }

    fn add(&self, collection: &str, document: Document) -> EngineResult<String> {
        let id = Uuid::new_v4().to_string();
        self.write()?
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), document));
        Ok(id)
    }

    fn set(&self, collection: &str, id: &str, document: Document) -> EngineResult<()> {
        upsert(&mut *self.write()?, collection, id, document);
        Ok(())
    }

    fn merge(&self, collection: &str, id: &str, fields: Document) -> EngineResult<()> {
        merge_fields(&mut *self.write()?, collection, id, fields)
    }

    fn delete(&self, collection: &str, id: &str) -> EngineResult<bool> {
        Ok(remove(&mut *self.write()?, collection, id))
    }

    fn commit(&self, batch: WriteBatch) -> EngineResult<()> {
        let mut guard = self.write()?;
        // Apply to a copy so a failing write leaves the store untouched.
        let mut staged = guard.clone();
        let op_count = batch.len();

        for op in batch.into_ops() {
            match op {
                WriteOp::Set {
                    collection,
                    id,
                    document,
                } => upsert(&mut staged, &collection, &id, document),
                WriteOp::Merge {
                    collection,
                    id,
                    fields,
                } => merge_fields(&mut staged, &collection, &id, fields)?,
                WriteOp::Delete { collection, id } => {
                    remove(&mut staged, &collection, &id);
                }
            }
        }

        *guard = staged;
        debug!(op_count = op_count, "Committed write batch");
        Ok(())
    }
}
