//! Document store abstraction.
//!
//! The roster lives in named collections of JSON documents keyed by id.
//! [`DocumentStore`] is the seam between the roster operations and the
//! backend; [`MemoryStore`] is the in-process implementation.
//!
//! Related writes that must land together (rename cascades, schedule
//! replacement) go through a [`WriteBatch`], which a store applies all or
//! nothing.

mod memory;

pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{EngineError, EngineResult};

/// A stored document: a JSON object without its id.
pub type Document = Map<String, Value>;

/// Collection names.
pub mod collections {
    /// Employee records.
    pub const EMPLOYEES: &str = "employees";
    /// Shifts.
    pub const SCHEDULES: &str = "schedules";
    /// Recurring operational costs.
    pub const OPERATIONAL_COSTS: &str = "operational_costs";
    /// Roles vocabulary, keyed by name.
    pub const ROLES: &str = "roles";
    /// Areas vocabulary, keyed by name.
    pub const AREAS: &str = "areas";
    /// Singleton settings documents.
    pub const SETTINGS: &str = "settings";
    /// Dashboard user profiles.
    pub const USERS: &str = "users";
    /// Id of the opening-hours document in [`SETTINGS`].
    pub const BUSINESS_HOURS_DOC: &str = "horarios_funcionamento";
    /// Id of the document in [`SETTINGS`] recording which vocabularies
    /// have been seeded from configuration.
    pub const VOCABULARY_SEED_DOC: &str = "vocabulary_seed";

    /// Attachment metadata for one employee.
    pub fn attachments(employee_id: &str) -> String {
        format!("{}/{}/attachments", EMPLOYEES, employee_id)
    }

    /// Change history for one employee.
    pub fn history(employee_id: &str) -> String {
        format!("{}/{}/history", EMPLOYEES, employee_id)
    }
}

/// One write inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Create or replace a document.
    Set {
        collection: String,
        id: String,
        document: Document,
    },
    /// Overwrite the given fields of an existing document.
    Merge {
        collection: String,
        id: String,
        fields: Document,
    },
    /// Remove a document if present.
    Delete { collection: String, id: String },
}

/// An ordered group of writes committed atomically.
///
/// # Example
///
/// ```
/// use roster_engine::store::{DocumentStore, MemoryStore, WriteBatch};
/// use serde_json::json;
///
/// let store = MemoryStore::new();
/// let mut batch = WriteBatch::new();
/// batch.set("roles", "Treinador", json!({"name": "Treinador"}).as_object().unwrap().clone());
/// batch.delete("roles", "Instrutor");
/// store.commit(batch).unwrap();
///
/// assert!(store.get("roles", "Treinador").unwrap().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a create-or-replace.
    pub fn set(&mut self, collection: impl Into<String>, id: impl Into<String>, document: Document) {
        self.ops.push(WriteOp::Set {
            collection: collection.into(),
            id: id.into(),
            document,
        });
    }

    /// Queues a field merge. The commit fails if the document is missing.
    pub fn merge(&mut self, collection: impl Into<String>, id: impl Into<String>, fields: Document) {
        self.ops.push(WriteOp::Merge {
            collection: collection.into(),
            id: id.into(),
            fields,
        });
    }

    /// Queues a delete.
    pub fn delete(&mut self, collection: impl Into<String>, id: impl Into<String>) {
        self.ops.push(WriteOp::Delete {
            collection: collection.into(),
            id: id.into(),
        });
    }

    /// Number of queued writes.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The queued writes, in order.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Consumes the batch.
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// A collection/document store.
///
/// Implementations must be safe to share across request handlers.
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection`, in insertion order.
    fn list(&self, collection: &str) -> EngineResult<Vec<(String, Document)>>;

    /// One document, or `None` if absent.
    fn get(&self, collection: &str, id: &str) -> EngineResult<Option<Document>>;

    /// Inserts a document under a fresh id and returns the id.
    fn add(&self, collection: &str, document: Document) -> EngineResult<String>;

    /// Creates or replaces a document under `id`.
    fn set(&self, collection: &str, id: &str, document: Document) -> EngineResult<()>;

    /// Overwrites the given fields of an existing document.
    ///
    /// Fails with `DocumentNotFound` when the document does not exist.
    fn merge(&self, collection: &str, id: &str, fields: Document) -> EngineResult<()>;

    /// Removes a document. Returns false if it did not exist.
    fn delete(&self, collection: &str, id: &str) -> EngineResult<bool>;

    /// Applies every write in `batch`, or none of them.
    fn commit(&self, batch: WriteBatch) -> EngineResult<()>;
}

/// Serializes a record into a document, dropping its `id` field.
pub fn to_document<T: Serialize>(collection: &str, record: &T) -> EngineResult<Document> {
    let value = serde_json::to_value(record).map_err(|e| EngineError::Serialization {
        collection: collection.to_string(),
        message: e.to_string(),
    })?;
    match value {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => Err(EngineError::Serialization {
            collection: collection.to_string(),
            message: format!("expected an object, got {}", other),
        }),
    }
}

/// Deserializes a stored document, injecting `id` into it first.
pub fn from_document<T: DeserializeOwned>(
    collection: &str,
    id: &str,
    mut document: Document,
) -> EngineResult<T> {
    document.insert("id".to_string(), Value::String(id.to_string()));
    serde_json::from_value(Value::Object(document)).map_err(|e| EngineError::Serialization {
        collection: collection.to_string(),
        message: format!("document {}: {}", id, e),
    })
}

/// Lists and decodes a whole collection.
pub fn list_as<T: DeserializeOwned>(store: &dyn DocumentStore, collection: &str) -> EngineResult<Vec<T>> {
    store
        .list(collection)?
        .into_iter()
        .map(|(id, document)| from_document(collection, &id, document))
        .collect()
}

/// Fetches and decodes one document, failing with `DocumentNotFound`.
pub fn get_as<T: DeserializeOwned>(store: &dyn DocumentStore, collection: &str, id: &str) -> EngineResult<T> {
    let document = store
        .get(collection, id)?
        .ok_or_else(|| EngineError::DocumentNotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?;
    from_document(collection, id, document)
}
