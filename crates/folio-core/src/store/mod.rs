//! Content store abstraction.
//!
//! The [`ContentClient`] trait is the one seam between the query façade and
//! wherever documents live: the hosted content API in production, or an
//! [`InMemoryStore`](memory::InMemoryStore) loaded from an NDJSON export in
//! tests and offline use.
//!
//! A [`Dataset`] is the in-memory document collection. Ordinary documents
//! are keyed by `_id`; singleton types (the professor profile) live in a
//! dedicated [`SingletonSlot`] so there is never more than one of them.

pub mod memory;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::query::{QueryContract, QueryParams};

/// Executes a query contract against some content store.
///
/// Implementations return the raw JSON result of the contract's projection:
/// an object (or `null`) for single-document contracts, an array for lists.
#[async_trait]
pub trait ContentClient: Send + Sync {
    async fn fetch(&self, contract: &QueryContract, params: &QueryParams) -> Result<Value>;
}

#[async_trait]
impl<C: ContentClient + ?Sized> ContentClient for Arc<C> {
    async fn fetch(&self, contract: &QueryContract, params: &QueryParams) -> Result<Value> {
        (**self).fetch(contract, params).await
    }
}

/// Document types that exist exactly once per dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SingletonSlot {
    Professor,
}

impl SingletonSlot {
    pub const ALL: [SingletonSlot; 1] = [SingletonSlot::Professor];

    /// Fixed document id of the slot.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Professor => "professor-profile",
        }
    }

    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Professor => "professor",
        }
    }

    pub fn for_type(type_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.type_name() == type_name)
    }
}

impl fmt::Display for SingletonSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("line {line}: invalid JSON: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("document is missing string field '{field}'")]
    MissingField { field: &'static str },
    #[error("duplicate document id '{id}'")]
    DuplicateId { id: String },
    #[error("singleton '{slot}' is already filled (second document '{id}')")]
    DuplicateSingleton { slot: SingletonSlot, id: String },
}

/// An immutable-once-loaded collection of content documents.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    documents: BTreeMap<String, Value>,
    singletons: BTreeMap<SingletonSlot, Value>,
    drafts_skipped: usize,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store export: one JSON document per line.
    ///
    /// Blank lines are ignored. Draft documents (ids prefixed `drafts.`)
    /// are skipped so the dataset reflects published content only.
    pub fn from_ndjson(input: &str) -> Result<Self, DatasetError> {
        let mut dataset = Self::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let doc: Value = serde_json::from_str(line).map_err(|source| DatasetError::Parse {
                line: idx + 1,
                source,
            })?;
            dataset.insert(doc)?;
        }
        tracing::debug!(
            documents = dataset.len(),
            drafts_skipped = dataset.drafts_skipped,
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Add one document.
    pub fn insert(&mut self, doc: Value) -> Result<(), DatasetError> {
        let id = doc
            .get("_id")
            .and_then(Value::as_str)
            .ok_or(DatasetError::MissingField { field: "_id" })?
            .to_string();
        let type_name = doc
            .get("_type")
            .and_then(Value::as_str)
            .ok_or(DatasetError::MissingField { field: "_type" })?;

        if id.starts_with("drafts.") {
            self.drafts_skipped += 1;
            return Ok(());
        }

        if let Some(slot) = SingletonSlot::for_type(type_name) {
            if self.singletons.contains_key(&slot) {
                return Err(DatasetError::DuplicateSingleton { slot, id });
            }
            self.singletons.insert(slot, doc);
            return Ok(());
        }

        if self.documents.contains_key(&id) {
            return Err(DatasetError::DuplicateId { id });
        }
        self.documents.insert(id, doc);
        Ok(())
    }

    /// Look up a document by id, including singletons.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.documents.get(id).or_else(|| {
            self.singletons
                .values()
                .find(|doc| doc.get("_id").and_then(Value::as_str) == Some(id))
        })
    }

    pub fn singleton(&self, slot: SingletonSlot) -> Option<&Value> {
        self.singletons.get(&slot)
    }

    /// Documents of one type, in id order.
    pub fn of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.documents
            .values()
            .filter(move |doc| doc.get("_type").and_then(Value::as_str) == Some(type_name))
    }

    /// Every document, singletons first.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.singletons.values().chain(self.documents.values())
    }

    pub fn len(&self) -> usize {
        self.documents.len() + self.singletons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn drafts_skipped(&self) -> usize {
        self.drafts_skipped
    }
}
