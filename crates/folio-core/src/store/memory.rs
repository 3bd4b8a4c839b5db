//! In-memory [`ContentClient`] for tests and offline use.
//!
//! Holds a [`Dataset`] behind `std::sync::RwLock` and evaluates each
//! contract natively with [`query::eval`](crate::query::eval) instead of
//! interpreting the contract's query string.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::{ContentClient, Dataset, DatasetError};
use crate::query::{eval, QueryContract, QueryParams};

pub struct InMemoryStore {
    dataset: RwLock<Dataset>,
    fetches: AtomicUsize,
}

impl InMemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: RwLock::new(dataset),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn from_ndjson(input: &str) -> Result<Self, DatasetError> {
        Ok(Self::new(Dataset::from_ndjson(input)?))
    }

    /// Add a document after construction.
    pub fn insert(&self, doc: Value) -> Result<(), DatasetError> {
        let mut dataset = self.dataset.write().unwrap_or_else(|e| e.into_inner());
        dataset.insert(doc)
    }

    /// Number of [`fetch`](ContentClient::fetch) calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Dataset::new())
    }
}

#[async_trait]
impl ContentClient for InMemoryStore {
    async fn fetch(&self, contract: &QueryContract, params: &QueryParams) -> Result<Value> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let dataset = self.dataset.read().unwrap_or_else(|e| e.into_inner());
        eval::evaluate(&dataset, contract, params)
    }
}
