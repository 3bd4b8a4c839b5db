//! Caching query façade.
//!
//! [`QueryFacade`] is the single entry point the presentation layer uses to
//! read content. It binds parameters, executes a contract through a
//! [`ContentClient`], memoizes the raw result per `(query, params)` and
//! decodes it into the contract's read model.
//!
//! A façade is one cache scope: create one per page render or HTTP request
//! and drop it afterwards. Entries never expire within a scope;
//! [`QueryFacade::clear`] starts a fresh one. The cache lock is never held
//! across an `.await`.
//!
//! # Errors
//!
//! Every client failure becomes [`QueryError::Store`] with status 500 and
//! the original cause attached. A by-slug lookup that finds nothing is
//! `Ok(None)`, not an error.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{
    BlogPost, Course, CurrentCourse, CvEntry, Professor, Publication, Research, ResearchArea,
    SearchHit,
};
use crate::query::{self, ParamError, QueryContract, QueryParams};
use crate::store::ContentClient;

/// Status category attached to store failures.
pub const STORE_FAILURE_STATUS: u16 = 500;

const CACHE_KEY_PREFIX: &str = "content:";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to fetch '{contract}' from the content store")]
    Store {
        status: u16,
        contract: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("unexpected result shape for '{contract}': {source}")]
    Decode {
        contract: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Params(#[from] ParamError),
}

impl QueryError {
    /// HTTP-like status category.
    pub fn status(&self) -> u16 {
        match self {
            QueryError::Store { status, .. } => *status,
            QueryError::Decode { .. } => 502,
            QueryError::Params(_) => 400,
        }
    }
}

/// Cache key for a contract execution: `content:` + SHA-256 of
/// `{"query": <text>, "params": <params>}`.
pub fn cache_key(contract: &QueryContract, params: &QueryParams) -> String {
    let material = json!({ "query": contract.groq, "params": params });
    let digest = Sha256::digest(material.to_string().as_bytes());
    format!("{}{}", CACHE_KEY_PREFIX, hex::encode(digest))
}

pub struct QueryFacade<C> {
    client: C,
    cache: Mutex<HashMap<String, Value>>,
}

impl<C: ContentClient> QueryFacade<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Drop every cached result.
    pub fn clear(&self) {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Execute a contract and return its raw JSON result.
    pub async fn execute(
        &self,
        contract: &QueryContract,
        params: &QueryParams,
    ) -> Result<Value, QueryError> {
        params.bind(contract)?;
        let key = cache_key(contract, params);

        let cached = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .cloned();
        if let Some(value) = cached {
            tracing::debug!(contract = contract.name, "cache hit");
            return Ok(value);
        }
        tracing::debug!(contract = contract.name, "cache miss");

        let value = self
            .client
            .fetch(contract, params)
            .await
            .map_err(|source| {
                tracing::warn!(contract = contract.name, error = %source, "content store fetch failed");
                QueryError::Store {
                    status: STORE_FAILURE_STATUS,
                    contract: contract.name,
                    source,
                }
            })?;

        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, value.clone());
        Ok(value)
    }

    /// Execute a contract and decode the result.
    pub async fn fetch_as<T: DeserializeOwned>(
        &self,
        contract: &QueryContract,
        params: &QueryParams,
    ) -> Result<T, QueryError> {
        let value = self.execute(contract, params).await?;
        serde_json::from_value(value).map_err(|source| QueryError::Decode {
            contract: contract.name,
            source,
        })
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        contract: &QueryContract,
        params: &QueryParams,
    ) -> Result<Vec<T>, QueryError> {
        Ok(self
            .fetch_as::<Option<Vec<T>>>(contract, params)
            .await?
            .unwrap_or_default())
    }

    async fn fetch_by_slug<T: DeserializeOwned>(
        &self,
        contract: &QueryContract,
        slug: &str,
    ) -> Result<Option<T>, QueryError> {
        let params = QueryParams::new().with("slug", slug);
        self.fetch_as(contract, &params).await
    }

    pub async fn professor(&self) -> Result<Option<Professor>, QueryError> {
        self.fetch_as(&query::PROFESSOR, &QueryParams::new()).await
    }

    pub async fn featured_research(&self) -> Result<Vec<Research>, QueryError> {
        self.fetch_list(&query::FEATURED_RESEARCH, &QueryParams::new())
            .await
    }

    pub async fn recent_publications(&self) -> Result<Vec<Publication>, QueryError> {
        self.fetch_list(&query::RECENT_PUBLICATIONS, &QueryParams::new())
            .await
    }

    pub async fn recent_blog_posts(&self) -> Result<Vec<BlogPost>, QueryError> {
        self.fetch_list(&query::RECENT_BLOG_POSTS, &QueryParams::new())
            .await
    }

    pub async fn current_courses(&self) -> Result<Vec<CurrentCourse>, QueryError> {
        self.fetch_list(&query::CURRENT_COURSES, &QueryParams::new())
            .await
    }

    pub async fn research_areas(&self) -> Result<Vec<ResearchArea>, QueryError> {
        self.fetch_list(&query::RESEARCH_AREAS, &QueryParams::new())
            .await
    }

    pub async fn research_project(&self, slug: &str) -> Result<Option<Research>, QueryError> {
        self.fetch_by_slug(&query::RESEARCH_PROJECT, slug).await
    }

    pub async fn publication(&self, slug: &str) -> Result<Option<Publication>, QueryError> {
        self.fetch_by_slug(&query::PUBLICATION, slug).await
    }

    pub async fn blog_post(&self, slug: &str) -> Result<Option<BlogPost>, QueryError> {
        self.fetch_by_slug(&query::BLOG_POST, slug).await
    }

    pub async fn cv_entries(&self) -> Result<Vec<CvEntry>, QueryError> {
        self.fetch_list(&query::CV_ENTRIES, &QueryParams::new())
            .await
    }

    pub async fn course(&self, slug: &str) -> Result<Option<Course>, QueryError> {
        self.fetch_by_slug(&query::COURSE, slug).await
    }

    pub async fn search(&self, term: &str) -> Result<Vec<SearchHit>, QueryError> {
        let params = QueryParams::new().with("searchTerm", term);
        self.fetch_list(&query::SEARCH, &params).await
    }
}
