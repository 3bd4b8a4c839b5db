//! Query façade behaviour against counting and failing clients.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use folio_core::facade::{QueryError, QueryFacade};
use folio_core::format::{format_citation, CitationStyle};
use folio_core::query::{self, QueryContract, QueryParams};
use folio_core::store::memory::InMemoryStore;
use folio_core::store::ContentClient;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const FIXTURE: &str = include_str!("fixtures/portfolio.ndjson");

// ─── Test Clients ───────────────────────────────────────────────────

/// Counts calls and answers every contract with a fixed value.
struct CountingClient {
    calls: AtomicUsize,
    answer: Value,
}

impl CountingClient {
    fn new(answer: Value) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            answer,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentClient for CountingClient {
    async fn fetch(&self, _contract: &QueryContract, _params: &QueryParams) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}

struct FailingClient;

#[async_trait]
impl ContentClient for FailingClient {
    async fn fetch(&self, _contract: &QueryContract, _params: &QueryParams) -> Result<Value> {
        bail!("401 Unauthorized: invalid token")
    }
}

fn fixture_facade() -> QueryFacade<InMemoryStore> {
    QueryFacade::new(InMemoryStore::from_ndjson(FIXTURE).unwrap())
}

// ─── Cache ──────────────────────────────────────────────────────────

#[tokio::test]
async fn identical_calls_fetch_once() {
    let facade = QueryFacade::new(CountingClient::new(json!([])));
    let params = QueryParams::new();

    facade.execute(&query::CV_ENTRIES, &params).await.unwrap();
    facade.execute(&query::CV_ENTRIES, &params).await.unwrap();
    facade.cv_entries().await.unwrap();

    assert_eq!(facade.client().calls(), 1);
    assert_eq!(facade.cached_entries(), 1);
}

#[tokio::test]
async fn differing_params_fetch_independently() {
    let facade = QueryFacade::new(CountingClient::new(Value::Null));

    facade.course("math-5210").await.unwrap();
    facade.course("math-1010").await.unwrap();
    facade.course("math-5210").await.unwrap();
    facade.publication("math-5210").await.unwrap();

    assert_eq!(facade.client().calls(), 3);
}

#[tokio::test]
async fn clear_starts_a_new_scope() {
    let facade = QueryFacade::new(CountingClient::new(json!([])));
    facade.research_areas().await.unwrap();
    facade.clear();
    assert_eq!(facade.cached_entries(), 0);
    facade.research_areas().await.unwrap();
    assert_eq!(facade.client().calls(), 2);
}

#[tokio::test]
async fn separate_facades_do_not_share_a_cache() {
    let store = std::sync::Arc::new(InMemoryStore::from_ndjson(FIXTURE).unwrap());
    let first = QueryFacade::new(store.clone());
    let second = QueryFacade::new(store.clone());

    first.professor().await.unwrap();
    second.professor().await.unwrap();
    first.professor().await.unwrap();

    assert_eq!(store.fetch_count(), 2);
}

// ─── Errors ─────────────────────────────────────────────────────────

#[tokio::test]
async fn store_failures_are_wrapped_with_status_500() {
    let facade = QueryFacade::new(FailingClient);
    let err = facade.professor().await.unwrap_err();
    match &err {
        QueryError::Store {
            status, contract, ..
        } => {
            assert_eq!(*status, 500);
            assert_eq!(*contract, "professor");
        }
        other => panic!("unexpected error: {other}"),
    }
    let cause = std::error::Error::source(&err).unwrap().to_string();
    assert!(cause.contains("401 Unauthorized"));
    assert_eq!(facade.cached_entries(), 0);
}

#[tokio::test]
async fn missing_params_never_reach_the_client() {
    let facade = QueryFacade::new(CountingClient::new(Value::Null));
    let err = facade
        .execute(&query::COURSE, &QueryParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::Params(_)));
    assert_eq!(err.status(), 400);
    assert_eq!(facade.client().calls(), 0);
}

#[tokio::test]
async fn wrong_shape_is_a_decode_error() {
    let facade = QueryFacade::new(CountingClient::new(json!({"unexpected": true})));
    let err = facade.recent_publications().await.unwrap_err();
    assert!(matches!(err, QueryError::Decode { contract: "recentPublications", .. }));
}

#[tokio::test]
async fn null_list_result_is_empty() {
    let facade = QueryFacade::new(CountingClient::new(Value::Null));
    assert!(facade.recent_blog_posts().await.unwrap().is_empty());
}

// ─── Typed Helpers ──────────────────────────────────────────────────

#[tokio::test]
async fn missing_slug_is_none() {
    let facade = fixture_facade();
    assert!(facade.blog_post("no-such-post").await.unwrap().is_none());
    assert!(facade.course("no-such-course").await.unwrap().is_none());
    assert!(facade.research_project("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn professor_profile_resolves_references() {
    let facade = fixture_facade();
    let profile = facade.professor().await.unwrap().unwrap();
    assert_eq!(profile.header_name(), "Ada Lovelace");
    let areas: Vec<&str> = profile
        .primary_research_areas
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(areas, vec!["Low-Dimensional Topology", "Analytic Number Theory"]);
    let asset = profile.profile_image.unwrap().asset.unwrap();
    assert!(asset.url.unwrap().ends_with("Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"));
    assert_eq!(asset.metadata.unwrap().dimensions.unwrap().width, 2000.0);
}

#[tokio::test]
async fn publication_by_slug() {
    let facade = fixture_facade();
    let publication = facade
        .publication("khovanov-homology-and-braid-closures")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(publication.authors.len(), 2);
    assert_eq!(publication.related_research[0].title, "Quantum Invariants of Knots");
    assert_eq!(publication.research_areas[0].slug.as_ref().unwrap().as_str(), "low-dimensional-topology");
}

#[tokio::test]
async fn search_hits_are_typed() {
    let facade = fixture_facade();
    let hits = facade.search("reflections").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "post-teaching-topology");
    assert_eq!(hits[0].preview.as_deref(), Some("Reflections on teaching manifolds with playdough."));
    assert_eq!(hits[0].date.as_deref(), Some("2024-02-01T09:00:00Z"));
}

#[tokio::test]
async fn projected_nulls_decode_to_placeholders() {
    let export = r#"{"_id":"pub-untitled","_type":"publication","slug":{"current":"untitled"},"authors":[{"affiliation":"MIT"}],"year":2021,"status":"published"}"#;
    let facade = QueryFacade::new(InMemoryStore::from_ndjson(export).unwrap());

    let publication = facade.publication("untitled").await.unwrap().unwrap();
    assert_eq!(publication.title, "");
    assert_eq!(publication.authors[0].name, "");
    assert_eq!(
        format_citation(&publication, CitationStyle::Apa),
        "Unknown Author (2021). Untitled."
    );

    let recent = facade.recent_publications().await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, "pub-untitled");
}
