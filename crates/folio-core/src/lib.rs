//! # Folio Core
//!
//! Content-query and formatting layer for an academic portfolio: the
//! content model, slug and validation utilities, citation and date
//! formatting, typed query contracts, the caching query façade, and image
//! URL resolution.
//!
//! This crate performs no network or filesystem I/O. Stores plug in through
//! the [`store::ContentClient`] trait; [`store::memory::InMemoryStore`]
//! evaluates every contract natively over a loaded [`store::Dataset`].
//!
//! ```rust
//! use folio_core::facade::QueryFacade;
//! use folio_core::store::memory::InMemoryStore;
//!
//! # tokio_test_block(async {
//! let store = InMemoryStore::from_ndjson(
//!     r#"{"_id":"professor-profile","_type":"professor","fullName":"Ada Lovelace"}"#,
//! ).unwrap();
//! let facade = QueryFacade::new(store);
//! let profile = facade.professor().await.unwrap().unwrap();
//! assert_eq!(profile.full_name, "Ada Lovelace");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod collections;
pub mod content;
pub mod facade;
pub mod format;
pub mod image;
pub mod models;
pub mod query;
pub mod schema;
pub mod search;
pub mod store;
pub mod text;
pub mod validation;
