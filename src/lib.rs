//! # Folio
//!
//! Content-query and formatting layer for a single professor's academic
//! portfolio, served from a hosted document store.
//!
//! The pure parts (content model, query contracts, caching façade,
//! citation and date formatting, image URLs) live in [`folio_core`]. This
//! crate wires them to the outside world: a TOML config, an HTTP client for
//! the hosted query API, the `folio` CLI and a read-only JSON data API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌────────────────────┐
//! │  CLI / API   │──▶│ QueryFacade  │──▶│   ContentClient    │
//! │ (folio,axum) │   │ (per scope)  │   │ HTTP │ NDJSON mem  │
//! └──────────────┘   └──────────────┘   └────────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`client`] | Hosted query API client, backend selection |
//! | [`query`] | List and run named queries |
//! | [`search`] | Cross-type search output |
//! | [`cite`] | Publication citations |
//! | [`cv`] | CV rendering |
//! | [`image`] | Image URL resolution |
//! | [`list`] | Export listings in editor orderings |
//! | [`check`] | Export validation |
//! | [`server`] | JSON data API |

pub mod check;
pub mod cite;
pub mod client;
pub mod config;
pub mod cv;
pub mod image;
pub mod list;
pub mod query;
pub mod search;
pub mod server;
