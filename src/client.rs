//! Content store clients.
//!
//! [`HttpContentClient`] runs a contract's query text against the hosted
//! query API:
//!
//! ```text
//! GET https://{project}.{api|apicdn}.sanity.io/v{version}/data/query/{dataset}
//!     ?query=<query text>&$slug="<json-encoded value>"
//! ```
//!
//! `[store].api_url` replaces the scheme and host. The response body is
//! `{ "result": ... }`; `"result": null` is a valid empty result, a body
//! without the key is an error. Non-2xx statuses are errors; there are no
//! retries. [`create_client`] picks the HTTP client or an
//! in-memory store over an NDJSON export, depending on `[store].backend`.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use folio_core::query::{QueryContract, QueryParams};
use folio_core::store::memory::InMemoryStore;
use folio_core::store::ContentClient;
use reqwest::Url;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{Backend, Config, StoreConfig};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("query API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("query API response has no 'result' field")]
    MissingResult,
}

pub struct HttpContentClient {
    http: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

impl HttpContentClient {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let base = match &config.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                let host = if config.use_cdn { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", config.project_id, host)
            }
        };
        let endpoint = format!(
            "{}/v{}/data/query/{}",
            base, config.api_version, config.dataset
        );
        let endpoint = Url::parse(&endpoint)
            .with_context(|| format!("Invalid query endpoint: {}", endpoint))?;

        let token = match &config.token_env {
            Some(var) => match std::env::var(var) {
                Ok(token) if !token.is_empty() => Some(token),
                _ => {
                    tracing::warn!(var = %var, "token variable is unset, querying anonymously");
                    None
                }
            },
            None => None,
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for one contract execution.
    ///
    /// Each parameter is sent as `$name=<json>`, so strings keep their quotes.
    pub fn query_url(&self, contract: &QueryContract, params: &QueryParams) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", contract.groq);
            for (name, value) in params.iter() {
                pairs.append_pair(&format!("${}", name), &value.to_string());
            }
        }
        url
    }
}

#[async_trait]
impl ContentClient for HttpContentClient {
    async fn fetch(&self, contract: &QueryContract, params: &QueryParams) -> Result<Value> {
        let url = self.query_url(contract, params);
        tracing::debug!(contract = contract.name, "querying content API");

        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("request for '{}' failed", contract.name))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let mut body: Map<String, Value> = response
            .json()
            .await
            .with_context(|| format!("invalid response body for '{}'", contract.name))?;
        body.remove("result")
            .ok_or_else(|| anyhow!(ApiError::MissingResult))
    }
}

/// Build the configured store client.
pub fn create_client(config: &Config) -> Result<Arc<dyn ContentClient>> {
    match config.store.backend {
        Backend::Api => Ok(Arc::new(HttpContentClient::new(&config.store)?)),
        Backend::Fixture => {
            let path = config
                .store
                .fixture
                .as_ref()
                .ok_or_else(|| anyhow!("store.fixture must be set when backend is 'fixture'"))?;
            let input = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read fixture: {}", path.display()))?;
            let store = InMemoryStore::from_ndjson(&input)
                .with_context(|| format!("Failed to load fixture: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded fixture store");
            Ok(Arc::new(store))
        }
    }
}
