//! Read-only JSON data API.
//!
//! Serves query contract results over HTTP for a presentation layer that
//! cannot link the library directly. Every request gets its own
//! [`QueryFacade`], so the cache scope is exactly one request; the store
//! client is shared.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/queries` | List query contracts |
//! | `POST` | `/queries/{name}` | Run a contract with a JSON params object |
//! | `GET`  | `/search?q=` | Cross-type search |
//! | `GET`  | `/home` | Home page data in one cache scope |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "query 'course' requires parameter 'slug'" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `store_error` (500),
//! `bad_gateway` (502).

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use folio_core::facade::{QueryError, QueryFacade};
use folio_core::image::ImageSource;
use folio_core::query::{self, QueryContract, QueryParams};
use folio_core::store::ContentClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::client::create_client;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    client: Arc<dyn ContentClient>,
}

impl AppState {
    pub fn new(config: Config, client: Arc<dyn ContentClient>) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    fn facade(&self) -> QueryFacade<Arc<dyn ContentClient>> {
        QueryFacade::new(self.client.clone())
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/queries", get(handle_list_queries))
        .route("/queries/{name}", post(handle_query))
        .route("/search", get(handle_search))
        .route("/home", get(handle_home))
        .layer(cors)
        .with_state(state)
}

/// Bind to `[server].bind` and serve until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let client = create_client(config)?;
    let app = router(AppState::new(config.clone(), client));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "data API listening");
    println!("Data API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found",
        message: message.into(),
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        let status =
            StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = match &err {
            QueryError::Params(_) => "bad_request",
            QueryError::Decode { .. } => "bad_gateway",
            QueryError::Store { .. } => "store_error",
        };
        if status.is_server_error() {
            tracing::error!(error = %err, "query failed");
        }
        AppError {
            status,
            code,
            message: err.to_string(),
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============ GET /queries ============

#[derive(Serialize)]
struct QueryListResponse {
    queries: &'static [QueryContract],
}

async fn handle_list_queries() -> Json<QueryListResponse> {
    Json(QueryListResponse {
        queries: query::ALL,
    })
}

// ============ POST /queries/{name} ============

async fn handle_query(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let contract = query::by_name(&name)
        .ok_or_else(|| not_found(format!("no query named: {}", name)))?;
    // An empty body means no parameters.
    let params: QueryParams = if body.iter().all(u8::is_ascii_whitespace) {
        QueryParams::new()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| bad_request(format!("params must be a JSON object: {}", e)))?
    };

    let result = state.facade().execute(contract, &params).await?;
    Ok(Json(json!({ "result": result })))
}

// ============ GET /search ============

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

async fn handle_search(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    if search.q.trim().is_empty() {
        return Err(bad_request("q must not be empty"));
    }
    let hits = state.facade().search(&search.q).await?;
    Ok(Json(json!({ "hits": hits })))
}

// ============ GET /home ============

async fn handle_home(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let facade = state.facade();
    let (professor, research, publications, posts, courses) = tokio::try_join!(
        facade.professor(),
        facade.featured_research(),
        facade.recent_publications(),
        facade.recent_blog_posts(),
        facade.current_courses(),
    )?;

    let profile_image_url = professor
        .as_ref()
        .and_then(|p| p.profile_image.clone())
        .and_then(|field| {
            state.config.image_builder().resolve(
                Some(&ImageSource::Field(field)),
                &state.config.images.options(),
            )
        });

    Ok(Json(json!({
        "professor": professor,
        "profileImageUrl": profile_image_url,
        "featuredResearch": research,
        "recentPublications": publications,
        "recentBlogPosts": posts,
        "currentCourses": courses,
    })))
}
