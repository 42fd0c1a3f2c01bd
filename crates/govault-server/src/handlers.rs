//! HTTP request handlers for the relationship service.
//!
//! Implements relationship, impact, candidate analysis and health endpoints
//! using axum. Every request opens its own record store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use govault_domain::{FieldValue, ImpactReport, Record, RelatedDocument, Relationship};
use govault_engine::{ImpactAnalyzer, RelationshipEngine};
use govault_store::{SqliteRecordStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Relationship engine
    pub engine: RelationshipEngine,
    /// Impact analyzer built on the same engine
    pub analyzer: Arc<ImpactAnalyzer>,
    /// Opens a record store for each request
    pub stores: StoreProvider,
}

impl AppState {
    /// Build state from an engine and a store provider
    pub fn new(engine: RelationshipEngine, stores: StoreProvider) -> Self {
        Self {
            analyzer: Arc::new(ImpactAnalyzer::new(engine.clone())),
            engine,
            stores,
        }
    }
}

/// Per-request record store factory
///
/// SQLite connections are not shared between requests; each request opens
/// the vault on a blocking thread and is bounded by the fetch timeout.
#[derive(Debug, Clone)]
pub struct StoreProvider {
    database_path: PathBuf,
    fetch_timeout: Duration,
}

impl StoreProvider {
    /// Create a provider for the given database
    pub fn new(database_path: impl Into<PathBuf>, fetch_timeout: Duration) -> Self {
        Self {
            database_path: database_path.into(),
            fetch_timeout,
        }
    }

    /// Open a store and run `work` against it off the async runtime
    pub async fn with_store<T, F>(&self, work: F) -> Result<T, AppError>
    where
        F: FnOnce(&SqliteRecordStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let path = self.database_path.clone();
        let task = tokio::task::spawn_blocking(move || {
            SqliteRecordStore::new(path).map(|store| work(&store))
        });

        match tokio::time::timeout(self.fetch_timeout, task).await {
            Ok(Ok(result)) => result.map_err(AppError::Store),
            Ok(Err(join_error)) => Err(AppError::Internal(join_error.to_string())),
            Err(_) => Err(AppError::Timeout(self.fetch_timeout)),
        }
    }
}

/// Impact analysis request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRequest {
    /// Document being changed
    pub document_id: String,
    /// Its category
    pub category: String,
    /// Proposed field values
    #[serde(default)]
    pub changes: BTreeMap<String, FieldValue>,
}

/// Candidate analysis request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Record as it would be saved
    pub record: Record,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Server version
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Record store could not be opened or read
    Store(StoreError),
    /// Record fetch exceeded the configured timeout
    Timeout(Duration),
    /// Engine error
    Engine(govault_engine::EngineError),
    /// Internal server error
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Store(e) => write!(f, "{}", e),
            AppError::Timeout(d) => write!(f, "record fetch timed out after {:?}", d),
            AppError::Engine(e) => write!(f, "{}", e),
            AppError::Internal(msg) => f.write_str(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Store(_) | AppError::Engine(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl AppError {
    /// Log a failure that a route answers with its empty result
    ///
    /// Store failures are errors; timeouts and everything else are warnings.
    fn log_degraded(&self, route: &str) {
        match self {
            AppError::Store(_) => error!(route, error = %self, "record store failure, returning empty result"),
            _ => warn!(route, error = %self, "request degraded to empty result"),
        }
    }
}

impl From<govault_engine::EngineError> for AppError {
    fn from(e: govault_engine::EngineError) -> Self {
        AppError::Engine(e)
    }
}

/// GET /relationships/:category/:document_id - Related documents for display
///
/// Always succeeds; failures are logged and answered with an empty list.
async fn get_relationships(
    State(state): State<AppState>,
    Path((category, document_id)): Path<(String, String)>,
) -> Json<Vec<RelatedDocument>> {
    let engine = state.engine.clone();
    let result = state
        .stores
        .with_store(move |store| engine.document_relationships(store, &document_id, &category))
        .await;

    match result {
        Ok(related) => Json(related),
        Err(e) => {
            e.log_degraded("relationships");
            Json(Vec::new())
        }
    }
}

/// POST /impact - Impact report for a proposed change
///
/// Always succeeds; failures are logged and answered with a zero-impact report.
async fn analyze_impact(
    State(state): State<AppState>,
    Json(request): Json<ImpactRequest>,
) -> Json<ImpactReport> {
    let analyzer = state.analyzer.clone();
    let category = request.category.clone();
    let result = state
        .stores
        .with_store(move |store| {
            analyzer.analyze_document_impact(
                store,
                &request.document_id,
                &request.category,
                &request.changes,
            )
        })
        .await;

    match result {
        Ok(report) => Json(report),
        Err(e) => {
            e.log_degraded("impact");
            Json(ImpactReport::unaffected(&category))
        }
    }
}

/// POST /analyze - Relationships a candidate record would have if saved
async fn analyze_candidate(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Vec<Relationship>>, AppError> {
    let engine = state.engine.clone();
    let edges = state
        .stores
        .with_store(move |store| engine.analyze_candidate(store, &request.record))
        .await
        .map_err(|e| {
            error!(error = %e, "candidate analysis failed");
            e
        })??;

    Ok(Json(edges))
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/relationships/:category/:document_id", get(get_relationships))
        .route("/impact", post(analyze_impact))
        .route("/analyze", post(analyze_candidate))
        .route("/health", get(health_check))
        .with_state(state)
}
