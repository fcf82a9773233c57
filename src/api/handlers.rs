//! REST API handlers for the roster server
//!
//! Every endpoint answers with the [`ApiResponse`] envelope. Roster reads
//! always succeed; only a malformed tenure cutoff produces an error status.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheSnapshot, CacheStatus, SnapshotOrigin};
use crate::error::RollcallErrorTrait;
use crate::models::{LegislatorRecord, PartyBreakdown};
use crate::parser::ExtractionReport;

use super::server::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Simple error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Full roster response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    pub count: usize,
    pub origin: SnapshotOrigin,
    pub fetched_at: DateTime<Utc>,
    pub records: Vec<LegislatorRecord>,
}

impl From<&CacheSnapshot> for RosterResponse {
    fn from(snapshot: &CacheSnapshot) -> Self {
        Self {
            count: snapshot.records.len(),
            origin: snapshot.origin,
            fetched_at: snapshot.fetched_at_utc,
            records: snapshot.records.clone(),
        }
    }
}

/// Tenure filter query
#[derive(Debug, Deserialize)]
pub struct TenureQuery {
    pub before: Option<String>,
}

/// Tenure filter response
#[derive(Debug, Serialize)]
pub struct TenureResponse {
    pub before: String,
    pub count: usize,
    pub records: Vec<LegislatorRecord>,
}

/// Party breakdown with its total
#[derive(Debug, Serialize)]
pub struct PartiesResponse {
    #[serde(flatten)]
    pub breakdown: PartyBreakdown,
    pub total: usize,
}

/// Cache state plus the last extraction's diagnostics
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheResponse {
    pub status: CacheStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ExtractionReport>,
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub invalidated: bool,
}

/// Summary of a forced refresh
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub count: usize,
    pub origin: SnapshotOrigin,
    pub fetched_at: DateTime<Utc>,
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        // Roster endpoints
        .route("/api/senators", get(list_senators))
        .route("/api/senators/tenure", get(senators_by_tenure))
        .route("/api/senators/parties", get(party_breakdown))
        // Cache endpoints
        .route("/api/cache", get(cache_status))
        .route("/api/cache/invalidate", post(invalidate_cache))
        .route("/api/cache/refresh", post(refresh_cache))
        .with_state(state)
}

// ============================================================================
// Health Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();

    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime,
    }))
}

// ============================================================================
// Roster Handlers
// ============================================================================

async fn list_senators(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.service.snapshot().await;
    Json(ApiResponse::success(RosterResponse::from(snapshot.as_ref())))
}

async fn senators_by_tenure(
    State(state): State<AppState>,
    Query(query): Query<TenureQuery>,
) -> axum::response::Response {
    let Some(before) = query.before else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Missing query parameter: before (expected YYYY-MM-DD)",
            )),
        )
            .into_response();
    };

    match state.service.filter_by_tenure_before(&before).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::success(TenureResponse {
                before,
                count: records.len(),
                records,
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::debug!(error = %e.describe(), "Rejected tenure query");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))).into_response()
        }
    }
}

async fn party_breakdown(State(state): State<AppState>) -> impl IntoResponse {
    let breakdown = state.service.party_breakdown().await;

    Json(ApiResponse::success(PartiesResponse {
        total: breakdown.total(),
        breakdown,
    }))
}

// ============================================================================
// Cache Handlers
// ============================================================================

async fn cache_status(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.service.cache_status().await;
    let report = state
        .service
        .cached_snapshot()
        .await
        .and_then(|snapshot| snapshot.report.clone());

    Json(ApiResponse::success(CacheResponse { status, report }))
}

async fn invalidate_cache(State(state): State<AppState>) -> impl IntoResponse {
    let invalidated = state.service.invalidate_cache().await;
    Json(ApiResponse::success(InvalidateResponse { invalidated }))
}

async fn refresh_cache(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.service.refresh().await;

    Json(ApiResponse::success(RefreshResponse {
        count: snapshot.records.len(),
        origin: snapshot.origin,
        fetched_at: snapshot.fetched_at_utc,
    }))
}

// ============================================================================
// Tests
// ============================================================================
