//! REST API endpoints for the explorer-service.
//!
//! Sensor endpoints read the refresher's latest snapshot; each response is
//! built from one snapshot, so fields never mix two ticks.
//!
//! ## Error Handling
//!
//! All endpoints return structured JSON errors via [`AppError`]:
//! `{"error": "<message>"}` with a 4xx or 5xx status.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use explorer_service::api;
//!
//! let app = api::router().with_state(state);
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use explorer_core::{
    ComparisonSeries, HistoryStats, RefreshInterval, Snapshot, StatusSummary, TypeFilter,
    chart_bounds, compare, filter_sensors, percent_of_range,
};
use explorer_types::{Reading, SensorState, Status};

use crate::control::{self, ControlAck, ControlCommand, ControlError};
use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        // Health and status
        .route("/api/health", get(health))
        .route("/api/status", get(get_status))
        // Sensor data
        .route("/api/sensors", get(list_sensors))
        .route("/api/sensors/{id}", get(get_sensor))
        .route("/api/sensors/{id}/history", get(get_history))
        .route("/api/sensors/{id}/stats", get(get_stats))
        .route("/api/summary", get(get_summary))
        .route("/api/compare", get(get_comparison))
        .route("/api/classify", get(classify))
        // Refresh control
        .route("/api/refresh", get(get_refresh).put(update_refresh))
        // Vehicle commands
        .route("/api/control", post(send_control))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc(),
    })
}

/// Service status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub refresher: RefresherStatus,
    /// Connected WebSocket clients.
    pub subscribers: usize,
}

/// Refresher state.
#[derive(Debug, Serialize)]
pub struct RefresherStatus {
    pub running: bool,
    pub generation: u64,
    pub interval_secs: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub last_tick_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub uptime_seconds: u64,
}

async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.snapshot();
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc(),
        refresher: RefresherStatus {
            running: state.refresher.is_running(),
            generation: snapshot.generation,
            interval_secs: state.refresher.interval().secs(),
            last_tick_at: snapshot.taken_at,
            started_at: state.started_at,
            uptime_seconds: state.uptime_seconds(),
        },
        subscribers: state.events_tx.receiver_count(),
    })
}

/// Optional `?type=` filter.
#[derive(Debug, Default, Deserialize)]
pub struct TypeQuery {
    #[serde(default, rename = "type")]
    pub sensor_type: Option<String>,
}

impl TypeQuery {
    fn filter(&self) -> Result<TypeFilter, AppError> {
        match self.sensor_type.as_deref() {
            None | Some("") => Ok(TypeFilter::All),
            Some(s) => s.parse().map_err(|e: explorer_types::ParseError| {
                AppError::BadRequest(e.to_string())
            }),
        }
    }
}

/// Sensor list response.
#[derive(Debug, Serialize)]
pub struct SensorsResponse {
    pub generation: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub taken_at: OffsetDateTime,
    pub sensors: Vec<SensorState>,
}

/// List sensors from the latest snapshot.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] for an unknown `type`.
async fn list_sensors(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TypeQuery>, QueryRejection>,
) -> Result<Json<SensorsResponse>, AppError> {
    let Query(query) = query?;
    let filter = query.filter()?;
    let snapshot = state.snapshot();
    Ok(Json(SensorsResponse {
        generation: snapshot.generation,
        taken_at: snapshot.taken_at,
        sensors: filter_sensors(&snapshot.sensors, filter),
    }))
}

fn find_sensor<'a>(snapshot: &'a Snapshot, id: &str) -> Result<&'a SensorState, AppError> {
    snapshot
        .sensor(id)
        .ok_or_else(|| AppError::NotFound(format!("Sensor '{}' not found", id)))
}

/// One sensor with presentation details.
#[derive(Debug, Serialize)]
pub struct SensorDetailResponse {
    #[serde(flatten)]
    pub sensor: SensorState,
    pub color: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub percent_of_range: f64,
    pub chart_min: f64,
    pub chart_max: f64,
}

async fn get_sensor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SensorDetailResponse>, AppError> {
    let snapshot = state.snapshot();
    let sensor = find_sensor(&snapshot, &id)?;
    let d = &sensor.definition;
    let (chart_min, chart_max) = chart_bounds(d.min, d.max);

    Ok(Json(SensorDetailResponse {
        color: sensor.status.color(),
        icon: d.sensor_type.icon(),
        description: sensor.status.description(),
        percent_of_range: percent_of_range(sensor.value, d.min, d.max),
        chart_min,
        chart_max,
        sensor: sensor.clone(),
    }))
}

/// History window response.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub id: String,
    pub unit: String,
    pub readings: Vec<Reading>,
}

async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let snapshot = state.snapshot();
    let sensor = find_sensor(&snapshot, &id)?;
    Ok(Json(HistoryResponse {
        id: sensor.definition.id.clone(),
        unit: sensor.definition.unit.clone(),
        readings: sensor.history.clone(),
    }))
}

/// History statistics response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub id: String,
    pub unit: String,
    #[serde(flatten)]
    pub stats: HistoryStats,
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let snapshot = state.snapshot();
    let sensor = find_sensor(&snapshot, &id)?;
    let stats = HistoryStats::from_sensor(sensor)
        .ok_or_else(|| AppError::NotFound(format!("Sensor '{}' has no history", id)))?;
    Ok(Json(StatsResponse {
        id: sensor.definition.id.clone(),
        unit: sensor.definition.unit.clone(),
        stats,
    }))
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TypeQuery>, QueryRejection>,
) -> Result<Json<StatusSummary>, AppError> {
    let Query(query) = query?;
    let filter = query.filter()?;
    let snapshot = state.snapshot();
    let sensors = filter_sensors(&snapshot.sensors, filter);
    Ok(Json(StatusSummary::from_sensors(&sensors)))
}

/// `?ids=s001,s002`; all sensors when omitted.
#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    #[serde(default)]
    pub ids: Option<String>,
}

async fn get_comparison(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompareQuery>,
) -> Json<Vec<ComparisonSeries>> {
    let snapshot = state.snapshot();
    let ids: Vec<String> = match query.ids.as_deref() {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        None => snapshot
            .sensors
            .iter()
            .map(|s| s.definition.id.clone())
            .collect(),
    };
    Json(compare(&snapshot.sensors, &ids))
}

/// Parameters for a standalone classification.
#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Classification result.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub status: Status,
    pub color: &'static str,
    pub percent_of_range: f64,
}

/// Classify an arbitrary value against an arbitrary range.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] when a parameter is missing or not a
/// number, when any input is not finite, or when `min >= max`.
async fn classify(
    query: Result<Query<ClassifyQuery>, QueryRejection>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let Query(ClassifyQuery { value, min, max }) = query?;
    if !(value.is_finite() && min.is_finite() && max.is_finite()) {
        return Err(AppError::BadRequest(
            "value, min and max must be finite numbers".to_string(),
        ));
    }
    if min >= max {
        return Err(AppError::BadRequest(format!(
            "min ({}) must be less than max ({})",
            min, max
        )));
    }

    let status = explorer_core::classify_status(value, min, max);
    Ok(Json(ClassifyResponse {
        status,
        color: status.color(),
        percent_of_range: percent_of_range(value, min, max),
    }))
}

/// Refresh interval response.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub interval_secs: u64,
    pub min_secs: u64,
    pub max_secs: u64,
    pub presets: [u64; 5],
}

impl RefreshResponse {
    fn new(interval: RefreshInterval) -> Self {
        Self {
            interval_secs: interval.secs(),
            min_secs: RefreshInterval::MIN_SECS,
            max_secs: RefreshInterval::MAX_SECS,
            presets: RefreshInterval::PRESETS,
        }
    }
}

async fn get_refresh(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    Json(RefreshResponse::new(state.refresher.interval()))
}

/// Request to change the refresh interval.
#[derive(Debug, Deserialize)]
pub struct UpdateRefreshRequest {
    pub interval_secs: u64,
}

/// Change the refresh interval.
///
/// # Lock Acquisition
///
/// Acquires a write lock on `config` so the stored setting and the running
/// refresher change together.
///
/// # Errors
///
/// - [`AppError::BadRequest`] if the body is malformed or the interval is
///   outside 1-60 s.
/// - [`AppError::Unavailable`] if the refresher has stopped.
async fn update_refresh(
    State(state): State<Arc<AppState>>,
    request: Result<Json<UpdateRefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>, AppError> {
    let Json(request) = request?;
    let interval = RefreshInterval::new(request.interval_secs)?;

    let mut config = state.config.write().await;
    state.refresher.set_interval(interval)?;
    config.simulation.refresh_interval = interval.secs();
    drop(config);

    tracing::info!("Refresh interval set to {}", interval);
    Ok(Json(RefreshResponse::new(interval)))
}

/// Accept a vehicle control command.
async fn send_control(
    command: Result<Json<ControlCommand>, JsonRejection>,
) -> Result<Json<ControlAck>, AppError> {
    let Json(command) = command?;
    Ok(Json(control::dispatch(command)?))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unavailable(String),
    Internal(String),
}

impl From<explorer_core::Error> for AppError {
    fn from(e: explorer_core::Error) -> Self {
        match e {
            explorer_core::Error::RefresherStopped => AppError::Unavailable(e.to_string()),
            explorer_core::Error::InvalidInterval { .. }
            | explorer_core::Error::Parse(_)
            | explorer_core::Error::Definition(_) => AppError::BadRequest(e.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

impl From<ControlError> for AppError {
    fn from(e: ControlError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
