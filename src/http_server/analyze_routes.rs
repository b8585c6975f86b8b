//! Analysis HTTP Routes
//!
//! `POST /analyze` takes a multipart upload with a `dataset` CSV field and
//! returns the report plus its map layer. Every request loads its own dataset
//! and resolves its own location; nothing is cached between requests.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::dataset::DatasetError;
use crate::location::{resolve, Coordinates, FixedLocation, UserLocation};
use crate::map::MapLayer;
use crate::observability::{log_event_with_fields, Event};
use crate::pipeline::AnalysisReport;

/// Multipart field carrying the CSV
pub const DATASET_FIELD: &str = "dataset";

// ==================
// Shared State
// ==================

/// Read-only settings shared by all requests
pub struct AnalyzeState {
    pub config: Config,
}

impl AnalyzeState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub threshold_km: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub report: AnalysisReport,
    pub map: MapLayer,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(code: &str, error: impl ToString) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
            code: code.to_string(),
        }),
    )
}

fn internal_error(error: impl ToString) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: error.to_string(),
            code: "REACTOR_HTTP_INTERNAL".to_string(),
        }),
    )
}

// ==================
// Routes
// ==================

pub fn analyze_routes(state: Arc<AnalyzeState>) -> Router {
    let limit = state.config.http.max_upload_bytes;
    Router::new()
        .route("/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}

async fn analyze_handler(
    State(state): State<Arc<AnalyzeState>>,
    Query(query): Query<AnalyzeQuery>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut config = state.config.clone();
    if let Some(threshold_km) = query.threshold_km {
        config.threshold_km = threshold_km;
        config
            .validate()
            .map_err(|e| bad_request("REACTOR_HTTP_BAD_QUERY", e))?;
    }

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request("REACTOR_HTTP_BAD_UPLOAD", e))?
    {
        if field.name() == Some(DATASET_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| bad_request("REACTOR_HTTP_BAD_UPLOAD", e))?;
            upload = Some(bytes);
        }
    }

    let upload = upload.ok_or_else(|| {
        bad_request(
            "REACTOR_HTTP_MISSING_DATASET",
            format!("multipart field '{}' is required", DATASET_FIELD),
        )
    })?;

    let dataset = config
        .dataset_loader()
        .load_bytes(&upload)
        .map_err(|e: DatasetError| {
            let reason = e.to_string();
            log_event_with_fields(Event::DatasetRejected, &[("reason", reason.as_str())]);
            bad_request(e.code(), reason)
        })?;

    let count = dataset.len().to_string();
    log_event_with_fields(Event::DatasetLoaded, &[("reactors", count.as_str())]);

    let location = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => {
            if !Coordinates::new(lat, lon).is_valid() {
                return Err(bad_request(
                    "REACTOR_HTTP_BAD_QUERY",
                    format!("location ({}, {}) is out of range", lat, lon),
                ));
            }
            resolve(&FixedLocation::new(lat, lon))
        }
        (None, None) => {
            let provider = config
                .location_provider()
                .map_err(internal_error)?;
            tokio::task::spawn_blocking(move || resolve(provider.as_ref()))
                .await
                .unwrap_or(UserLocation::Unresolved)
        }
        _ => {
            return Err(bad_request(
                "REACTOR_HTTP_BAD_QUERY",
                "lat and lon must be given together",
            ))
        }
    };

    let analysis = config.analyzer().analyze(&location, dataset.records());
    let map = MapLayer::from_analysis(&analysis, config.circle_radius_m);

    Ok(Json(AnalyzeResponse {
        report: AnalysisReport::new(analysis),
        map,
    }))
}
