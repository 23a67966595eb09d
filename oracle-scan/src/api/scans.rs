//! Scan JSON API
//!
//! The JSON counterpart of the HTML pages: same intake path, JSON bodies,
//! `201 Created` instead of a redirect, JSON error objects.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use oracle_common::db::{self, Scan, ScanStatus};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::storage::{image_url, ImageStore};
use crate::{intake, AppState};

const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;

/// Scan as returned by the API
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub id: i64,
    pub image_path: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub status: ScanStatus,
    pub specimen: Option<String>,
    pub captured_at: DateTime<Utc>,
}

impl ScanResponse {
    pub fn from_scan(scan: Scan, store: &ImageStore) -> Self {
        let path = std::path::Path::new(&scan.image_path);
        Self {
            image_url: image_url(path),
            thumbnail_url: store.thumbnail_url(path),
            id: scan.id,
            status: scan.status,
            specimen: scan.specimen,
            captured_at: scan.captured_at,
            image_path: scan.image_path,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// Optional label for a capture, since the request has no body
#[derive(Debug, Default, Deserialize)]
pub struct CaptureQuery {
    pub specimen: Option<String>,
}

/// POST /api/scans
pub async fn create_scan(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ScanResponse>)> {
    let upload = super::upload::read_upload(multipart).await?;
    let scan = intake::record_upload(&state, upload).await?;
    Ok((StatusCode::CREATED, Json(ScanResponse::from_scan(scan, &state.store))))
}

/// POST /api/capture
pub async fn capture_scan(
    State(state): State<AppState>,
    Query(query): Query<CaptureQuery>,
) -> ApiResult<(StatusCode, Json<ScanResponse>)> {
    let scan = intake::record_capture(&state, query.specimen).await?;
    Ok((StatusCode::CREATED, Json(ScanResponse::from_scan(scan, &state.store))))
}

/// GET /api/scans/:id
pub async fn get_scan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ScanResponse>> {
    let scan = intake::find_scan(&state, id).await?;
    Ok(Json(ScanResponse::from_scan(scan, &state.store)))
}

/// GET /api/scans
///
/// Newest first; `limit` defaults to 20 and is clamped to 1..=100.
pub async fn list_scans(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<ScanResponse>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);

    let scans = db::list_recent_scans(&state.db, limit).await?;
    Ok(Json(
        scans
            .into_iter()
            .map(|scan| ScanResponse::from_scan(scan, &state.store))
            .collect(),
    ))
}

pub fn scan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/scans", get(list_scans).post(create_scan))
        .route("/api/scans/:id", get(get_scan))
        .route("/api/capture", post(capture_scan))
}
