//! Camera capture form action

use axum::{
    extract::{Query, State},
    response::Redirect,
};

use crate::api::scans::CaptureQuery;
use crate::error::PageResult;
use crate::{intake, AppState};

/// POST /capture
///
/// Runs the camera and redirects (303) to the new scan's page. Camera
/// problems render as an HTML error page and leave no row behind.
pub async fn capture_and_scan(
    State(state): State<AppState>,
    Query(query): Query<CaptureQuery>,
) -> PageResult<Redirect> {
    let scan = intake::record_capture(&state, query.specimen).await?;
    Ok(Redirect::to(&format!("/scan/{}", scan.id)))
}
