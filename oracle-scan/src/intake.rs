//! Scan intake: store the image, then insert its row
//!
//! Shared by the HTML and JSON routes. A row is only inserted once its image
//! file is fully on disk, and an image whose row could not be inserted is
//! removed again, so rows and files stay one-to-one.

use oracle_common::db::{self, NewScan, Scan};
use std::path::Path;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::storage::remove_quietly;
use crate::{thumbnail, AppState};

/// An image received from a client
#[derive(Debug, Clone)]
pub struct Upload {
    pub bytes: axum::body::Bytes,
    /// Client-side file name; only its extension is used
    pub file_name: Option<String>,
    pub specimen: Option<String>,
}

/// Store an uploaded image as a new `uploaded` scan
pub async fn record_upload(state: &AppState, upload: Upload) -> ApiResult<Scan> {
    if upload.bytes.is_empty() {
        return Err(ApiError::BadRequest("Uploaded image is empty".to_string()));
    }

    let path = state
        .store
        .save_upload(&upload.bytes, upload.file_name.as_deref())
        .await?;

    let new_scan = NewScan::uploaded(path.display().to_string()).with_specimen(upload.specimen);
    let scan = persist(state, &new_scan, &path).await?;

    thumbnail::generate_best_effort(&state.store, &state.config.thumbnails, &path).await;

    info!(scan_id = scan.id, path = %path.display(), "Recorded uploaded scan");
    Ok(scan)
}

/// Run the camera and store the result as a new `captured` scan
///
/// No row is inserted when the camera is missing or fails.
pub async fn record_capture(state: &AppState, specimen: Option<String>) -> ApiResult<Scan> {
    let path = state.store.reserve_capture_path().await?;

    if let Err(e) = state.camera.capture(&path).await {
        remove_quietly(&path).await;
        return Err(e.into());
    }

    let new_scan = NewScan::captured(path.display().to_string()).with_specimen(specimen);
    let scan = persist(state, &new_scan, &path).await?;

    thumbnail::generate_best_effort(&state.store, &state.config.thumbnails, &path).await;

    info!(scan_id = scan.id, path = %path.display(), "Recorded captured scan");
    Ok(scan)
}

/// Fetch a scan or fail with `NotFound`
pub async fn find_scan(state: &AppState, id: i64) -> ApiResult<Scan> {
    db::get_scan(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Scan not found.".to_string()))
}

async fn persist(state: &AppState, new_scan: &NewScan, path: &Path) -> ApiResult<Scan> {
    match db::insert_scan(&state.db, new_scan).await {
        Ok(scan) => Ok(scan),
        Err(e) => {
            remove_quietly(path).await;
            Err(e.into())
        }
    }
}
