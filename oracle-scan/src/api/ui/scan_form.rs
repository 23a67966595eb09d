//! Upload form and its POST handler

use axum::{
    extract::{Multipart, State},
    response::{Html, Redirect},
};

use super::layout;
use crate::api::upload::{read_upload, IMAGE_FIELD, SPECIMEN_FIELD};
use crate::error::PageResult;
use crate::{intake, AppState};

/// GET /scan/new
pub async fn scan_form_page() -> Html<String> {
    let body = format!(
        r#"    <h1>New scan</h1>
    <form method="post" action="/scan" enctype="multipart/form-data">
        <label>Photo <input type="file" name="{image}" accept="image/*" capture="environment" required></label>
        <label>Specimen (optional) <input type="text" name="{specimen}"></label>
        <button type="submit">Upload</button>
    </form>
    <form method="post" action="/capture">
        <button type="submit">Capture from camera instead</button>
    </form>
"#,
        image = IMAGE_FIELD,
        specimen = SPECIMEN_FIELD,
    );
    layout("New scan", &body)
}

/// POST /scan
///
/// Stores the upload and redirects (303) to the new scan's page.
pub async fn create_scan(State(state): State<AppState>, multipart: Multipart) -> PageResult<Redirect> {
    let upload = read_upload(multipart).await?;
    let scan = intake::record_upload(&state, upload).await?;
    Ok(Redirect::to(&format!("/scan/{}", scan.id)))
}
