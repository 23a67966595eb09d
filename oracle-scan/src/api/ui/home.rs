//! Home page: entry points plus the most recent scans

use axum::{extract::State, response::Html};
use oracle_common::db;
use std::path::Path;

use super::{escape, layout};
use crate::error::{ApiError, PageResult};
use crate::storage::image_url;
use crate::AppState;

const RECENT_SCANS: i64 = 12;

/// GET /
pub async fn home_page(State(state): State<AppState>) -> PageResult<Html<String>> {
    let recent = db::list_recent_scans(&state.db, RECENT_SCANS)
        .await
        .map_err(ApiError::from)?;
    let total = db::count_scans(&state.db).await.map_err(ApiError::from)?;

    let mut cards = String::new();
    for scan in &recent {
        let path = Path::new(&scan.image_path);
        let src = state
            .store
            .thumbnail_url(path)
            .unwrap_or_else(|| image_url(path));
        let label = scan.specimen.as_deref().unwrap_or(scan.status.as_str());
        cards.push_str(&format!(
            r#"        <a class="card" href="/scan/{id}"><img src="{src}" alt="Scan {id}"><span>#{id} {label}</span></a>
"#,
            id = scan.id,
            src = escape(&src),
            label = escape(label),
        ));
    }

    let recent_section = if recent.is_empty() {
        "    <p>No scans yet.</p>\n".to_string()
    } else {
        format!("    <div class=\"grid\">\n{}    </div>\n", cards)
    };

    let body = format!(
        r#"    <h1>Specimen Oracle</h1>
    <p>Photograph a specimen with the attached camera, or upload a photo.</p>
    <div class="actions">
        <form method="post" action="/capture"><button type="submit">Capture from camera</button></form>
        <a class="button" href="/scan/new">Upload a photo</a>
    </div>
    <h2>Recent scans ({total} total)</h2>
{recent_section}"#,
        total = total,
        recent_section = recent_section,
    );

    Ok(layout("Home", &body))
}
