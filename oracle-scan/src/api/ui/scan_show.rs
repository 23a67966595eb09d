//! Scan detail page

use axum::{
    extract::{Path, State},
    response::Html,
};

use super::{escape, layout};
use crate::error::PageResult;
use crate::storage::image_url;
use crate::{intake, AppState};

/// GET /scan/:id
pub async fn scan_show_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let scan = intake::find_scan(&state, id).await?;
    let url = image_url(std::path::Path::new(&scan.image_path));

    let specimen_row = match &scan.specimen {
        Some(specimen) => format!(
            "        <dt>Specimen</dt><dd>{}</dd>\n",
            escape(specimen)
        ),
        None => String::new(),
    };

    let body = format!(
        r#"    <h1>Scan #{id}</h1>
    <figure>
        <img class="scan" src="{url}" alt="Scan {id}">
    </figure>
    <dl>
        <dt>Status</dt><dd>{status}</dd>
{specimen_row}        <dt>Captured</dt><dd>{captured_at}</dd>
        <dt>Stored at</dt><dd><code>{image_path}</code></dd>
    </dl>
    <p><a href="/scan/new">New scan</a></p>
"#,
        id = scan.id,
        url = escape(&url),
        status = scan.status,
        specimen_row = specimen_row,
        captured_at = scan.captured_at.format("%Y-%m-%d %H:%M:%S UTC"),
        image_path = escape(&scan.image_path),
    );

    Ok(layout(&format!("Scan #{}", scan.id), &body))
}
