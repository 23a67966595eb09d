//! Static asset handlers
//!
//! Embeds the stylesheet at compile time so the binary runs from any
//! working directory.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const ORACLE_CSS: &str = include_str!("../../../static/oracle.css");

/// GET /assets/oracle.css
pub async fn serve_oracle_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        ORACLE_CSS,
    )
        .into_response()
}
