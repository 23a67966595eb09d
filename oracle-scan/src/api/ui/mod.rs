//! UI Routes - HTML pages for the oracle-scan web interface
//!
//! # Structure
//! - **Static Assets** (`static_assets`): embedded stylesheet
//! - **Home** (`home`): landing page with recent scans and the capture button
//! - **Scan Form** (`scan_form`): upload form and its POST handler
//! - **Capture** (`capture`): camera capture form action
//! - **Scan Detail** (`scan_show`): one scan with its image
//! - **Specimens** (`specimens`): the static specimens list

use axum::{
    response::Html,
    routing::{get, post},
    Router,
};

use crate::AppState;

mod capture;
mod home;
mod scan_form;
mod scan_show;
mod specimens;
mod static_assets;

use capture::capture_and_scan;
use home::home_page;
use scan_form::{create_scan, scan_form_page};
use scan_show::scan_show_page;
use specimens::specimens_page;
use static_assets::serve_oracle_css;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/scan/new", get(scan_form_page))
        .route("/scan", post(create_scan))
        .route("/scan/:id", get(scan_show_page))
        .route("/capture", post(capture_and_scan))
        .route("/specimens", get(specimens_page))
        .route("/assets/oracle.css", get(serve_oracle_css))
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the shared layout
///
/// `body` must already be escaped; `title` is escaped here.
fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Specimen Oracle</title>
    <link rel="stylesheet" href="/assets/oracle.css">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/scan/new">New scan</a>
        <a href="/specimens">Specimens</a>
    </nav>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b onclick="x('y')">&</b>"#),
            "&lt;b onclick=&quot;x(&#39;y&#39;)&quot;&gt;&amp;&lt;/b&gt;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn test_layout_escapes_title() {
        let Html(page) = layout("<Moths>", "<p>ok</p>");
        assert!(page.contains("<title>&lt;Moths&gt; - Specimen Oracle</title>"));
        assert!(page.contains("<p>ok</p>"));
    }
}
