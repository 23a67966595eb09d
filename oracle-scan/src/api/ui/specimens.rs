//! Specimens page

use axum::{extract::State, response::Html};

use super::{escape, layout};
use crate::error::PageResult;
use crate::specimens::{display_name, load_specimens, scalar_fields};
use crate::AppState;

/// GET /specimens
pub async fn specimens_page(State(state): State<AppState>) -> PageResult<Html<String>> {
    let items = load_specimens(&state.config.specimens_path).await?;

    let mut list = String::new();
    for (index, item) in items.iter().enumerate() {
        list.push_str(&format!(
            "        <li>\n            <h3>{}</h3>\n",
            escape(&display_name(item, index))
        ));
        let fields = scalar_fields(item);
        if !fields.is_empty() {
            list.push_str("            <dl>\n");
            for (key, value) in fields {
                list.push_str(&format!(
                    "                <dt>{}</dt><dd>{}</dd>\n",
                    escape(&key),
                    escape(&value)
                ));
            }
            list.push_str("            </dl>\n");
        }
        list.push_str("        </li>\n");
    }

    let body = if items.is_empty() {
        "    <h1>Specimens</h1>\n    <p>No specimens listed.</p>\n".to_string()
    } else {
        format!(
            "    <h1>Specimens</h1>\n    <ul class=\"specimens\">\n{}    </ul>\n",
            list
        )
    };

    Ok(layout("Specimens", &body))
}
