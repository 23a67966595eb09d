//! Specimens JSON API

use axum::{extract::State, routing::get, Json, Router};
use serde_json::Value;

use crate::error::ApiResult;
use crate::{specimens, AppState};

/// GET /api/specimens
pub async fn list_specimens(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let items = specimens::load_specimens(&state.config.specimens_path).await?;
    Ok(Json(items))
}

pub fn specimen_routes() -> Router<AppState> {
    Router::new().route("/api/specimens", get(list_specimens))
}
