//! oracle-scan library interface
//!
//! Specimen photo service: upload or camera-capture an image, record it in
//! the `scans` table, and show it back. Exposed as a library so integration
//! tests can drive the router directly.

pub mod api;
pub mod camera;
pub mod config;
pub mod error;
pub mod intake;
pub mod specimens;
pub mod storage;
pub mod thumbnail;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::camera::Camera;
use crate::config::ServiceConfig;
use crate::storage::{ImageStore, IMAGES_URL_PREFIX};

/// Application state shared across handlers
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Resolved service configuration
    pub config: Arc<ServiceConfig>,
    /// Images directory access
    pub store: ImageStore,
    /// Camera CLI wrapper
    pub camera: Camera,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: ServiceConfig) -> Self {
        let store = ImageStore::from_root(&config.root());
        let camera = Camera::new(config.camera.clone());
        Self {
            db,
            config: Arc::new(config),
            store,
            camera,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        // HTML pages and form actions
        .merge(api::ui_routes())
        // JSON API
        .merge(api::scan_routes())
        .merge(api::specimen_routes())
        .merge(api::buildinfo_routes())
        .merge(api::health_routes())
        .nest_service(IMAGES_URL_PREFIX, ServeDir::new(state.store.images_dir()));

    if state.config.static_dir.is_dir() {
        router = router.nest_service("/static", ServeDir::new(&state.config.static_dir));
    } else {
        tracing::debug!(
            "Static directory {} not found, /static not mounted",
            state.config.static_dir.display()
        );
    }

    router
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
