//! HTTP API handlers for oracle-scan
//!
//! HTML pages live under `ui`; the JSON API is served under `/api`.

pub mod buildinfo;
pub mod health;
pub mod scans;
pub mod specimens;
pub mod ui;
pub mod upload;

pub use buildinfo::buildinfo_routes;
pub use health::health_routes;
pub use scans::scan_routes;
pub use specimens::specimen_routes;
pub use ui::ui_routes;
