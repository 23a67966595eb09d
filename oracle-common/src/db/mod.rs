//! Database models and queries

pub mod init;
pub mod models;
pub mod scans;

pub use init::*;
pub use models::*;
pub use scans::*;
