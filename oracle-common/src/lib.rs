//! # Oracle Common Library
//!
//! Shared code for the specimen oracle services:
//! - Root folder and TOML configuration resolution
//! - Database initialization and the `scans` table
//! - Scan model and queries
//! - Timestamp utilities

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
