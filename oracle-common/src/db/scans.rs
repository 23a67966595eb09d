//! Scan persistence
//!
//! Insert and read only. Nothing in the application updates or deletes a
//! scan row once it has been written.

use crate::db::models::{NewScan, Scan, ScanStatus};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Insert one scan and return the stored record
pub async fn insert_scan(pool: &SqlitePool, scan: &NewScan) -> Result<Scan> {
    let captured_at = crate::time::now();

    let result = sqlx::query(
        r#"
        INSERT INTO scans (image_path, status, specimen, captured_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&scan.image_path)
    .bind(scan.status.as_str())
    .bind(&scan.specimen)
    .bind(captured_at.to_rfc3339())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_scan(pool, id)
        .await?
        .ok_or_else(|| Error::Inconsistent(format!("Scan {} vanished after insert", id)))
}

/// Load a scan by id
pub async fn get_scan(pool: &SqlitePool, id: i64) -> Result<Option<Scan>> {
    let row = sqlx::query(
        r#"
        SELECT id, image_path, status, specimen, captured_at
        FROM scans
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(scan_from_row).transpose()
}

/// Most recent scans first
///
/// AUTOINCREMENT ids are monotonic, so id order is insertion order.
pub async fn list_recent_scans(pool: &SqlitePool, limit: i64) -> Result<Vec<Scan>> {
    let rows = sqlx::query(
        r#"
        SELECT id, image_path, status, specimen, captured_at
        FROM scans
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;

    rows.iter().map(scan_from_row).collect()
}

/// Total number of scan rows
pub async fn count_scans(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scans")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn scan_from_row(row: &SqliteRow) -> Result<Scan> {
    let status_str: String = row.try_get("status")?;
    let status = status_str
        .parse::<ScanStatus>()
        .map_err(|e| Error::Database(sqlx::Error::Decode(Box::new(e))))?;

    let captured_str: String = row.try_get("captured_at")?;
    let captured_at = DateTime::parse_from_rfc3339(&captured_str)
        .map_err(|e| Error::Database(sqlx::Error::Decode(Box::new(e))))?
        .with_timezone(&Utc);

    Ok(Scan {
        id: row.try_get("id")?,
        image_path: row.try_get("image_path")?,
        status,
        specimen: row.try_get("specimen")?,
        captured_at,
    })
}
