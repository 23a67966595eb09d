//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a scan's image was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// Image arrived as a multipart upload
    Uploaded,
    /// Image was produced by the camera binary
    Captured,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Uploaded => "uploaded",
            ScanStatus::Captured => "captured",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown scan status: {0}")]
pub struct ParseScanStatusError(pub String);

impl FromStr for ScanStatus {
    type Err = ParseScanStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploaded" => Ok(ScanStatus::Uploaded),
            "captured" => Ok(ScanStatus::Captured),
            other => Err(ParseScanStatusError(other.to_string())),
        }
    }
}

/// One stored scan row
///
/// Rows are immutable once inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    pub id: i64,
    /// Filesystem location of the stored image
    pub image_path: String,
    pub status: ScanStatus,
    pub specimen: Option<String>,
    pub captured_at: DateTime<Utc>,
}

/// Values supplied by the caller when inserting a scan
#[derive(Debug, Clone)]
pub struct NewScan {
    pub image_path: String,
    pub status: ScanStatus,
    pub specimen: Option<String>,
}

impl NewScan {
    pub fn uploaded(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            status: ScanStatus::Uploaded,
            specimen: None,
        }
    }

    pub fn captured(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            status: ScanStatus::Captured,
            specimen: None,
        }
    }

    /// Attach a specimen label; blank labels are dropped
    pub fn with_specimen(mut self, specimen: Option<String>) -> Self {
        self.specimen = specimen
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_forms() {
        assert_eq!(ScanStatus::Uploaded.to_string(), "uploaded");
        assert_eq!(ScanStatus::Captured.to_string(), "captured");
        assert_eq!("captured".parse::<ScanStatus>().unwrap(), ScanStatus::Captured);
        assert!("deleted".parse::<ScanStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ScanStatus::Uploaded).unwrap();
        assert_eq!(json, "\"uploaded\"");
    }

    #[test]
    fn test_with_specimen_drops_blank_label() {
        let scan = NewScan::uploaded("/tmp/a.jpg").with_specimen(Some("   ".to_string()));
        assert_eq!(scan.specimen, None);

        let scan = NewScan::captured("/tmp/b.jpg").with_specimen(Some(" Quercus robur ".to_string()));
        assert_eq!(scan.specimen.as_deref(), Some("Quercus robur"));
    }
}
