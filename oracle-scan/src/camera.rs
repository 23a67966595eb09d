//! Camera still capture
//!
//! Shells out to the Raspberry Pi camera CLI (`rpicam-still`, or the legacy
//! `libcamera-still`) to produce one JPEG. The request waits for the process;
//! the only timeout is the one handed to the binary itself.

use oracle_common::config::CameraConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Camera errors
#[derive(Debug, Error)]
pub enum CameraError {
    /// None of the candidate binaries exists
    #[error("No camera binary found")]
    NotFound,

    /// The binary exists but could not be started
    #[error("Failed to start {binary}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The binary ran but did not produce an image
    #[error("Capture failed (exit code {code:?}): {stderr}")]
    CaptureFailed { code: Option<i32>, stderr: String },
}

impl CameraError {
    /// Message suitable for an error page
    pub fn user_message(&self) -> String {
        match self {
            CameraError::NotFound => "No camera CLI found. Install `rpicam-apps` (or `libcamera-apps`) \
                 and ensure rpicam-still/libcamera-still is on PATH."
                .to_string(),
            CameraError::Spawn { binary, .. } => {
                format!("Camera capture failed: could not start {}", binary.display())
            }
            CameraError::CaptureFailed { .. } => {
                "Camera capture failed (rpi/libcamera error)".to_string()
            }
        }
    }
}

/// Camera CLI wrapper
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }

    /// Find the first usable camera binary
    ///
    /// Candidates with a path separator are checked as given. Bare names are
    /// looked up on PATH, then in the configured fallback directory.
    pub fn locate(&self) -> Option<PathBuf> {
        for candidate in &self.config.binaries {
            let as_path = Path::new(candidate);
            if as_path.components().count() > 1 {
                if as_path.is_file() {
                    return Some(as_path.to_path_buf());
                }
                continue;
            }

            if let Ok(found) = which::which(candidate) {
                return Some(found);
            }

            let fallback = self.config.fallback_dir.join(candidate);
            if fallback.is_file() {
                return Some(fallback);
            }
        }
        None
    }

    /// Capture one still into `out_path`
    ///
    /// Does not remove `out_path` on failure; the caller owns that file.
    pub async fn capture(&self, out_path: &Path) -> Result<(), CameraError> {
        let binary = self.locate().ok_or(CameraError::NotFound)?;

        debug!(
            binary = %binary.display(),
            output = %out_path.display(),
            timeout_ms = self.config.timeout_ms,
            "Running camera capture"
        );

        let output = Command::new(&binary)
            .arg("-o")
            .arg(out_path)
            .arg("-n")
            .arg("--timeout")
            .arg(self.config.timeout_ms.to_string())
            .output()
            .await
            .map_err(|source| CameraError::Spawn {
                binary: binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CameraError::CaptureFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // Exit status 0 is not proof an image was written
        let written = tokio::fs::metadata(out_path)
            .await
            .map(|m| m.len() > 0)
            .unwrap_or(false);
        if !written {
            return Err(CameraError::CaptureFailed {
                code: output.status.code(),
                stderr: "camera exited successfully but wrote no image".to_string(),
            });
        }

        info!(output = %out_path.display(), "Camera capture completed");
        Ok(())
    }
}
