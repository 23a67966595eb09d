//! Thumbnail generation
//!
//! Thumbnails are a convenience for the listing pages. A failure here is
//! logged and otherwise ignored; the scan itself is already stored.

use image::{GenericImageView, ImageFormat, ImageReader};
use oracle_common::config::ThumbnailConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::storage::ImageStore;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Thumbnail task failed: {0}")]
    Task(String),

    #[error("Image path has no usable file name: {0}")]
    BadPath(String),
}

/// Decode `source`, shrink to fit `max_dimension`, write a JPEG to `target`
///
/// Aspect ratio is preserved and images already within bounds are not
/// enlarged. The decoder is picked from the file contents, not its extension.
/// Decoding and encoding run on the blocking pool.
pub async fn generate(source: &Path, target: &Path, max_dimension: u32) -> Result<(), ThumbnailError> {
    let source = source.to_path_buf();
    let target = target.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<(), ThumbnailError> {
        let img = ImageReader::open(&source)?.with_guessed_format()?.decode()?;
        let (width, height) = img.dimensions();
        let thumb = if width <= max_dimension && height <= max_dimension {
            img
        } else {
            img.thumbnail(max_dimension, max_dimension)
        };
        // JPEG has no alpha channel
        thumb.to_rgb8().save_with_format(&target, ImageFormat::Jpeg)?;
        Ok(())
    })
    .await
    .map_err(|e| ThumbnailError::Task(e.to_string()))?
}

/// Generate the thumbnail for a stored image, logging any failure
pub async fn generate_best_effort(store: &ImageStore, config: &ThumbnailConfig, image_path: &Path) {
    if !config.enabled {
        return;
    }

    let target: PathBuf = match store.thumbnail_path(image_path) {
        Some(target) => target,
        None => {
            let err = ThumbnailError::BadPath(image_path.display().to_string());
            warn!(error = %err, "Skipping thumbnail");
            return;
        }
    };

    match generate(image_path, &target, config.max_dimension).await {
        Ok(()) => debug!(thumbnail = %target.display(), "Thumbnail written"),
        Err(e) => warn!(
            image = %image_path.display(),
            error = %e,
            "Thumbnail generation failed"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = ImageBuffer::from_pixel(width, height, Rgb([30u8, 120, 60]));
        img.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_generate_preserves_aspect_ratio() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("wide.png");
        let target = temp_dir.path().join("wide_thumb.jpg");
        write_png(&source, 800, 400);

        generate(&source, &target, 320).await.unwrap();

        let thumb = image::open(&target).unwrap();
        assert_eq!(thumb.dimensions(), (320, 160));
    }

    #[tokio::test]
    async fn test_generate_does_not_enlarge_small_images() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("small.png");
        let target = temp_dir.path().join("small_thumb.jpg");
        write_png(&source, 80, 20);

        generate(&source, &target, 320).await.unwrap();

        let thumb = image::open(&target).unwrap();
        assert_eq!(thumb.dimensions(), (80, 20));
    }

    #[tokio::test]
    async fn test_generate_detects_format_from_contents() {
        let temp_dir = TempDir::new().unwrap();
        let png = temp_dir.path().join("real.png");
        write_png(&png, 400, 200);
        // PNG bytes behind a .jpg name
        let mislabeled = temp_dir.path().join("photo.jpg");
        std::fs::copy(&png, &mislabeled).unwrap();
        let target = temp_dir.path().join("photo_thumb.jpg");

        generate(&mislabeled, &target, 100).await.unwrap();

        let thumb = image::open(&target).unwrap();
        assert_eq!(thumb.dimensions(), (100, 50));
    }

    #[tokio::test]
    async fn test_same_stamp_different_extensions_keep_own_thumbnails() {
        let temp_dir = TempDir::new().unwrap();
        let images = temp_dir.path().join("images");
        let thumbs = images.join("thumbs");
        std::fs::create_dir_all(&thumbs).unwrap();
        let store = ImageStore::new(images.clone(), thumbs);

        let first = images.join("scan_20240101_000000.png");
        let second = images.join("scan_20240101_000000.jpg");
        write_png(&first, 40, 40);
        ImageBuffer::from_pixel(80, 20, Rgb([0u8, 0, 200]))
            .save_with_format(&second, ImageFormat::Jpeg)
            .unwrap();

        let config = ThumbnailConfig::default();
        generate_best_effort(&store, &config, &first).await;
        generate_best_effort(&store, &config, &second).await;

        let first_thumb = image::open(store.thumbnail_path(&first).unwrap()).unwrap();
        let second_thumb = image::open(store.thumbnail_path(&second).unwrap()).unwrap();
        assert_eq!(first_thumb.dimensions(), (40, 40));
        assert_eq!(second_thumb.dimensions(), (80, 20));
    }

    #[tokio::test]
    async fn test_generate_rejects_non_image() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("notes.jpg");
        std::fs::write(&source, b"definitely not a jpeg").unwrap();

        let result = generate(&source, &temp_dir.path().join("t.jpg"), 320).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_best_effort_respects_disabled_flag() {
        let temp_dir = TempDir::new().unwrap();
        let images = temp_dir.path().join("images");
        let thumbs = images.join("thumbs");
        std::fs::create_dir_all(&thumbs).unwrap();
        let store = ImageStore::new(images.clone(), thumbs);

        let source = images.join("scan_1.png");
        write_png(&source, 64, 64);

        let disabled = ThumbnailConfig {
            enabled: false,
            max_dimension: 32,
        };
        generate_best_effort(&store, &disabled, &source).await;
        assert_eq!(store.thumbnail_url(&source), None);

        generate_best_effort(&store, &ThumbnailConfig::default(), &source).await;
        assert!(store.thumbnail_url(&source).is_some());
    }
}
