//! Image file storage
//!
//! Every stored image gets a fresh timestamped name under the images
//! directory. Names are claimed with create-new semantics, so two requests in
//! the same second end up with `_1`, `_2`, ... suffixes instead of sharing a
//! file. Client-supplied file names only ever contribute their extension.

use oracle_common::config::RootFolderInitializer;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// URL prefix the images directory is mounted under
pub const IMAGES_URL_PREFIX: &str = "/images";

const DEFAULT_SUFFIX: &str = ".jpg";
const MAX_EXTENSION_LEN: usize = 10;
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Images directory plus its thumbnail subdirectory
#[derive(Debug, Clone)]
pub struct ImageStore {
    images_dir: PathBuf,
    thumbnails_dir: PathBuf,
}

impl ImageStore {
    pub fn new(images_dir: PathBuf, thumbnails_dir: PathBuf) -> Self {
        Self {
            images_dir,
            thumbnails_dir,
        }
    }

    pub fn from_root(root: &RootFolderInitializer) -> Self {
        Self::new(root.images_dir(), root.thumbnails_dir())
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn thumbnails_dir(&self) -> &Path {
        &self.thumbnails_dir
    }

    /// Write uploaded bytes to a new `scan_<stamp><ext>` file
    pub async fn save_upload(&self, bytes: &[u8], original_name: Option<&str>) -> io::Result<PathBuf> {
        let suffix = upload_suffix(original_name);
        let (path, mut file) = self.create_unique("scan", &suffix).await?;

        let written = async {
            file.write_all(bytes).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            remove_quietly(&path).await;
            return Err(e);
        }

        debug!(path = %path.display(), bytes = bytes.len(), "Stored upload");
        Ok(path)
    }

    /// Claim a new `capture_<stamp>.jpg` path for the camera to write into
    pub async fn reserve_capture_path(&self) -> io::Result<PathBuf> {
        let (path, _file) = self.create_unique("capture", DEFAULT_SUFFIX).await?;
        Ok(path)
    }

    async fn create_unique(&self, prefix: &str, suffix: &str) -> io::Result<(PathBuf, File)> {
        let stamp = oracle_common::time::file_stamp(oracle_common::time::now());

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                format!("{}_{}{}", prefix, stamp, suffix)
            } else {
                format!("{}_{}_{}{}", prefix, stamp, attempt, suffix)
            };
            let path = self.images_dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free file name for {}_{}{}", prefix, stamp, suffix),
        ))
    }

    /// Where the thumbnail for `image_path` lives (whether or not it exists)
    ///
    /// Named after the full file name, extension included: `scan_S.png` and
    /// `scan_S.jpg` can both exist and must not share `thumbs/scan_S.jpg`.
    pub fn thumbnail_path(&self, image_path: &Path) -> Option<PathBuf> {
        let name = image_path.file_name()?.to_str()?;
        Some(self.thumbnails_dir.join(format!("{}.jpg", name)))
    }

    /// Browser URL of the thumbnail, only if it has been generated
    pub fn thumbnail_url(&self, image_path: &Path) -> Option<String> {
        let thumb = self.thumbnail_path(image_path)?;
        if !thumb.is_file() {
            return None;
        }
        let name = thumb.file_name()?.to_str()?;
        Some(format!(
            "{}/{}/{}",
            IMAGES_URL_PREFIX,
            oracle_common::config::THUMBNAILS_DIR,
            name
        ))
    }
}

/// Browser URL for a stored image: `/images/<file name>`
pub fn image_url(image_path: &Path) -> String {
    let name = image_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}/{}", IMAGES_URL_PREFIX, name)
}

/// Lowercased extension of the client file name, with the leading dot
///
/// Falls back to `.jpg` when the name has no extension or the extension is
/// not short ASCII alphanumeric.
pub fn upload_suffix(original_name: Option<&str>) -> String {
    let ext = original_name
        .map(Path::new)
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .filter(|e| {
            !e.is_empty() && e.len() <= MAX_EXTENSION_LEN && e.chars().all(|c| c.is_ascii_alphanumeric())
        });

    match ext {
        Some(ext) => format!(".{}", ext.to_ascii_lowercase()),
        None => DEFAULT_SUFFIX.to_string(),
    }
}

/// Remove a file, logging instead of failing
pub async fn remove_quietly(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "Removed file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove file"),
    }
}
