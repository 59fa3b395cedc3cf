//! Screenshot storage on local disk
//!
//! Uploads always land on one fixed file name and overwrite the previous
//! upload. Reads accept any file name in the directory that passes
//! [`is_safe_file_name`].

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name every upload is stored under
pub const SCREENSHOT_FILE_NAME: &str = "report_screenshot.png";

/// Default storage directory
pub const DEFAULT_SCREENSHOT_DIR: &str = "/app/screenshots";

/// Errors from the screenshot store
#[derive(Debug, Error)]
pub enum ScreenshotError {
    #[error("invalid screenshot name: {0:?}")]
    InvalidName(String),

    #[error("screenshot not found: {0}")]
    NotFound(String),

    #[error("screenshot storage error: {0}")]
    Io(#[from] io::Error),
}

/// Directory-backed screenshot store
#[derive(Debug, Clone)]
pub struct ScreenshotStore {
    dir: PathBuf,
}

impl ScreenshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the fixed upload target
    pub fn upload_path(&self) -> PathBuf {
        self.dir.join(SCREENSHOT_FILE_NAME)
    }

    /// Create the storage directory if it does not exist
    pub async fn init(&self) -> Result<(), ScreenshotError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Store an upload, replacing the previous one
    ///
    /// Each call stages its bytes in its own hidden temporary file and renames
    /// it into place. Readers see either the old or the new image, and
    /// overlapping uploads never share a staging file.
    pub async fn save(&self, data: Vec<u8>) -> Result<PathBuf, ScreenshotError> {
        let dir = self.dir.clone();
        let target = self.upload_path();
        let bytes = data.len();

        let persisted = target.clone();
        tokio::task::spawn_blocking(move || -> io::Result<()> {
            let mut staging = tempfile::Builder::new()
                .prefix(&format!(".{}.", SCREENSHOT_FILE_NAME))
                .suffix(".tmp")
                .tempfile_in(&dir)?;
            staging.write_all(&data)?;
            staging.as_file().sync_all()?;
            staging.persist(&persisted).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;

        tracing::info!(path = %target.display(), bytes, "screenshot saved");
        Ok(target)
    }

    /// Read a stored file by name
    pub async fn read(&self, file_name: &str) -> Result<Vec<u8>, ScreenshotError> {
        if !is_safe_file_name(file_name) {
            return Err(ScreenshotError::InvalidName(file_name.to_string()));
        }

        match tokio::fs::read(self.dir.join(file_name)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ScreenshotError::NotFound(file_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// A plain file name: ASCII letters, digits, `.`, `_` and `-`, not starting
/// with a dot, at most 255 bytes
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 255
        && !name.starts_with('.')
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}

/// Content type served for a stored file
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
