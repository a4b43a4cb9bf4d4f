//! Local file storage for uploaded inspection images.
//!
//! Files live directly under one root directory. Stored names are the
//! sanitized client file name, so a second upload with the same name
//! overwrites the first; analysis inputs use uuid-prefixed names instead.

use std::io;
use std::path::{Path, PathBuf};

pub use tempfile::TempPath;

/// A file written by [`UploadStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub file_name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist yet.
    pub async fn ensure_root(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write `bytes` under the sanitized form of `original_name`.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<StoredFile> {
        let file_name = sanitize_file_name(original_name);
        let path = self.root.join(&file_name);
        self.write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored upload");
        Ok(StoredFile { file_name, path })
    }

    /// Write `bytes` under a unique name derived from `original_name`.
    ///
    /// The file is deleted when the returned [`TempPath`] is dropped,
    /// including when the caller's future is cancelled mid-write.
    pub async fn save_temp(&self, original_name: &str, bytes: &[u8]) -> io::Result<TempPath> {
        let file_name = format!(
            "{}_{}",
            uuid::Uuid::new_v4(),
            sanitize_file_name(original_name)
        );
        let path = TempPath::from_path(self.root.join(file_name));
        self.write(&path, bytes).await?;
        Ok(path)
    }

    pub async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    async fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.ensure_root().await?;
        tokio::fs::write(path, bytes).await
    }
}

/// Reduce a client-supplied name to a safe final path component.
pub fn sanitize_file_name(name: &str) -> String {
    let last = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Content type implied by a file extension, for uploads that arrive
/// without one.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}
