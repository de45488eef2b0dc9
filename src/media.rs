use std::{
    io,
    path::{Path, PathBuf},
};

use tokio::{fs, io::AsyncWriteExt};

use crate::{error::AppResult, mixins::new_id};

/// Subdirectory of the media root that film work uploads go to.
pub const UPLOAD_DIR: &str = "movies";

#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes an upload and returns its path relative to the media root.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> AppResult<String> {
        let dir = self.root.join(UPLOAD_DIR);
        fs::create_dir_all(&dir).await?;

        let base = sanitize_file_name(file_name);
        let mut name = base.clone();
        let mut file = loop {
            match fs::OpenOptions::new().write(true).create_new(true).open(dir.join(&name)).await {
                Ok(file) => break file,
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    name = with_suffix(&base, &new_id().simple().to_string()[..7]);
                }
                Err(err) => return Err(err.into()),
            }
        };

        file.write_all(bytes).await?;
        file.flush().await?;
        tracing::info!(file = %name, size = bytes.len(), "media file stored");
        Ok(format!("{UPLOAD_DIR}/{name}"))
    }

    /// Removes a stored upload; a missing file is not an error.
    pub async fn remove(&self, path: &str) -> AppResult<()> {
        match fs::remove_file(self.root.join(path)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn url(path: &str) -> String {
        format!("/media/{path}")
    }
}

/// Keeps the final path component and replaces anything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() { "upload".to_string() } else { cleaned.to_string() }
}

fn with_suffix(name: &str, suffix: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{suffix}.{ext}"),
        _ => format!("{name}_{suffix}"),
    }
}
