use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tokio::fs;
use tokio::fs::try_exists;

use crate::constants::{GALLERY_EXTENSIONS, IMAGE_EXTENSION, IMAGE_FILE_PREFIX};

/// Creates `dir` and its parents; succeeds if it already exists.
pub async fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Unable to create directory '{}'", dir.display()))
}

/// `tattoo_<YYYYMMDD>_<HHMMSS>_<microseconds>.png`
pub fn timestamped_file_name(now: &DateTime<Local>) -> String {
    format!(
        "{IMAGE_FILE_PREFIX}{}.{IMAGE_EXTENSION}",
        now.format("%Y%m%d_%H%M%S_%6f")
    )
}

pub fn public_path(public_prefix: &str, file_name: &str) -> String {
    format!("{}/{}", public_prefix.trim_end_matches('/'), file_name)
}

pub async fn write_image_file(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    ensure_dir(dir).await?;
    let target_path = dir.join(file_name);

    fs::write(&target_path, bytes)
        .await
        .with_context(|| format!("Unable to write image '{}'", target_path.display()))?;

    Ok(target_path)
}

/// Matches `.png`, `.jpg`, `.jpeg`, `.gif` and `.webp`, ignoring case.
pub fn is_gallery_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            GALLERY_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Public paths of every gallery image in `dir`, newest name first.
/// A missing directory yields an empty list.
pub async fn collect_gallery_images(dir: &Path, public_prefix: &str) -> Result<Vec<String>> {
    if !try_exists(dir)
        .await
        .with_context(|| format!("Failed to check directory '{}'", dir.display()))?
    {
        return Ok(Vec::new());
    }

    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("Unable to read directory '{}'", dir.display()))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to iterate directory '{}'", dir.display()))?
    {
        let metadata = entry
            .metadata()
            .await
            .context("Failed to read metadata")?;
        if !metadata.is_file() {
            continue;
        }

        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };

        if is_gallery_image(Path::new(&file_name)) {
            names.push(file_name);
        }
    }

    names.sort_by(|a, b| b.cmp(a));

    Ok(names
        .iter()
        .map(|name| public_path(public_prefix, name))
        .collect())
}
