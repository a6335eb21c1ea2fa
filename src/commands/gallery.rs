use std::io::{self, Write};
use std::path::Path;

use tracing::error;

use crate::fs_utils::collect_gallery_images;
use crate::models::{GalleryError, GalleryListing};

/// Prints the gallery listing as JSON and returns the exit status.
pub async fn run(dir: &Path, public_prefix: &str, out: &mut impl Write) -> io::Result<u8> {
    match collect_gallery_images(dir, public_prefix).await {
        Ok(images) => {
            let listing = GalleryListing { images };
            writeln!(out, "{}", to_pretty(&listing)?)?;
            Ok(0)
        }
        Err(err) => {
            error!("Error reading tattoos directory: {err:#}");
            let payload = GalleryError {
                error: "Failed to retrieve tattoo images.".to_string(),
                details: format!("{err:#}"),
            };
            writeln!(out, "{}", to_pretty(&payload)?)?;
            Ok(1)
        }
    }
}

fn to_pretty<T: serde::Serialize>(value: &T) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
