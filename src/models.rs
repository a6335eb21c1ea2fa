use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Result of one generator run, one entry per response part in order.
#[derive(Debug, Default)]
pub struct GenerationOutcome {
    pub parts: Vec<PartOutcome>,
}

impl GenerationOutcome {
    pub fn images(&self) -> impl Iterator<Item = &ImageOutcome> {
        self.parts.iter().filter_map(|part| match part {
            PartOutcome::Image(image) => Some(image),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            PartOutcome::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug)]
pub enum PartOutcome {
    Text(String),
    Image(ImageOutcome),
    /// Inline data that could not be turned into a bitmap.
    Undecodable { mime_type: String, error: String },
}

#[derive(Debug)]
pub struct ImageOutcome {
    /// Saved location, or the reason the save failed.
    pub saved: Result<SavedImage, String>,
    pub base64_png: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub file_path: PathBuf,
    pub public_path: String,
}

#[derive(Debug, Serialize)]
pub struct ProbeRequest<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryListing {
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GalleryError {
    pub error: String,
    pub details: String,
}
