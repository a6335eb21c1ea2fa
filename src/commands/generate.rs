use std::io::{Cursor, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use image::{DynamicImage, ImageFormat};
use llmapi::providers::gemini::decode_inline_image;
use llmapi::utils::encode_byte_to_base64;
use llmapi::{ContentGenerator, LLMMessage, LLMMessageType, first_candidate_parts};
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::fs_utils::{public_path, timestamped_file_name, write_image_file};
use crate::models::{GenerationOutcome, ImageOutcome, PartOutcome, SavedImage};
use crate::output::write_outcome;
use crate::prompt::build_prompt;

/// Sends one tattoo request and turns every part of the first candidate
/// into a [`PartOutcome`], saving images along the way.
pub async fn generate_tattoo<G: ContentGenerator>(
    config: &GeneratorConfig,
    generator: &G,
    user_prompt: &str,
) -> Result<GenerationOutcome> {
    let messages = vec![LLMMessage::new(
        None,
        "user",
        vec![LLMMessageType::text(build_prompt(user_prompt))],
    )];

    info!(model = %config.model, "requesting tattoo design");
    let response = generator
        .generate_content(messages)
        .await
        .context("Failed to request tattoo generation")?;

    let parts = first_candidate_parts(&response);
    if parts.is_empty() {
        warn!("response contained no text or image parts");
    }

    Ok(process_parts(parts, &config.output_dir, &config.public_prefix).await)
}

pub async fn process_parts(
    parts: Vec<LLMMessageType>,
    output_dir: &Path,
    public_prefix: &str,
) -> GenerationOutcome {
    let mut outcome = GenerationOutcome::default();

    for part in parts {
        let processed = match part {
            LLMMessageType::TEXT(text) => PartOutcome::Text(text),
            LLMMessageType::IMAGE {
                data_b64,
                mime_type,
            } => process_image_part(&data_b64, mime_type, output_dir, public_prefix).await,
        };
        outcome.parts.push(processed);
    }

    outcome
}

async fn process_image_part(
    data_b64: &str,
    mime_type: String,
    output_dir: &Path,
    public_prefix: &str,
) -> PartOutcome {
    let png_bytes = match decode_inline_image(data_b64)
        .and_then(|bytes| decode_bitmap(&bytes))
        .and_then(|bitmap| encode_png(&bitmap))
    {
        Ok(bytes) => bytes,
        Err(err) => {
            return PartOutcome::Undecodable {
                mime_type,
                error: format!("{err:#}"),
            };
        }
    };

    let file_name = timestamped_file_name(&Local::now());
    let saved = match write_image_file(output_dir, &file_name, &png_bytes).await {
        Ok(file_path) => {
            debug!(path = %file_path.display(), "saved generated image");
            Ok(SavedImage {
                file_path,
                public_path: public_path(public_prefix, &file_name),
            })
        }
        Err(err) => {
            warn!("Failed to save generated image: {err:#}");
            Err(format!("{err:#}"))
        }
    };

    // The file on disk and the base64 payload are the same PNG bytes.
    PartOutcome::Image(ImageOutcome {
        saved,
        base64_png: encode_byte_to_base64(&png_bytes),
    })
}

pub fn decode_bitmap(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).context("Failed to decode image data")
}

pub fn encode_png(bitmap: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    bitmap
        .write_to(&mut buffer, ImageFormat::Png)
        .context("Failed to encode image as PNG")?;
    Ok(buffer.into_inner())
}

/// CLI entry point. Returns the process exit status.
///
/// The credential is checked before `make_generator` runs, so a missing key
/// never reaches the network.
pub async fn run<L, F, G>(
    lookup: L,
    user_prompt: &str,
    make_generator: F,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8
where
    L: Fn(&str) -> Option<String>,
    F: FnOnce(&GeneratorConfig) -> G,
    G: ContentGenerator,
{
    let config = match GeneratorConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(config_err) => {
            let _ = writeln!(err, "Error: {config_err}");
            return 1;
        }
    };
    debug!(?config, "configuration loaded");

    let generator = make_generator(&config);
    let outcome = match generate_tattoo(&config, &generator, user_prompt).await {
        Ok(outcome) => outcome,
        Err(generate_err) => {
            let _ = writeln!(err, "Error generating tattoo: {generate_err:#}");
            return 1;
        }
    };

    if let Err(write_err) = write_outcome(&outcome, out, err) {
        warn!("Failed to write generator output: {write_err}");
        return 1;
    }

    0
}
