//! The line protocol spoken on the generator's stdout.
//!
//! A calling process scrapes these lines by prefix, so the prefixes are
//! stable. Diagnostics go to stderr and are not part of the protocol.

use std::io::{self, Write};

use crate::constants::{IMAGE_BASE64_PREFIX, IMAGE_PATH_PREFIX, TEXT_RESPONSE_PREFIX};
use crate::models::{GenerationOutcome, PartOutcome};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct OutputLines {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

pub fn format_lines(outcome: &GenerationOutcome) -> OutputLines {
    let mut lines = OutputLines::default();

    for part in &outcome.parts {
        match part {
            PartOutcome::Text(text) => {
                lines.stdout.push(format!("{TEXT_RESPONSE_PREFIX}{text}"));
            }
            PartOutcome::Image(image) => {
                match &image.saved {
                    Ok(saved) => lines
                        .stdout
                        .push(format!("{IMAGE_PATH_PREFIX}{}", saved.public_path)),
                    Err(err) => lines
                        .stderr
                        .push(format!("Error saving image for gallery: {err}")),
                }
                lines
                    .stdout
                    .push(format!("{IMAGE_BASE64_PREFIX}{}", image.base64_png));
            }
            PartOutcome::Undecodable { mime_type, error } => {
                lines
                    .stderr
                    .push(format!("Error decoding image part ({mime_type}): {error}"));
            }
        }
    }

    lines
}

pub fn write_outcome(
    outcome: &GenerationOutcome,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    let lines = format_lines(outcome);
    for line in &lines.stderr {
        writeln!(err, "{line}")?;
    }
    for line in &lines.stdout {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    err.flush()
}

/// What a caller recovers from the generator's stdout.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScrapedOutput {
    pub image_base64: Option<String>,
    pub image_path: Option<String>,
    /// First line of each text response; continuation lines are not tracked.
    pub texts: Vec<String>,
}

/// Scans stdout line by line. Each `IMAGE_BASE64:` or `IMAGE_PATH:` line
/// replaces the previous value; scanning stops once both are set. An empty
/// value counts as not found.
pub fn parse_generator_output(stdout: &str) -> ScrapedOutput {
    let mut scraped = ScrapedOutput::default();

    for line in stdout.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(value) = line.strip_prefix(IMAGE_BASE64_PREFIX) {
            scraped.image_base64 = non_empty(value);
        } else if let Some(value) = line.strip_prefix(IMAGE_PATH_PREFIX) {
            scraped.image_path = non_empty(value);
        } else if let Some(value) = line.strip_prefix(TEXT_RESPONSE_PREFIX) {
            scraped.texts.push(value.to_string());
        }

        if scraped.image_base64.is_some() && scraped.image_path.is_some() {
            break;
        }
    }

    scraped
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.to_string()).filter(|value| !value.is_empty())
}
