pub mod commands;
pub mod config;
pub mod constants;
pub mod fs_utils;
pub mod logging;
pub mod models;
pub mod output;
pub mod prompt;

pub use commands::generate::{generate_tattoo, process_parts};
pub use commands::probe::{ProbeOptions, report_response, run_probe};
pub use config::{ConfigError, GeneratorConfig, load_env_files};
pub use constants::{
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_IMAGE_MODEL, DEFAULT_PROBE_PROMPT, DEFAULT_PROBE_URL,
    IMAGE_BASE64_PREFIX, IMAGE_PATH_PREFIX, OUTPUT_DIR_NAME, PUBLIC_PATH_PREFIX,
    TEXT_RESPONSE_PREFIX,
};
pub use models::{GenerationOutcome, ImageOutcome, PartOutcome, SavedImage};
pub use output::{ScrapedOutput, format_lines, parse_generator_output};
pub use prompt::{TATTOO_SYSTEM_PROMPT, build_prompt};
