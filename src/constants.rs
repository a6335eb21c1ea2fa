pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_IMAGE_MODEL";
pub const ENDPOINT_ENV: &str = "GEMINI_ENDPOINT";
pub const OUTPUT_DIR_ENV: &str = "TATTOO_OUTPUT_DIR";
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

pub const OUTPUT_DIR_NAME: &str = "public/generated_tattoos";
pub const PUBLIC_PATH_PREFIX: &str = "/generated_tattoos";
pub const IMAGE_FILE_PREFIX: &str = "tattoo_";
pub const IMAGE_EXTENSION: &str = "png";
pub const GALLERY_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

pub const TEXT_RESPONSE_PREFIX: &str = "Text response: ";
pub const IMAGE_PATH_PREFIX: &str = "IMAGE_PATH:";
pub const IMAGE_BASE64_PREFIX: &str = "IMAGE_BASE64:";

pub const DEFAULT_PROBE_URL: &str = "https://tattoo-gen-orb3x5u66q-el.a.run.app/generate-tattoo/";
pub const DEFAULT_PROBE_PROMPT: &str = "a majestic lion with a crown of stars";
pub const PROBE_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_LOG_LEVEL: &str = "warn";
