pub mod providers;
pub mod types;
pub mod utils;

pub use providers::gemini::{ContentGenerator, first_candidate_parts, send_generate_request};
pub use types::{LLMClient, LLMMessage, LLMMessageType, LLMUserType, ResponseModality};
