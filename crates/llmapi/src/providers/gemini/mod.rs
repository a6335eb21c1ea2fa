mod api;
pub mod models;
pub use api::{
    build_generate_body, convert_body_parts_gemini, decode_inline_image, first_candidate_parts,
    send_generate_request,
};

use std::future::Future;

use anyhow::Result;

use crate::types::{LLMClient, LLMMessage};
use models::GeminiResponse;

/// Anything that can answer a `generateContent` call.
///
/// `LLMClient` talks to the real API; callers that need to observe or
/// replace the network round trip supply their own implementation.
pub trait ContentGenerator {
    fn generate_content(
        &self,
        messages: Vec<LLMMessage>,
    ) -> impl Future<Output = Result<GeminiResponse>> + Send;
}

impl ContentGenerator for LLMClient {
    async fn generate_content(&self, messages: Vec<LLMMessage>) -> Result<GeminiResponse> {
        send_generate_request(self, messages).await
    }
}
