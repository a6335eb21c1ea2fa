use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::types::{LLMClient, LLMMessage, LLMMessageType, LLMUserType};
use crate::utils::decode_base64;

use super::models::{GeminiResponse, InlineData};

pub fn convert_body_parts_gemini(body_part: Vec<LLMMessageType>) -> Vec<Value> {
    body_part
        .into_iter()
        .map(|part| match part {
            LLMMessageType::TEXT(text) => json!({ "text": text }),
            LLMMessageType::IMAGE {
                data_b64,
                mime_type,
            } => {
                json!({
                    "inlineData": {
                        "mimeType": mime_type,
                        "data": data_b64
                    }
                })
            }
        })
        .collect()
}
pub fn convert_messages_to_gemini_contents(messages: Vec<LLMMessage>) -> Vec<Value> {
    messages
        .into_iter()
        .map(|m| {
            let parts = convert_body_parts_gemini(m.content);
            json!({
                "role": role_to_str(m.role),
                "parts": parts
            })
        })
        .collect()
}
fn role_to_str(role: LLMUserType) -> &'static str {
    match role {
        LLMUserType::Human => "user",
        LLMUserType::AI => "model",
    }
}

/// Builds the JSON body for `generateContent`, including the requested
/// response modalities when any are configured.
pub fn build_generate_body(api_client: &LLMClient, messages: Vec<LLMMessage>) -> Value {
    let mut body = json!({
        "contents": convert_messages_to_gemini_contents(messages)
    });

    if !api_client.response_modalities().is_empty() {
        let modalities: Vec<&str> = api_client
            .response_modalities()
            .iter()
            .map(|modality| modality.as_str())
            .collect();
        body["generationConfig"] = json!({ "responseModalities": modalities });
    }

    body
}

pub async fn send_generate_request(
    api_client: &LLMClient,
    body_part: Vec<LLMMessage>,
) -> Result<GeminiResponse> {
    let endpoint = api_client.endpoint().trim_end_matches('/');
    let model = api_client
        .default_model()
        .strip_prefix("models/")
        .unwrap_or(api_client.default_model());
    let url = format!("{}/{}:generateContent", endpoint, model);

    let body = build_generate_body(api_client, body_part);
    debug!(%url, "sending generateContent request");

    let client = Client::new();
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_client.api_key())
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .with_context(|| format!("HTTP request to {} failed", url))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .context("Reading response body failed")?;

    if !status.is_success() {
        return Err(anyhow!(
            "Gemini generateContent failed: status {} body {}",
            status,
            response_text
        ));
    }

    let response: GeminiResponse = serde_json::from_str(&response_text).with_context(|| {
        format!(
            "Failed to decode Gemini response JSON. Raw response: {}",
            response_text
        )
    })?;

    let usage = response.usage_metadata.as_ref();
    debug!(
        candidates = response.candidates.len(),
        model_version = response.model_version.as_deref().unwrap_or("unknown"),
        prompt_tokens = ?usage.and_then(|u| u.prompt_token_count),
        candidates_tokens = ?usage.and_then(|u| u.candidates_token_count),
        total_tokens = ?usage.and_then(|u| u.total_token_count),
        block_reason = ?response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref()),
        "received generateContent response"
    );

    Ok(response)
}

pub fn decode_inline_image(inline_data_b64: &str) -> Result<Vec<u8>> {
    decode_base64(inline_data_b64).context("Inline image data is not valid base64")
}

fn inline_to_message(inline_data: &InlineData) -> LLMMessageType {
    LLMMessageType::image_b64(inline_data.data.clone(), inline_data.mime_type.clone())
}

/// Returns the parts of the first candidate, in the order received.
///
/// A part carrying text maps to `TEXT`; otherwise inline data maps to
/// `IMAGE`. Parts with neither are skipped.
pub fn first_candidate_parts(response: &GeminiResponse) -> Vec<LLMMessageType> {
    let Some(candidate) = response.candidates.first() else {
        return Vec::new();
    };

    candidate
        .content
        .parts
        .iter()
        .filter_map(|part| {
            if let Some(text) = &part.text {
                Some(LLMMessageType::text(text.clone()))
            } else {
                part.inline_data.as_ref().map(inline_to_message)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResponseModality;

    fn parse(value: Value) -> GeminiResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn body_includes_modalities_when_configured() {
        let client = LLMClient::new("k", "http://x", "m")
            .with_response_modalities(&[ResponseModality::Text, ResponseModality::Image]);
        let message = LLMMessage::new(None, "user", vec![LLMMessageType::text("draw")]);

        let body = build_generate_body(&client, vec![message]);

        assert_eq!(
            body["generationConfig"]["responseModalities"],
            json!(["TEXT", "IMAGE"])
        );
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "draw");
    }

    #[test]
    fn body_omits_generation_config_without_modalities() {
        let client = LLMClient::new("k", "http://x", "m");
        let body = build_generate_body(&client, Vec::new());
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn first_candidate_parts_keeps_order_and_ignores_later_candidates() {
        let response = parse(json!({
            "candidates": [
                {"content": {"parts": [
                    {"text": "one"},
                    {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                    {"text": "two"},
                    {}
                ]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }));

        let parts = first_candidate_parts(&response);

        assert_eq!(
            parts,
            vec![
                LLMMessageType::text("one"),
                LLMMessageType::image_b64("AAAA", "image/png"),
                LLMMessageType::text("two"),
            ]
        );
    }

    #[test]
    fn missing_candidates_and_content_parse_as_empty() {
        let blocked = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        assert!(first_candidate_parts(&blocked).is_empty());
        assert_eq!(
            blocked.prompt_feedback.and_then(|f| f.block_reason).as_deref(),
            Some("SAFETY")
        );

        let no_content = parse(json!({"candidates": [{"finishReason": "SAFETY"}]}));
        assert!(first_candidate_parts(&no_content).is_empty());
    }

    #[test]
    fn usage_metadata_token_counts_are_parsed() {
        let response = parse(json!({
            "candidates": [],
            "usageMetadata": {
                "promptTokenCount": 180,
                "candidatesTokenCount": 1290,
                "totalTokenCount": 1470,
                "promptTokensDetails": [{"modality": "TEXT", "tokenCount": 180}]
            }
        }));

        let usage = response.usage_metadata.expect("usage metadata present");
        assert_eq!(usage.prompt_token_count, Some(180));
        assert_eq!(usage.candidates_token_count, Some(1290));
        assert_eq!(usage.total_token_count, Some(1470));
    }

    #[test]
    fn decode_inline_image_reports_bad_data() {
        assert_eq!(decode_inline_image("QUJD").unwrap(), b"ABC");
        assert!(decode_inline_image("%%%").is_err());
    }
}
