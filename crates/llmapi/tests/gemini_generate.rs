use llmapi::{
    ContentGenerator, LLMClient, LLMMessage, LLMMessageType, ResponseModality,
    first_candidate_parts,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> LLMClient {
    LLMClient::new(
        "test-key",
        format!("{}/v1beta/models/", server.uri()),
        "models/test-model",
    )
    .with_response_modalities(&[ResponseModality::Text, ResponseModality::Image])
}

fn prompt_message() -> Vec<LLMMessage> {
    vec![LLMMessage::new(
        None,
        "user",
        vec![LLMMessageType::text("a koi fish")],
    )]
}

#[tokio::test]
async fn generate_content_posts_prompt_and_parses_parts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "a koi fish"}]}],
            "generationConfig": {"responseModalities": ["TEXT", "IMAGE"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "Koi Ascending"},
                        {"inlineData": {"mimeType": "image/png", "data": "QUJD"}}
                    ]
                },
                "finishReason": "STOP"
            }],
            "modelVersion": "test-model"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .generate_content(prompt_message())
        .await
        .expect("mocked request should succeed");

    assert_eq!(
        first_candidate_parts(&response),
        vec![
            LLMMessageType::text("Koi Ascending"),
            LLMMessageType::image_b64("QUJD", "image/png"),
        ]
    );
}

#[tokio::test]
async fn non_success_status_is_an_error_with_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_content(prompt_message())
        .await
        .expect_err("403 must surface as an error");

    let message = format!("{err:#}");
    assert!(message.contains("403"), "{message}");
    assert!(message.contains("API key not valid"), "{message}");
}

#[tokio::test]
async fn invalid_json_body_is_an_error_with_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_content(prompt_message())
        .await
        .expect_err("non-JSON body must fail");

    assert!(format!("{err:#}").contains("<html>oops</html>"));
}
