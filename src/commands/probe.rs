//! Smoke test for the hosted `/generate-tattoo/` endpoint.
//!
//! Every outcome, including transport failures, is reported as text; the
//! probe itself never fails.

use std::io::{self, Write};
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::constants::{DEFAULT_PROBE_PROMPT, DEFAULT_PROBE_URL, PROBE_TIMEOUT_SECS};
use crate::models::ProbeRequest;

#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub url: String,
    pub prompt: String,
    pub timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_PROBE_URL.to_string(),
            prompt: DEFAULT_PROBE_PROMPT.to_string(),
            timeout: Duration::from_secs(PROBE_TIMEOUT_SECS),
        }
    }
}

pub async fn run_probe(options: &ProbeOptions, out: &mut impl Write) -> io::Result<()> {
    let payload = ProbeRequest {
        prompt: &options.prompt,
    };
    let payload_json = serde_json::to_string(&payload).map_err(io::Error::other)?;

    writeln!(out, "Sending POST request to: {}", options.url)?;
    writeln!(out, "Payload: {}\n", payload_json)?;

    let client = match Client::builder().timeout(options.timeout).build() {
        Ok(client) => client,
        Err(err) => return report_request_error(&err, out),
    };

    let response = match client
        .post(&options.url)
        .header(CONTENT_TYPE, "application/json")
        .json(&payload)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => return report_request_error(&err, out),
    };

    let status = response.status().as_u16();
    writeln!(out, "Status Code: {}", status)?;

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => return report_request_error(&err, out),
    };
    debug!(status, bytes = body.len(), "probe response received");

    report_response(status, &body, out)
}

/// Writes the human-readable report for a response that did arrive.
pub fn report_response(status: u16, body: &str, out: &mut impl Write) -> io::Result<()> {
    match status {
        200 => match serde_json::from_str::<Value>(body) {
            Ok(data) => {
                writeln!(out, "Response JSON:")?;
                writeln!(out, "{}", pretty_json(&data)?)?;

                if let Some(text) = truthy_field(&data, "text_response") {
                    writeln!(out, "\n--- Text Response ---")?;
                    writeln!(out, "{}", display_value(text))?;
                }

                if let Some(image) = truthy_field(&data, "image_base64") {
                    writeln!(out, "\n--- Image (Base64) ---")?;
                    writeln!(
                        out,
                        "Received {} bytes of base64 image data.",
                        value_len(image)
                    )?;
                }

                if let Some(path) = truthy_field(&data, "image_path") {
                    writeln!(out, "\nServer-side image path: {}", display_value(path))?;
                }
                Ok(())
            }
            Err(_) => {
                writeln!(out, "Error: Could not decode JSON response.")?;
                writeln!(out, "Response Text: {}", body)
            }
        },
        500 => {
            writeln!(out, "Error: Server returned a 500 Internal Server Error.")?;
            match serde_json::from_str::<Value>(body) {
                Ok(error_data) => writeln!(out, "Error details: {}", pretty_json(&error_data)?),
                Err(_) => writeln!(out, "Could not decode error response: {}", body),
            }
        }
        other => {
            writeln!(out, "Error: Received status code {}", other)?;
            writeln!(out, "Response Text: {}", body)
        }
    }
}

fn report_request_error(err: &reqwest::Error, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "An error occurred during the request: {}",
        error_chain(err)
    )
}

// reqwest's Display hides the underlying cause (refused, DNS, ...).
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Four-space indented JSON, keys in document order, non-ASCII escaped as
/// `\uXXXX`.
pub fn pretty_json(value: &Value) -> io::Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer).map_err(io::Error::other)?;
    let rendered = String::from_utf8(buffer).map_err(io::Error::other)?;
    Ok(escape_non_ascii(&rendered))
}

// serde_json only emits non-ASCII inside string literals, so escaping the
// rendered text char by char keeps it valid JSON.
fn escape_non_ascii(rendered: &str) -> String {
    let mut escaped = String::with_capacity(rendered.len());
    for ch in rendered.chars() {
        if ch.is_ascii() {
            escaped.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    escaped
}

fn truthy_field<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    data.get(key).filter(|value| is_truthy(value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn value_len(value: &Value) -> usize {
    match value {
        Value::String(text) => text.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        other => other.to_string().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: u16, body: &str) -> String {
        let mut out = Vec::new();
        report_response(status, body, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn success_reports_text_and_image_length() {
        let output = report(200, r#"{"text_response": "ok", "image_base64": "QUJD"}"#);

        assert!(output.starts_with(
            "Response JSON:\n{\n    \"text_response\": \"ok\",\n    \"image_base64\": \"QUJD\"\n}\n"
        ));
        assert!(output.contains("\n--- Text Response ---\nok\n"));
        assert!(output.contains("\n--- Image (Base64) ---\nReceived 4 bytes of base64 image data.\n"));
        assert!(!output.contains("Server-side image path"));
    }

    #[test]
    fn success_with_image_path_prints_it() {
        let output = report(200, r#"{"image_path": "/generated_tattoos/a.png"}"#);
        assert!(output.contains("\nServer-side image path: /generated_tattoos/a.png\n"));
        assert!(!output.contains("--- Text Response ---"));
    }

    #[test]
    fn empty_fields_are_treated_as_absent() {
        let output = report(200, r#"{"text_response": "", "image_base64": null}"#);
        assert!(!output.contains("--- Text Response ---"));
        assert!(!output.contains("--- Image (Base64) ---"));
    }

    #[test]
    fn success_with_invalid_json_prints_raw_text() {
        let output = report(200, "not json");
        assert_eq!(
            output,
            "Error: Could not decode JSON response.\nResponse Text: not json\n"
        );
    }

    #[test]
    fn server_error_pretty_prints_json_body() {
        let output = report(500, r#"{"error": "boom"}"#);
        assert_eq!(
            output,
            "Error: Server returned a 500 Internal Server Error.\n\
             Error details: {\n    \"error\": \"boom\"\n}\n"
        );
    }

    #[test]
    fn server_error_with_plain_body_prints_raw_text() {
        let output = report(500, "upstream exploded");
        assert!(output.ends_with("Could not decode error response: upstream exploded\n"));
    }

    #[test]
    fn other_status_prints_code_and_body() {
        let output = report(404, "Not Found");
        assert_eq!(
            output,
            "Error: Received status code 404\nResponse Text: Not Found\n"
        );
    }

    #[test]
    fn non_ascii_is_escaped_like_ensure_ascii() {
        let output = report(500, r#"{"error": "café ☕ 🐉"}"#);
        assert!(output.contains(r#""error": "caf\u00e9 \u2615 \ud83d\udc09""#), "{output}");

        let rendered = pretty_json(&serde_json::json!({"name": "Løve"})).unwrap();
        let reparsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(reparsed["name"], "Løve");
    }

    #[test]
    fn truthiness_follows_json_semantics() {
        use serde_json::json;
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!(1.5)));
        assert!(is_truthy(&json!({"a": 1})));
    }
}
