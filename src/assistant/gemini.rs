//! Gemini HTTP client for hosted text generation.
//!
//! Two request shapes, matching the two flows of the app:
//! - `generateContent` — one blocking request, full response text.
//! - `streamGenerateContent?alt=sse` — server-sent events, one JSON chunk
//!   per `data:` line, text fragments forwarded through an mpsc channel in
//!   arrival order.
//!
//! Reference: <https://ai.google.dev/api/generate-content>

use std::io::{BufRead, BufReader};
use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use super::{AssistantError, TextGenerator, Turn};
use crate::config;
use crate::models::enums::MessageRole;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Blocking HTTP client bound to one Gemini model.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Create a client with an explicit base URL, model, and key.
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client for the chat model, API key from the environment.
    pub fn chat_from_env() -> Result<Self, AssistantError> {
        let key = config::api_key().ok_or(AssistantError::MissingApiKey)?;
        Ok(Self::new(GEMINI_BASE_URL, config::CHAT_MODEL, &key, 300))
    }

    /// Client for the editor model, API key from the environment.
    pub fn editor_from_env() -> Result<Self, AssistantError> {
        let key = config::api_key().ok_or(AssistantError::MissingApiKey)?;
        Ok(Self::new(GEMINI_BASE_URL, config::EDITOR_MODEL, &key, 300))
    }

    /// The model this client talks to.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AssistantError {
        if e.is_connect() {
            AssistantError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            AssistantError::HttpClient(format!(
                "Request timed out after {}s",
                self.timeout_secs
            ))
        } else {
            AssistantError::HttpClient(e.to_string())
        }
    }
}

// ── Wire types ──────────────────────────────────────────────

/// Request body for generateContent / streamGenerateContent.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn turn(role: &str, text: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// Response body for generateContent, and for each streamed chunk.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

/// Concatenated text of the first candidate; empty when the provider
/// returned no text.
fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

/// Extract the JSON payload of one SSE line. Non-data lines (comments,
/// keep-alives, blank separators) yield `None`.
fn sse_payload(line: &str) -> Option<&str> {
    let payload = line.strip_prefix("data:")?.trim_start();
    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(
        &self,
        system: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, AssistantError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content::turn(MessageRole::User.as_str(), prompt)],
            system_instruction: Content::system(system),
            generation_config: GenerationConfig { temperature },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| AssistantError::ResponseParsing(e.to_string()))?;

        Ok(extract_text(&parsed))
    }

    fn generate_streaming(
        &self,
        system: &str,
        history: &[Turn],
        message: &str,
        temperature: f32,
        token_tx: Sender<String>,
    ) -> Result<String, AssistantError> {
        let url = format!(
            "{}/models/{}:streamGenerateContent",
            self.base_url, self.model
        );

        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::turn(turn.role.as_str(), &turn.text))
            .collect();
        contents.push(Content::turn(MessageRole::User.as_str(), message));

        let body = GenerateContentRequest {
            contents,
            system_instruction: Content::system(system),
            generation_config: GenerationConfig { temperature },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("alt", "sse"), ("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let mut accumulated = String::new();
        let reader = BufReader::new(response);

        for line in reader.lines() {
            let line = line.map_err(|e| AssistantError::HttpClient(e.to_string()))?;
            let Some(payload) = sse_payload(&line) else {
                continue;
            };

            let chunk: GenerateContentResponse = serde_json::from_str(payload)
                .map_err(|e| AssistantError::ResponseParsing(e.to_string()))?;

            let text = extract_text(&chunk);
            if text.is_empty() {
                continue;
            }

            accumulated.push_str(&text);
            if token_tx.send(text).is_err() {
                // Receiver gone — nobody is aggregating anymore.
                tracing::debug!(model = %self.model, "token receiver dropped, ending stream");
                break;
            }
        }

        Ok(accumulated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_gemini_field_names() {
        let body = GenerateContentRequest {
            contents: vec![Content::turn("user", "Hi")],
            system_instruction: Content::system("Be brief."),
            generation_config: GenerationConfig { temperature: 0.3 },
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hi");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "Be brief.");
        assert!(json["systemInstruction"].get("role").is_none());
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn extract_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&response), "Hello world");
    }

    #[test]
    fn extract_text_empty_on_no_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(extract_text(&response), "");
    }

    #[test]
    fn sse_payload_strips_data_prefix() {
        assert_eq!(sse_payload("data: {\"a\":1}"), Some("{\"a\":1}"));
        assert_eq!(sse_payload("data:{\"a\":1}"), Some("{\"a\":1}"));
    }

    #[test]
    fn sse_payload_ignores_non_data_lines() {
        assert_eq!(sse_payload(""), None);
        assert_eq!(sse_payload(": keep-alive"), None);
        assert_eq!(sse_payload("event: done"), None);
        assert_eq!(sse_payload("data:"), None);
    }

    #[test]
    fn streamed_chunk_parses_to_fragment() {
        let payload =
            r#"{"candidates":[{"content":{"parts":[{"text":"frag"}]}}]}"#;
        let chunk: GenerateContentResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(extract_text(&chunk), "frag");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = GeminiClient::new("http://localhost:9090/", "test-model", "key", 5);
        assert_eq!(client.base_url, "http://localhost:9090");
        assert_eq!(client.model(), "test-model");
    }
}
