//! Assistant subsystem: prompt composition, the Gemini HTTP client, chat
//! stream aggregation, and the document action dispatcher.

pub mod chat;
pub mod editor;
pub mod gemini;
pub mod prompt;

use std::sync::mpsc::Sender;

use thiserror::Error;

use crate::models::enums::MessageRole;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Cannot reach the Gemini API at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Gemini API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,

    #[error("A response is already being generated")]
    Busy,

    #[error("Invalid {field}: {value}")]
    InvalidEnum { field: String, value: String },
}

/// One prior turn of the conversation, as sent to the provider.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: MessageRole,
    pub text: String,
}

/// Hosted text-generation provider, as required by the chat and editor flows.
///
/// `GeminiClient` is the production implementation; tests substitute scripted
/// generators.
pub trait TextGenerator {
    /// One blocking request. Returns the complete response text, or an empty
    /// string when the provider returns no text.
    fn generate(
        &self,
        system: &str,
        prompt: &str,
        temperature: f32,
    ) -> Result<String, AssistantError>;

    /// Streamed request: ordered prior turns plus the new user message.
    /// Sends each text fragment through `token_tx` in arrival order and
    /// returns the full accumulated text. Every call opens a fresh stream.
    fn generate_streaming(
        &self,
        system: &str,
        history: &[Turn],
        message: &str,
        temperature: f32,
        token_tx: Sender<String>,
    ) -> Result<String, AssistantError>;
}
