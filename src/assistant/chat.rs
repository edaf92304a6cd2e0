//! Chat conversation state and stream aggregation.
//!
//! The conversation lives in memory. Each send reserves exactly one model
//! message; its id is fixed at creation and is the sole mutation key while
//! the stream is open. Fragments are applied in arrival order by replacing
//! the message text with the full accumulation so far — never by appending
//! to stored state.

use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AssistantError, TextGenerator, Turn};
use crate::models::ChatMessage;

/// Shown in place of a response when streaming fails mid-exchange.
pub const STREAM_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error while processing your request.";

/// Opening assistant message seeded into a fresh conversation.
pub const WELCOME_MESSAGE: &str = "Hello! I am your AI assistant powered by Gemini 3 Pro. \
    I can help you write code, analyze text, or draft documents. How can I help you today?";

/// Payload emitted via Tauri event while a response streams in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatStreamEvent {
    pub message_id: String,
    pub chunk: StreamChunkPayload,
}

/// A single streaming update sent to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StreamChunkPayload {
    /// Full accumulation so far, not the bare fragment.
    Token { text: String },
    Done { full_text: String },
    Error { message: String },
}

/// In-memory conversation state for the chat view.
pub struct ChatState {
    messages: Vec<ChatMessage>,
    streaming: bool,
}

impl ChatState {
    /// Fresh conversation, seeded with the welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::model(WELCOME_MESSAGE)],
            streaming: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn message(&self, id: Uuid) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Whether a model response is currently streaming in. Gates further
    /// sends; this is the only control over an open stream.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Snapshot of the conversation as provider turns, oldest first. Callers
    /// that need the history without the in-flight pair snapshot before
    /// `begin_exchange`, under the same lock.
    pub fn turns(&self) -> Vec<Turn> {
        self.messages
            .iter()
            .map(|m| Turn {
                role: m.role.clone(),
                text: m.text.clone(),
            })
            .collect()
    }

    /// Append the user message and reserve the empty model message the
    /// stream will fill. Returns the reserved id. Rejected while a stream
    /// is already open.
    pub fn begin_exchange(&mut self, user_text: &str) -> Result<Uuid, AssistantError> {
        if self.streaming {
            return Err(AssistantError::Busy);
        }
        self.streaming = true;
        self.messages.push(ChatMessage::user(user_text));
        let pending = ChatMessage::model_pending();
        let id = pending.id;
        self.messages.push(pending);
        Ok(id)
    }

    /// Replace the reserved message's text with the full accumulation so far.
    pub fn apply_fragment(&mut self, id: Uuid, accumulated: &str) {
        if let Some(msg) = self.messages.iter_mut().find(|m| m.id == id) {
            msg.text = accumulated.to_string();
        }
    }

    /// Replace the reserved message with the fixed error text and mark it,
    /// instead of leaving partial text that silently stops.
    pub fn fail_exchange(&mut self, id: Uuid) {
        if let Some(msg) = self.messages.iter_mut().find(|m| m.id == id) {
            msg.text = STREAM_ERROR_MESSAGE.to_string();
            msg.is_error = true;
        }
    }

    /// Clear the streaming flag. Must run on success and failure paths alike.
    pub fn finish_exchange(&mut self) {
        self.streaming = false;
    }

    /// Delete the full history. The only deletion the chat supports.
    ///
    /// An open stream keeps its busy flag: the orphaned worker still owns the
    /// exchange and releases the flag via `finish_exchange` when it ends.
    /// Clearing it here would let a second stream start while the first is
    /// in flight.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

/// How one exchange ended, for the completion event.
#[derive(Debug)]
pub enum ExchangeOutcome {
    Complete { full_text: String },
    Failed { message: String },
}

/// Drive one streaming exchange to completion.
///
/// The provider call runs on its own thread and feeds text fragments through
/// an mpsc channel. Fragments are applied in arrival order — each application
/// replaces the reserved message's text with the full accumulation so far —
/// and `on_update` is notified after every change. On a provider error the
/// reserved message is replaced with [`STREAM_ERROR_MESSAGE`] and marked as
/// an error. The streaming flag is cleared on every path.
pub fn run_exchange<G, F>(
    chat: &Mutex<ChatState>,
    message_id: Uuid,
    generator: G,
    system: String,
    history: Vec<Turn>,
    message: String,
    temperature: f32,
    mut on_update: F,
) -> ExchangeOutcome
where
    G: TextGenerator + Send + 'static,
    F: FnMut(&ChatMessage),
{
    let (token_tx, token_rx) = mpsc::channel::<String>();

    let producer = thread::spawn(move || {
        generator.generate_streaming(&system, &history, &message, temperature, token_tx)
    });

    let mut accumulated = String::new();
    for token in token_rx {
        accumulated.push_str(&token);
        if let Ok(mut guard) = chat.lock() {
            guard.apply_fragment(message_id, &accumulated);
            if let Some(msg) = guard.message(message_id) {
                on_update(msg);
            }
        }
    }

    let outcome = match producer.join() {
        Ok(Ok(full_text)) => {
            tracing::info!(chars = full_text.len(), "chat exchange complete");
            ExchangeOutcome::Complete { full_text }
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "chat stream failed");
            ExchangeOutcome::Failed {
                message: e.to_string(),
            }
        }
        Err(_) => {
            tracing::error!("chat stream worker panicked");
            ExchangeOutcome::Failed {
                message: "stream worker panicked".to_string(),
            }
        }
    };

    if let Ok(mut guard) = chat.lock() {
        if let ExchangeOutcome::Failed { .. } = outcome {
            guard.fail_exchange(message_id);
            if let Some(msg) = guard.message(message_id) {
                on_update(msg);
            }
        }
        guard.finish_exchange();
    }

    outcome
}
