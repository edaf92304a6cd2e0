//! Chat view IPC commands.
//!
//! `send_chat_message` reserves the model message, then streams the response
//! on a worker thread, forwarding each update to the frontend as
//! `chat-stream` events (`Token` carries the full accumulation so far,
//! `Done`/`Error` close the exchange).

use std::sync::Arc;

use tauri::{AppHandle, Emitter, State};

use crate::assistant::chat::{
    run_exchange, ChatStreamEvent, ExchangeOutcome, StreamChunkPayload,
};
use crate::assistant::gemini::GeminiClient;
use crate::assistant::prompt::compose_system_instruction;
use crate::config;
use crate::models::ChatMessage;

use super::state::AppState;

/// Send a user message and stream the model response via Tauri events.
///
/// Rejected while a stream is already open (the busy flag is the only
/// control over an open stream). The flag is released on every exit path of
/// the worker.
#[tauri::command]
pub fn send_chat_message(
    text: String,
    state: State<'_, Arc<AppState>>,
    app: AppHandle,
) -> Result<(), String> {
    let profile = state
        .profile
        .lock()
        .map_err(|_| "Failed to acquire profile lock".to_string())?
        .clone();
    let system = compose_system_instruction(Some(&profile));

    // Resolve the client before reserving the message, so a missing API key
    // surfaces synchronously and never leaves the chat stuck busy.
    let generator = GeminiClient::chat_from_env().map_err(|e| e.to_string())?;

    let (history, message_id) = {
        let mut chat = state
            .chat
            .lock()
            .map_err(|_| "Failed to acquire chat lock".to_string())?;
        let history = chat.turns();
        let id = chat.begin_exchange(&text).map_err(|e| e.to_string())?;
        (history, id)
    };

    tracing::debug!(turns = history.len(), "starting chat exchange");

    let state = state.inner().clone();
    std::thread::spawn(move || {
        let outcome = run_exchange(
            &state.chat,
            message_id,
            generator,
            system,
            history,
            text,
            config::CHAT_TEMPERATURE,
            |msg| {
                if msg.is_error {
                    // The Error event below covers the failure path.
                    return;
                }
                let _ = app.emit(
                    "chat-stream",
                    &ChatStreamEvent {
                        message_id: message_id.to_string(),
                        chunk: StreamChunkPayload::Token {
                            text: msg.text.clone(),
                        },
                    },
                );
            },
        );

        let chunk = match outcome {
            ExchangeOutcome::Complete { full_text } => StreamChunkPayload::Done { full_text },
            ExchangeOutcome::Failed { message } => StreamChunkPayload::Error { message },
        };

        if let Err(e) = app.emit(
            "chat-stream",
            &ChatStreamEvent {
                message_id: message_id.to_string(),
                chunk,
            },
        ) {
            tracing::warn!(error = %e, "Failed to emit chat-stream event");
        }
    });

    Ok(())
}

/// Current conversation, ordered oldest first.
#[tauri::command]
pub fn get_chat_messages(state: State<'_, Arc<AppState>>) -> Result<Vec<ChatMessage>, String> {
    let chat = state
        .chat
        .lock()
        .map_err(|_| "Failed to acquire chat lock".to_string())?;
    Ok(chat.messages().to_vec())
}

/// Whether a model response is currently streaming in.
#[tauri::command]
pub fn is_chat_streaming(state: State<'_, Arc<AppState>>) -> Result<bool, String> {
    let chat = state
        .chat
        .lock()
        .map_err(|_| "Failed to acquire chat lock".to_string())?;
    Ok(chat.is_streaming())
}

/// Delete the full conversation history.
#[tauri::command]
pub fn clear_chat(state: State<'_, Arc<AppState>>) -> Result<(), String> {
    let mut chat = state
        .chat
        .lock()
        .map_err(|_| "Failed to acquire chat lock".to_string())?;
    chat.clear();
    tracing::info!("chat history cleared");
    Ok(())
}
