//! Document editor IPC commands.

use std::sync::Arc;

use tauri::{AppHandle, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::assistant::editor::process_document_action;
use crate::assistant::gemini::GeminiClient;
use crate::models::enums::EditorAction;
use crate::models::DocumentData;

use super::state::AppState;

/// Run one AI action on the current document.
///
/// At most one action runs at a time (independent of the chat stream).
/// Whitespace-only content is a no-op: the provider is never contacted and
/// the document comes back unmodified, timestamp included. On failure the
/// document is left untouched and the user gets a blocking dialog, never
/// inline error text.
#[tauri::command]
pub async fn run_editor_action(
    action: EditorAction,
    state: State<'_, Arc<AppState>>,
    app: AppHandle,
) -> Result<DocumentData, String> {
    let state = state.inner().clone();

    tauri::async_runtime::spawn_blocking(move || {
        let Some(_guard) = state.try_begin_editor_action() else {
            return Err("An editor action is already running".to_string());
        };

        let content = {
            let doc = state
                .document
                .lock()
                .map_err(|_| "Failed to acquire document lock".to_string())?;
            if doc.content.trim().is_empty() {
                tracing::debug!(action = action.as_str(), "document empty, action skipped");
                return Ok(doc.clone());
            }
            doc.content.clone()
        };

        let generator = GeminiClient::editor_from_env().map_err(|e| e.to_string())?;

        match process_document_action(&generator, &action, &content) {
            Ok(Some(new_content)) => {
                let mut doc = state
                    .document
                    .lock()
                    .map_err(|_| "Failed to acquire document lock".to_string())?;
                doc.content = new_content;
                doc.last_modified = chrono::Utc::now();
                tracing::info!(action = action.as_str(), "editor action applied");
                Ok(doc.clone())
            }
            Ok(None) => {
                // No rewrite produced; the document stays untouched.
                let doc = state
                    .document
                    .lock()
                    .map_err(|_| "Failed to acquire document lock".to_string())?;
                Ok(doc.clone())
            }
            Err(e) => {
                tracing::error!(action = action.as_str(), error = %e, "editor action failed");
                app.dialog()
                    .message("Failed to process AI action. Please try again.")
                    .title("NexGen")
                    .kind(MessageDialogKind::Error)
                    .blocking_show();
                Err(e.to_string())
            }
        }
    })
    .await
    .map_err(|e| e.to_string())?
}

/// Current document snapshot.
#[tauri::command]
pub fn get_document(state: State<'_, Arc<AppState>>) -> Result<DocumentData, String> {
    let doc = state
        .document
        .lock()
        .map_err(|_| "Failed to acquire document lock".to_string())?;
    Ok(doc.clone())
}

/// Manual save from the editor textarea.
#[tauri::command]
pub fn save_document(
    content: String,
    state: State<'_, Arc<AppState>>,
) -> Result<DocumentData, String> {
    let mut doc = state
        .document
        .lock()
        .map_err(|_| "Failed to acquire document lock".to_string())?;
    doc.content = content;
    doc.last_modified = chrono::Utc::now();
    Ok(doc.clone())
}
