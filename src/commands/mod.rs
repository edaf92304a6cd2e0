pub mod chat;
pub mod document;
pub mod profile;
pub mod state;

/// Health check IPC command — verifies backend is running
#[tauri::command]
pub fn health_check() -> String {
    tracing::debug!("Health check called");
    "ok".to_string()
}
