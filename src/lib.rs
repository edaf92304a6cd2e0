pub mod assistant;
pub mod commands;
pub mod config;
pub mod models;
pub mod profile;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use commands::state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("NexGen starting v{}", config::APP_VERSION);

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(Arc::new(AppState::new()))
        .invoke_handler(tauri::generate_handler![
            commands::health_check,
            commands::chat::send_chat_message,
            commands::chat::get_chat_messages,
            commands::chat::is_chat_streaming,
            commands::chat::clear_chat,
            commands::document::run_editor_action,
            commands::document::get_document,
            commands::document::save_document,
            commands::profile::get_profile,
            commands::profile::save_profile,
        ])
        .run(tauri::generate_context!())
        .expect("error while running NexGen");
}
