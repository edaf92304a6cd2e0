use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "NexGen";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Chat model — complex reasoning, streamed responses.
pub const CHAT_MODEL: &str = "gemini-3-pro-preview";

/// Editor model — fast single-shot document tasks.
pub const EDITOR_MODEL: &str = "gemini-2.5-flash";

/// Sampling temperature for chat: higher, for varied conversational output.
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Sampling temperature for editor actions: lower, for deterministic edits.
pub const EDITOR_TEMPERATURE: f32 = 0.3;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info,nexgen_lib=debug"
}

/// Get the application data directory
/// ~/NexGen/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("NexGen")
}

/// Path of the persisted user profile.
pub fn profile_path() -> PathBuf {
    app_data_dir().join("profile.json")
}

/// Gemini API key, injected by the environment. Never persisted.
pub fn api_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
}
