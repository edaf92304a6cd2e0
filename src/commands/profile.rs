//! Profile settings IPC commands. The profile is edited wholesale and
//! persisted to disk on every change.

use std::sync::Arc;

use tauri::State;

use crate::models::UserProfile;

use super::state::AppState;

#[tauri::command]
pub fn get_profile(state: State<'_, Arc<AppState>>) -> Result<UserProfile, String> {
    let profile = state
        .profile
        .lock()
        .map_err(|_| "Failed to acquire profile lock".to_string())?;
    Ok(profile.clone())
}

/// Replace the profile and persist it. The in-memory copy only changes once
/// the write succeeded, so a failed save never desyncs disk and memory.
#[tauri::command]
pub fn save_profile(
    profile: UserProfile,
    state: State<'_, Arc<AppState>>,
) -> Result<(), String> {
    state
        .profile_store
        .save(&profile)
        .map_err(|e| e.to_string())?;

    let mut current = state
        .profile
        .lock()
        .map_err(|_| "Failed to acquire profile lock".to_string())?;
    *current = profile;

    tracing::info!("profile saved");
    Ok(())
}
