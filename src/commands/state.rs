use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::assistant::chat::ChatState;
use crate::models::{DocumentData, UserProfile};
use crate::profile::ProfileStore;

/// Global application state managed by Tauri.
///
/// The chat stream and the editor action are guarded independently: the chat
/// busy flag lives inside [`ChatState`], the editor flag here. At most one of
/// each may be in flight at a time.
pub struct AppState {
    pub chat: Mutex<ChatState>,
    pub document: Mutex<DocumentData>,
    pub profile: Mutex<UserProfile>,
    pub profile_store: ProfileStore,
    editor_busy: AtomicBool,
}

impl AppState {
    /// State backed by the standard profile location, profile loaded eagerly.
    pub fn new() -> Self {
        Self::with_profile_store(ProfileStore::default_location())
    }

    pub fn with_profile_store(profile_store: ProfileStore) -> Self {
        let profile = profile_store.load();
        Self {
            chat: Mutex::new(ChatState::new()),
            document: Mutex::new(DocumentData::default()),
            profile: Mutex::new(profile),
            profile_store,
            editor_busy: AtomicBool::new(false),
        }
    }

    /// Claim the editor for one action. Returns `None` while another action
    /// is still running. The returned guard releases the flag on drop, so
    /// the flag clears on every exit path.
    pub fn try_begin_editor_action(&self) -> Option<EditorGuard<'_>> {
        self.editor_busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| EditorGuard { state: self })
    }

    pub fn is_editor_busy(&self) -> bool {
        self.editor_busy.load(Ordering::SeqCst)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII token for an in-flight editor action.
pub struct EditorGuard<'a> {
    state: &'a AppState,
}

impl Drop for EditorGuard<'_> {
    fn drop(&mut self) {
        self.state.editor_busy.store(false, Ordering::SeqCst);
    }
}
