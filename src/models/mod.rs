pub mod enums;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use enums::{AppTheme, MessageRole, ResponseStyle};

/// A single message in the chat view.
///
/// Created on send (user) or on response-open (model, empty text). A model
/// message is mutated only by replacing its text with the full accumulated
/// stream so far, keyed by `id`; it is immutable once the stream completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: MessageRole::User,
            text: text.to_string(),
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    /// Reserved model message — starts empty and is filled while streaming.
    pub fn model_pending() -> Self {
        Self {
            id: Uuid::new_v4(),
            role: MessageRole::Model,
            text: String::new(),
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    pub fn model(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::model_pending()
        }
    }
}

/// The single working document of the editor view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentData {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub last_modified: DateTime<Utc>,
}

impl Default for DocumentData {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: "Untitled Note".to_string(),
            content: "Welcome to NexGen Workspace.\n\nStart typing here, then use the \
                      Magic Actions above to have Gemini Flash summarize, rewrite, or \
                      fix your grammar instantly."
                .to_string(),
            last_modified: Utc::now(),
        }
    }
}

/// User preferences, edited wholesale in the settings view and persisted on
/// every change. Fields feed the chat system instruction verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub language: String,
    pub response_style: ResponseStyle,
    pub custom_instructions: String,
    pub theme: AppTheme,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            language: "English".to_string(),
            response_style: ResponseStyle::Default,
            custom_instructions: String::new(),
            theme: AppTheme::Blue,
        }
    }
}
