use crate::models::enums::ResponseStyle;
use crate::models::UserProfile;

/// Base persona instruction for the chat assistant.
pub const BASE_SYSTEM_INSTRUCTION: &str = "You are a helpful, intelligent AI assistant \
    in a productivity workspace. Be concise, accurate, and professional.";

/// Compose the chat system instruction from the user's profile.
///
/// Profile fields are interpolated verbatim, in a fixed order: name clause,
/// language clause, tone clause, custom instructions. Empty fields are
/// skipped entirely, never rendered as empty clauses. Segments are joined by
/// a single space; the custom-instructions segment carries its own leading
/// newline.
pub fn compose_system_instruction(profile: Option<&UserProfile>) -> String {
    let mut instruction = BASE_SYSTEM_INSTRUCTION.to_string();

    let Some(profile) = profile else {
        return instruction;
    };

    let mut parts: Vec<String> = Vec::new();

    if !profile.name.is_empty() {
        parts.push(format!("Address the user as \"{}\".", profile.name));
    }
    if !profile.language.is_empty() {
        parts.push(format!("Always respond in {}.", profile.language));
    }

    match profile.response_style {
        ResponseStyle::Formal => {
            parts.push("Maintain a highly professional, corporate, and formal tone.".to_string());
        }
        ResponseStyle::Casual => {
            parts.push("Keep the tone friendly, conversational, and casual.".to_string());
        }
        ResponseStyle::Concise => {
            parts.push(
                "Be extremely concise. Give short, direct answers without fluff.".to_string(),
            );
        }
        ResponseStyle::Default => {}
    }

    if !profile.custom_instructions.is_empty() {
        parts.push(format!(
            "\nUser's Custom Context/Instructions: {}",
            profile.custom_instructions
        ));
    }

    if !parts.is_empty() {
        instruction.push_str("\n\n[User Profile Settings]:\n");
        instruction.push_str(&parts.join(" "));
    }

    instruction
}
