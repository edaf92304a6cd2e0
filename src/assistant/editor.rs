//! Document action dispatcher: one fixed prompt template per action kind,
//! one single-shot request, and per-kind splicing of the result back into
//! the document content.

use super::{AssistantError, TextGenerator};
use crate::config;
use crate::models::enums::EditorAction;

/// System instruction for all document actions.
pub const EDITOR_SYSTEM_INSTRUCTION: &str = "You are an expert editor.";

/// Build the single-shot prompt for an editor action.
pub fn build_action_prompt(action: &EditorAction, content: &str) -> String {
    match action {
        EditorAction::Summarize => {
            format!("Summarize the following text concisely in bullet points:\n\n{content}")
        }
        EditorAction::FixGrammar => format!(
            "Fix the grammar and spelling of the following text. Do not change the \
             meaning or tone, just correct errors:\n\n{content}"
        ),
        EditorAction::Expand => format!(
            "Expand on the ideas in the following text, adding more detail and depth:\n\n{content}"
        ),
        EditorAction::MakeProfessional => format!(
            "Rewrite the following text to sound more professional, corporate, and \
             polished:\n\n{content}"
        ),
        EditorAction::TranslateEs => {
            format!("Translate the following text into Spanish:\n\n{content}")
        }
    }
}

/// Splice the provider result into the document content.
///
/// Summarize and TranslateEs append a labeled section after the existing
/// content; the three rewrite actions replace the content wholesale.
pub fn apply_action_result(action: &EditorAction, content: &str, result: &str) -> String {
    match action {
        EditorAction::Summarize => format!("{content}\n\n--- AI Summary ---\n{result}"),
        EditorAction::TranslateEs => {
            format!("{content}\n\n--- Spanish Translation ---\n{result}")
        }
        EditorAction::FixGrammar | EditorAction::Expand | EditorAction::MakeProfessional => {
            result.to_string()
        }
    }
}

/// Run one document action against the provider.
///
/// Whitespace-only content is a no-op: the provider is never invoked and
/// `None` tells the caller to leave the document untouched. Any provider
/// error aborts the action with the content untouched.
pub fn process_document_action<G: TextGenerator>(
    generator: &G,
    action: &EditorAction,
    content: &str,
) -> Result<Option<String>, AssistantError> {
    if content.trim().is_empty() {
        return Ok(None);
    }

    let prompt = build_action_prompt(action, content);
    let result = generator.generate(EDITOR_SYSTEM_INSTRUCTION, &prompt, config::EDITOR_TEMPERATURE)?;

    Ok(Some(apply_action_result(action, content, &result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::Turn;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::Sender;

    /// Counts invocations and returns a fixed result.
    struct FixedGenerator {
        result: &'static str,
        calls: AtomicUsize,
    }

    impl FixedGenerator {
        fn new(result: &'static str) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TextGenerator for FixedGenerator {
        fn generate(
            &self,
            system: &str,
            _prompt: &str,
            temperature: f32,
        ) -> Result<String, AssistantError> {
            assert_eq!(system, EDITOR_SYSTEM_INSTRUCTION);
            assert!((temperature - crate::config::EDITOR_TEMPERATURE).abs() < f32::EPSILON);
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.result.to_string())
        }

        fn generate_streaming(
            &self,
            _system: &str,
            _history: &[Turn],
            _message: &str,
            _temperature: f32,
            _token_tx: Sender<String>,
        ) -> Result<String, AssistantError> {
            unreachable!("editor actions are single-shot")
        }
    }

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        fn generate(
            &self,
            _system: &str,
            _prompt: &str,
            _temperature: f32,
        ) -> Result<String, AssistantError> {
            Err(AssistantError::Api {
                status: 500,
                body: "upstream error".into(),
            })
        }

        fn generate_streaming(
            &self,
            _system: &str,
            _history: &[Turn],
            _message: &str,
            _temperature: f32,
            _token_tx: Sender<String>,
        ) -> Result<String, AssistantError> {
            unreachable!("editor actions are single-shot")
        }
    }

    #[test]
    fn prompt_templates_carry_the_content() {
        let prompt = build_action_prompt(&EditorAction::Summarize, "The body");
        assert_eq!(
            prompt,
            "Summarize the following text concisely in bullet points:\n\nThe body"
        );

        let prompt = build_action_prompt(&EditorAction::TranslateEs, "The body");
        assert_eq!(prompt, "Translate the following text into Spanish:\n\nThe body");

        let prompt = build_action_prompt(&EditorAction::FixGrammar, "The body");
        assert!(prompt.starts_with("Fix the grammar and spelling"));
        assert!(prompt.ends_with("just correct errors:\n\nThe body"));
    }

    #[test]
    fn summarize_appends_labeled_section() {
        let generator = FixedGenerator::new("Y");
        let out = process_document_action(&generator, &EditorAction::Summarize, "X").unwrap();
        assert_eq!(out.as_deref(), Some("X\n\n--- AI Summary ---\nY"));
    }

    #[test]
    fn translate_appends_labeled_section() {
        let generator = FixedGenerator::new("Hola");
        let out = process_document_action(&generator, &EditorAction::TranslateEs, "Hello").unwrap();
        assert_eq!(out.as_deref(), Some("Hello\n\n--- Spanish Translation ---\nHola"));
    }

    #[test]
    fn fix_grammar_replaces_wholesale() {
        let generator = FixedGenerator::new("Y");
        let out = process_document_action(&generator, &EditorAction::FixGrammar, "X").unwrap();
        assert_eq!(out.as_deref(), Some("Y"));
    }

    #[test]
    fn expand_and_professional_replace_wholesale() {
        let generator = FixedGenerator::new("rewritten");
        for action in [EditorAction::Expand, EditorAction::MakeProfessional] {
            let out = process_document_action(&generator, &action, "draft").unwrap();
            assert_eq!(out.as_deref(), Some("rewritten"));
        }
    }

    #[test]
    fn whitespace_only_content_never_invokes_provider() {
        let generator = FixedGenerator::new("Y");
        for action in [
            EditorAction::Summarize,
            EditorAction::FixGrammar,
            EditorAction::Expand,
            EditorAction::MakeProfessional,
            EditorAction::TranslateEs,
        ] {
            let out = process_document_action(&generator, &action, "   ").unwrap();
            // No rewrite to apply, so the caller leaves the document alone.
            assert_eq!(out, None);
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn provider_failure_aborts_without_result() {
        let result = process_document_action(&FailingGenerator, &EditorAction::Expand, "X");
        assert!(matches!(result, Err(AssistantError::Api { status: 500, .. })));
    }

    #[test]
    fn empty_provider_text_still_splices() {
        let generator = FixedGenerator::new("");
        let out = process_document_action(&generator, &EditorAction::Summarize, "X").unwrap();
        assert_eq!(out.as_deref(), Some("X\n\n--- AI Summary ---\n"));
    }
}
