//! Prompt assembly for the chat layer.
//!
//! Attaching retrieved context and appending the user's message are separate
//! steps, and both run on every turn: the history never carries a stale
//! system message, and the first turn is not special.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::Artifact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// System prompt artifact: `{ "SYSTEM_PROMPT": "<text>" }`
///
/// Usually held in a [`LazyStore`](crate::store::LazyStore) so it is parsed
/// once per session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemPrompt {
    #[serde(rename = "SYSTEM_PROMPT")]
    pub text: String,
}

impl Artifact for SystemPrompt {
    const KIND: &'static str = "system_prompt";

    fn parse(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn entries(&self) -> usize {
        1
    }
}

#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system_prompt: String,
}

impl PromptAssembler {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self { system_prompt: system_prompt.into() }
    }

    pub fn from_artifact(prompt: &SystemPrompt) -> Self {
        Self::new(prompt.text.as_str())
    }

    /// System message carrying the prompt, the current date and the context.
    pub fn system_message(&self, context: &str, now: DateTime<Utc>) -> ChatMessage {
        ChatMessage::new(
            Role::System,
            format!(
                "{}\nCurrent Date: {}\nRetrieved Context:\n{}",
                self.system_prompt,
                now.to_rfc3339_opts(SecondsFormat::Millis, true),
                context
            ),
        )
    }

    /// Put `system` first and drop any system message already in `history`.
    pub fn attach_context(history: &[ChatMessage], system: ChatMessage) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(system);
        messages.extend(history.iter().filter(|m| m.role != Role::System).cloned());
        messages
    }

    /// Full message list for the next model call.
    pub fn assemble(
        &self,
        history: &[ChatMessage],
        user_input: &str,
        context: &str,
        now: DateTime<Utc>,
    ) -> Vec<ChatMessage> {
        let mut messages = Self::attach_context(history, self.system_message(context, now));
        messages.push(ChatMessage::user(user_input));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RagError;
    use crate::store::{ArtifactSource, LazyStore};
    use chrono::TimeZone;
    use std::sync::Arc;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_system_message_format() {
        let assembler = PromptAssembler::new("You are Alex's assistant.");
        let msg = assembler.system_message("[]", fixed_now());

        assert_eq!(msg.role, Role::System);
        assert_eq!(
            msg.content,
            "You are Alex's assistant.\nCurrent Date: 2025-03-14T09:26:53.000Z\nRetrieved Context:\n[]"
        );
    }

    #[test]
    fn test_first_turn() {
        let assembler = PromptAssembler::new("sys");
        let messages = assembler.assemble(&[], "hi", "ctx", fixed_now());

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1], ChatMessage::user("hi"));
    }

    #[test]
    fn test_later_turn_replaces_stale_system_message() {
        let assembler = PromptAssembler::new("sys");
        let first = assembler.assemble(&[], "hi", "old context", fixed_now());

        let mut history = first.clone();
        history.push(ChatMessage::new(Role::Assistant, "hello!"));

        let second = assembler.assemble(&history, "tell me more", "new context", fixed_now());

        assert_eq!(second.len(), 4);
        assert!(second[0].content.ends_with("new context"));
        assert_eq!(second.iter().filter(|m| m.role == Role::System).count(), 1);
        assert_eq!(second[1], ChatMessage::user("hi"));
        assert_eq!(second[2].role, Role::Assistant);
        assert_eq!(second[3], ChatMessage::user("tell me more"));

        // The earlier list is untouched
        assert!(first[0].content.ends_with("old context"));
    }

    #[test]
    fn test_system_prompt_artifact() {
        let prompt = SystemPrompt::parse(br#"{"SYSTEM_PROMPT": "Be concise."}"#).unwrap();
        assert_eq!(prompt.text, "Be concise.");

        assert!(SystemPrompt::parse(br#"{"prompt": "wrong key"}"#).is_err());
    }

    #[test]
    fn test_system_prompt_loads_once() {
        let lazy: LazyStore<SystemPrompt> =
            LazyStore::new(ArtifactSource::from(r#"{"SYSTEM_PROMPT": "You are Alex's assistant."}"#));
        assert!(!lazy.is_loaded());

        let first = lazy.load().unwrap();
        let second = lazy.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let assembler = PromptAssembler::from_artifact(&second);
        let msg = assembler.system_message("[]", fixed_now());
        assert!(msg.content.starts_with("You are Alex's assistant.\nCurrent Date: "));
    }

    #[test]
    fn test_bad_system_prompt_artifact_is_not_cached() {
        let lazy: LazyStore<SystemPrompt> = LazyStore::new(ArtifactSource::from("{}"));
        assert!(matches!(lazy.load(), Err(RagError::Json(_))));
        assert!(!lazy.is_loaded());
    }

    #[test]
    fn test_message_serde_roles() {
        let json = serde_json::to_string(&ChatMessage::user("q")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"q"}"#);
    }
}
