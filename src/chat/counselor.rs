//! Wellness counselor chat turn.
//!
//! A turn composes the counselor prompt from the user's text and a short
//! window of their earlier messages, asks the text-generation service for a
//! reply and falls back to [`FALLBACK_REPLY`] whenever that fails.

use crate::llm::LLMClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Number of earlier user turns forwarded with each prompt.
pub const CONTEXT_WINDOW: usize = 3;

pub const SYSTEM_PROMPT: &str = "You are a compassionate, professional AI wellness counselor. Your role is to:
- Provide empathetic, supportive responses
- Offer practical coping strategies when appropriate
- Maintain professional boundaries
- Encourage professional help when needed
- Keep responses conversational and warm
- Focus on mental health and emotional well-being
- Never give medical advice or diagnose conditions
- Always prioritize user safety and well-being

Respond as a caring counselor would, with empathy and practical support. Keep responses under 200 words.";

/// Returned verbatim whenever a reply cannot be generated.
pub const FALLBACK_REPLY: &str = "I'm here to listen and support you. I'm experiencing some technical difficulties right now, but I want you to know that your feelings are valid and important. Would you like to try sharing again, or would you prefer to connect with one of our human counselors?";

/// User input that is known to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserText(String);

impl UserText {
    /// `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Generated,
    Fallback,
}

/// Assistant reply. Always displayable, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_REPLY.to_string(),
            source: ReplySource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ReplySource::Fallback
    }
}

/// Build the full prompt for one turn.
pub fn compose_prompt(user_text: &UserText, prior_user_turns: &[String]) -> String {
    let start = prior_user_turns.len().saturating_sub(CONTEXT_WINDOW);
    let window = &prior_user_turns[start..];

    let context = if window.is_empty() {
        String::new()
    } else {
        format!("Previous conversation context: {}\n\n", window.join(" | "))
    };

    format!(
        "{}\n\n{}User: {}\n\nCounselor:",
        SYSTEM_PROMPT, context, user_text
    )
}

#[derive(Clone)]
pub struct WellnessChat {
    llm: Arc<dyn LLMClient>,
}

impl WellnessChat {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Run one turn. Failures of any kind yield [`Reply::fallback`].
    pub async fn send_turn(&self, user_text: &UserText, prior_user_turns: &[String]) -> Reply {
        let prompt = compose_prompt(user_text, prior_user_turns);

        match self.llm.generate(&prompt).await {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    warn!(model = %self.llm.model_name(), "empty reply, using fallback");
                    Reply::fallback()
                } else {
                    debug!(reply_len = trimmed.len(), "reply generated");
                    Reply {
                        text: trimmed.to_string(),
                        source: ReplySource::Generated,
                    }
                }
            }
            Err(e) => {
                warn!(model = %self.llm.model_name(), error = %e, "reply generation failed, using fallback");
                Reply::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AppError, Result};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct ScriptedClient {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMClient for ScriptedClient {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().push(prompt.to_string());
            self.reply
                .clone()
                .ok_or_else(|| AppError::LLM("scripted failure".to_string()))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn text(s: &str) -> UserText {
        UserText::parse(s).unwrap()
    }

    #[test]
    fn test_blank_text_is_rejected() {
        assert!(UserText::parse("").is_none());
        assert!(UserText::parse("  \n\t").is_none());
        assert_eq!(text(" hi ").as_str(), " hi ");
    }

    #[test]
    fn test_prompt_without_history_has_no_context_block() {
        let prompt = compose_prompt(&text("I'm feeling anxious"), &[]);
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(!prompt.contains("Previous conversation context"));
        assert!(prompt.ends_with("\n\nUser: I'm feeling anxious\n\nCounselor:"));
    }

    #[test]
    fn test_prompt_keeps_only_last_three_turns() {
        let history: Vec<String> = (1..=5).map(|i| format!("turn {}", i)).collect();
        let prompt = compose_prompt(&text("now"), &history);

        assert!(prompt.contains("Previous conversation context: turn 3 | turn 4 | turn 5\n\n"));
        assert!(!prompt.contains("turn 1"));
        assert!(!prompt.contains("turn 2"));
    }

    #[test]
    fn test_prompt_with_short_history() {
        let prompt = compose_prompt(&text("now"), &["only".to_string()]);
        assert!(prompt.contains("Previous conversation context: only\n\nUser: now"));
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let chat = WellnessChat::new(Arc::new(ScriptedClient::replying("  Take a breath.\n")));
        let reply = chat.send_turn(&text("hello"), &[]).await;

        assert_eq!(reply.text, "Take a breath.");
        assert_eq!(reply.source, ReplySource::Generated);
    }

    #[tokio::test]
    async fn test_failure_yields_fallback() {
        let chat = WellnessChat::new(Arc::new(ScriptedClient::failing()));
        let reply = chat.send_turn(&text("hello"), &[]).await;

        assert_eq!(reply.text, FALLBACK_REPLY);
        assert!(reply.is_fallback());
    }

    #[tokio::test]
    async fn test_whitespace_reply_yields_fallback() {
        let chat = WellnessChat::new(Arc::new(ScriptedClient::replying("   ")));
        let reply = chat.send_turn(&text("hello"), &[]).await;
        assert_eq!(reply, Reply::fallback());
    }

    #[tokio::test]
    async fn test_one_call_per_turn() {
        let client = Arc::new(ScriptedClient::replying("ok"));
        let chat = WellnessChat::new(client.clone());

        chat.send_turn(&text("a"), &[]).await;
        chat.send_turn(&text("b"), &["a".to_string()]).await;

        let prompts = client.prompts.lock();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("Previous conversation context: a\n\nUser: b"));
    }
}
