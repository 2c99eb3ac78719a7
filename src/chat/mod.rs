//! Wellness companion chat.
//!
//! - [`counselor`] runs a single turn: prompt composition, one call to the
//!   text-generation service and the fallback reply.
//! - [`session`] holds conversation state between turns.

pub mod counselor;
pub mod session;

pub use counselor::{
    compose_prompt, Reply, ReplySource, UserText, WellnessChat, CONTEXT_WINDOW, FALLBACK_REPLY,
    SYSTEM_PROMPT,
};
pub use session::{
    ChatMessage, ChatSession, ChatSessionStore, ChatTurn, PendingTurn, Sender, SubmitRejection,
    TurnState, GREETING,
};
