//! Chat conversation state.
//!
//! A [`ChatSession`] is an append-only list of messages plus the
//! `idle -> awaiting_reply -> idle` turn state. Sessions live in memory only;
//! [`ChatSessionStore`] scopes them to the principal that opened them and
//! bounds how many each principal holds and how long idle ones are kept.

use crate::chat::counselor::{Reply, ReplySource, UserText, WellnessChat};
use crate::types::{AppError, Result};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_MAX_SESSIONS_PER_OWNER: usize = 10;
pub const DEFAULT_SESSION_IDLE_TTL_SECS: i64 = 3600;

pub const GREETING: &str = "Hello! I'm your AI wellness companion. I'm here to listen and support you. How are you feeling today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: Sender, content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            content,
            sender,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    Idle,
    AwaitingReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejection {
    #[error("Message is empty")]
    Blank,
    #[error("A reply is still pending for this conversation")]
    AwaitingReply,
}

impl From<SubmitRejection> for AppError {
    fn from(rejection: SubmitRejection) -> Self {
        match rejection {
            SubmitRejection::Blank => AppError::InvalidInput(rejection.to_string()),
            SubmitRejection::AwaitingReply => AppError::Conflict(rejection.to_string()),
        }
    }
}

/// What the caller needs to run the network half of a turn.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub text: UserText,
    pub prior_user_turns: Vec<String>,
    /// The user message appended by this turn.
    pub message: ChatMessage,
}

/// Both halves of a completed turn.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub user_message: ChatMessage,
    pub reply: ChatMessage,
    pub source: ReplySource,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    state: TurnState,
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// New session opened with the assistant greeting.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            state: TurnState::Idle,
            messages: vec![ChatMessage::new(Sender::Assistant, GREETING.to_string())],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Contents of all user messages so far, oldest first.
    pub fn user_turns(&self) -> Vec<String> {
        self.messages
            .iter()
            .filter(|m| m.sender == Sender::User)
            .map(|m| m.content.clone())
            .collect()
    }

    /// Append the user's message and enter `AwaitingReply`.
    ///
    /// Blank input and submissions while a reply is pending are rejected
    /// without touching the message list.
    pub fn begin_turn(&mut self, raw: &str) -> std::result::Result<PendingTurn, SubmitRejection> {
        if self.state == TurnState::AwaitingReply {
            return Err(SubmitRejection::AwaitingReply);
        }
        let text = UserText::parse(raw).ok_or(SubmitRejection::Blank)?;

        let prior_user_turns = self.user_turns();
        let message = ChatMessage::new(Sender::User, text.as_str().to_string());
        self.messages.push(message.clone());
        self.state = TurnState::AwaitingReply;

        Ok(PendingTurn {
            text,
            prior_user_turns,
            message,
        })
    }

    /// Append the assistant reply and return to `Idle`.
    pub fn complete_turn(&mut self, reply: Reply) -> &ChatMessage {
        self.state = TurnState::Idle;
        self.messages
            .push(ChatMessage::new(Sender::Assistant, reply.text));
        &self.messages[self.messages.len() - 1]
    }

    /// Run a whole turn against `chat`.
    ///
    /// If the returned future is dropped while the reply is pending, the turn
    /// is closed with the fallback reply.
    pub async fn submit(
        &mut self,
        chat: &WellnessChat,
        raw: &str,
    ) -> std::result::Result<ChatMessage, SubmitRejection> {
        let pending = self.begin_turn(raw)?;
        let mut guard = SessionTurnGuard {
            session: self,
            done: false,
        };
        let reply = chat
            .send_turn(&pending.text, &pending.prior_user_turns)
            .await;
        Ok(guard.finish(reply))
    }
}

struct SessionTurnGuard<'a> {
    session: &'a mut ChatSession,
    done: bool,
}

impl SessionTurnGuard<'_> {
    fn finish(&mut self, reply: Reply) -> ChatMessage {
        self.done = true;
        self.session.complete_turn(reply).clone()
    }
}

impl Drop for SessionTurnGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.session.complete_turn(Reply::fallback());
        }
    }
}

struct OwnedSession {
    owner: String,
    last_active: DateTime<Utc>,
    session: ChatSession,
}

/// In-memory sessions keyed by id and scoped to their owner.
///
/// The lock is never held across the reply await, so a second submission to
/// the same session sees `AwaitingReply` and is rejected.
///
/// Opening a session first drops every session idle for longer than the
/// store's TTL, then evicts the owner's least recently active sessions until
/// the new one fits under the per-owner cap.
pub struct ChatSessionStore {
    sessions: Mutex<HashMap<Uuid, OwnedSession>>,
    max_per_owner: usize,
    idle_ttl: Duration,
}

impl Default for ChatSessionStore {
    fn default() -> Self {
        Self::with_limits(
            DEFAULT_MAX_SESSIONS_PER_OWNER,
            Duration::seconds(DEFAULT_SESSION_IDLE_TTL_SECS),
        )
    }
}

impl ChatSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_per_owner: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_per_owner: max_per_owner.max(1),
            idle_ttl,
        }
    }

    pub fn create(&self, owner: &str) -> ChatSession {
        let session = ChatSession::new();
        let now = Utc::now();
        let mut sessions = self.sessions.lock();

        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_active <= self.idle_ttl);
        if sessions.len() < before {
            debug!(expired = before - sessions.len(), "idle chat sessions dropped");
        }

        let mut owned: Vec<(DateTime<Utc>, Uuid)> = sessions
            .iter()
            .filter(|(_, entry)| entry.owner == owner)
            .map(|(id, entry)| (entry.last_active, *id))
            .collect();
        if owned.len() >= self.max_per_owner {
            owned.sort_unstable();
            let excess = owned.len() + 1 - self.max_per_owner;
            for (_, id) in owned.into_iter().take(excess) {
                sessions.remove(&id);
                debug!(session_id = %id, owner, "chat session evicted");
            }
        }

        sessions.insert(
            session.id(),
            OwnedSession {
                owner: owner.to_string(),
                last_active: now,
                session: session.clone(),
            },
        );
        debug!(session_id = %session.id(), owner, "chat session opened");
        session
    }

    pub fn get(&self, owner: &str, id: Uuid) -> Result<ChatSession> {
        self.with_session(owner, id, |session| session.clone())
    }

    pub fn remove(&self, owner: &str, id: Uuid) -> Result<()> {
        let mut sessions = self.sessions.lock();
        if !sessions.get(&id).is_some_and(|entry| entry.owner == owner) {
            return Err(not_found(id));
        }
        sessions.remove(&id);
        debug!(session_id = %id, "chat session closed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Submit a message: append it, await the reply outside the lock, then
    /// append the reply.
    ///
    /// A dropped future closes the turn with the fallback reply. If the
    /// session is removed while the reply is pending, the reply is discarded
    /// and the caller gets `NotFound`.
    pub async fn submit(
        &self,
        chat: &WellnessChat,
        owner: &str,
        id: Uuid,
        raw: &str,
    ) -> Result<ChatTurn> {
        let pending = self.with_session(owner, id, |session| session.begin_turn(raw))??;
        let mut guard = StoreTurnGuard {
            store: self,
            owner,
            id,
            done: false,
        };

        let reply = chat
            .send_turn(&pending.text, &pending.prior_user_turns)
            .await;
        let source = reply.source;

        guard.done = true;
        let reply = self.with_session(owner, id, |session| session.complete_turn(reply).clone())?;
        Ok(ChatTurn {
            user_message: pending.message,
            reply,
            source,
        })
    }

    fn with_session<T>(
        &self,
        owner: &str,
        id: Uuid,
        f: impl FnOnce(&mut ChatSession) -> T,
    ) -> Result<T> {
        let mut sessions = self.sessions.lock();
        match sessions.get_mut(&id) {
            Some(entry) if entry.owner == owner => {
                entry.last_active = Utc::now();
                Ok(f(&mut entry.session))
            }
            _ => Err(not_found(id)),
        }
    }
}

struct StoreTurnGuard<'a> {
    store: &'a ChatSessionStore,
    owner: &'a str,
    id: Uuid,
    done: bool,
}

impl Drop for StoreTurnGuard<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        warn!(session_id = %self.id, "reply abandoned, closing turn with fallback");
        // The session may already be gone.
        let _ = self.store.with_session(self.owner, self.id, |session| {
            session.complete_turn(Reply::fallback());
        });
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Chat session {} not found", id))
}
