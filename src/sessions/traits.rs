//! Session storage traits and types for chat conversation state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title given to a session before the first user message derives a real one.
pub const NEW_SESSION_TITLE: &str = "New Chat";

/// Assistant greeting seeded into every new session.
pub const GREETING: &str = "Hello! I'm your funding analysis AI assistant. \
I can help you analyze investment trends, evaluate funding rounds, and provide \
insights into market dynamics. What would you like to explore today?";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A single immutable message in a session transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// One conversation thread, scoped to a team.
///
/// `messages` is append-only and never empty: every session is created with the
/// seeded assistant greeting. Ordering is append order, which may differ from
/// wall-clock order when a delayed reply lands after a later user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub last_updated: DateTime<Utc>,
    pub team_id: String,
}

impl ChatSession {
    /// Whether the title is still the placeholder and eligible for derivation.
    pub fn has_default_title(&self) -> bool {
        self.title == NEW_SESSION_TITLE
    }
}

/// Failures a store operation can report.
///
/// None of these are fatal: callers recover each one locally (typically by
/// logging and skipping the operation). They are typed so the conditions stay
/// observable instead of being swallowed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Text or title that trims to the empty string.
    #[error("text is empty after trimming")]
    EmptyText,
    /// Operation on a session id the store does not hold.
    #[error("no session with id {0}")]
    NotFound(String),
    /// Session creation requires a team context.
    #[error("no team is currently selected")]
    NoTeamSelected,
    /// Message submission requires an active session.
    #[error("no active session")]
    NoActiveSession,
}

/// Storage for chat sessions and their transcripts.
///
/// Implementations own the active-session pointer. Iteration order of
/// [`SessionStore::list_for_team`] is insertion order; recency sorting is a
/// presentation concern left to callers.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session for `team_id` with a seeded greeting and make it active.
    async fn create(&self, team_id: &str) -> Result<ChatSession, SessionError>;

    /// Get a session snapshot by id, if it exists.
    async fn get(&self, session_id: &str) -> Option<ChatSession>;

    /// Set the session title to the trimmed `new_title`. Does not touch
    /// `last_updated`.
    async fn rename(&self, session_id: &str, new_title: &str) -> Result<(), SessionError>;

    /// Remove a session. When it was active, activity falls to the first
    /// remaining session of the removed session's team, or to none.
    async fn delete(&self, session_id: &str) -> Result<(), SessionError>;

    /// Append a user message, touch `last_updated`, and derive the title from
    /// the first user message while the title is still the placeholder.
    /// Returns the appended message.
    async fn append_user_message(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<Message, SessionError>;

    /// Append an assistant message and touch `last_updated`. When the session
    /// was deleted while the reply was in flight, the append is discarded
    /// silently: the reply has no observer left.
    async fn append_assistant_message(&self, session_id: &str, text: &str);

    /// List sessions for a team in insertion order, or all sessions for `None`.
    async fn list_for_team(&self, team_id: Option<&str>) -> Vec<ChatSession>;

    /// Id of the active session, if any.
    async fn active_session_id(&self) -> Option<String>;

    /// Make an existing session the active one.
    async fn activate(&self, session_id: &str) -> Result<(), SessionError>;

    /// Clear the active-session pointer.
    async fn clear_active(&self);

    /// The name of this session store implementation.
    fn name(&self) -> &str;
}
