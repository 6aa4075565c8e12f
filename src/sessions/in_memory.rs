//! In-memory session store implementation.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use super::traits::{
    ChatSession, Message, Sender, SessionError, SessionStore, GREETING, NEW_SESSION_TITLE,
};

/// Default number of characters of the first user message used for the title.
pub const DEFAULT_TITLE_PREVIEW_CHARS: usize = 30;

/// An in-memory session store backed by a mutex-protected session table.
///
/// Sessions are kept in insertion order. The lock is never held across an
/// await point, so every operation is atomic relative to other callers.
pub struct InMemorySessionStore {
    state: Mutex<StoreState>,
    title_preview_chars: usize,
}

#[derive(Default)]
struct StoreState {
    sessions: Vec<ChatSession>,
    active: Option<String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_title_preview(DEFAULT_TITLE_PREVIEW_CHARS)
    }

    /// Store whose derived titles keep the first `chars` characters.
    pub fn with_title_preview(chars: usize) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            title_preview_chars: chars,
        }
    }

    fn new_message(sender: Sender, text: &str) -> Message {
        Message {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive a session title from the first user message: the first `max_chars`
/// characters (counted as `char`s, so multi-byte text cannot split) with a
/// trailing ellipsis.
fn derive_title(text: &str, max_chars: usize) -> String {
    let preview: String = text.trim().chars().take(max_chars).collect();
    format!("{preview}...")
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, team_id: &str) -> Result<ChatSession, SessionError> {
        let session = ChatSession {
            id: Uuid::new_v4().to_string(),
            title: NEW_SESSION_TITLE.to_string(),
            messages: vec![Self::new_message(Sender::Assistant, GREETING)],
            last_updated: Utc::now(),
            team_id: team_id.to_string(),
        };

        let mut state = self.state.lock();
        state.active = Some(session.id.clone());
        state.sessions.push(session.clone());
        tracing::debug!(session_id = %session.id, team_id, "created session");
        Ok(session)
    }

    async fn get(&self, session_id: &str) -> Option<ChatSession> {
        let state = self.state.lock();
        state.sessions.iter().find(|s| s.id == session_id).cloned()
    }

    async fn rename(&self, session_id: &str, new_title: &str) -> Result<(), SessionError> {
        let title = new_title.trim();
        if title.is_empty() {
            return Err(SessionError::EmptyText);
        }

        let mut state = self.state.lock();
        let session = state
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
        session.title = title.to_string();
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        let index = state
            .sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
        let removed = state.sessions.remove(index);

        if state.active.as_deref() == Some(session_id) {
            // Activity falls to the first remaining session of the removed
            // session's team, not just any session.
            state.active = state
                .sessions
                .iter()
                .find(|s| s.team_id == removed.team_id)
                .map(|s| s.id.clone());
        }
        tracing::debug!(session_id, "deleted session");
        Ok(())
    }

    async fn append_user_message(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<Message, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyText);
        }

        let mut state = self.state.lock();
        let preview_chars = self.title_preview_chars;
        let session = state
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        let message = Self::new_message(Sender::User, text);
        session.messages.push(message.clone());
        session.last_updated = Utc::now();
        if session.has_default_title() {
            session.title = derive_title(text, preview_chars);
        }
        Ok(message)
    }

    async fn append_assistant_message(&self, session_id: &str, text: &str) {
        let mut state = self.state.lock();
        match state.sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) => {
                session.messages.push(Self::new_message(Sender::Assistant, text));
                session.last_updated = Utc::now();
            }
            // Session deleted while the reply was in flight: nobody is left
            // to observe it, so the append is dropped.
            None => tracing::debug!(session_id, "discarding reply for deleted session"),
        }
    }

    async fn list_for_team(&self, team_id: Option<&str>) -> Vec<ChatSession> {
        let state = self.state.lock();
        state
            .sessions
            .iter()
            .filter(|s| team_id.map_or(true, |t| s.team_id == t))
            .cloned()
            .collect()
    }

    async fn active_session_id(&self) -> Option<String> {
        self.state.lock().active.clone()
    }

    async fn activate(&self, session_id: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        if !state.sessions.iter().any(|s| s.id == session_id) {
            return Err(SessionError::NotFound(session_id.to_string()));
        }
        state.active = Some(session_id.to_string());
        Ok(())
    }

    async fn clear_active(&self) {
        self.state.lock().active = None;
    }

    fn name(&self) -> &str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_seeds_greeting_and_activates() {
        let store = InMemorySessionStore::new();
        let session = store.create("1").await.unwrap();

        assert_eq!(session.title, NEW_SESSION_TITLE);
        assert_eq!(session.team_id, "1");
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].sender, Sender::Assistant);
        assert_eq!(session.messages[0].text, GREETING);
        assert_eq!(store.active_session_id().await, Some(session.id));
    }

    #[tokio::test]
    async fn create_generates_unique_ids() {
        let store = InMemorySessionStore::new();
        let a = store.create("1").await.unwrap();
        let b = store.create("1").await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn rename_trims_title() {
        let store = InMemorySessionStore::new();
        let session = store.create("1").await.unwrap();

        store.rename(&session.id, "  Q3 review  ").await.unwrap();
        assert_eq!(store.get(&session.id).await.unwrap().title, "Q3 review");
    }

    #[tokio::test]
    async fn rename_rejects_empty_title() {
        let store = InMemorySessionStore::new();
        let session = store.create("1").await.unwrap();

        let result = store.rename(&session.id, "   ").await;
        assert_eq!(result, Err(SessionError::EmptyText));
        assert_eq!(store.get(&session.id).await.unwrap().title, NEW_SESSION_TITLE);
    }

    #[tokio::test]
    async fn rename_missing_session_errors() {
        let store = InMemorySessionStore::new();
        let result = store.rename("nope", "title").await;
        assert_eq!(result, Err(SessionError::NotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn rename_does_not_touch_last_updated() {
        let store = InMemorySessionStore::new();
        let session = store.create("1").await.unwrap();

        store.rename(&session.id, "renamed").await.unwrap();
        let after = store.get(&session.id).await.unwrap();
        assert_eq!(after.last_updated, session.last_updated);
    }

    #[tokio::test]
    async fn first_user_message_derives_title_once() {
        let store = InMemorySessionStore::new();
        let session = store.create("1").await.unwrap();

        store
            .append_user_message(&session.id, "Series A trends in fintech")
            .await
            .unwrap();
        let after_first = store.get(&session.id).await.unwrap();
        assert_eq!(after_first.title, "Series A trends in fintech...");

        store
            .append_user_message(&session.id, "and another question")
            .await
            .unwrap();
        let after_second = store.get(&session.id).await.unwrap();
        assert_eq!(after_second.title, "Series A trends in fintech...");
    }

    #[tokio::test]
    async fn derived_title_truncates_by_chars() {
        let store = InMemorySessionStore::with_title_preview(5);
        let session = store.create("1").await.unwrap();

        store
            .append_user_message(&session.id, "précis über ägypten")
            .await
            .unwrap();
        let after = store.get(&session.id).await.unwrap();
        assert_eq!(after.title, "préci...");
    }

    #[tokio::test]
    async fn manual_rename_disables_derivation() {
        let store = InMemorySessionStore::new();
        let session = store.create("1").await.unwrap();

        store.rename(&session.id, "my title").await.unwrap();
        store.append_user_message(&session.id, "hello").await.unwrap();
        assert_eq!(store.get(&session.id).await.unwrap().title, "my title");
    }

    #[tokio::test]
    async fn empty_user_message_is_rejected_without_append() {
        let store = InMemorySessionStore::new();
        let session = store.create("1").await.unwrap();

        let result = store.append_user_message(&session.id, "  \n ").await;
        assert_eq!(result, Err(SessionError::EmptyText));
        assert_eq!(store.get(&session.id).await.unwrap().messages.len(), 1);
    }

    #[tokio::test]
    async fn user_message_appends_in_order_and_touches_last_updated() {
        let store = InMemorySessionStore::new();
        let session = store.create("1").await.unwrap();

        store.append_user_message(&session.id, "first").await.unwrap();
        store.append_user_message(&session.id, "second").await.unwrap();

        let after = store.get(&session.id).await.unwrap();
        assert_eq!(after.messages.len(), 3);
        assert_eq!(after.messages[1].text, "first");
        assert_eq!(after.messages[2].text, "second");
        assert!(after.last_updated >= session.last_updated);
    }

    #[tokio::test]
    async fn assistant_append_to_deleted_session_is_discarded() {
        let store = InMemorySessionStore::new();
        let session = store.create("1").await.unwrap();
        store.delete(&session.id).await.unwrap();

        store.append_assistant_message(&session.id, "late reply").await;
        assert!(store.get(&session.id).await.is_none());
        assert!(store.list_for_team(None).await.is_empty());
    }

    #[tokio::test]
    async fn list_scopes_to_team_in_insertion_order() {
        let store = InMemorySessionStore::new();
        let a = store.create("1").await.unwrap();
        let b = store.create("2").await.unwrap();
        let c = store.create("1").await.unwrap();

        let team_one = store.list_for_team(Some("1")).await;
        assert_eq!(team_one.len(), 2);
        assert_eq!(team_one[0].id, a.id);
        assert_eq!(team_one[1].id, c.id);
        assert!(team_one.iter().all(|s| s.team_id == "1"));

        let all = store.list_for_team(None).await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].id, b.id);
    }

    #[tokio::test]
    async fn delete_reassigns_active_within_team() {
        let store = InMemorySessionStore::new();
        let a = store.create("1").await.unwrap();
        let b = store.create("1").await.unwrap();
        store.activate(&a.id).await.unwrap();

        store.delete(&a.id).await.unwrap();
        assert_eq!(store.active_session_id().await, Some(b.id.clone()));

        store.delete(&b.id).await.unwrap();
        assert_eq!(store.active_session_id().await, None);
    }

    #[tokio::test]
    async fn delete_fallback_ignores_other_teams() {
        let store = InMemorySessionStore::new();
        let a = store.create("1").await.unwrap();
        let _b = store.create("2").await.unwrap();
        store.activate(&a.id).await.unwrap();

        store.delete(&a.id).await.unwrap();
        // The only remaining session belongs to team 2, so nothing from team 1
        // can take over.
        assert_eq!(store.active_session_id().await, None);
    }

    #[tokio::test]
    async fn delete_of_inactive_session_keeps_active() {
        let store = InMemorySessionStore::new();
        let a = store.create("1").await.unwrap();
        let b = store.create("1").await.unwrap();
        store.activate(&b.id).await.unwrap();

        store.delete(&a.id).await.unwrap();
        assert_eq!(store.active_session_id().await, Some(b.id));
    }

    #[tokio::test]
    async fn delete_missing_session_errors() {
        let store = InMemorySessionStore::new();
        let result = store.delete("nope").await;
        assert_eq!(result, Err(SessionError::NotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn activate_requires_existing_session() {
        let store = InMemorySessionStore::new();
        let a = store.create("1").await.unwrap();
        let b = store.create("1").await.unwrap();
        assert_eq!(store.active_session_id().await, Some(b.id));

        store.activate(&a.id).await.unwrap();
        assert_eq!(store.active_session_id().await, Some(a.id));

        let result = store.activate("nope").await;
        assert_eq!(result, Err(SessionError::NotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn sessions_always_hold_at_least_one_message() {
        let store = InMemorySessionStore::new();
        let session = store.create("1").await.unwrap();
        store.append_user_message(&session.id, "hi").await.unwrap();

        for s in store.list_for_team(None).await {
            assert!(!s.messages.is_empty());
        }
    }
}
