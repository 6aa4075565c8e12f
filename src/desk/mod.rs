//! Desk facade: the boundary a front-end drives.
//!
//! Composes the team registry, session store, and reply scheduler behind the
//! dashboard's operations. The user-message-to-scheduled-reply handoff lives
//! here so the store and scheduler never own each other.

use std::sync::Arc;

use crate::analytics::{clamp_page, filter_by_team, paginate, total_pages, FundAnalysis};
use crate::replies::ReplyScheduler;
use crate::sessions::{ChatSession, Message, SessionError, SessionStore};
use crate::teams::{Team, TeamRegistry};

/// One page of analytics rows plus its position in the page sequence.
#[derive(Debug, Clone)]
pub struct AnalyticsPage {
    pub rows: Vec<FundAnalysis>,
    pub page: usize,
    pub total_pages: usize,
}

pub struct Desk {
    registry: Arc<dyn TeamRegistry>,
    store: Arc<dyn SessionStore>,
    scheduler: Arc<dyn ReplyScheduler>,
    analyses: Vec<FundAnalysis>,
    page_size: usize,
}

impl Desk {
    pub fn new(
        registry: Arc<dyn TeamRegistry>,
        store: Arc<dyn SessionStore>,
        scheduler: Arc<dyn ReplyScheduler>,
        analyses: Vec<FundAnalysis>,
        page_size: usize,
    ) -> Self {
        Self {
            registry,
            store,
            scheduler,
            analyses,
            page_size,
        }
    }

    /// Submit text for the active session: append the user message, then
    /// queue the simulated reply. Returns as soon as the message is appended;
    /// the reply lands later through the store.
    pub async fn send(&self, text: &str) -> Result<Message, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyText);
        }
        let active = self
            .store
            .active_session_id()
            .await
            .ok_or(SessionError::NoActiveSession)?;
        let message = self.store.append_user_message(&active, text).await?;
        self.scheduler.schedule(&active, &message.text).await;
        Ok(message)
    }

    /// Start a session for the currently selected team and make it active.
    pub async fn new_session(&self) -> Result<ChatSession, SessionError> {
        let team_id = self
            .registry
            .current_team_id()
            .ok_or(SessionError::NoTeamSelected)?;
        self.store.create(&team_id).await
    }

    pub async fn rename_session(&self, id: &str, title: &str) -> Result<(), SessionError> {
        self.store.rename(id, title).await
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), SessionError> {
        self.store.delete(id).await
    }

    pub async fn switch_session(&self, id: &str) -> Result<(), SessionError> {
        self.store.activate(id).await
    }

    pub fn select_team(&self, team_id: &str) -> anyhow::Result<()> {
        self.registry.select(team_id)
    }

    pub fn teams(&self) -> Vec<Team> {
        self.registry.list()
    }

    pub fn current_team(&self) -> Option<Team> {
        self.registry.current()
    }

    /// Sessions visible for the current team, realigning the active pointer:
    /// when the active session is not in view, activity moves to the first
    /// listed session, or clears when the team has none.
    pub async fn sessions(&self) -> Vec<ChatSession> {
        let team_id = self.registry.current_team_id();
        let sessions = self.store.list_for_team(team_id.as_deref()).await;

        let active = self.store.active_session_id().await;
        let active_in_view = active
            .as_ref()
            .is_some_and(|a| sessions.iter().any(|s| &s.id == a));
        if !active_in_view {
            match sessions.first() {
                Some(first) => {
                    let _ = self.store.activate(&first.id).await;
                }
                None => self.store.clear_active().await,
            }
        }
        sessions
    }

    pub async fn active_session(&self) -> Option<ChatSession> {
        let id = self.store.active_session_id().await?;
        self.store.get(&id).await
    }

    /// Transcript of the active session, empty when there is none.
    pub async fn transcript(&self) -> Vec<Message> {
        match self.active_session().await {
            Some(session) => session.messages,
            None => Vec::new(),
        }
    }

    /// Whether a reply is in flight for the active session.
    pub async fn is_typing(&self) -> bool {
        match self.store.active_session_id().await {
            Some(id) => self.scheduler.pending(&id) > 0,
            None => false,
        }
    }

    /// Wait for every queued reply to deliver. The interactive front-end uses
    /// this to hold the typing indicator until the reply lands.
    pub async fn flush_replies(&self) {
        self.scheduler.flush().await;
    }

    /// The requested analytics page for the current team, clamped into range.
    pub fn analyses_page(&self, requested: usize) -> AnalyticsPage {
        let team_id = self.registry.current_team_id();
        let scoped: Vec<&FundAnalysis> =
            filter_by_team(&self.analyses, team_id.as_deref()).collect();

        let total = total_pages(scoped.len(), self.page_size);
        let page = clamp_page(requested, total);
        let rows = paginate(&scoped, self.page_size, page)
            .iter()
            .map(|row| (*row).clone())
            .collect();
        AnalyticsPage {
            rows,
            page,
            total_pages: total,
        }
    }
}
