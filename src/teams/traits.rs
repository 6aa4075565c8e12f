//! Team registry trait and types.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// A team owning sessions and analytics rows. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
}

/// Canonical team list plus the current selection.
///
/// At most one team is selected at a time; selection changes are broadcast
/// over a watch channel so views can re-scope without polling.
pub trait TeamRegistry: Send + Sync {
    /// All registered teams, in registration order.
    fn list(&self) -> Vec<Team>;

    /// Snapshot of the currently selected team, if any.
    fn current(&self) -> Option<Team>;

    /// Id of the currently selected team, if any.
    fn current_team_id(&self) -> Option<String> {
        self.current().map(|t| t.id)
    }

    /// Select a team by id. Errs on an unknown id and leaves the selection
    /// unchanged.
    fn select(&self, team_id: &str) -> anyhow::Result<()>;

    /// Subscribe to selection changes. The receiver always holds the latest
    /// selection.
    fn subscribe(&self) -> watch::Receiver<Option<Team>>;

    /// The name of this registry implementation.
    fn name(&self) -> &str;
}
