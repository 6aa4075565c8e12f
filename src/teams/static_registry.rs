//! In-memory team registry over a fixed team list.

use anyhow::bail;
use parking_lot::RwLock;
use tokio::sync::watch;

use super::traits::{Team, TeamRegistry};

/// Registry over a fixed set of teams, with the first one selected at
/// startup.
pub struct StaticTeamRegistry {
    teams: Vec<Team>,
    selected: RwLock<Option<Team>>,
    notify: watch::Sender<Option<Team>>,
}

impl StaticTeamRegistry {
    pub fn new(teams: Vec<Team>) -> Self {
        let selected = teams.first().cloned();
        let (notify, _) = watch::channel(selected.clone());
        Self {
            teams,
            selected: RwLock::new(selected),
            notify,
        }
    }

    /// The default team roster shipped with the dashboard.
    pub fn default_teams() -> Vec<Team> {
        vec![
            Team {
                id: "1".to_string(),
                name: "Team Alpha".to_string(),
            },
            Team {
                id: "2".to_string(),
                name: "Team Beta".to_string(),
            },
            Team {
                id: "3".to_string(),
                name: "Team Gamma".to_string(),
            },
        ]
    }
}

impl Default for StaticTeamRegistry {
    fn default() -> Self {
        Self::new(Self::default_teams())
    }
}

impl TeamRegistry for StaticTeamRegistry {
    fn list(&self) -> Vec<Team> {
        self.teams.clone()
    }

    fn current(&self) -> Option<Team> {
        self.selected.read().clone()
    }

    fn select(&self, team_id: &str) -> anyhow::Result<()> {
        let Some(team) = self.teams.iter().find(|t| t.id == team_id) else {
            bail!(
                "unknown team id '{team_id}'. Known teams: {}",
                self.teams
                    .iter()
                    .map(|t| t.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        };

        *self.selected.write() = Some(team.clone());
        self.notify.send_replace(Some(team.clone()));
        tracing::debug!(team_id, team_name = %team.name, "selected team");
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Team>> {
        self.notify.subscribe()
    }

    fn name(&self) -> &str {
        "static"
    }
}
