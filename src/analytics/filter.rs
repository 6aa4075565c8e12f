//! Team scoping for collections of team-tagged records.

use super::records::FundAnalysis;
use crate::sessions::ChatSession;

/// A record owned by a team. Sessions and analytics rows share this so both
/// views scope with the same filter.
pub trait TeamScoped {
    fn team_id(&self) -> &str;
}

impl TeamScoped for FundAnalysis {
    fn team_id(&self) -> &str {
        &self.team_id
    }
}

impl TeamScoped for ChatSession {
    fn team_id(&self) -> &str {
        &self.team_id
    }
}

/// Records belonging to `team_id`, in input order; all records when no team
/// is given. Pure and lazy, O(n), no copies.
pub fn filter_by_team<'a, T: TeamScoped>(
    records: &'a [T],
    team_id: Option<&'a str>,
) -> impl Iterator<Item = &'a T> + 'a {
    records
        .iter()
        .filter(move |record| team_id.map_or(true, |t| record.team_id() == t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::records::sample_analyses;

    #[test]
    fn scopes_to_the_given_team() {
        let rows = sample_analyses();
        let team_two: Vec<&FundAnalysis> = filter_by_team(&rows, Some("2")).collect();
        assert_eq!(team_two.len(), 2);
        assert!(team_two.iter().all(|r| r.team_id == "2"));
    }

    #[test]
    fn none_is_identity() {
        let rows = sample_analyses();
        let all: Vec<&FundAnalysis> = filter_by_team(&rows, None).collect();
        assert_eq!(all.len(), rows.len());
    }

    #[test]
    fn unknown_team_yields_nothing() {
        let rows = sample_analyses();
        assert_eq!(filter_by_team(&rows, Some("99")).count(), 0);
    }

    #[test]
    fn preserves_input_order() {
        let rows = sample_analyses();
        let team_one: Vec<&str> = filter_by_team(&rows, Some("1"))
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(team_one, vec!["1", "2"]);
    }
}
