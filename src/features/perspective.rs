//! Team perspectives
//!
//! Splits each match into one observation per participant, seen from that
//! team's side of the scoreline.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{MatchRecord, MatchResult, Result};

/// One team's view of a single match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamObservation {
    pub date: NaiveDate,
    pub team: String,
    pub goals_scored: u32,
    pub goals_conceded: u32,
    pub is_home: bool,
    /// League points earned (3 win, 1 draw, 0 loss)
    pub points: u8,
}

impl TeamObservation {
    /// Observation for the home side
    pub fn home(record: &MatchRecord, result: MatchResult) -> Self {
        TeamObservation {
            date: record.date,
            team: record.home_team.clone(),
            goals_scored: record.home_goals,
            goals_conceded: record.away_goals,
            is_home: true,
            points: result.home_points(),
        }
    }

    /// Observation for the away side
    pub fn away(record: &MatchRecord, result: MatchResult) -> Self {
        TeamObservation {
            date: record.date,
            team: record.away_team.clone(),
            goals_scored: record.away_goals,
            goals_conceded: record.home_goals,
            is_home: false,
            points: result.away_points(),
        }
    }
}

/// Expand matches into team observations, two per match, ordered by date.
///
/// Same-day observations keep input order, home before away within a match.
pub fn reshape(matches: &[MatchRecord]) -> Result<Vec<TeamObservation>> {
    let mut observations = Vec::with_capacity(matches.len() * 2);

    for record in matches {
        let result = record.outcome()?;
        observations.push(TeamObservation::home(record, result));
        observations.push(TeamObservation::away(record, result));
    }

    observations.sort_by_key(|o| o.date);
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FootballError;

    fn make_match(day: u32, home: &str, away: &str, hg: u32, ag: u32, result: &str) -> MatchRecord {
        MatchRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_goals: hg,
            away_goals: ag,
            result: result.to_string(),
            season_id: None,
        }
    }

    #[test]
    fn test_two_rows_per_match() {
        let matches = vec![
            make_match(1, "Arsenal", "Chelsea", 2, 0, "H"),
            make_match(2, "Everton", "Fulham", 1, 1, "D"),
            make_match(3, "Leeds", "Wolves", 0, 3, "A"),
        ];
        let obs = reshape(&matches).unwrap();
        assert_eq!(obs.len(), 2 * matches.len());
    }

    #[test]
    fn test_perspective_goals_and_points() {
        let obs = reshape(&[make_match(1, "Arsenal", "Chelsea", 2, 0, "H")]).unwrap();

        assert_eq!(obs[0].team, "Arsenal");
        assert!(obs[0].is_home);
        assert_eq!((obs[0].goals_scored, obs[0].goals_conceded), (2, 0));
        assert_eq!(obs[0].points, 3);

        assert_eq!(obs[1].team, "Chelsea");
        assert!(!obs[1].is_home);
        assert_eq!((obs[1].goals_scored, obs[1].goals_conceded), (0, 2));
        assert_eq!(obs[1].points, 0);
    }

    #[test]
    fn test_draw_and_away_win_points() {
        let obs = reshape(&[
            make_match(1, "Everton", "Fulham", 1, 1, "D"),
            make_match(2, "Leeds", "Wolves", 0, 3, "A"),
        ])
        .unwrap();
        let points: Vec<_> = obs.iter().map(|o| o.points).collect();
        assert_eq!(points, vec![1, 1, 0, 3]);
    }

    #[test]
    fn test_sorted_when_input_is_not() {
        let obs = reshape(&[
            make_match(5, "Arsenal", "Chelsea", 2, 0, "H"),
            make_match(2, "Everton", "Fulham", 1, 1, "D"),
        ])
        .unwrap();
        let teams: Vec<_> = obs.iter().map(|o| o.team.as_str()).collect();
        assert_eq!(teams, vec!["Everton", "Fulham", "Arsenal", "Chelsea"]);
    }

    #[test]
    fn test_invalid_result_propagates() {
        let err = reshape(&[
            make_match(1, "Arsenal", "Chelsea", 2, 0, "H"),
            make_match(2, "Everton", "Fulham", 1, 1, "?"),
        ])
        .unwrap_err();
        assert!(matches!(err, FootballError::InvalidResult { ref value, .. } if value == "?"));
    }
}
