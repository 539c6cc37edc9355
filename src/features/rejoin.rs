//! Match-level feature rows
//!
//! Joins per-team form snapshots back onto the match log, once for the home
//! side and once for the away side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::form::{FormAverages, TeamFormSnapshot};
use crate::{FootballError, MatchRecord, Result};

/// One output row: the original match plus both sides' pre-match form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub result: String,
    pub season_id: Option<String>,
    pub home_form_goals_avg: f64,
    pub home_form_conceded_avg: f64,
    pub home_form_points_avg: f64,
    pub away_form_goals_avg: f64,
    pub away_form_conceded_avg: f64,
    pub away_form_points_avg: f64,
    /// Prior matches behind the home averages
    pub home_history: usize,
    /// Prior matches behind the away averages
    pub away_history: usize,
}

impl FeatureRow {
    pub fn new(record: &MatchRecord, home: &TeamFormSnapshot, away: &TeamFormSnapshot) -> Self {
        FeatureRow {
            date: record.date,
            home_team: record.home_team.clone(),
            away_team: record.away_team.clone(),
            home_goals: record.home_goals,
            away_goals: record.away_goals,
            result: record.result.clone(),
            season_id: record.season_id.clone(),
            home_form_goals_avg: home.form.goals_scored,
            home_form_conceded_avg: home.form.goals_conceded,
            home_form_points_avg: home.form.points,
            away_form_goals_avg: away.form.goals_scored,
            away_form_conceded_avg: away.form.goals_conceded,
            away_form_points_avg: away.form.points,
            home_history: home.history,
            away_history: away.history,
        }
    }

    pub fn home_form(&self) -> FormAverages {
        FormAverages {
            goals_scored: self.home_form_goals_avg,
            goals_conceded: self.home_form_conceded_avg,
            points: self.home_form_points_avg,
        }
    }

    pub fn away_form(&self) -> FormAverages {
        FormAverages {
            goals_scored: self.away_form_goals_avg,
            goals_conceded: self.away_form_conceded_avg,
            points: self.away_form_points_avg,
        }
    }

    /// True when both sides have at least `min` prior matches
    pub fn has_history(&self, min: usize) -> bool {
        self.home_history >= min && self.away_history >= min
    }
}

/// Snapshots keyed by (date, team)
pub struct SnapshotIndex<'a> {
    by_key: HashMap<(NaiveDate, &'a str), &'a TeamFormSnapshot>,
}

impl<'a> SnapshotIndex<'a> {
    /// Index snapshots, rejecting any team with two matches on one date
    pub fn build(snapshots: &'a [TeamFormSnapshot]) -> Result<Self> {
        let mut by_key = HashMap::with_capacity(snapshots.len());

        for snapshot in snapshots {
            let obs = &snapshot.observation;
            match by_key.entry((obs.date, obs.team.as_str())) {
                Entry::Occupied(_) => {
                    return Err(FootballError::AmbiguousJoin {
                        date: obs.date,
                        team: obs.team.clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(snapshot);
                }
            }
        }

        Ok(SnapshotIndex { by_key })
    }

    pub fn lookup(&self, date: NaiveDate, team: &str) -> Result<&'a TeamFormSnapshot> {
        self.by_key
            .get(&(date, team))
            .copied()
            .ok_or_else(|| FootballError::MissingJoin {
                date,
                team: team.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Attach home and away form to every match, preserving match order
pub fn rejoin(matches: &[MatchRecord], snapshots: &[TeamFormSnapshot]) -> Result<Vec<FeatureRow>> {
    let index = SnapshotIndex::build(snapshots)?;

    matches
        .iter()
        .map(|record| {
            let home = index.lookup(record.date, &record.home_team)?;
            let away = index.lookup(record.date, &record.away_team)?;
            Ok(FeatureRow::new(record, home, away))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::form::rolling_form;
    use crate::features::perspective::reshape;

    fn make_match(day: u32, home: &str, away: &str, hg: u32, ag: u32) -> MatchRecord {
        MatchRecord {
            date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_goals: hg,
            away_goals: ag,
            result: crate::MatchResult::from_score(hg, ag).code().to_string(),
            season_id: Some("2324".to_string()),
        }
    }

    fn snapshots(matches: &[MatchRecord]) -> Vec<TeamFormSnapshot> {
        rolling_form(reshape(matches).unwrap(), 5).unwrap()
    }

    #[test]
    fn test_one_row_per_match_in_order() {
        let matches = vec![
            make_match(3, "Arsenal", "Chelsea", 2, 1),
            make_match(3, "Everton", "Fulham", 0, 0),
            make_match(10, "Chelsea", "Everton", 1, 3),
            make_match(10, "Fulham", "Arsenal", 2, 2),
        ];
        let rows = rejoin(&matches, &snapshots(&matches)).unwrap();

        assert_eq!(rows.len(), matches.len());
        for (row, record) in rows.iter().zip(&matches) {
            assert_eq!(row.home_team, record.home_team);
            assert_eq!(row.away_team, record.away_team);
            assert_eq!(row.season_id.as_deref(), Some("2324"));
        }
    }

    #[test]
    fn test_both_sides_joined() {
        let matches = vec![
            make_match(3, "Arsenal", "Chelsea", 2, 1),
            make_match(3, "Everton", "Fulham", 0, 0),
            make_match(10, "Chelsea", "Everton", 1, 3),
        ];
        let rows = rejoin(&matches, &snapshots(&matches)).unwrap();

        assert_eq!(rows[0].home_form(), FormAverages::NO_HISTORY);
        assert_eq!(rows[0].away_form(), FormAverages::NO_HISTORY);
        assert!(!rows[0].has_history(1));

        // Chelsea lost 2-1 away, Everton drew 0-0 at home
        let row = &rows[2];
        assert_eq!(row.home_form_points_avg, 0.0);
        assert_eq!(row.home_form_goals_avg, 1.0);
        assert_eq!(row.home_form_conceded_avg, 2.0);
        assert_eq!(row.away_form_points_avg, 1.0);
        assert_eq!(row.away_form_goals_avg, 0.0);
        assert_eq!((row.home_history, row.away_history), (1, 1));
        assert!(row.has_history(1));
    }

    #[test]
    fn test_same_day_double_header_is_ambiguous() {
        let matches = vec![
            make_match(3, "Arsenal", "Chelsea", 2, 1),
            make_match(3, "Arsenal", "Everton", 1, 0),
        ];
        let err = rejoin(&matches, &snapshots(&matches)).unwrap_err();
        match err {
            FootballError::AmbiguousJoin { team, date } => {
                assert_eq!(team, "Arsenal");
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
            }
            other => panic!("expected AmbiguousJoin, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_snapshot() {
        let played = vec![make_match(3, "Arsenal", "Chelsea", 2, 1)];
        let snaps = snapshots(&played);
        let extra = vec![make_match(3, "Arsenal", "Leeds", 1, 0)];

        let err = rejoin(&extra, &snaps).unwrap_err();
        assert!(matches!(err, FootballError::MissingJoin { ref team, .. } if team == "Leeds"));
    }

    #[test]
    fn test_index_lookup() {
        let matches = vec![make_match(3, "Arsenal", "Chelsea", 2, 1)];
        let snaps = snapshots(&matches);
        let index = SnapshotIndex::build(&snaps).unwrap();

        assert_eq!(index.len(), 2);
        let date = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        assert_eq!(index.lookup(date, "Chelsea").unwrap().observation.goals_scored, 1);
        assert!(index.lookup(date.succ_opt().unwrap(), "Chelsea").is_err());
    }
}
