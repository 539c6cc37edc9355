//! Match log summary statistics

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

use crate::{MatchRecord, MatchResult};

/// Headline numbers for a match log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub match_count: usize,
    pub team_count: usize,
    pub earliest_match: Option<NaiveDate>,
    pub latest_match: Option<NaiveDate>,
    pub home_wins: usize,
    pub draws: usize,
    pub away_wins: usize,
}

impl DatasetSummary {
    pub fn from_matches(matches: &[MatchRecord]) -> Self {
        let mut teams = HashSet::new();
        let mut summary = DatasetSummary {
            match_count: matches.len(),
            ..Default::default()
        };

        for m in matches {
            teams.insert(m.home_team.as_str());
            teams.insert(m.away_team.as_str());

            summary.earliest_match = Some(summary.earliest_match.map_or(m.date, |d| d.min(m.date)));
            summary.latest_match = Some(summary.latest_match.map_or(m.date, |d| d.max(m.date)));

            match MatchResult::from_code(&m.result) {
                Some(MatchResult::HomeWin) => summary.home_wins += 1,
                Some(MatchResult::Draw) => summary.draws += 1,
                Some(MatchResult::AwayWin) => summary.away_wins += 1,
                None => {}
            }
        }

        summary.team_count = teams.len();
        summary
    }

    fn share(&self, count: usize) -> f32 {
        if self.match_count == 0 {
            0.0
        } else {
            count as f32 / self.match_count as f32
        }
    }

    pub fn home_win_rate(&self) -> f32 {
        self.share(self.home_wins)
    }

    pub fn draw_rate(&self) -> f32 {
        self.share(self.draws)
    }

    pub fn away_win_rate(&self) -> f32 {
        self.share(self.away_wins)
    }
}
