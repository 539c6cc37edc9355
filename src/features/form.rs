//! Rolling team form
//!
//! Trailing averages over each team's most recent matches. A snapshot is
//! always taken from the window state *before* the current observation is
//! added, so a match never sees its own result or anything later.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};

use super::perspective::TeamObservation;
use crate::{FootballError, Result};

/// Default number of prior matches in a form window
pub const DEFAULT_WINDOW: usize = 5;

/// Mean goals and points over a form window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FormAverages {
    pub goals_scored: f64,
    pub goals_conceded: f64,
    pub points: f64,
}

impl FormAverages {
    /// Form reported for a team with no earlier matches
    pub const NO_HISTORY: FormAverages = FormAverages {
        goals_scored: 0.0,
        goals_conceded: 0.0,
        points: 0.0,
    };
}

/// Form for one observation, built only from that team's earlier matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamFormSnapshot {
    pub observation: TeamObservation,
    pub form: FormAverages,
    /// Number of prior matches averaged (0 means `FormAverages::NO_HISTORY`)
    pub history: usize,
}

/// A team's form going into its next match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamForm {
    pub team: String,
    #[serde(flatten)]
    pub form: FormAverages,
    pub history: usize,
}

/// Bounded window of (scored, conceded, points) with running sums
#[derive(Debug, Clone)]
struct FormWindow {
    capacity: usize,
    entries: VecDeque<(u32, u32, u8)>,
    goals_scored: u64,
    goals_conceded: u64,
    points: u64,
}

impl FormWindow {
    fn new(capacity: usize) -> Self {
        FormWindow {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            goals_scored: 0,
            goals_conceded: 0,
            points: 0,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn averages(&self) -> FormAverages {
        let n = self.entries.len();
        if n == 0 {
            return FormAverages::NO_HISTORY;
        }
        let n = n as f64;
        FormAverages {
            goals_scored: self.goals_scored as f64 / n,
            goals_conceded: self.goals_conceded as f64 / n,
            points: self.points as f64 / n,
        }
    }

    fn push(&mut self, obs: &TeamObservation) {
        if self.entries.len() == self.capacity {
            if let Some((scored, conceded, points)) = self.entries.pop_front() {
                self.goals_scored -= u64::from(scored);
                self.goals_conceded -= u64::from(conceded);
                self.points -= u64::from(points);
            }
        }
        self.entries
            .push_back((obs.goals_scored, obs.goals_conceded, obs.points));
        self.goals_scored += u64::from(obs.goals_scored);
        self.goals_conceded += u64::from(obs.goals_conceded);
        self.points += u64::from(obs.points);
    }
}

/// Per-team rolling form over a fixed window of prior matches
#[derive(Debug, Clone)]
pub struct RollingForm {
    window: usize,
    teams: HashMap<String, FormWindow>,
}

impl RollingForm {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(FootballError::InvalidWindow(window));
        }
        Ok(RollingForm {
            window,
            teams: HashMap::new(),
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of teams seen so far
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Snapshot the team's form, then add the observation to its window.
    ///
    /// Observations for a team must arrive in chronological order.
    pub fn observe(&mut self, observation: TeamObservation) -> TeamFormSnapshot {
        let capacity = self.window;
        let window = self
            .teams
            .entry(observation.team.clone())
            .or_insert_with(|| FormWindow::new(capacity));

        let form = window.averages();
        let history = window.len();
        window.push(&observation);

        TeamFormSnapshot {
            observation,
            form,
            history,
        }
    }

    /// Snapshot a whole observation sequence, preserving its order
    pub fn process(&mut self, observations: Vec<TeamObservation>) -> Vec<TeamFormSnapshot> {
        let snapshots: Vec<_> = observations.into_iter().map(|o| self.observe(o)).collect();
        log::debug!(
            "Rolled {} observations across {} teams (window {})",
            snapshots.len(),
            self.teams.len(),
            self.window
        );
        snapshots
    }

    /// Form the team would carry into its next match
    pub fn current(&self, team: &str) -> Option<TeamForm> {
        self.teams.get(team).map(|w| TeamForm {
            team: team.to_string(),
            form: w.averages(),
            history: w.len(),
        })
    }

    /// Current form for every team, best points average first
    pub fn current_all(&self) -> Vec<TeamForm> {
        let mut table: Vec<_> = self
            .teams
            .iter()
            .map(|(team, w)| TeamForm {
                team: team.clone(),
                form: w.averages(),
                history: w.len(),
            })
            .collect();

        table.sort_by(|a, b| {
            b.form
                .points
                .total_cmp(&a.form.points)
                .then_with(|| a.team.cmp(&b.team))
        });
        table
    }
}

/// Compute form snapshots for an observation sequence in one pass
pub fn rolling_form(
    observations: Vec<TeamObservation>,
    window: usize,
) -> Result<Vec<TeamFormSnapshot>> {
    let mut form = RollingForm::new(window)?;
    Ok(form.process(observations))
}
