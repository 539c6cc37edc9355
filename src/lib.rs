//! Football match form features
//!
//! Turns a chronological log of completed matches into a per-match feature
//! table where every value only looks at a team's earlier matches.

pub mod data;
pub mod features;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Full-time result, named from the home team's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchResult {
    /// Result code as it appears in match logs (`FTR` column)
    pub fn code(&self) -> &'static str {
        match self {
            MatchResult::HomeWin => "H",
            MatchResult::Draw => "D",
            MatchResult::AwayWin => "A",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "H" | "HOME_WIN" => Some(MatchResult::HomeWin),
            "D" | "DRAW" => Some(MatchResult::Draw),
            "A" | "AWAY_WIN" => Some(MatchResult::AwayWin),
            _ => None,
        }
    }

    /// Result implied by a final score
    pub fn from_score(home_goals: u32, away_goals: u32) -> Self {
        match home_goals.cmp(&away_goals) {
            std::cmp::Ordering::Greater => MatchResult::HomeWin,
            std::cmp::Ordering::Less => MatchResult::AwayWin,
            std::cmp::Ordering::Equal => MatchResult::Draw,
        }
    }

    /// League points earned by the home team
    pub fn home_points(&self) -> u8 {
        match self {
            MatchResult::HomeWin => 3,
            MatchResult::Draw => 1,
            MatchResult::AwayWin => 0,
        }
    }

    /// League points earned by the away team
    pub fn away_points(&self) -> u8 {
        match self {
            MatchResult::HomeWin => 0,
            MatchResult::Draw => 1,
            MatchResult::AwayWin => 3,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One row of a match log as it arrives, before dates are parsed.
///
/// Field names follow the football-data.co.uk layout (`Date`, `HomeTeam`,
/// `AwayTeam`, `FTHG`, `FTAG`, `FTR`); snake_case headers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    #[serde(rename = "Date", alias = "date")]
    pub date: String,
    #[serde(rename = "HomeTeam", alias = "home_team")]
    pub home_team: String,
    #[serde(rename = "AwayTeam", alias = "away_team")]
    pub away_team: String,
    #[serde(rename = "FTHG", alias = "home_goals")]
    pub home_goals: u32,
    #[serde(rename = "FTAG", alias = "away_goals")]
    pub away_goals: u32,
    #[serde(rename = "FTR", alias = "result")]
    pub result: String,
    #[serde(default)]
    pub season_id: Option<String>,
}

/// A completed match with a parsed date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    /// Result code exactly as supplied; validated when the match is reshaped
    pub result: String,
    pub season_id: Option<String>,
}

impl MatchRecord {
    /// Parse the result code
    pub fn outcome(&self) -> Result<MatchResult> {
        MatchResult::from_code(&self.result).ok_or_else(|| FootballError::InvalidResult {
            date: self.date,
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            value: self.result.clone(),
        })
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}-{} {}",
            self.date, self.home_team, self.home_goals, self.away_goals, self.away_team
        )
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum FootballError {
    #[error("Malformed date '{value}' for {home_team} vs {away_team}")]
    MalformedDate {
        value: String,
        home_team: String,
        away_team: String,
    },

    #[error("Invalid result '{value}' for {home_team} vs {away_team} on {date}")]
    InvalidResult {
        date: NaiveDate,
        home_team: String,
        away_team: String,
        value: String,
    },

    #[error("Invalid window size {0}: must be at least 1")]
    InvalidWindow(usize),

    #[error("Ambiguous join: {team} has more than one match on {date}")]
    AmbiguousJoin { date: NaiveDate, team: String },

    #[error("Missing join: no form snapshot for {team} on {date}")]
    MissingJoin { date: NaiveDate, team: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FootballError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub features: FeatureConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Number of prior matches averaged into a team's form
    pub window: usize,
    /// chrono formats tried in order when parsing match dates
    pub date_formats: Vec<String>,
    /// Rows where either side has fewer prior matches are left out of exports
    pub min_history: usize,
}

impl FeatureConfig {
    /// Check the window and the export filter agree.
    ///
    /// History counts never exceed the window, so `min_history > window`
    /// would filter out every row.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(FootballError::InvalidWindow(self.window));
        }
        if self.min_history > self.window {
            return Err(FootballError::Config(format!(
                "min_history {} exceeds window {}: no match can have more prior matches than the window holds",
                self.min_history, self.window
            )));
        }
        Ok(())
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        FeatureConfig {
            window: features::form::DEFAULT_WINDOW,
            // Two-digit years first: "%Y" would happily read "23" as year 23
            date_formats: vec![
                "%d/%m/%y".to_string(),
                "%d/%m/%Y".to_string(),
                "%Y-%m-%d".to_string(),
            ],
            min_history: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub raw_path: String,
    pub processed_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            raw_path: "data/raw/epl_history_raw.csv".to_string(),
            processed_path: "data/processed/epl_training_data.csv".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FootballError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| FootballError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FootballError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
