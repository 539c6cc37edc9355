//! End-to-end feature build
//!
//! Normalize -> reshape -> rolling form -> rejoin.

use super::chronology::normalize;
use super::form::{RollingForm, TeamForm};
use super::perspective::reshape;
use super::rejoin::{rejoin, FeatureRow};
use crate::{FeatureConfig, RawMatch, Result};

/// Output of a feature build: one row per match plus the final form state
#[derive(Debug, Clone)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
    form: RollingForm,
}

impl FeatureTable {
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<FeatureRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Form every team carries into its next, unplayed match
    pub fn current_form(&self) -> Vec<TeamForm> {
        self.form.current_all()
    }

    pub fn form_for(&self, team: &str) -> Option<TeamForm> {
        self.form.current(team)
    }

    /// Rows where both sides have at least `min` prior matches
    pub fn rows_with_history(&self, min: usize) -> Vec<FeatureRow> {
        let kept: Vec<_> = self
            .rows
            .iter()
            .filter(|r| r.has_history(min))
            .cloned()
            .collect();

        let dropped = self.rows.len() - kept.len();
        if dropped > 0 {
            log::warn!(
                "Dropped {} of {} matches with fewer than {} prior matches per side",
                dropped,
                self.rows.len(),
                min
            );
        }
        kept
    }
}

/// Build the per-match form feature table
pub fn build_features(raw: Vec<RawMatch>, config: &FeatureConfig) -> Result<FeatureTable> {
    config.validate()?;
    let mut form = RollingForm::new(config.window)?;

    let matches = normalize(raw, &config.date_formats)?;
    if let (Some(first), Some(last)) = (matches.first(), matches.last()) {
        log::info!(
            "Normalized {} matches ({} to {})",
            matches.len(),
            first.date,
            last.date
        );
    }

    let observations = reshape(&matches)?;
    log::info!("Reshaped into {} team observations", observations.len());

    let snapshots = form.process(observations);
    log::info!(
        "Computed form for {} teams over a {}-match window",
        form.team_count(),
        form.window()
    );

    let rows = rejoin(&matches, &snapshots)?;
    log::info!("Joined form onto {} matches", rows.len());

    Ok(FeatureTable { rows, form })
}
