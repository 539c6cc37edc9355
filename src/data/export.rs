//! Feature table export

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::features::FeatureRow;
use crate::Result;

/// Column order of an exported feature table
pub const FEATURE_COLUMNS: [&str; 15] = [
    "date",
    "home_team",
    "away_team",
    "home_goals",
    "away_goals",
    "result",
    "season_id",
    "home_form_goals_avg",
    "home_form_conceded_avg",
    "home_form_points_avg",
    "away_form_goals_avg",
    "away_form_conceded_avg",
    "away_form_points_avg",
    "home_history",
    "away_history",
];

/// Write feature rows to a CSV file, creating parent directories
pub fn write_features<P: AsRef<Path>>(path: P, rows: &[FeatureRow]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_features_to(file, rows)?;
    log::info!("Wrote {} feature rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write feature rows as CSV with a header line
pub fn write_features_to<W: Write>(writer: W, rows: &[FeatureRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    if rows.is_empty() {
        wtr.write_record(FEATURE_COLUMNS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
