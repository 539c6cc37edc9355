//! Match log loading
//!
//! Reads football-data.co.uk style CSV files. Columns beyond the ones a
//! `RawMatch` needs are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{RawMatch, Result};

/// Read a single match log file
pub fn read_matches<P: AsRef<Path>>(path: P) -> Result<Vec<RawMatch>> {
    let file = File::open(path.as_ref())?;
    read_matches_from(file)
}

/// Read a match log from any reader. Blank padding rows are skipped.
pub fn read_matches_from<R: Read>(reader: R) -> Result<Vec<RawMatch>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut matches = Vec::new();
    let mut skipped = 0;
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            skipped += 1;
            continue;
        }
        matches.push(record.deserialize(Some(&headers))?);
    }

    if skipped > 0 {
        log::warn!("Skipped {} empty rows", skipped);
    }
    Ok(matches)
}

/// Season label for a file: its directory name, else its file stem.
///
/// Only names starting with a digit count as seasons, so
/// `data/raw/2324/E0.csv` is season `2324` while
/// `data/raw/epl_history_raw.csv` has none.
pub fn season_tag(path: &Path) -> Option<String> {
    let looks_like_season = |s: &&str| s.starts_with(|c: char| c.is_ascii_digit());

    let dir = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str());
    let stem = path.file_stem().and_then(|s| s.to_str());

    dir.filter(looks_like_season)
        .or_else(|| stem.filter(looks_like_season))
        .map(str::to_string)
}

/// Read and concatenate several season files.
///
/// Rows without a `season_id` column value are tagged from their file path.
pub fn load_seasons<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RawMatch>> {
    let mut all = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let tag = season_tag(path);
        let mut matches = read_matches(path)?;

        for m in &mut matches {
            if m.season_id.is_none() {
                m.season_id = tag.clone();
            }
        }

        log::info!(
            "Loaded {} matches from {} (season {})",
            matches.len(),
            path.display(),
            tag.as_deref().unwrap_or("-")
        );
        all.extend(matches);
    }

    Ok(all)
}
