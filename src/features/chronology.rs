//! Chronology normalization
//!
//! Parses match dates and puts the log into the order every later stage
//! relies on.

use chrono::{Datelike, NaiveDate};

use crate::{FootballError, MatchRecord, RawMatch, Result};

/// Earliest year accepted for a match date
pub const MIN_YEAR: i32 = 1800;

/// Parse a date by trying each chrono format in turn.
///
/// Dates before `MIN_YEAR` are rejected: they come from two-digit years
/// read by a four-digit format, e.g. `23-08-12` as `%Y-%m-%d`.
pub fn parse_date<S: AsRef<str>>(value: &str, formats: &[S]) -> Option<NaiveDate> {
    let value = value.trim();
    formats
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt.as_ref()).ok())
        .find(|date| date.year() >= MIN_YEAR)
}

/// Parse every date and sort ascending.
///
/// The sort is stable, so matches on the same day keep their input order.
pub fn normalize<S: AsRef<str>>(raw: Vec<RawMatch>, formats: &[S]) -> Result<Vec<MatchRecord>> {
    let mut records = raw
        .into_iter()
        .map(|m| {
            let date = parse_date(&m.date, formats).ok_or_else(|| FootballError::MalformedDate {
                value: m.date.clone(),
                home_team: m.home_team.clone(),
                away_team: m.away_team.clone(),
            })?;

            Ok(MatchRecord {
                date,
                home_team: m.home_team,
                away_team: m.away_team,
                home_goals: m.home_goals,
                away_goals: m.away_goals,
                result: m.result,
                season_id: m.season_id,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    records.sort_by_key(|r| r.date);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeatureConfig;

    fn raw(date: &str, home: &str, away: &str) -> RawMatch {
        RawMatch {
            date: date.to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_goals: 1,
            away_goals: 0,
            result: "H".to_string(),
            season_id: None,
        }
    }

    fn formats() -> Vec<String> {
        FeatureConfig::default().date_formats
    }

    #[test]
    fn test_day_first_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 8, 12).unwrap();
        assert_eq!(parse_date("12/08/23", &formats()), Some(expected));
        assert_eq!(parse_date("12/08/2023", &formats()), Some(expected));
        assert_eq!(parse_date("2023-08-12", &formats()), Some(expected));
        assert_eq!(parse_date(" 12/08/2023 ", &formats()), Some(expected));
        assert_eq!(parse_date("31/02/2023", &formats()), None);
        assert_eq!(parse_date("yesterday", &formats()), None);
    }

    #[test]
    fn test_two_digit_iso_year_rejected() {
        assert_eq!(parse_date("23-08-12", &formats()), None);
        assert_eq!(parse_date("0023-08-12", &formats()), None);
        assert_eq!(
            parse_date("1888-09-08", &formats()),
            NaiveDate::from_ymd_opt(1888, 9, 8)
        );

        let err = normalize(vec![raw("23-08-12", "Arsenal", "Forest")], &formats()).unwrap_err();
        assert!(matches!(err, FootballError::MalformedDate { ref value, .. } if value == "23-08-12"));
    }

    #[test]
    fn test_sorted_and_stable() {
        let matches = normalize(
            vec![
                raw("19/08/2023", "Chelsea", "Luton"),
                raw("12/08/2023", "Arsenal", "Forest"),
                raw("12/08/2023", "Bournemouth", "West Ham"),
                raw("11/08/2023", "Burnley", "Man City"),
            ],
            &formats(),
        )
        .unwrap();

        let homes: Vec<_> = matches.iter().map(|m| m.home_team.as_str()).collect();
        assert_eq!(homes, vec!["Burnley", "Arsenal", "Bournemouth", "Chelsea"]);
    }

    #[test]
    fn test_malformed_date() {
        let err = normalize(
            vec![raw("12/08/2023", "Arsenal", "Forest"), raw("TBC", "Chelsea", "Luton")],
            &formats(),
        )
        .unwrap_err();

        match err {
            FootballError::MalformedDate {
                value, home_team, ..
            } => {
                assert_eq!(value, "TBC");
                assert_eq!(home_team, "Chelsea");
            }
            other => panic!("expected MalformedDate, got {:?}", other),
        }
    }
}
