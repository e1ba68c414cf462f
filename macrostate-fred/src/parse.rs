//! Payload decoding for the two FRED formats.
//!
//! Values are passed through as text; the `"."` missing marker and blanks are
//! left for the sanitizer. Rows whose date does not parse are skipped.

use macrostate_core::{MacroError, RawObservation, RawValue, parse_date};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Option<Vec<FredObservation>>,
}

#[derive(Debug, Deserialize)]
struct FredObservation {
    date: String,
    #[serde(default)]
    value: Option<String>,
}

fn row(date: &str, value: Option<&str>) -> Option<RawObservation> {
    let Some(date) = parse_date(date) else {
        #[cfg(feature = "tracing")]
        tracing::debug!(date, "dropping FRED row with unparseable date");
        return None;
    };
    let value = value.map_or(RawValue::Missing, |v| RawValue::Text(v.trim().to_string()));
    Some(RawObservation { date, value })
}

/// Decode a `series/observations` JSON document.
///
/// # Errors
/// Returns `Data` when the body is not JSON or lacks the `observations` array.
pub fn parse_json(body: &str) -> Result<Vec<RawObservation>, MacroError> {
    let doc: ObservationsResponse = serde_json::from_str(body)
        .map_err(|e| MacroError::Data(format!("invalid FRED JSON: {e}")))?;
    let observations = doc
        .observations
        .ok_or_else(|| MacroError::Data("missing observations in FRED response".into()))?;
    Ok(observations
        .iter()
        .filter_map(|o| row(&o.date, o.value.as_deref()))
        .collect())
}

/// Decode a `fredgraph.csv` document: a header line, then `date,value` rows.
///
/// # Errors
/// Returns `Data` when the header has fewer than two columns or no rows follow.
pub fn parse_csv(body: &str) -> Result<Vec<RawObservation>, MacroError> {
    let mut lines = body.lines().map(str::trim).filter(|l| !l.is_empty());
    let header = lines.next().unwrap_or_default();
    if header.split(',').count() < 2 {
        return Err(MacroError::Data("FRED CSV missing data columns".into()));
    }
    let rows: Vec<RawObservation> = lines
        .filter_map(|line| {
            let mut cols = line.split(',');
            let date = cols.next()?;
            row(date, cols.next())
        })
        .collect();
    if rows.is_empty() {
        return Err(MacroError::Data("FRED CSV missing data columns".into()));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn json_keeps_missing_marker_as_text() {
        let body = r#"{"count":3,"observations":[
            {"realtime_start":"2024-06-28","date":"2024-06-26","value":"4.32"},
            {"date":"2024-06-27","value":"."},
            {"date":"not-a-date","value":"4.30"},
            {"date":"2024-06-28"}
        ]}"#;
        let rows = parse_json(body).unwrap();
        assert_eq!(
            rows,
            vec![
                RawObservation::new(d(2024, 6, 26), "4.32"),
                RawObservation::new(d(2024, 6, 27), "."),
                RawObservation::new(d(2024, 6, 28), RawValue::Missing),
            ]
        );
    }

    #[test]
    fn json_without_observations_is_a_data_error() {
        let err = parse_json(r#"{"error_code":400}"#).unwrap_err();
        assert!(matches!(err, MacroError::Data(m) if m.contains("missing observations")));
        assert!(matches!(parse_json("<html>"), Err(MacroError::Data(_))));
    }

    #[test]
    fn csv_reads_first_two_columns() {
        let body = "observation_date,DGS10\n2024-06-27,4.29\r\n2024-06-28,\n\n";
        let rows = parse_csv(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RawObservation::new(d(2024, 6, 27), "4.29"));
        assert_eq!(rows[1], RawObservation::new(d(2024, 6, 28), ""));
    }

    #[test]
    fn csv_rejects_single_column_or_empty_bodies() {
        assert!(parse_csv("DATE\n2024-06-28\n").is_err());
        assert!(parse_csv("").is_err());
        assert!(parse_csv("DATE,DGS10\n").is_err());
    }
}
