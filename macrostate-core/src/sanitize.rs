//! Value sanitization at the provider boundary.
//!
//! Everything numeric that leaves this module is finite. Malformed input is
//! dropped, never reported as an error.

use chrono::{DateTime, NaiveDate};
use macrostate_types::{Observation, RawObservation, RawValue};

/// Return `v` if it is finite.
#[must_use]
pub fn sanitize_f64(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Normalize a raw provider value.
///
/// Text is trimmed; empty text and the FRED missing marker `"."` are absent.
#[must_use]
pub fn sanitize_raw(v: &RawValue) -> Option<f64> {
    match v {
        RawValue::Number(n) => sanitize_f64(*n),
        RawValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() || s == "." {
                return None;
            }
            s.parse::<f64>().ok().and_then(sanitize_f64)
        }
        RawValue::Missing => None,
    }
}

/// Drop non-finite entries.
#[must_use]
pub fn sanitize_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp (date taken in UTC).
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc().date())
}

/// Drop rows without a usable value, then stable-sort by date.
///
/// Rows sharing a date keep their input order.
#[must_use]
pub fn clean_observations(raw: &[RawObservation]) -> Vec<Observation> {
    let mut out: Vec<Observation> = raw
        .iter()
        .filter_map(|r| sanitize_raw(&r.value).map(|v| Observation::new(r.date, v)))
        .collect();
    #[cfg(feature = "tracing")]
    {
        let dropped = raw.len() - out.len();
        if dropped > 0 {
            tracing::debug!(dropped, kept = out.len(), "dropped malformed observations");
        }
    }
    out.sort_by_key(|o| o.date);
    out
}

/// Keep finite observations, stable-sorted by date.
#[must_use]
pub fn clean_finite(observations: &[Observation]) -> Vec<Observation> {
    let mut out: Vec<Observation> = observations
        .iter()
        .copied()
        .filter(|o| o.value.is_finite())
        .collect();
    out.sort_by_key(|o| o.date);
    out
}
