//! Shared helpers for date-aligned value slices.

use chrono::NaiveDate;
use macrostate_types::{Observation, TransformSeries};

/// Split observations into parallel date and value vectors.
#[must_use]
pub fn unzip_observations(observations: &[Observation]) -> (Vec<NaiveDate>, Vec<f64>) {
    observations.iter().map(|o| (o.date, o.value)).unzip()
}

/// Inner-join two date-sorted observation slices on date.
///
/// When a date repeats, the last observation for that date on each side is used.
#[must_use]
pub fn inner_join(a: &[Observation], b: &[Observation]) -> (Vec<NaiveDate>, Vec<f64>, Vec<f64>) {
    let a = last_per_date(a);
    let b = last_per_date(b);
    let (mut i, mut j) = (0, 0);
    let mut dates = Vec::new();
    let mut va = Vec::new();
    let mut vb = Vec::new();
    while i < a.len() && j < b.len() {
        match a[i].date.cmp(&b[j].date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dates.push(a[i].date);
                va.push(a[i].value);
                vb.push(b[j].value);
                i += 1;
                j += 1;
            }
        }
    }
    (dates, va, vb)
}

fn last_per_date(observations: &[Observation]) -> Vec<Observation> {
    let mut out: Vec<Observation> = Vec::with_capacity(observations.len());
    for o in observations {
        match out.last_mut() {
            Some(prev) if prev.date == o.date => *prev = *o,
            _ => out.push(*o),
        }
    }
    out
}

/// Latest present value of a transform series and its date.
///
/// Scans backwards; non-finite values are skipped like absent ones.
#[must_use]
pub fn latest_value(series: &TransformSeries) -> Option<(f64, NaiveDate)> {
    series
        .dates
        .iter()
        .zip(series.values.iter())
        .rev()
        .find_map(|(d, v)| v.filter(|x| x.is_finite()).map(|x| (x, *d)))
}
