use macrostate_types::Observation;

/// Positive spacings, in days, between adjacent distinct observation dates.
///
/// The input order does not matter; duplicate dates are ignored.
fn positive_spacings(observations: &[Observation]) -> Vec<i64> {
    let mut dates: Vec<_> = observations.iter().map(|o| o.date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates.windows(2).map(|w| (w[1] - w[0]).num_days()).collect()
}

/// Median spacing in days between adjacent distinct observation dates.
///
/// With an even number of spacings the two middle values are averaged.
/// Returns `None` if fewer than two distinct dates are present.
///
/// ```
/// use chrono::NaiveDate;
/// use macrostate_core::{median_spacing_days, Observation};
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// // Spacings: 1, 1, 3, 1 => median 1
/// let obs = [d(1), d(2), d(3), d(6), d(7)].map(|date| Observation::new(date, 1.0));
/// assert_eq!(median_spacing_days(&obs), Some(1.0));
/// ```
#[must_use]
pub fn median_spacing_days(observations: &[Observation]) -> Option<f64> {
    let mut spacings = positive_spacings(observations);
    if spacings.is_empty() {
        return None;
    }
    spacings.sort_unstable();
    let mid = spacings.len() / 2;
    #[allow(clippy::cast_precision_loss)]
    let median = if spacings.len() % 2 == 1 {
        spacings[mid] as f64
    } else {
        (spacings[mid - 1] + spacings[mid]) as f64 / 2.0
    };
    Some(median)
}

/// Heuristic: a series is high-frequency when its median spacing is at most
/// `max_spacing_days`. Fewer than two distinct dates is never high-frequency.
#[must_use]
pub fn is_high_frequency(observations: &[Observation], max_spacing_days: f64) -> bool {
    median_spacing_days(observations).is_some_and(|m| m <= max_spacing_days)
}
