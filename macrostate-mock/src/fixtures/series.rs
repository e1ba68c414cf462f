use chrono::{Datelike, Months, NaiveDate, Weekday};
use macrostate_core::{Observation, SeriesKind};

#[derive(Clone, Copy)]
pub enum Cadence {
    Business,
    Monthly,
}

/// Shape of a synthetic series.
#[derive(Clone, Copy)]
pub struct Profile {
    pub base: f64,
    pub amplitude: f64,
    pub cadence: Cadence,
    pub kind: SeriesKind,
}

const fn p(base: f64, amplitude: f64, cadence: Cadence, kind: SeriesKind) -> Profile {
    Profile {
        base,
        amplitude,
        cadence,
        kind,
    }
}

pub fn by_series_id(id: &str) -> Option<Profile> {
    use Cadence::{Business, Monthly};
    use SeriesKind::{Fx, Macro, Rate, VolatilityIndex};
    let profile = match id {
        "DGS10" => p(4.2, 0.6, Business, Rate),
        "DGS2" => p(4.6, 0.7, Business, Rate),
        "DFF" => p(5.3, 0.1, Business, Rate),
        "UNRATE" => p(3.9, 0.3, Monthly, Macro),
        "CPIAUCSL" => p(305.0, 8.0, Monthly, Macro),
        "PAYEMS" => p(157_000.0, 1_500.0, Monthly, Macro),
        "VIXCLS" | "^VIX" => p(16.0, 5.0, Business, VolatilityIndex),
        "^MOVE" => p(105.0, 20.0, Business, VolatilityIndex),
        "DTWEXBGS" | "DX-Y.NYB" => p(104.0, 3.0, Business, Fx),
        "EURUSD=X" => p(1.08, 0.04, Business, Fx),
        "GBPUSD=X" => p(1.26, 0.05, Business, Fx),
        "JPY=X" => p(150.0, 6.0, Business, Fx),
        "CAD=X" => p(1.36, 0.03, Business, Fx),
        "AUDUSD=X" => p(0.66, 0.03, Business, Fx),
        "CHF=X" => p(0.89, 0.03, Business, Fx),
        "CNH=X" => p(7.2, 0.1, Business, Fx),
        _ => return None,
    };
    Some(profile)
}

/// Deterministic value for `date`; depends only on the profile and the date.
fn value_at(profile: Profile, date: NaiveDate) -> f64 {
    let i = f64::from(date.num_days_from_ce());
    let wave = 0.6 * (i * 0.07).sin() + 0.3 * (i * 0.013 + 1.0).sin() + 0.1 * (i * 0.31).cos();
    profile.base + profile.amplitude * wave
}

/// Observations from `start` through `end`, inclusive.
pub fn generate(profile: Profile, start: NaiveDate, end: NaiveDate) -> Vec<Observation> {
    let mut out = Vec::new();
    match profile.cadence {
        Cadence::Business => {
            let mut next = Some(start);
            while let Some(d) = next.filter(|d| *d <= end) {
                if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
                    out.push(Observation::new(d, value_at(profile, d)));
                }
                next = d.succ_opt();
            }
        }
        Cadence::Monthly => {
            let mut next = NaiveDate::from_ymd_opt(start.year(), start.month(), 1);
            while let Some(d) = next.filter(|d| *d <= end) {
                if d >= start {
                    out.push(Observation::new(d, value_at(profile, d)));
                }
                next = d.checked_add_months(Months::new(1));
            }
        }
    }
    out
}
