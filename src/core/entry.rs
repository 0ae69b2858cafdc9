use crate::core::units::calculate_units;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub const SOBER_DRINK_TYPE: &str = "None";

/// Rejections raised before anything reaches the calculators.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("volume must be a non-negative number of ml, got {0}")]
    InvalidVolume(f64),
    #[error("abv must be between 0 and 100 percent, got {0}")]
    InvalidAbv(f64),
    #[error("unrecognized {question} answer {answer:?} (expected one of: {expected})")]
    UnknownAnswer {
        question: &'static str,
        answer: String,
        expected: &'static str,
    },
    #[error("unknown user {0:?} (configured users: {1})")]
    UnknownUser(String, String),
}

/// One logged drink or sober-day marker.
///
/// Column names match the per-user CSV layout:
/// `date,drink_type,volume,abv,units,drinks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkEntry {
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,
    pub drink_type: String,
    #[serde(rename = "volume")]
    pub volume_ml: f64,
    #[serde(rename = "abv")]
    pub abv_percent: f64,
    pub units: f64,
    #[serde(rename = "drinks", deserialize_with = "deserialize_count")]
    pub drink_count: u32,
}

impl DrinkEntry {
    /// Validated drink entry. Units are fixed here and never recomputed.
    pub fn drink(
        date: NaiveDate,
        drink_type: impl Into<String>,
        volume_ml: f64,
        abv_percent: f64,
    ) -> Result<Self, InputError> {
        if !volume_ml.is_finite() || volume_ml < 0.0 {
            return Err(InputError::InvalidVolume(volume_ml));
        }
        if !abv_percent.is_finite() || !(0.0..=100.0).contains(&abv_percent) {
            return Err(InputError::InvalidAbv(abv_percent));
        }

        Ok(Self {
            date,
            drink_type: drink_type.into(),
            volume_ml,
            abv_percent,
            units: calculate_units(volume_ml, abv_percent),
            drink_count: 1,
        })
    }

    pub fn sober_day(date: NaiveDate) -> Self {
        Self {
            date,
            drink_type: SOBER_DRINK_TYPE.to_string(),
            volume_ml: 0.0,
            abv_percent: 0.0,
            units: 0.0,
            drink_count: 0,
        }
    }

    pub fn is_sober_marker(&self) -> bool {
        self.drink_count == 0 && self.units == 0.0
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS[.f]` or RFC 3339 and keeps only
/// the calendar date.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date {raw:?}")))
}

// pandas happily writes integer columns as `1.0`
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 || raw > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!(
            "invalid drink count {raw}"
        )));
    }
    Ok(raw as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn drink_computes_units_once() {
        let entry = DrinkEntry::drink(day(1), "Beer", 330.0, 5.0).unwrap();
        assert_eq!(entry.units, 1.3);
        assert_eq!(entry.drink_count, 1);
        assert!(!entry.is_sober_marker());
    }

    #[test]
    fn sober_day_is_all_zero() {
        let entry = DrinkEntry::sober_day(day(2));
        assert_eq!(entry.drink_type, "None");
        assert_eq!(entry.volume_ml, 0.0);
        assert_eq!(entry.abv_percent, 0.0);
        assert_eq!(entry.units, 0.0);
        assert_eq!(entry.drink_count, 0);
        assert!(entry.is_sober_marker());
    }

    #[test]
    fn zero_abv_drink_still_counts_as_a_drink() {
        let entry = DrinkEntry::drink(day(3), "Alcohol-free beer", 500.0, 0.0).unwrap();
        assert_eq!(entry.units, 0.0);
        assert_eq!(entry.drink_count, 1);
        assert!(!entry.is_sober_marker());
    }

    #[test]
    fn rejects_out_of_range_input() {
        assert_eq!(
            DrinkEntry::drink(day(1), "Beer", -1.0, 5.0),
            Err(InputError::InvalidVolume(-1.0))
        );
        assert_eq!(
            DrinkEntry::drink(day(1), "Beer", 330.0, 100.5),
            Err(InputError::InvalidAbv(100.5))
        );
        assert!(DrinkEntry::drink(day(1), "Beer", f64::NAN, 5.0).is_err());
        assert!(DrinkEntry::drink(day(1), "Spirit", 10.0, 100.0).is_ok());
    }

    #[test]
    fn parses_dates_with_time_of_day() {
        assert_eq!(parse_calendar_date("2025-03-04"), Some(day(4)));
        assert_eq!(parse_calendar_date("2025-03-04 23:59:01"), Some(day(4)));
        assert_eq!(parse_calendar_date("2025-03-04T08:00:00"), Some(day(4)));
        assert_eq!(parse_calendar_date("2025-03-04T08:00:00+02:00"), Some(day(4)));
        assert_eq!(parse_calendar_date("yesterday"), None);
    }
}
