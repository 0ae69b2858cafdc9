use crate::core::aggregate::daily_totals;
use crate::core::entry::DrinkEntry;
use crate::core::units::round2;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub units: f64,
}

/// Units per logged date, oldest first.
pub fn daily_units(entries: &[DrinkEntry]) -> Vec<SeriesPoint> {
    daily_totals(entries)
        .into_iter()
        .map(|(date, day)| SeriesPoint {
            date,
            units: day.units,
        })
        .collect()
}

/// Units per calendar week, keyed by the Monday the week starts on.
pub fn weekly_units(entries: &[DrinkEntry]) -> Vec<SeriesPoint> {
    let mut weeks: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in entries {
        *weeks.entry(monday_of(entry.date)).or_default() += entry.units;
    }

    weeks
        .into_iter()
        .map(|(date, units)| SeriesPoint {
            date,
            units: round2(units),
        })
        .collect()
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}
