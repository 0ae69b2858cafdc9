use crate::core::entry::DrinkEntry;
use crate::core::score::calculate_score;
use crate::core::units::{round1, round2};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Length of the trailing weekly window, today included.
pub const WEEK_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DayTotals {
    pub units: f64,
    pub drinks: u32,
}

impl DayTotals {
    pub fn score(&self) -> f64 {
        calculate_score(self.units, self.drinks)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
    Unknown,
}

impl Trend {
    fn between(today: f64, previous: Option<f64>) -> Self {
        match previous {
            None => Self::Unknown,
            Some(prev) if today > prev => Self::Up,
            Some(prev) if today < prev => Self::Down,
            Some(_) => Self::Flat,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Flat => "→",
            Self::Unknown => "—",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_units: f64,
    pub total_drinks: u32,
    pub score: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_units: f64,
    pub total_drinks: u32,
    pub score: f64,
    pub active_days: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
}

/// Anything a leaderboard can rank.
pub trait Scored {
    fn score(&self) -> f64;

    fn trend(&self) -> Option<Trend> {
        None
    }
}

impl Scored for DailySummary {
    fn score(&self) -> f64 {
        self.score
    }

    fn trend(&self) -> Option<Trend> {
        Some(self.trend)
    }
}

impl Scored for WeeklySummary {
    fn score(&self) -> f64 {
        self.score
    }
}

/// Sums units and drink counts per calendar date. Unit totals are re-rounded
/// to two decimals so equal days compare equal.
pub fn daily_totals(entries: &[DrinkEntry]) -> BTreeMap<NaiveDate, DayTotals> {
    let mut totals: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for entry in entries {
        let day = totals.entry(entry.date).or_default();
        day.units += entry.units;
        day.drinks = day.drinks.saturating_add(entry.drink_count);
    }
    for day in totals.values_mut() {
        day.units = round2(day.units);
    }
    totals
}

/// Today's totals and score, with the trend against the latest earlier day
/// that has any entry.
pub fn daily_summary(entries: &[DrinkEntry], today: NaiveDate) -> DailySummary {
    let totals = daily_totals(entries);
    let current = totals.get(&today).copied().unwrap_or_default();
    let score = current.score();
    let previous = totals
        .range(..today)
        .next_back()
        .map(|(_, day)| day.score());

    DailySummary {
        date: today,
        total_units: current.units,
        total_drinks: current.drinks,
        score,
        trend: Trend::between(score, previous),
    }
}

pub fn week_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(WEEK_DAYS - 1))
        .unwrap_or(NaiveDate::MIN)
}

/// Trailing seven-day window ending today. The score is the sum of each
/// active day's own score, not a score of the weekly totals.
pub fn weekly_summary(entries: &[DrinkEntry], today: NaiveDate) -> WeeklySummary {
    let start = week_start(today);
    let totals = daily_totals(entries);

    let mut summary = WeeklySummary {
        start,
        end: today,
        total_units: 0.0,
        total_drinks: 0,
        score: 0.0,
        active_days: 0,
    };
    for day in totals.range(start..=today).map(|(_, day)| day) {
        summary.total_units += day.units;
        summary.total_drinks = summary.total_drinks.saturating_add(day.drinks);
        summary.score += day.score();
        summary.active_days += 1;
    }
    summary.total_units = round2(summary.total_units);
    summary.score = round1(summary.score);
    summary
}

/// Consecutive zero-unit days counting back from the latest logged date on
/// or before today. Gaps between logged dates do not break the streak.
pub fn current_dry_streak(entries: &[DrinkEntry], today: NaiveDate) -> u32 {
    let totals = daily_totals(entries);
    let mut streak = 0;
    for day in totals.range(..=today).rev().map(|(_, day)| day) {
        if day.units != 0.0 {
            break;
        }
        streak += 1;
    }
    streak
}

pub fn longest_dry_streak(entries: &[DrinkEntry], today: NaiveDate) -> u32 {
    let totals = daily_totals(entries);
    let mut longest = 0;
    let mut run = 0;
    for day in totals.range(..=today).map(|(_, day)| day) {
        if day.units == 0.0 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

pub fn streak_summary(entries: &[DrinkEntry], today: NaiveDate) -> StreakSummary {
    StreakSummary {
        current: current_dry_streak(entries, today),
        longest: longest_dry_streak(entries, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn logged(d: u32, units: f64, drinks: u32) -> DrinkEntry {
        DrinkEntry {
            date: day(d),
            drink_type: "Test".to_string(),
            volume_ml: 0.0,
            abv_percent: 0.0,
            units,
            drink_count: drinks,
        }
    }

    #[test]
    fn empty_history_has_neutral_defaults() {
        let daily = daily_summary(&[], day(10));
        assert_eq!(daily.score, 100.0);
        assert_eq!(daily.trend, Trend::Unknown);
        assert_eq!(daily.total_units, 0.0);
        assert_eq!(daily.total_drinks, 0);

        let weekly = weekly_summary(&[], day(10));
        assert_eq!(weekly.score, 0.0);
        assert_eq!(weekly.active_days, 0);

        assert_eq!(current_dry_streak(&[], day(10)), 0);
        assert_eq!(longest_dry_streak(&[], day(10)), 0);
    }

    #[test]
    fn daily_sums_all_entries_of_the_day() {
        let entries = vec![logged(10, 1.0, 1), logged(10, 1.5, 1), logged(9, 4.0, 2)];
        let daily = daily_summary(&entries, day(10));
        assert_eq!(daily.total_units, 2.5);
        assert_eq!(daily.total_drinks, 2);
        assert_eq!(daily.score, 71.0);
        assert_eq!(daily.trend, Trend::Up);
    }

    #[test]
    fn trend_uses_latest_prior_day_only() {
        // day 5 was awful, day 8 was perfect; only day 8 counts
        let entries = vec![logged(5, 8.0, 4), logged(8, 0.0, 0), logged(10, 1.0, 1)];
        assert_eq!(daily_summary(&entries, day(10)).trend, Trend::Down);

        let flat = vec![logged(8, 1.0, 1), logged(10, 1.0, 1)];
        assert_eq!(daily_summary(&flat, day(10)).trend, Trend::Flat);
    }

    #[test]
    fn no_entry_today_scores_perfect_against_prior_day() {
        let entries = vec![logged(9, 2.0, 1)];
        let daily = daily_summary(&entries, day(10));
        assert_eq!(daily.score, 100.0);
        assert_eq!(daily.trend, Trend::Up);
    }

    #[test]
    fn only_today_logged_has_unknown_trend() {
        let entries = vec![logged(10, 2.0, 1), logged(11, 1.0, 1)];
        assert_eq!(daily_summary(&entries, day(10)).trend, Trend::Unknown);
    }

    #[test]
    fn weekly_sums_per_day_scores() {
        let entries = vec![
            logged(4, 1.0, 1),
            logged(4, 1.0, 1),
            logged(7, 0.0, 0),
            logged(10, 3.0, 2),
        ];
        let weekly = weekly_summary(&entries, day(10));
        // 76 + 100 + 66
        assert_eq!(weekly.score, 242.0);
        assert_eq!(weekly.total_units, 5.0);
        assert_eq!(weekly.total_drinks, 4);
        assert_eq!(weekly.active_days, 3);
        assert_ne!(
            weekly.score,
            calculate_score(weekly.total_units, weekly.total_drinks)
        );
    }

    #[test]
    fn weekly_window_is_seven_days_inclusive() {
        let entries = vec![logged(3, 1.0, 1), logged(4, 1.0, 1), logged(11, 1.0, 1)];
        let weekly = weekly_summary(&entries, day(10));
        assert_eq!(weekly.start, day(4));
        assert_eq!(weekly.end, day(10));
        assert_eq!(weekly.active_days, 1);
        assert_eq!(weekly.score, 88.0);
    }

    #[test]
    fn single_active_day_week_matches_total_score() {
        let entries = vec![logged(9, 1.0, 1), logged(9, 2.0, 1)];
        let weekly = weekly_summary(&entries, day(10));
        assert_eq!(
            weekly.score,
            calculate_score(weekly.total_units, weekly.total_drinks)
        );
    }

    #[test]
    fn dry_streak_stops_at_first_drinking_day() {
        let entries = vec![
            logged(1, 0.0, 0),
            logged(2, 2.0, 1),
            logged(4, 0.0, 0),
            logged(6, 0.0, 1),
            logged(9, 0.0, 0),
        ];
        assert_eq!(current_dry_streak(&entries, day(10)), 3);
        assert_eq!(longest_dry_streak(&entries, day(10)), 3);
    }

    #[test]
    fn dry_streak_is_zero_after_a_drink() {
        let entries = vec![logged(8, 0.0, 0), logged(9, 1.0, 1)];
        assert_eq!(current_dry_streak(&entries, day(10)), 0);
        assert_eq!(longest_dry_streak(&entries, day(10)), 1);
    }

    #[test]
    fn equal_days_score_equal_despite_float_sums() {
        // 0.01 + 2.01 is not exactly 2.02 in binary
        let entries = vec![
            logged(9, 2.02, 1),
            logged(9, 0.0, 1),
            logged(10, 0.01, 1),
            logged(10, 2.01, 1),
        ];
        let daily = daily_summary(&entries, day(10));
        assert_eq!(daily.total_units, 2.02);
        assert_eq!(daily.score, calculate_score(2.02, 2));
        assert_eq!(daily.trend, Trend::Flat);
    }

    #[test]
    fn weekly_totals_are_rounded() {
        let entries = vec![
            logged(8, 0.1, 1),
            logged(9, 0.2, 1),
            logged(10, 0.01, 1),
            logged(10, 2.01, 1),
        ];
        let weekly = weekly_summary(&entries, day(10));
        assert_eq!(weekly.total_units, 2.32);
        // 97 + 96 + 75.8
        assert_eq!(weekly.score, 268.8);
    }

    #[test]
    fn drink_counts_saturate() {
        let entries = vec![
            logged(10, 1.0, u32::MAX),
            logged(10, 1.0, 1),
            logged(9, 1.0, 1),
        ];
        assert_eq!(daily_summary(&entries, day(10)).total_drinks, u32::MAX);
        assert_eq!(weekly_summary(&entries, day(10)).total_drinks, u32::MAX);
    }

    #[test]
    fn dry_streak_ignores_days_after_today() {
        let entries = vec![logged(8, 0.0, 0), logged(12, 1.0, 1)];
        let streaks = streak_summary(&entries, day(10));
        assert_eq!(streaks, StreakSummary { current: 1, longest: 1 });
    }
}
