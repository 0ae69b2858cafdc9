use crate::core::UserStreak;
use crate::core::aggregate::{DailySummary, StreakSummary, WeeklySummary};
use crate::core::audit::{AuditAnswers, AuditResult, RiskTier};
use crate::core::entry::DrinkEntry;
use crate::core::leaderboard::{Medal, Standing};
use crate::core::score::label_for_score;
use crate::core::series::SeriesPoint;
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;

pub const AUDIT_LINK: &str = "https://auditscreen.org/check-your-drinking/";

pub const SCORING_RULES: &str = "\
How scoring works:
  0 units = 100 points
  each unit = -10 points
  each drink = -2 points
  negative scores are possible
  weekly score = sum of each logged day's score over the last 7 days";

/// Scores and units are shown with one decimal.
fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

fn paint_row(line: String, medal: Option<Medal>) -> String {
    match medal {
        Some(Medal::Gold) => line.truecolor(255, 215, 0).bold().to_string(),
        Some(Medal::Silver) => line.truecolor(192, 192, 192).bold().to_string(),
        Some(Medal::Bronze) => line.truecolor(205, 127, 50).bold().to_string(),
        None => line,
    }
}

fn colored_tier(tier: RiskTier) -> String {
    match tier {
        RiskTier::Low => tier.as_str().green().bold().to_string(),
        RiskTier::Increasing => tier.as_str().yellow().bold().to_string(),
        RiskTier::High => tier.as_str().red().bold().to_string(),
    }
}

#[derive(Serialize)]
pub struct JsonBoard<'a, S: Serialize> {
    pub kind: &'static str,
    pub date: NaiveDate,
    pub standings: &'a [Standing<S>],
}

pub fn print_daily_board(date: NaiveDate, board: &[Standing<DailySummary>]) {
    println!("{} ({})", "Daily Leaderboard".bold(), date);
    println!(
        "{:<4} {:<20} {:>7} {:>7} {:>8} {:>6}",
        "#", "User", "Units", "Drinks", "Score", "Trend"
    );

    for standing in board {
        let summary = &standing.summary;
        let line = format!(
            "{:<4} {:<20} {:>7} {:>7} {:>8} {:>6}",
            standing.rank + 1,
            standing.display_name(),
            one_decimal(summary.total_units),
            summary.total_drinks,
            one_decimal(summary.score),
            summary.trend.arrow()
        );
        println!("{}", paint_row(line, standing.medal));
    }

    if let Some(winner) = board.first() {
        println!();
        println!(
            "today: {} is ahead ({})",
            winner.user,
            label_for_score(winner.summary.score)
        );
    }
}

pub fn print_weekly_board(date: NaiveDate, board: &[Standing<WeeklySummary>]) {
    let start = board.first().map(|s| s.summary.start).unwrap_or(date);
    println!("{} ({} .. {})", "Weekly Leaderboard".bold(), start, date);
    println!(
        "{:<4} {:<20} {:>11} {:>12} {:>11} {:>5}",
        "#", "User", "Units (7d)", "Drinks (7d)", "Score (7d)", "Days"
    );

    for standing in board {
        let summary = &standing.summary;
        let line = format!(
            "{:<4} {:<20} {:>11} {:>12} {:>11} {:>5}",
            standing.rank + 1,
            standing.display_name(),
            one_decimal(summary.total_units),
            summary.total_drinks,
            one_decimal(summary.score),
            summary.active_days
        );
        println!("{}", paint_row(line, standing.medal));
    }

    println!();
    println!("{}", SCORING_RULES.dimmed());
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonStreak<'a> {
    pub user: &'a str,
    #[serde(flatten)]
    pub streak: StreakSummary,
}

pub fn json_streaks(streaks: &[UserStreak]) -> Vec<JsonStreak<'_>> {
    streaks
        .iter()
        .map(|s| JsonStreak {
            user: &s.user,
            streak: s.streak,
        })
        .collect()
}

pub fn print_streaks(date: NaiveDate, streaks: &[UserStreak]) {
    println!("{} (as of {})", "Dry-day streaks".bold(), date);
    for entry in streaks {
        let name = if entry.icon.is_empty() {
            entry.user.clone()
        } else {
            format!("{} {}", entry.icon, entry.user)
        };
        let current = if entry.streak.current > 0 {
            entry.streak.current.to_string().green().bold().to_string()
        } else {
            entry.streak.current.to_string()
        };
        println!(
            "{:<20} current: {:<4} longest: {}",
            name, current, entry.streak.longest
        );
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonAudit {
    pub frequency: String,
    pub quantity: String,
    pub six_plus_frequency: String,
    pub score: u8,
    pub tier: &'static str,
}

impl JsonAudit {
    pub fn new(answers: AuditAnswers, result: AuditResult) -> Self {
        Self {
            frequency: answers.frequency.to_string(),
            quantity: answers.quantity.to_string(),
            six_plus_frequency: answers.six_plus_frequency.to_string(),
            score: result.score,
            tier: result.tier.as_str(),
        }
    }
}

pub fn print_audit(answers: AuditAnswers, result: AuditResult) {
    println!("{}", "AUDIT-C screening".bold());
    println!("how often do you drink:          {}", answers.frequency);
    println!("drinks on a typical day:         {}", answers.quantity);
    println!("six or more on one occasion:     {}", answers.six_plus_frequency);
    println!();
    println!("score: {}/11 ({})", result.score, colored_tier(result.tier));
    println!("-> take the full AUDIT test: {}", AUDIT_LINK);
}

pub fn print_series(user: &str, title: &str, points: &[SeriesPoint]) {
    println!("{} for {}", title.bold(), user);
    if points.is_empty() {
        println!("no entries yet");
        return;
    }

    let max = points.iter().map(|p| p.units).fold(0.0_f64, f64::max);
    for point in points {
        // 40 columns for the heaviest period
        let width = if max > 0.0 {
            ((point.units / max) * 40.0).round() as usize
        } else {
            0
        };
        println!(
            "{}  {:>6}  {}",
            point.date,
            format!("{:.2}", point.units),
            "#".repeat(width)
        );
    }
}

pub fn print_history(user: &str, entries: &[DrinkEntry]) {
    println!("{} for {} ({} entries)", "History".bold(), user, entries.len());
    for entry in entries {
        if entry.is_sober_marker() {
            println!("{}  {}", entry.date, "sober day".green());
            continue;
        }
        println!(
            "{}  {:<16} {:>7.0} ml {:>5.1}%  {:>5.2} units",
            entry.date, entry.drink_type, entry.volume_ml, entry.abv_percent, entry.units
        );
    }
}

pub fn print_logged(user: &str, entry: &DrinkEntry, location: &str) {
    if entry.is_sober_marker() {
        println!("logged a sober day for {} on {} ({})", user, entry.date, location);
    } else {
        println!(
            "added {} for {} on {}: {:.2} units ({})",
            entry.drink_type, user, entry.date, entry.units, location
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::Trend;
    use crate::core::leaderboard::{Contender, rank};

    #[test]
    fn one_decimal_rounds_for_display() {
        assert_eq!(one_decimal(81.4), "81.4");
        assert_eq!(one_decimal(-3.26), "-3.3");
        assert_eq!(one_decimal(100.0), "100.0");
    }

    #[test]
    fn daily_board_serializes_with_trend_and_medal() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let board = rank(vec![Contender {
            user: "Tim".to_string(),
            icon: "🦄".to_string(),
            summary: DailySummary {
                date,
                total_units: 1.3,
                total_drinks: 1,
                score: 85.0,
                trend: Trend::Up,
            },
        }]);
        let json = serde_json::to_value(JsonBoard {
            kind: "daily",
            date,
            standings: &board,
        })
        .unwrap();

        let first = &json["standings"][0];
        assert_eq!(json["kind"], "daily");
        assert_eq!(first["medal"], "gold");
        assert_eq!(first["trend"], "up");
        assert_eq!(first["winner"], true);
        assert_eq!(first["summary"]["score"], 85.0);
    }

    #[test]
    fn streaks_flatten_into_user_rows() {
        let streaks = vec![UserStreak {
            user: "Rebecca".to_string(),
            icon: String::new(),
            streak: StreakSummary { current: 2, longest: 5 },
        }];
        let json = serde_json::to_value(json_streaks(&streaks)).unwrap();
        assert_eq!(json[0]["user"], "Rebecca");
        assert_eq!(json[0]["current"], 2);
        assert_eq!(json[0]["longest"], 5);
    }
}
