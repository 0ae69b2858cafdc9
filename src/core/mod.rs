pub mod aggregate;
pub mod audit;
pub mod entry;
pub mod leaderboard;
pub mod report;
pub mod score;
pub mod series;
pub mod units;

use crate::config::{Config, UserConfig};
use crate::core::aggregate::{DailySummary, StreakSummary, WeeklySummary};
use crate::core::entry::DrinkEntry;
use crate::core::leaderboard::{Contender, Standing};
use crate::core::series::SeriesPoint;
use crate::store::EntryStore;
use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Daily,
    Weekly,
}

#[derive(Debug, Clone)]
pub struct UserStreak {
    pub user: String,
    pub icon: String,
    pub streak: StreakSummary,
}

/// Reads histories through the injected store and recomputes every view on
/// each call. Keeps no aggregates between calls.
pub struct Tracker<'a, S: EntryStore> {
    store: &'a mut S,
    users: &'a [UserConfig],
}

impl<'a, S: EntryStore> Tracker<'a, S> {
    pub fn new(store: &'a mut S, cfg: &'a Config) -> Self {
        Self {
            store,
            users: &cfg.users,
        }
    }

    pub fn log_drink(&mut self, user: &UserConfig, entry: DrinkEntry) -> Result<DrinkEntry> {
        self.store.append(&user.name, &entry)?;
        Ok(entry)
    }

    pub fn log_sober_day(&mut self, user: &UserConfig, date: NaiveDate) -> Result<DrinkEntry> {
        let entry = DrinkEntry::sober_day(date);
        self.store.append(&user.name, &entry)?;
        Ok(entry)
    }

    pub fn history(&self, user: &UserConfig) -> Result<Vec<DrinkEntry>> {
        self.store.read_all(&user.name)
    }

    pub fn daily_board(&self, today: NaiveDate) -> Result<Vec<Standing<DailySummary>>> {
        self.board(|entries| aggregate::daily_summary(entries, today))
    }

    pub fn weekly_board(&self, today: NaiveDate) -> Result<Vec<Standing<WeeklySummary>>> {
        self.board(|entries| aggregate::weekly_summary(entries, today))
    }

    pub fn streaks(&self, today: NaiveDate) -> Result<Vec<UserStreak>> {
        let mut streaks = Vec::with_capacity(self.users.len());
        for user in self.users {
            let entries = self.store.read_all(&user.name)?;
            streaks.push(UserStreak {
                user: user.name.clone(),
                icon: user.icon.clone(),
                streak: aggregate::streak_summary(&entries, today),
            });
        }
        Ok(streaks)
    }

    pub fn series(&self, user: &UserConfig, kind: SeriesKind) -> Result<Vec<SeriesPoint>> {
        let entries = self.store.read_all(&user.name)?;
        Ok(match kind {
            SeriesKind::Daily => series::daily_units(&entries),
            SeriesKind::Weekly => series::weekly_units(&entries),
        })
    }

    fn board<T, F>(&self, summarize: F) -> Result<Vec<Standing<T>>>
    where
        T: aggregate::Scored,
        F: Fn(&[DrinkEntry]) -> T,
    {
        let mut contenders = Vec::with_capacity(self.users.len());
        for user in self.users {
            let entries = self.store.read_all(&user.name)?;
            debug!(user = %user.name, entries = entries.len(), "summarizing");
            contenders.push(Contender {
                user: user.name.clone(),
                icon: user.icon.clone(),
                summary: summarize(&entries),
            });
        }
        Ok(leaderboard::rank(contenders))
    }
}
