use crate::core::audit::{Frequency, Quantity};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "soberscore",
    version,
    about = "Drink log with daily and weekly sobriety scores for a small group",
    after_help = crate::core::report::SCORING_RULES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default soberscore.toml in the current directory
    Init,
    /// Log a drink
    Log(LogArgs),
    /// Log a day without alcohol
    Sober(SoberArgs),
    /// Show a leaderboard
    Board {
        #[command(subcommand)]
        command: BoardSubcommand,
    },
    /// Show current and longest dry-day streaks
    Streak(DatedArgs),
    /// Score the three AUDIT-C screening questions
    Audit(AuditArgs),
    /// Show unit totals per day or per week for one user
    Chart {
        #[command(subcommand)]
        command: ChartSubcommand,
    },
    /// List a user's logged entries
    History(UserArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct UserArgs {
    #[arg(long, short)]
    pub user: String,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct DatedArgs {
    /// Reference day, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct LogArgs {
    #[arg(long, short)]
    pub user: String,
    /// Beer, Wine, etc.
    #[arg(long = "drink-type", short = 't', default_value = "")]
    pub drink_type: String,
    /// Volume in ml
    #[arg(long, allow_negative_numbers = true)]
    pub volume: f64,
    /// Alcohol by volume, percent
    #[arg(long, allow_negative_numbers = true)]
    pub abv: f64,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct SoberArgs {
    #[arg(long, short)]
    pub user: String,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args, Clone)]
pub struct AuditArgs {
    /// How often do you have a drink containing alcohol? (Never, Monthly, Weekly, Daily)
    #[arg(long)]
    pub frequency: Frequency,
    /// Drinks on a typical drinking day (1–2, 3–4, 5–6, 7+)
    #[arg(long)]
    pub quantity: Quantity,
    /// How often do you have six or more drinks on one occasion?
    #[arg(long)]
    pub binge: Frequency,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum BoardSubcommand {
    Daily(DatedArgs),
    Weekly(DatedArgs),
}

#[derive(Debug, Subcommand)]
pub enum ChartSubcommand {
    Daily(UserArgs),
    Weekly(UserArgs),
}
