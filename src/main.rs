mod cli;
mod config;
mod core;
mod store;
mod utils;

use crate::cli::{BoardSubcommand, ChartSubcommand, Cli, Commands, CommonArgs};
use crate::config::LoadedConfig;
use crate::core::audit::{AuditAnswers, screen};
use crate::core::entry::DrinkEntry;
use crate::core::report;
use crate::core::{SeriesKind, Tracker};
use crate::store::csv_file::CsvStore;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::debug;

fn main() {
    utils::logging::init();

    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
        Commands::Log(args) => {
            let session = Session::open(&args.common)?;
            let user = session.loaded.config.user(&args.user)?.clone();
            let entry = DrinkEntry::drink(
                day_or_today(args.date),
                args.drink_type,
                args.volume,
                args.abv,
            )?;
            let mut store = session.store();
            let entry = Tracker::new(&mut store, &session.loaded.config).log_drink(&user, entry)?;
            print_logged(&session, &store, &user.name, &entry)?;
            Ok(0)
        }
        Commands::Sober(args) => {
            let session = Session::open(&args.common)?;
            let user = session.loaded.config.user(&args.user)?.clone();
            let mut store = session.store();
            let entry = Tracker::new(&mut store, &session.loaded.config)
                .log_sober_day(&user, day_or_today(args.date))?;
            print_logged(&session, &store, &user.name, &entry)?;
            Ok(0)
        }
        Commands::Board { command } => match command {
            BoardSubcommand::Daily(args) => {
                let session = Session::open(&args.common)?;
                let today = day_or_today(args.date);
                let mut store = session.store();
                let board =
                    Tracker::new(&mut store, &session.loaded.config).daily_board(today)?;
                if session.json {
                    let json = report::JsonBoard {
                        kind: "daily",
                        date: today,
                        standings: &board,
                    };
                    println!("{}", serde_json::to_string_pretty(&json)?);
                } else {
                    report::print_daily_board(today, &board);
                }
                Ok(0)
            }
            BoardSubcommand::Weekly(args) => {
                let session = Session::open(&args.common)?;
                let today = day_or_today(args.date);
                let mut store = session.store();
                let board =
                    Tracker::new(&mut store, &session.loaded.config).weekly_board(today)?;
                if session.json {
                    let json = report::JsonBoard {
                        kind: "weekly",
                        date: today,
                        standings: &board,
                    };
                    println!("{}", serde_json::to_string_pretty(&json)?);
                } else {
                    report::print_weekly_board(today, &board);
                }
                Ok(0)
            }
        },
        Commands::Streak(args) => {
            let session = Session::open(&args.common)?;
            let today = day_or_today(args.date);
            let mut store = session.store();
            let streaks = Tracker::new(&mut store, &session.loaded.config).streaks(today)?;
            if session.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report::json_streaks(&streaks))?
                );
            } else {
                report::print_streaks(today, &streaks);
            }
            Ok(0)
        }
        Commands::Audit(args) => {
            let answers = AuditAnswers {
                frequency: args.frequency,
                quantity: args.quantity,
                six_plus_frequency: args.binge,
            };
            let result = screen(answers);
            if args.common.json {
                let json = report::JsonAudit::new(answers, result);
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                report::print_audit(answers, result);
            }
            Ok(0)
        }
        Commands::Chart { command } => {
            let (args, kind, title) = match command {
                ChartSubcommand::Daily(args) => (args, SeriesKind::Daily, "Daily Units"),
                ChartSubcommand::Weekly(args) => (args, SeriesKind::Weekly, "Weekly Units"),
            };
            let session = Session::open(&args.common)?;
            let user = session.loaded.config.user(&args.user)?.clone();
            let mut store = session.store();
            let points = Tracker::new(&mut store, &session.loaded.config).series(&user, kind)?;
            if session.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                report::print_series(&user.name, title, &points);
            }
            Ok(0)
        }
        Commands::History(args) => {
            let session = Session::open(&args.common)?;
            let user = session.loaded.config.user(&args.user)?.clone();
            let mut store = session.store();
            let entries = Tracker::new(&mut store, &session.loaded.config).history(&user)?;
            if session.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                report::print_history(&user.name, &entries);
            }
            Ok(0)
        }
    }
}

/// Config, data directory and output mode shared by every data command.
struct Session {
    loaded: LoadedConfig,
    cwd: PathBuf,
    data_dir: PathBuf,
    json: bool,
}

impl Session {
    fn open(common: &CommonArgs) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let loaded = config::load_config(common.config.as_deref(), &cwd)?;
        let data_dir = loaded.config.data_dir(config_base(&loaded, &cwd));
        debug!(data_dir = %data_dir.display(), source = ?loaded.source, "session opened");

        Ok(Self {
            json: common.json || loaded.config.general.json,
            loaded,
            cwd,
            data_dir,
        })
    }

    fn store(&self) -> CsvStore {
        CsvStore::new(&self.data_dir)
    }
}

/// Relative data directories resolve against the config file's directory.
fn config_base<'a>(loaded: &'a LoadedConfig, cwd: &'a Path) -> &'a Path {
    loaded
        .source
        .as_deref()
        .and_then(Path::parent)
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(cwd)
}

fn day_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

fn print_logged(
    session: &Session,
    store: &CsvStore,
    user: &str,
    entry: &DrinkEntry,
) -> Result<()> {
    if session.json {
        println!("{}", serde_json::to_string_pretty(entry)?);
    } else {
        let location = utils::fs::display_path(&session.cwd, &store.path_for(user));
        report::print_logged(user, entry, &location);
    }
    Ok(())
}
