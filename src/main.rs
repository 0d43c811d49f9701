mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::grid::WeekStart;
use calgrid_core::view::CalendarView;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::Context;
use commands::config::ConfigChanges;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Month and week calendar grids for your events, in the terminal")]
struct Cli {
    /// JSON file with the events to show (defaults to `events_file` from config)
    #[arg(short, long, global = true)]
    events: Option<PathBuf>,

    /// First day of the week: "sunday" or "monday"
    #[arg(long, global = true, value_parser = parse_week_start)]
    week_start: Option<WeekStart>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid
    Month {
        /// Any day in the month (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show the week time grid
    Week {
        /// Any day in the week (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,

        /// Slot length in minutes, must divide 60
        #[arg(short, long)]
        interval: Option<u32>,

        /// Also show slots without events
        #[arg(long)]
        all_slots: bool,
    },
    /// List the events on one day
    Day {
        /// YYYY-MM-DD, default today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Validate every event in the events file
    Check,
    /// Create an event through the event form and print it as JSON
    New {
        title: Option<String>,

        /// Start, e.g. "2025-03-20 15:00"
        #[arg(short, long)]
        start: Option<String>,

        /// End, e.g. "2025-03-20 16:00" (default one hour after start)
        #[arg(long)]
        end: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Display color, e.g. "#10b981"
        #[arg(long)]
        color: Option<String>,

        /// Free-form label, e.g. "meeting"
        #[arg(long)]
        category: Option<String>,
    },
    /// Change an event through the event form and print the update as JSON
    Edit {
        /// Id of the event to change
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        /// New start, e.g. "2025-03-20 15:00"
        #[arg(short, long)]
        start: Option<String>,

        /// New end, e.g. "2025-03-20 16:00"
        #[arg(long)]
        end: Option<String>,

        /// New description, "" to clear
        #[arg(short, long)]
        description: Option<String>,

        /// New display color, "" to clear
        #[arg(long)]
        color: Option<String>,

        /// New category, "" to clear
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete an event and print its id as JSON
    Delete {
        /// Id of the event to delete
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show config paths, creating a default config file if none exists
    Config {
        /// Save the first day of the week: "sunday" or "monday"
        #[arg(long, value_parser = parse_week_start)]
        first_day: Option<WeekStart>,

        /// Save the view shown by default: "month" or "week"
        #[arg(long)]
        view: Option<CalendarView>,

        /// Save the week view slot length in minutes
        #[arg(long)]
        interval: Option<u32>,

        /// Save the events file path
        #[arg(long)]
        events_file: Option<PathBuf>,
    },
}

fn parse_week_start(s: &str) -> Result<WeekStart, String> {
    match s.to_ascii_lowercase().as_str() {
        "sunday" | "sun" => Ok(WeekStart::Sunday),
        "monday" | "mon" => Ok(WeekStart::Monday),
        other => Err(format!("Unknown week start '{}'. Expected 'sunday' or 'monday'", other)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // `calgrid config` manages the config file itself, so load it per command
    let events = cli.events;
    let week_start = cli.week_start;
    let context = || -> Result<Context> {
        Ok(Context::new(CalgridConfig::load()?, events.clone(), week_start))
    };

    match cli.command {
        Commands::Month { date } => commands::month::run(&context()?, date.as_deref()),
        Commands::Week {
            date,
            interval,
            all_slots,
        } => commands::week::run(&context()?, date.as_deref(), interval, all_slots),
        Commands::Day { date } => commands::day::run(&context()?, date.as_deref()),
        Commands::Check => commands::check::run(&context()?),
        Commands::New {
            title,
            start,
            end,
            description,
            color,
            category,
        } => commands::new::run(
            &context()?,
            commands::new::NewArgs {
                title,
                start,
                end,
                description,
                color,
                category,
            },
        ),
        Commands::Edit {
            id,
            title,
            start,
            end,
            description,
            color,
            category,
        } => commands::edit::run(
            &context()?,
            commands::edit::EditArgs {
                id,
                title,
                start,
                end,
                description,
                color,
                category,
            },
        ),
        Commands::Delete { id, force } => commands::delete::run(&context()?, &id, force),
        Commands::Config {
            first_day,
            view,
            interval,
            events_file,
        } => commands::config::run(ConfigChanges {
            week_start: first_day,
            default_view: view,
            slot_interval_minutes: interval,
            events_file,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_start_flag_accepts_short_names() {
        assert_eq!(parse_week_start("Mon"), Ok(WeekStart::Monday));
        assert_eq!(parse_week_start("sunday"), Ok(WeekStart::Sunday));
        assert!(parse_week_start("friday").is_err());
    }

    #[test]
    fn cli_parses_week_command() {
        let cli = Cli::try_parse_from([
            "calgrid",
            "week",
            "--date",
            "2024-01-15",
            "--interval",
            "30",
            "--week-start",
            "monday",
        ])
        .unwrap();

        assert_eq!(cli.week_start, Some(WeekStart::Monday));
        assert!(matches!(
            cli.command,
            Commands::Week { interval: Some(30), all_slots: false, .. }
        ));
    }

    #[test]
    fn cli_parses_edit_and_delete() {
        let cli = Cli::try_parse_from(["calgrid", "edit", "e1", "--title", "Retro", "--description", ""]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Edit { ref id, title: Some(ref t), description: Some(ref d), start: None, .. }
                if id == "e1" && t == "Retro" && d.is_empty()
        ));

        let cli = Cli::try_parse_from(["calgrid", "delete", "e1", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { ref id, force: true } if id == "e1"));
    }

    #[test]
    fn cli_parses_config_settings() {
        let cli = Cli::try_parse_from(["calgrid", "config", "--first-day", "mon", "--view", "week"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                first_day: Some(WeekStart::Monday),
                view: Some(CalendarView::Week),
                interval: None,
                events_file: None,
            }
        ));
    }
}
