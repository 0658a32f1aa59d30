use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::history::{WeekStart, MAX_TRAILING_DAYS};

#[derive(Parser)]
#[command(name = "pomotally")]
#[command(about = "A Pomodoro timer that keeps a daily tally of finished work sessions")]
#[command(long_about = "pomotally - a Pomodoro timer for the terminal

Runs 25-minute work sessions separated by short breaks, with a long break
after every fourth work session. Each finished work session is counted
for the day it ended, and the counts are charted by week.

QUICK START:
  pomotally                   Open the timer
  pomotally history           Chart this week's finished sessions
  pomotally settings set --work 50m
                              Change the work session length

KEYS (timer):
  space  start/pause     r  reset     s  skip (press twice)
  c      toggle chart    v  week/trailing view     q  quit")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding config.yaml and the history database
    #[arg(long, global = true, env = "POMOTALLY_HOME")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive timer (default)
    Run,

    /// Show finished work sessions per day
    ///
    /// Shows the calendar week containing the date by default, or the
    /// trailing days ending at the date with --trailing.
    ///
    /// Examples:
    ///   pomotally history
    ///   pomotally history --week-start monday
    ///   pomotally history --trailing 14
    ///   pomotally history --date 2024-03-13 --output json
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Show or change session lengths
    Settings(SettingsArgs),

    /// Generate shell completions
    ///
    /// Examples:
    ///   pomotally completions zsh > ~/.zfunc/_pomotally
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long, short = 'd')]
    pub date: Option<NaiveDate>,

    /// Show this many days ending at the date instead of the calendar week
    #[arg(
        long,
        short = 't',
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_TRAILING_DAYS))
    )]
    pub trailing: Option<u32>,

    /// First day of the week
    #[arg(long, short = 'w', value_enum)]
    pub week_start: Option<WeekStart>,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current settings
    Show,

    /// Change one or more settings
    ///
    /// Durations accept minutes ("25"), or units ("50m", "1h30m").
    ///
    /// Examples:
    ///   pomotally settings set --work 50m --short 10
    ///   pomotally settings set --show-chart true
    Set {
        /// Work session length
        #[arg(long)]
        work: Option<String>,

        /// Short break length
        #[arg(long)]
        short: Option<String>,

        /// Long break length
        #[arg(long)]
        long: Option<String>,

        /// Show the history chart in the timer
        #[arg(long)]
        show_chart: Option<bool>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_no_subcommand() {
        let cli = Cli::try_parse_from(["pomotally"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_history_args() {
        let cli = Cli::try_parse_from([
            "pomotally",
            "history",
            "--date",
            "2024-03-13",
            "--week-start",
            "monday",
            "-o",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Json));
        let Some(Commands::History(args)) = cli.command else {
            panic!("Expected History command");
        };
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 3, 13));
        assert_eq!(args.week_start, Some(WeekStart::Monday));
        assert!(args.trailing.is_none());
    }

    #[test]
    fn test_cli_settings_set() {
        let cli = Cli::try_parse_from([
            "pomotally",
            "settings",
            "set",
            "--work",
            "50m",
            "--show-chart",
            "true",
        ])
        .unwrap();

        let Some(Commands::Settings(args)) = cli.command else {
            panic!("Expected Settings command");
        };
        let SettingsCommands::Set {
            work, show_chart, short, ..
        } = args.command
        else {
            panic!("Expected Set subcommand");
        };
        assert_eq!(work.as_deref(), Some("50m"));
        assert_eq!(show_chart, Some(true));
        assert!(short.is_none());
    }

    #[test]
    fn test_cli_data_dir() {
        let cli = Cli::try_parse_from(["pomotally", "--data-dir", "/tmp/pomo", "run"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pomo")));
        assert!(matches!(cli.command, Some(Commands::Run)));
    }

    #[test]
    fn test_cli_trailing_range() {
        let parse = |days: &str| Cli::try_parse_from(["pomotally", "history", "--trailing", days]);

        assert!(parse("0").is_err());
        assert!(parse("367").is_err());
        assert!(parse("4000000000").is_err());

        let Some(Commands::History(args)) = parse("366").unwrap().command else {
            panic!("Expected History command");
        };
        assert_eq!(args.trailing, Some(366));
    }
}
