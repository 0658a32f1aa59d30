use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use log::{debug, LevelFilter};

use pomotally::cli::args::{Cli, Commands};
use pomotally::cli::commands;
use pomotally::config::{Config, Paths};

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_env("POMOTALLY_LOG")
        .init();

    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = Paths::resolve(cli.data_dir)?;
    let config = Config::load(&paths)
        .with_context(|| format!("loading {}", paths.config_file.display()))?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);
    debug!("Data directory: {}", paths.root.display());

    let output = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            pomotally::tui::run(&paths, &config)?;
            String::new()
        }
        Commands::History(args) => {
            let store = commands::open_store(&paths).context("opening history")?;
            commands::history(store, &args, &config.history, format)?
        }
        Commands::Settings(args) => {
            let store = commands::open_store(&paths).context("opening settings")?;
            commands::settings(store, args.command, format)?
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pomotally", &mut io::stdout());
            String::new()
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
