//! # ToGo - terminal todo list
//!
//! A small, keyboard-driven task list that lives in the terminal. Tasks are a
//! description and a done flag; the list is saved to a JSON file after every
//! change.
//!
//! ## Keys
//!
//! - `i` - write a new task (added at the top), `enter` to save it
//! - `c` - edit the selected task, `enter` to save it
//! - `enter` - mark the selected task done (it sinks to the bottom) or open
//!   again (it rises to the top)
//! - `d` - delete the selected task
//! - `↑/k`, `↓/j`, `pgup`, `pgdown`, `g`, `G` - move around
//! - `q` - quit
//!
//! ## Files
//!
//! - `~/.config/togo/config.json` - `{"config": {"dataLocation": "..."}}`
//! - data file, `./data.json` by default - `{"list": [{"Desc": "...", "Done": false}]}`
//! - `~/.config/togo/togo.log` - log output

use std::fs::{self, File};
use std::path::PathBuf;

use clap::Parser;
use log::info;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod error;
pub mod list;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::{config_dir, Config};
use db::JsonStore;

/// Route log output to a file; the TUI owns the terminal. Logging is skipped
/// if the file cannot be created.
fn init_logging(log_file: Option<PathBuf>, verbose: bool) {
    let path = log_file.unwrap_or_else(|| match config_dir() {
        Some(dir) if fs::create_dir_all(&dir).is_ok() => dir.join("togo.log"),
        _ => PathBuf::from("togo.log"),
    });
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(level, log_config, file);
    }
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Ui);

    if let Commands::Completions { shell } = command {
        cmd_completions(shell);
        return;
    }

    init_logging(cli.log_file, cli.verbose);
    info!("togo {} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match cli.config {
        Some(path) => Config::load(&path),
        None => Config::load_default(),
    };
    if let Some(data) = cli.data {
        config.data_location = data;
    }
    let store = JsonStore::new(config.data_location);
    info!("Using data file {}", store.path().display());

    let result = match command {
        Commands::Ui => cmd_ui(store),
        Commands::List => cmd_list(&store),
        Commands::Completions { .. } => unreachable!("completions handled above"),
    };

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("togo: {e}");
        std::process::exit(1);
    }
}
