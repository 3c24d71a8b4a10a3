use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Keyboard-driven todo list for the terminal.
/// Tasks are stored in the JSON file named by `dataLocation` in
/// ~/.config/togo/config.json, or ./data.json if that is not set.
#[derive(Parser)]
#[command(name = "togo", version, about = "Terminal todo list")]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the JSON data file, overriding the configuration.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Path to the log file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log debug detail, including every change and save.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `ui`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["togo"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.data.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["togo", "list", "--data", "/tmp/t.json", "-v"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/t.json")));
        assert!(cli.verbose);
    }
}
