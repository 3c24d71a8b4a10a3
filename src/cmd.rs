//! Command implementations for the CLI interface.

use std::io::{self, Write};

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::db::Store;
use crate::error::{Error, Result};
use crate::list::TaskList;
use crate::tui::{app::App, run::run_tui};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive task list (the default).
    Ui,

    /// Print the tasks without entering the interactive UI.
    List,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface on the list held by `store`.
pub fn cmd_ui<S: Store>(store: S) -> Result<()> {
    let app = App::new(store)?;
    run_tui(app)
}

/// Print every task as `[ ] description` or `[x] description`, in list order.
pub fn cmd_list<S: Store>(store: &S) -> Result<()> {
    let list = store.load()?;
    print_list(&mut io::stdout().lock(), &list)
}

/// Write the list to `out`. A reader that goes away early (`togo list | head`)
/// is not an error.
fn print_list(out: &mut impl Write, list: &TaskList) -> Result<()> {
    match write_list(out, list) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result.map_err(Error::Output),
    }
}

fn write_list(out: &mut impl Write, list: &TaskList) -> io::Result<()> {
    for task in list {
        writeln!(out, "{} {}", task.marker(), task.description)?;
    }
    out.flush()
}

/// Generate shell completions for the given shell.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "togo", &mut io::stdout());
}
