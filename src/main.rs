//! # todo - file-backed todo list CLI
//!
//! Add, complete, delete and list short text todos. The list lives in a JSON
//! file (`.todos.json` in the working directory unless `--db` says otherwise)
//! and is loaded, changed and written back once per invocation.
//!
//! ## Quick Start
//!
//! ```bash
//! todo -add buy milk
//! echo "write spec" | todo -add
//! todo -complete 1
//! todo -delete 2
//! todo -list
//! ```
//!
//! Flags work with one or two dashes. Errors are printed on a single line to
//! stderr with exit status 1. Set `TODO_DEBUG=1` to see diagnostic logs.

use std::io::{self, IsTerminal};

pub mod cli;
pub mod cmd;
pub mod colors;
pub mod error;
pub mod presenter;
pub mod task;
pub mod todos;

use cli::Cli;

fn main() {
    if std::env::var("TODO_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("todo=debug")
            .with_writer(io::stderr)
            .init();
    }

    let cli = Cli::parse_args();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let use_color = stdout.is_terminal();
    let mut out = stdout.lock();

    if let Err(e) = cmd::run(&cli, &mut input, &mut out, use_color) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
