//! Command implementations for the CLI interface.
//!
//! Each handler performs at most one mutation and stores the list afterwards.
//! A failed mutation returns before anything is written back.

use std::io::{BufRead, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::cli::{Action, Cli};
use crate::error::{Result, TodoError};
use crate::presenter::render_table;
use crate::todos::TaskList;

/// Run one invocation against `input`/`out`.
pub fn run<R: BufRead, W: Write>(cli: &Cli, input: &mut R, out: &mut W, use_color: bool) -> Result<()> {
    let Some(action) = cli.action() else {
        writeln!(out, "invalid command").map_err(TodoError::stdout)?;
        return Ok(());
    };
    debug!(?action, db = %cli.db.display(), "dispatching");

    match action {
        Action::Completions(shell) => cmd_completions(shell, out),
        Action::Add => {
            let mut todos = TaskList::load(&cli.db)?;
            let description = read_description(&cli.text, input)?;
            cmd_add(&mut todos, &cli.db, description)
        }
        Action::Complete(index) => cmd_complete(&mut TaskList::load(&cli.db)?, &cli.db, index),
        Action::Delete(index) => cmd_delete(&mut TaskList::load(&cli.db)?, &cli.db, index),
        Action::List => cmd_list(&TaskList::load(&cli.db)?, out, use_color),
    }
}

/// Add a new todo and store the list.
pub fn cmd_add(todos: &mut TaskList, db_path: &Path, description: String) -> Result<()> {
    todos.add(description);
    todos.store(db_path)
}

/// Mark todo `index` done and store the list.
pub fn cmd_complete(todos: &mut TaskList, db_path: &Path, index: usize) -> Result<()> {
    todos.complete(index)?;
    todos.store(db_path)
}

/// Delete todo `index` and store the list.
pub fn cmd_delete(todos: &mut TaskList, db_path: &Path, index: usize) -> Result<()> {
    todos.delete(index)?;
    todos.store(db_path)
}

/// Print the todo table.
pub fn cmd_list<W: Write>(todos: &TaskList, out: &mut W, use_color: bool) -> Result<()> {
    out.write_all(render_table(todos, use_color).as_bytes())
        .map_err(TodoError::stdout)
}

/// Generate shell completion scripts.
pub fn cmd_completions<W: Write>(shell: Shell, out: &mut W) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "todo", out);
    Ok(())
}

/// Todo text from the trailing arguments, or else one line of `input`.
pub fn read_description<R: BufRead>(args: &[String], input: &mut R) -> Result<String> {
    let text = if !args.is_empty() {
        args.join(" ")
    } else {
        let mut line = String::new();
        input.read_line(&mut line).map_err(TodoError::stdin)?;
        line.trim_end_matches(['\r', '\n']).to_string()
    };
    if text.trim().is_empty() {
        return Err(TodoError::EmptyInput);
    }
    Ok(text)
}
