use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

/// Default store, relative to the working directory.
pub const DEFAULT_TODO_FILE: &str = ".todos.json";

/// Long flags that take a separate value (`-complete 3`).
const VALUE_FLAGS: [&str; 4] = ["complete", "delete", "db", "completions"];
const SWITCH_FLAGS: [&str; 4] = ["add", "list", "help", "version"];

/// File-backed todo list.
/// Storage defaults to ./.todos.json or a path passed via --db.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Keep a small todo list in a local file")]
pub struct Cli {
    /// Add a new todo. Text comes from the trailing arguments or one line of stdin.
    #[arg(long)]
    pub add: bool,

    /// Mark todo N done.
    #[arg(long, value_name = "N")]
    pub complete: Option<usize>,

    /// Delete todo N.
    #[arg(long, value_name = "N")]
    pub delete: Option<usize>,

    /// List all todos.
    #[arg(long)]
    pub list: bool,

    /// Path to the JSON todo file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_TODO_FILE)]
    pub db: PathBuf,

    /// Print a shell completion script and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Todo text for --add.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

/// The single thing an invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Complete(usize),
    Delete(usize),
    List,
    Completions(Shell),
}

impl Cli {
    /// Parse from the process arguments, accepting `-flag` as well as `--flag`.
    pub fn parse_args() -> Self {
        Cli::parse_from(normalise_args(std::env::args_os()))
    }

    /// Resolve the flags to one action; add wins over complete, delete, then list.
    pub fn action(&self) -> Option<Action> {
        if let Some(shell) = self.completions {
            Some(Action::Completions(shell))
        } else if self.add {
            Some(Action::Add)
        } else if let Some(n) = self.complete {
            Some(Action::Complete(n))
        } else if let Some(n) = self.delete {
            Some(Action::Delete(n))
        } else if self.list {
            Some(Action::List)
        } else {
            None
        }
    }
}

/// Rewrite single-dash long flags (`-add`, `-complete=3`) to their `--` form.
///
/// Stops at `--` or the first positional argument, so todo text such as
/// `-add call -bob` keeps its words untouched.
pub fn normalise_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut iter = args.into_iter().map(Into::into);
    if let Some(bin) = iter.next() {
        out.push(bin);
    }

    let mut expect_value = false;
    let mut rewriting = true;
    for arg in iter {
        if !rewriting || expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }
        let Some(s) = arg.to_str() else {
            rewriting = false;
            out.push(arg);
            continue;
        };
        if s == "--" {
            rewriting = false;
            out.push(arg);
            continue;
        }
        let name = s.trim_start_matches('-');
        let dashes = s.len() - name.len();
        let (flag, inline_value) = match name.split_once('=') {
            Some((flag, _)) => (flag, true),
            None => (name, false),
        };
        let known = VALUE_FLAGS.contains(&flag) || SWITCH_FLAGS.contains(&flag);
        if !(1..=2).contains(&dashes) || !known {
            // First positional (or unknown flag): leave the rest to clap.
            rewriting = dashes > 0;
            out.push(arg);
            continue;
        }
        expect_value = VALUE_FLAGS.contains(&flag) && !inline_value;
        out.push(OsString::from(format!("--{name}")));
    }
    out
}
