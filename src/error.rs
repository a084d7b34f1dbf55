//! Error type shared by the task list and the command layer.

use std::io;
use std::path::Path;

use thiserror::Error;

/// Everything that can make a single invocation fail.
#[derive(Debug, Error)]
pub enum TodoError {
    /// A 1-based index outside `1..=len`.
    #[error("invalid index {index}: the list has {len} todo(s)")]
    InvalidIndex { index: usize, len: usize },

    #[error("empty todo is not allowed")]
    EmptyInput,

    /// The store file exists and is non-empty but is not a valid todo list.
    #[error("corrupt todo file '{path}': {source}")]
    CorruptStore {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: io::Error,
    },
}

impl TodoError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        TodoError::Io {
            target: format!("'{}'", path.display()),
            source,
        }
    }

    pub fn stdin(source: io::Error) -> Self {
        TodoError::Io {
            target: "standard input".into(),
            source,
        }
    }

    pub fn stdout(source: io::Error) -> Self {
        TodoError::Io {
            target: "standard output".into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
