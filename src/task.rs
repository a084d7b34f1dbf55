//! Task data structure and its on-disk encoding.
//!
//! Field names use the PascalCase keys of the legacy store format so that
//! existing `.todos.json` files keep loading. An unset completion time is written
//! as the zero timestamp `0001-01-01T00:00:00Z` for the same reason.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single todo entry.
///
/// `done` and `completed_at` move together: a task is done exactly when it has
/// a completion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "Task")]
    pub description: String,
    #[serde(rename = "Done")]
    pub done: bool,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Local>,
    #[serde(rename = "CompletedAt", default, with = "zero_time")]
    pub completed_at: Option<DateTime<Local>>,
}

impl Task {
    /// A fresh pending task stamped with the current time.
    pub fn new(description: impl Into<String>) -> Self {
        Task {
            description: description.into(),
            done: false,
            created_at: Local::now(),
            completed_at: None,
        }
    }

    /// Mark done and (re)stamp the completion time.
    pub fn complete(&mut self) {
        self.done = true;
        self.completed_at = Some(Local::now());
    }

    pub fn is_pending(&self) -> bool {
        !self.done
    }
}

/// `Option<DateTime<Local>>` stored as an RFC 3339 string, with `None` as the zero time.
mod zero_time {
    use chrono::{DateTime, Local};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

    pub fn serialize<S>(value: &Option<DateTime<Local>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_str(ZERO_TIME),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") | Some(ZERO_TIME) => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(s)
                .map(|ts| Some(ts.with_timezone(&Local)))
                .map_err(D::Error::custom),
        }
    }
}
