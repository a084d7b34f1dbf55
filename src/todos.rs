//! The todo list and its persistence.
//!
//! `TaskList` is an ordered sequence of tasks. Users address entries by their
//! 1-based position; deleting an entry shifts everything after it down by one.
//! The list is loaded once per invocation and stored back after a mutation.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TodoError};
use crate::task::Task;

/// In-memory list of todos, serialized as a bare JSON array.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    /// Load the list from a JSON file.
    ///
    /// A missing or zero-length file yields an empty list. Anything else that
    /// fails to decode is reported as a corrupt store.
    pub fn load(path: &Path) -> Result<Self> {
        let buf = match fs::read(path) {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no todo file yet, starting empty");
                return Ok(TaskList::default());
            }
            Err(e) => return Err(TodoError::io(path, e)),
        };
        if buf.is_empty() {
            debug!(path = %path.display(), "todo file is empty");
            return Ok(TaskList::default());
        }
        let list: TaskList = serde_json::from_slice(&buf).map_err(|source| TodoError::CorruptStore {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), count = list.len(), "loaded todos");
        Ok(list)
    }

    /// Save the list to a JSON file using atomic write (temp file + rename).
    pub fn store(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_vec_pretty(self).map_err(|e| TodoError::io(path, e.into()))?;
        let tmp = tmp_path(path);
        let write = || -> std::io::Result<()> {
            let mut f = File::create(&tmp)?;
            f.write_all(&data)?;
            f.flush()?;
            f.sync_all()?;
            fs::rename(&tmp, path)
        };
        if let Err(e) = write() {
            let _ = fs::remove_file(&tmp);
            return Err(TodoError::io(path, e));
        }
        debug!(path = %path.display(), count = self.len(), "stored todos");
        Ok(())
    }

    /// Append a new pending task.
    pub fn add(&mut self, description: impl Into<String>) {
        let task = Task::new(description);
        debug!(description = %task.description, "adding todo");
        self.tasks.push(task);
    }

    /// Mark the task at 1-based `index` done.
    pub fn complete(&mut self, index: usize) -> Result<()> {
        let pos = self.position(index)?;
        self.tasks[pos].complete();
        debug!(index, "completed todo");
        Ok(())
    }

    /// Remove the task at 1-based `index`, returning it.
    pub fn delete(&mut self, index: usize) -> Result<Task> {
        let pos = self.position(index)?;
        let removed = self.tasks.remove(pos);
        debug!(index, description = %removed.description, "deleted todo");
        Ok(removed)
    }

    /// Number of tasks not yet done.
    pub fn count_pending(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_pending()).count()
    }

    /// Task at 1-based `index`.
    pub fn get(&self, index: usize) -> Option<&Task> {
        index.checked_sub(1).and_then(|pos| self.tasks.get(pos))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Translate a 1-based index into a vector position.
    fn position(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.tasks.len() {
            return Err(TodoError::InvalidIndex {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(index - 1)
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Sibling temp file used while storing, e.g. `.todos.json` -> `.todos.json.tmp`.
fn tmp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn list_of(descriptions: &[&str]) -> TaskList {
        let mut list = TaskList::new();
        for d in descriptions {
            list.add(*d);
        }
        list
    }

    fn descriptions(list: &TaskList) -> Vec<&str> {
        list.iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn add_appends_pending_task() {
        let mut list = list_of(&["first"]);
        list.add("second");
        assert_eq!(list.len(), 2);
        let added = list.get(2).unwrap();
        assert_eq!(added.description, "second");
        assert!(!added.done);
        assert!(added.completed_at.is_none());
    }

    #[test]
    fn complete_marks_done() {
        let mut list = list_of(&["a", "b"]);
        list.complete(2).unwrap();
        let task = list.get(2).unwrap();
        assert!(task.done);
        assert!(task.completed_at.is_some());
        assert!(!list.get(1).unwrap().done);
    }

    #[test]
    fn complete_twice_restamps() {
        let mut list = list_of(&["a"]);
        list.complete(1).unwrap();
        let first = list.get(1).unwrap().completed_at.unwrap();
        list.complete(1).unwrap();
        let second = list.get(1).unwrap().completed_at.unwrap();
        assert!(list.get(1).unwrap().done);
        assert!(second >= first);
    }

    #[test]
    fn complete_out_of_range_is_rejected() {
        let mut list = list_of(&["a", "b", "c"]);
        let before = list.clone();
        for index in [0, 4] {
            let err = list.complete(index).unwrap_err();
            assert!(matches!(err, TodoError::InvalidIndex { index: i, len: 3 } if i == index));
        }
        assert_eq!(list, before);
    }

    #[test]
    fn complete_on_empty_list_is_rejected() {
        let mut list = TaskList::new();
        assert!(matches!(list.complete(1), Err(TodoError::InvalidIndex { index: 1, len: 0 })));
    }

    #[test]
    fn delete_closes_gap() {
        let mut list = list_of(&["Task 1", "Task 2", "Task 3"]);
        let removed = list.delete(2).unwrap();
        assert_eq!(removed.description, "Task 2");
        assert_eq!(descriptions(&list), vec!["Task 1", "Task 3"]);
        assert_eq!(list.get(2).unwrap().description, "Task 3");
    }

    #[test]
    fn delete_out_of_range_is_rejected() {
        let mut list = list_of(&["a", "b"]);
        let before = list.clone();
        assert!(matches!(list.delete(0), Err(TodoError::InvalidIndex { .. })));
        assert!(matches!(list.delete(3), Err(TodoError::InvalidIndex { .. })));
        assert_eq!(list, before);
    }

    #[test]
    fn count_pending_tracks_completion() {
        let mut list = TaskList::new();
        assert_eq!(list.count_pending(), 0);
        list = list_of(&["a", "b", "c"]);
        assert_eq!(list.count_pending(), 3);
        for i in 1..=3 {
            list.complete(i).unwrap();
        }
        assert_eq!(list.count_pending(), 0);
    }

    #[test]
    fn milk_and_spec_scenario() {
        let mut list = TaskList::new();
        list.add("buy milk");
        list.add("write spec");
        list.complete(1).unwrap();

        assert_eq!(descriptions(&list), vec!["buy milk", "write spec"]);
        assert!(list.get(1).unwrap().done);
        assert!(!list.get(2).unwrap().done);
        assert_eq!(list.count_pending(), 1);
    }

    #[test]
    fn get_uses_one_based_positions() {
        let list = list_of(&["a"]);
        assert!(list.get(0).is_none());
        assert_eq!(list.get(1).unwrap().description, "a");
        assert!(list.get(2).is_none());
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let list = TaskList::load(&dir.path().join("absent.json")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn load_empty_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".todos.json");
        fs::write(&path, b"").unwrap();
        assert!(TaskList::load(&path).unwrap().is_empty());
    }

    #[test]
    fn load_garbage_is_corrupt_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".todos.json");
        fs::write(&path, b"{not json").unwrap();
        let err = TaskList::load(&path).unwrap_err();
        assert!(matches!(err, TodoError::CorruptStore { .. }));
        assert!(err.to_string().contains(".todos.json"));
    }

    #[test]
    fn load_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = TaskList::load(dir.path()).unwrap_err();
        assert!(matches!(err, TodoError::Io { .. }));
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".todos.json");

        let mut list = list_of(&["Task 1", "Task 2", "Task 3", "Task 4"]);
        list.complete(2).unwrap();
        list.delete(3).unwrap();
        list.store(&path).unwrap();

        let loaded = TaskList::load(&path).unwrap();
        assert_eq!(loaded, list);
        assert_eq!(loaded.count_pending(), 2);
    }

    #[test]
    fn store_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".todos.json");

        list_of(&["a", "b", "c"]).store(&path).unwrap();
        list_of(&["only"]).store(&path).unwrap();

        let loaded = TaskList::load(&path).unwrap();
        assert_eq!(descriptions(&loaded), vec!["only"]);
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn store_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join(".todos.json");
        let err = list_of(&["a"]).store(&path).unwrap_err();
        assert!(matches!(err, TodoError::Io { .. }));
    }

    #[test]
    fn loads_legacy_pascal_case_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".todos.json");
        let raw = r#"[{"Task":"buy milk","Done":true,"CreatedAt":"2024-05-01T08:00:00.5+02:00","CompletedAt":"2024-05-01T09:30:00+02:00"},{"Task":"write spec","Done":false,"CreatedAt":"2024-05-01T08:01:00+02:00","CompletedAt":"0001-01-01T00:00:00Z"}]"#;
        fs::write(&path, raw).unwrap();

        let list = TaskList::load(&path).unwrap();
        assert_eq!(descriptions(&list), vec!["buy milk", "write spec"]);
        assert!(list.get(1).unwrap().completed_at.is_some());
        assert!(list.get(2).unwrap().completed_at.is_none());
        assert_eq!(list.count_pending(), 1);
    }

    #[test]
    fn tmp_path_keeps_full_name() {
        assert_eq!(tmp_path(Path::new("dir/.todos.json")), Path::new("dir/.todos.json.tmp"));
    }
}
