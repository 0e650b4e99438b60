//! Task list for the study planner, including AI sub-task splicing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix marking a task as a sub-task of the one above it
pub const SUBTASK_PREFIX: &str = "\u{21b3} ";

/// Maximum sub-tasks inserted per breakdown
pub const MAX_SUBTASKS: usize = 3;

/// One planner entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn is_subtask(&self) -> bool {
        self.text.starts_with(SUBTASK_PREFIX)
    }
}

/// Ordered task list. Sub-tasks sit directly after their parent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Append a new pending task. Blank input is ignored.
    pub fn add(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.tasks.push(Task {
            id: next_task_id(),
            text: text.to_string(),
            completed: false,
        });
        self.tasks.last()
    }

    /// Flip the completed flag of a task by id
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Remove a task by id
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Tasks not yet completed
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }

    /// Insert sub-tasks directly after their parent, capped at
    /// [`MAX_SUBTASKS`]. Returns false when the parent id is unknown.
    pub fn insert_subtasks(&mut self, parent_id: &str, texts: &[String]) -> bool {
        let Some(pos) = self.tasks.iter().position(|t| t.id == parent_id) else {
            return false;
        };
        for (i, text) in texts.iter().take(MAX_SUBTASKS).enumerate() {
            self.tasks.insert(
                pos + 1 + i,
                Task {
                    id: format!("sub-{}-{}", parent_id, i),
                    text: format!("{}{}", SUBTASK_PREFIX, text),
                    completed: false,
                },
            );
        }
        true
    }
}

/// Split a generated breakdown into sub-task lines, stripping any leading
/// list numbering or bullet markers the model produced.
pub fn parse_subtasks(raw: &str) -> Vec<String> {
    let marker = Regex::new(r"^[0-9.\-*)\s]+").unwrap();
    raw.lines()
        .map(|line| marker.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .take(MAX_SUBTASKS)
        .collect()
}

fn next_task_id() -> String {
    // Counter suffix keeps ids unique when tasks are added within the
    // same millisecond.
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", millis, seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_ignores_blank_and_trims() {
        let mut list = TaskList::new();
        assert!(list.add("   ").is_none());
        let task = list.add("  Revise kinematics  ").unwrap();
        assert_eq!(task.text, "Revise kinematics");
        assert!(!task.completed);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut list = TaskList::new();
        list.add("Solve 30 integrals");
        let id = list.get(0).unwrap().id.clone();

        assert!(list.toggle(&id));
        assert!(list.get(0).unwrap().completed);
        assert!(list.toggle(&id));
        assert!(!list.get(0).unwrap().completed);
        assert!(!list.toggle("missing"));

        assert!(list.remove(&id));
        assert!(list.is_empty());
        assert!(!list.remove(&id));
    }

    #[test]
    fn test_subtasks_inserted_after_parent() {
        let mut list = TaskList::new();
        list.add("Learn rotational motion");
        list.add("Another task");
        let parent = list.get(0).unwrap().id.clone();

        let subs = vec!["Read theory".to_string(), "Solve examples".to_string()];
        assert!(list.insert_subtasks(&parent, &subs));

        assert_eq!(list.len(), 4);
        assert_eq!(list.get(1).unwrap().text, "\u{21b3} Read theory");
        assert_eq!(list.get(1).unwrap().id, format!("sub-{}-0", parent));
        assert_eq!(list.get(2).unwrap().text, "\u{21b3} Solve examples");
        assert_eq!(list.get(3).unwrap().text, "Another task");
        assert!(list.get(1).unwrap().is_subtask());
    }

    #[test]
    fn test_subtasks_capped_and_unknown_parent() {
        let mut list = TaskList::new();
        list.add("Parent");
        let parent = list.get(0).unwrap().id.clone();
        let subs: Vec<String> = (0..5).map(|i| format!("step {}", i)).collect();
        assert!(list.insert_subtasks(&parent, &subs));
        assert_eq!(list.len(), 1 + MAX_SUBTASKS);
        assert!(!list.insert_subtasks("missing", &subs));
    }

    #[test]
    fn test_parse_subtasks_strips_numbering() {
        let raw = "1. Read the chapter\n2) Make notes\n- Solve problems\n\n4. Extra line";
        let parsed = parse_subtasks(raw);
        assert_eq!(
            parsed,
            vec!["Read the chapter", "Make notes", "Solve problems"]
        );
    }

    #[test]
    fn test_pending_count() {
        let mut list = TaskList::new();
        list.add("one");
        list.add("two");
        let id = list.get(0).unwrap().id.clone();
        list.toggle(&id);
        assert_eq!(list.pending_count(), 1);
    }
}
