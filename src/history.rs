//! Undo descriptors and the LIFO history that holds them.

use std::fmt;

use chrono::{DateTime, Local};

use crate::types::{Personnel, Service, Task};

/// One past mutation and the data needed to reverse it.
///
/// Every payload is an owned copy taken when the mutation happened, so later
/// edits to live collections cannot reach into history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    PersonnelAdded { record: Personnel, index: usize },
    PersonnelRemoved { record: Personnel, index: usize },
    /// Order of the sequence before it was sorted.
    PersonnelReordered { before: Vec<Personnel> },
    TaskAdded { task: Task },
    TaskServed { task: Task },
    ServiceAdded { service: Service, index: usize },
    ServiceRemoved { service: Service, index: usize },
    ServiceEdited { before: Service, after: Service },
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::PersonnelAdded { .. } => "ADD_PERSONNEL",
            Action::PersonnelRemoved { .. } => "REMOVE_PERSONNEL",
            Action::PersonnelReordered { .. } => "SORT_PERSONNEL",
            Action::TaskAdded { .. } => "ADD_TASK",
            Action::TaskServed { .. } => "SERVE_TASK",
            Action::ServiceAdded { .. } => "ADD_SERVICE",
            Action::ServiceRemoved { .. } => "REMOVE_SERVICE",
            Action::ServiceEdited { .. } => "EDIT_SERVICE",
        }
    }
}

/// An action as it sits in history: what happened, a label, and when.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub action: Action,
    pub label: String,
    pub recorded_at: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(action: Action, label: impl Into<String>) -> Self {
        Self {
            action,
            label: label.into(),
            recorded_at: Local::now(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            self.action.kind(),
            self.label
        )
    }
}

/// LIFO stack of history entries. Optionally bounded; the oldest entry is
/// evicted when a push would exceed the limit.
pub struct ActionHistory {
    entries: Vec<HistoryEntry>,
    limit: Option<usize>,
}

impl ActionHistory {
    /// Unbounded history.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            limit: None,
        }
    }

    /// History that keeps at most `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: Some(limit.max(1)),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if let Some(limit) = self.limit {
            if self.entries.len() >= limit {
                let overflow = self.entries.len() + 1 - limit;
                self.entries.drain(0..overflow);
            }
        }
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter().rev()
    }
}

impl Default for ActionHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskPriority;

    fn served(id: &str) -> HistoryEntry {
        let task = Task::new(id, "desk", "served", TaskPriority::Medium);
        HistoryEntry::new(Action::TaskServed { task }, format!("Served task {id}"))
    }

    #[test]
    fn pops_in_reverse_push_order() {
        let mut history = ActionHistory::new();
        assert!(history.pop().is_none());
        history.push(served("T1"));
        history.push(served("T2"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.peek().map(|e| e.label.as_str()), Some("Served task T2"));
        assert_eq!(history.pop().map(|e| e.label), Some("Served task T2".to_string()));
        assert_eq!(history.pop().map(|e| e.label), Some("Served task T1".to_string()));
        assert!(history.is_empty());
    }

    #[test]
    fn entries_list_most_recent_first() {
        let mut history = ActionHistory::new();
        for id in ["T1", "T2", "T3"] {
            history.push(served(id));
        }
        let labels: Vec<_> = history.entries().map(|e| e.label.clone()).collect();
        assert_eq!(labels, ["Served task T3", "Served task T2", "Served task T1"]);
        history.clear();
        assert_eq!(history.entries().count(), 0);
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut history = ActionHistory::with_limit(2);
        for id in ["T1", "T2", "T3"] {
            history.push(served(id));
        }
        assert_eq!(history.len(), 2);
        let labels: Vec<_> = history.entries().map(|e| e.label.clone()).collect();
        assert_eq!(labels, ["Served task T3", "Served task T2"]);
    }

    #[test]
    fn display_includes_kind_and_label() {
        let entry = served("T9");
        let rendered = entry.to_string();
        assert!(rendered.contains("| SERVE_TASK | Served task T9"), "{rendered}");
    }
}
