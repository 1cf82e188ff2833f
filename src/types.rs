//! Shared identifiers and record models used across the desk.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use thiserror::Error;

/// Stable identifier of a personnel record.
pub type PersonnelId = String;
/// Stable identifier of a queued task.
pub type TaskId = String;

/// Case-insensitive equality used for every name and id lookup.
pub fn same_name(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Case-insensitive ordering used by the name sorts.
pub fn cmp_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// A person registered in the campus directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Personnel {
    id: PersonnelId,
    pub name: String,
    pub role: String,
    pub department: String,
    pub email: String,
}

impl Personnel {
    pub fn new(
        id: impl Into<PersonnelId>,
        name: impl Into<String>,
        role: impl Into<String>,
        department: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            department: department.into(),
            email: email.into(),
        }
    }

    /// The identifier never changes after construction.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Personnel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} | {} | {}",
            self.name, self.id, self.role, self.department, self.email
        )
    }
}

/// Service level of a queued task. Declaration order is service order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown priority: {0:?} (expected high, medium or low)")]
pub struct UnknownPriority(pub String);

impl TaskPriority {
    /// Lanes in the order they are drained.
    pub const ALL: [TaskPriority; 3] =
        [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low];

    /// Index of this priority's lane.
    pub fn rank(self) -> usize {
        match self {
            TaskPriority::High => 0,
            TaskPriority::Medium => 1,
            TaskPriority::Low => 2,
        }
    }

    /// Lenient resolution for operator input; anything unrecognised is `Low`.
    pub fn from_input(input: &str) -> Self {
        input.parse().unwrap_or(TaskPriority::Low)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::High => "HIGH",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::Low => "LOW",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TaskPriority::ALL
            .into_iter()
            .find(|priority| same_name(priority.as_str(), trimmed))
            .ok_or_else(|| UnknownPriority(trimmed.to_string()))
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A queued request. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    requestor: String,
    description: String,
    priority: TaskPriority,
    created_at: DateTime<Local>,
}

impl Task {
    /// Create a task stamped with the current local time.
    pub fn new(
        id: impl Into<TaskId>,
        requestor: impl Into<String>,
        description: impl Into<String>,
        priority: TaskPriority,
    ) -> Self {
        Self::with_created_at(id, requestor, description, priority, Local::now())
    }

    pub fn with_created_at(
        id: impl Into<TaskId>,
        requestor: impl Into<String>,
        description: impl Into<String>,
        priority: TaskPriority,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id: id.into(),
            requestor: requestor.into(),
            description: description.into(),
            priority,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn requestor(&self) -> &str {
        &self.requestor
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | {} | {} | {}",
            self.id,
            self.requestor,
            self.description,
            self.priority,
            self.created_at.format("%Y-%m-%d %H:%M")
        )
    }
}

/// A catalog entry, keyed by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub description: String,
    pub category: String,
    pub active: bool,
}

impl Service {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        active: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            active,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.active { "ACTIVE" } else { "INACTIVE" }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.name,
            self.category,
            self.description,
            self.status_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_helpers_ignore_case() {
        assert!(same_name("Alice", "aLICE"));
        assert!(!same_name("Alice", "Alicia"));
        assert_eq!(cmp_names("bob", "Carol"), Ordering::Less);
        assert_eq!(cmp_names("BOB", "bob"), Ordering::Equal);
    }

    #[test]
    fn priority_parsing_is_strict_but_input_defaults_to_low() {
        assert_eq!("high".parse::<TaskPriority>(), Ok(TaskPriority::High));
        assert_eq!(" Medium ".parse::<TaskPriority>(), Ok(TaskPriority::Medium));
        assert_eq!(
            "urgent".parse::<TaskPriority>(),
            Err(UnknownPriority("urgent".to_string()))
        );
        assert_eq!(TaskPriority::from_input("urgent"), TaskPriority::Low);
        assert_eq!(TaskPriority::from_input("HIGH"), TaskPriority::High);
    }

    #[test]
    fn lane_order_matches_rank() {
        for (index, priority) in TaskPriority::ALL.into_iter().enumerate() {
            assert_eq!(priority.rank(), index);
        }
    }

    #[test]
    fn service_status_label() {
        let mut service = Service::new("Library", "Books", "Academic", true);
        assert_eq!(service.status_label(), "ACTIVE");
        service.active = false;
        assert!(service.to_string().ends_with("INACTIVE"));
    }
}
