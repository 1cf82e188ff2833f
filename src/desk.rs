//! Operator-facing facade: every mutation is applied and recorded in one call.

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::{ServiceCatalog, ServiceStore};
use crate::history::{Action, ActionHistory, HistoryEntry};
use crate::lane_queue::LaneQueue;
use crate::record_sequence::RecordSequence;
use crate::types::{Personnel, Service, Task, TaskPriority, same_name};
use crate::undo::UndoService;

pub const TASK_ID_PREFIX: &str = "TASK-";
pub const PERSONNEL_ID_PREFIX: &str = "PER-";

/// Mutations the desk refuses because they would break a key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeskError {
    #[error("personnel id already registered: {0}")]
    DuplicatePersonnelId(String),
    #[error("service already listed: {0}")]
    DuplicateService(String),
    #[error("service not found: {0}")]
    ServiceNotFound(String),
}

/// Knobs for a new [`Desk`].
#[derive(Clone, Debug, Default)]
pub struct DeskConfig {
    /// Cap on retained undo entries; `None` keeps everything.
    pub history_limit: Option<usize>,
}

/// Fields supplied by the operator when registering a person.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonnelDraft {
    /// Left blank to have an id generated.
    pub id: String,
    pub name: String,
    pub role: String,
    pub department: String,
    pub email: String,
}

/// Counts shown on the dashboard.
#[derive(Clone, Debug)]
pub struct Summary {
    pub personnel: usize,
    pub services: usize,
    pub pending_tasks: usize,
    pub next_task: Option<Task>,
    pub last_action: Option<String>,
    pub history_len: usize,
}

pub struct Desk {
    personnel: RecordSequence,
    tasks: LaneQueue,
    services: ServiceCatalog,
    undo: UndoService,
    task_sequence: u64,
}

impl Desk {
    pub fn new(config: DeskConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => ActionHistory::with_limit(limit),
            None => ActionHistory::new(),
        };
        Self {
            personnel: RecordSequence::new(),
            tasks: LaneQueue::new(),
            services: ServiceCatalog::new(),
            undo: UndoService::with_history(history),
            task_sequence: 1,
        }
    }

    pub fn personnel(&self) -> &RecordSequence {
        &self.personnel
    }

    pub fn tasks(&self) -> &LaneQueue {
        &self.tasks
    }

    pub fn services(&self) -> &ServiceCatalog {
        &self.services
    }

    /// Register a person at `position` (`None` appends). Returns the stored copy
    /// and the index it landed at. An explicit id must not already be in use.
    pub fn add_personnel(
        &mut self,
        draft: PersonnelDraft,
        position: Option<usize>,
    ) -> Result<(Personnel, usize), DeskError> {
        let id = if draft.id.trim().is_empty() {
            generate_personnel_id()
        } else {
            draft.id.trim().to_string()
        };
        if self.personnel.iter().any(|p| same_name(p.id(), &id)) {
            return Err(DeskError::DuplicatePersonnelId(id));
        }
        let record = Personnel::new(id, draft.name, draft.role, draft.department, draft.email);
        let position = position.unwrap_or(self.personnel.len());
        let index = self.personnel.insert_at(record.clone(), position);
        let label = format!("Added personnel {}", record.name);
        self.undo.record(
            Action::PersonnelAdded {
                record: record.clone(),
                index,
            },
            label,
        );
        Ok((record, index))
    }

    pub fn remove_personnel(&mut self, name: &str) -> Option<Personnel> {
        let removal = self.personnel.remove_by_name(name)?;
        let label = format!("Removed personnel {}", removal.record.name);
        self.undo.record(
            Action::PersonnelRemoved {
                record: removal.record.clone(),
                index: removal.index,
            },
            label,
        );
        Some(removal.record)
    }

    pub fn find_personnel(&self, name: &str) -> Option<&Personnel> {
        self.personnel.find_by_name(name)
    }

    /// Sort by name. Recorded so the prior order can be restored exactly.
    pub fn sort_personnel(&mut self) {
        let before = self.personnel.to_vec();
        self.personnel.sort_by_name();
        self.undo
            .record(Action::PersonnelReordered { before }, "Sorted personnel by name");
    }

    /// Queue a request; the id is assigned from a running counter.
    pub fn add_task(&mut self, requestor: &str, description: &str, priority: TaskPriority) -> Task {
        let id = format!("{TASK_ID_PREFIX}{}", self.task_sequence);
        self.task_sequence += 1;
        let task = Task::new(id, requestor, description, priority);
        self.tasks.enqueue(task.clone());
        let label = format!("Added task {}", task.id());
        self.undo.record(Action::TaskAdded { task: task.clone() }, label);
        task
    }

    pub fn serve_task(&mut self) -> Option<Task> {
        let task = self.tasks.dequeue()?;
        info!(id = task.id(), priority = %task.priority(), "serving task");
        let label = format!("Served task {}", task.id());
        self.undo.record(Action::TaskServed { task: task.clone() }, label);
        Some(task)
    }

    pub fn peek_task(&self) -> Option<&Task> {
        self.tasks.peek()
    }

    /// Names are unique, case-insensitively.
    pub fn add_service(&mut self, service: Service) -> Result<usize, DeskError> {
        if self.services.index_of(&service.name).is_some() {
            return Err(DeskError::DuplicateService(service.name));
        }
        let index = self.services.add(service.clone());
        let label = format!("Added service {}", service.name);
        self.undo.record(Action::ServiceAdded { service, index }, label);
        Ok(index)
    }

    pub fn remove_service(&mut self, name: &str) -> Option<Service> {
        let (index, service) = self.services.remove_by_name(name)?;
        let label = format!("Removed service {}", service.name);
        self.undo.record(
            Action::ServiceRemoved {
                service: service.clone(),
                index,
            },
            label,
        );
        Some(service)
    }

    /// Replace the entry named `current` with `updated`. A rename may not land
    /// on another entry's name.
    pub fn edit_service(&mut self, current: &str, updated: Service) -> Result<(), DeskError> {
        let Some(index) = self.services.index_of(current) else {
            return Err(DeskError::ServiceNotFound(current.to_string()));
        };
        if let Some(clash) = self.services.index_of(&updated.name) {
            if clash != index {
                return Err(DeskError::DuplicateService(updated.name));
            }
        }
        let Some(before) = self.services.replace_by_name(current, updated.clone()) else {
            return Err(DeskError::ServiceNotFound(current.to_string()));
        };
        let label = format!("Edited service {}", before.name);
        self.undo.record(
            Action::ServiceEdited {
                before,
                after: updated,
            },
            label,
        );
        Ok(())
    }

    /// Not recorded for undo.
    pub fn sort_services(&mut self) {
        self.services.sort_by_name();
    }

    pub fn undo(&mut self) -> bool {
        self.undo
            .undo_last(&mut self.personnel, &mut self.tasks, &mut self.services)
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.undo.history()
    }

    pub fn history_len(&self) -> usize {
        self.undo.len()
    }

    pub fn clear_history(&mut self) {
        debug!(discarded = self.undo.len(), "history cleared");
        self.undo.clear();
    }

    pub fn summary(&self) -> Summary {
        Summary {
            personnel: self.personnel.len(),
            services: self.services.len(),
            pending_tasks: self.tasks.len(),
            next_task: self.tasks.peek().cloned(),
            last_action: self.undo.peek().map(ToString::to_string),
            history_len: self.undo.len(),
        }
    }
}

impl Default for Desk {
    fn default() -> Self {
        Self::new(DeskConfig::default())
    }
}

fn generate_personnel_id() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("{PERSONNEL_ID_PREFIX}{}", simple[..8].to_uppercase())
}
