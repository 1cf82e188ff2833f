//! Records undo descriptors and replays the inverse of the most recent one.
//!
//! Only one level is ever replayed per call and undos are not themselves
//! recorded, so there is no redo.

use tracing::{debug, warn};

use crate::catalog::ServiceStore;
use crate::history::{Action, ActionHistory, HistoryEntry};
use crate::lane_queue::LaneQueue;
use crate::record_sequence::RecordSequence;
use crate::types::{Service, same_name};

pub struct UndoService {
    history: ActionHistory,
}

impl UndoService {
    pub fn new() -> Self {
        Self::with_history(ActionHistory::new())
    }

    pub fn with_history(history: ActionHistory) -> Self {
        Self { history }
    }

    /// Push a descriptor. Call only after the mutation it describes has completed.
    pub fn record(&mut self, action: Action, label: impl Into<String>) {
        let entry = HistoryEntry::new(action, label);
        debug!(kind = entry.action.kind(), label = %entry.label, "recorded action");
        self.history.push(entry);
    }

    /// Pop the latest descriptor and apply its inverse.
    ///
    /// Returns `false` only when history is empty. If the entity the inverse
    /// targets is already gone, that step is a no-op and the call still
    /// reports success.
    pub fn undo_last<S>(
        &mut self,
        personnel: &mut RecordSequence,
        tasks: &mut LaneQueue,
        services: &mut S,
    ) -> bool
    where
        S: ServiceStore + ?Sized,
    {
        let Some(entry) = self.history.pop() else {
            debug!("undo requested with empty history");
            return false;
        };
        let kind = entry.action.kind();
        match entry.action {
            Action::PersonnelAdded { record, .. } => {
                if personnel.remove_by_id(record.id()).is_none() {
                    warn!(kind, id = record.id(), "added personnel no longer present");
                }
            }
            Action::PersonnelRemoved { record, index } => {
                personnel.insert_at(record, index);
            }
            Action::PersonnelReordered { before } => {
                personnel.replace_all(before);
            }
            Action::TaskAdded { task } => {
                if tasks.remove_by_id(task.id()).is_none() {
                    warn!(kind, id = task.id(), "added task no longer queued");
                }
            }
            Action::TaskServed { task } => {
                tasks.requeue_at_front(task);
            }
            Action::ServiceAdded { service, .. } => {
                if services.remove_by_name(&service.name).is_none() {
                    warn!(kind, name = %service.name, "added service no longer listed");
                }
            }
            Action::ServiceRemoved { service, index } => {
                services.insert_at(service, index);
            }
            Action::ServiceEdited { before, after } => {
                revert_edit(services, before, &after.name);
            }
        }
        debug!(kind, label = %entry.label, "undo applied");
        true
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.history.entries()
    }

    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.history.peek()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for UndoService {
    fn default() -> Self {
        Self::new()
    }
}

// Rename heuristic: when nothing sits under the after-name, the before-name is
// tried next. Two renames of the same entry can restore the wrong generation.
fn revert_edit<S>(services: &mut S, before: Service, after_name: &str)
where
    S: ServiceStore + ?Sized,
{
    if services.replace_by_name(after_name, before.clone()).is_some() {
        return;
    }
    if !same_name(&before.name, after_name)
        && services.replace_by_name(&before.name, before.clone()).is_some()
    {
        debug!(name = %before.name, "edit reverted under previous name");
        return;
    }
    warn!(name = %before.name, after = after_name, "edited service not listed; re-adding");
    services.insert_at(before, usize::MAX);
}
