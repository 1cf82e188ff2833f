//! In-memory campus desk: personnel directory, priority task queue and
//! service catalog, with single-step undo over every mutation.

pub mod catalog;
pub mod console;
pub mod demo;
pub mod desk;
pub mod history;
pub mod lane_queue;
pub mod logging;
pub mod record_sequence;
pub mod types;
pub mod undo;

pub use catalog::{ServiceCatalog, ServiceStore};
pub use desk::{Desk, DeskConfig, DeskError, PersonnelDraft};
pub use history::{Action, ActionHistory, HistoryEntry};
pub use lane_queue::LaneQueue;
pub use record_sequence::{RecordSequence, Removal};
pub use types::{Personnel, Service, Task, TaskPriority};
pub use undo::UndoService;
