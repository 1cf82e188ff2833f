//! Scripted walkthrough of the desk used by the default CLI mode.

use tracing::{info, warn};

use crate::desk::{Desk, DeskConfig, PersonnelDraft};
use crate::types::{Service, TaskPriority};

// Seed data for the walkthrough.
const DEMO_PERSONNEL: [(&str, &str, &str); 3] = [
    ("Carol", "Registrar", "Administration"),
    ("Alice", "Dean", "Science"),
    ("Bob", "Technician", "Facilities"),
];
const DEMO_TASKS: [(&str, &str, TaskPriority); 3] = [
    ("Ann", "Projector broken in LT1", TaskPriority::High),
    ("Ben", "Replace corridor bulb", TaskPriority::Low),
    ("Cy", "Wifi down in library", TaskPriority::High),
];

/// Outcome of each demo check, printed as the summary block.
#[derive(Debug, Default)]
pub struct DemoReport {
    pub personnel: usize,
    pub services: usize,
    pub pending_tasks: usize,
    pub served_order: Vec<String>,
    pub sort_undo_restored: bool,
    pub remove_undo_restored: bool,
    pub serve_undo_requeued: bool,
    pub edit_undo_restored: bool,
    pub undo_exhausted: bool,
}

fn names(desk: &Desk) -> Vec<String> {
    desk.personnel().iter().map(|p| p.name.clone()).collect()
}

/// Drive the desk through every undoable operation and record what happened.
pub fn run_scenario() -> DemoReport {
    let mut desk = Desk::new(DeskConfig::default());
    let mut report = DemoReport::default();

    for (name, role, department) in DEMO_PERSONNEL {
        let added = desk.add_personnel(
            PersonnelDraft {
                name: name.to_string(),
                role: role.to_string(),
                department: department.to_string(),
                email: format!("{}@campus.edu", name.to_lowercase()),
                ..PersonnelDraft::default()
            },
            None,
        );
        if let Err(err) = added {
            warn!(%err, "demo personnel skipped");
        }
    }
    let original = names(&desk);
    println!("[PERSONNEL] loaded {original:?}");

    desk.sort_personnel();
    println!("[PERSONNEL] sorted {:?}", names(&desk));
    desk.undo();
    report.sort_undo_restored = names(&desk) == original;
    println!("[UNDO] sort reverted -> {:?}", names(&desk));

    let before_remove = desk.personnel().to_vec();
    if let Some(removed) = desk.remove_personnel("alice") {
        println!("[PERSONNEL] removed {removed}");
    }
    desk.undo();
    report.remove_undo_restored = desk.personnel().to_vec() == before_remove;
    println!("[UNDO] removal reverted -> {:?}", names(&desk));

    for (requestor, description, priority) in DEMO_TASKS {
        let task = desk.add_task(requestor, description, priority);
        println!("[TASKS] queued {task}");
    }
    let served = desk.serve_task();
    if let Some(task) = &served {
        println!("[TASKS] serving {task}");
    }
    desk.undo();
    report.serve_undo_requeued =
        desk.peek_task().map(|t| t.id()) == served.as_ref().map(|t| t.id());
    while let Some(task) = desk.serve_task() {
        report.served_order.push(task.id().to_string());
    }
    println!("[TASKS] served in order {:?}", report.served_order);

    for service in [
        Service::new("Clinic", "Nurse on duty", "Health", true),
        Service::new("Gym", "Fitness centre", "Sport", true),
    ] {
        if let Err(err) = desk.add_service(service) {
            warn!(%err, "demo service skipped");
        }
    }
    let clinic = desk.services().find_by_name("Clinic").cloned();
    match desk.edit_service(
        "Clinic",
        Service::new("Health Centre", "Nurse and GP", "Health", true),
    ) {
        Ok(()) => {
            println!("[SERVICES] renamed Clinic -> Health Centre");
            desk.undo();
            report.edit_undo_restored =
                desk.services().find_by_name("Clinic").cloned() == clinic;
        }
        Err(err) => warn!(%err, "demo rename failed"),
    }

    for entry in desk.history().take(3) {
        println!("[HISTORY] {entry}");
    }
    while desk.undo() {}
    report.undo_exhausted = desk.history_len() == 0 && !desk.undo();

    let summary = desk.summary();
    report.personnel = summary.personnel;
    report.services = summary.services;
    report.pending_tasks = summary.pending_tasks;
    info!(?report, "demo finished");
    report
}

pub fn run_demo() {
    let report = run_scenario();
    println!("DEMO SUMMARY");
    println!(
        "personnel={} services={} pending_tasks={}",
        report.personnel, report.services, report.pending_tasks
    );
    println!("served_order={:?}", report.served_order);
    println!("sort_undo_restored={}", report.sort_undo_restored);
    println!("remove_undo_restored={}", report.remove_undo_restored);
    println!("serve_undo_requeued={}", report.serve_undo_requeued);
    println!("edit_undo_restored={}", report.edit_undo_restored);
    println!("undo_exhausted={}", report.undo_exhausted);
}
