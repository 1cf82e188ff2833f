//! Line-oriented command console over a [`Desk`].
//!
//! One command per line: a verb, then `|`-separated fields.
//! `add-task Ann|Projector broken|high`

use thiserror::Error;

use crate::desk::{Desk, PersonnelDraft};
use crate::types::{Service, TaskPriority};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{command}: missing field `{field}`")]
    MissingField {
        command: &'static str,
        field: &'static str,
    },
    #[error("{command}: `{value}` is not a valid {expected}")]
    InvalidValue {
        command: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    AddPersonnel {
        draft: PersonnelDraft,
        position: Option<usize>,
    },
    RemovePersonnel(String),
    FindPersonnel(String),
    SortPersonnel,
    ListPersonnel,
    AddTask {
        requestor: String,
        description: String,
        priority: TaskPriority,
    },
    ServeTask,
    PeekTask,
    ListTasks,
    AddService(Service),
    EditService {
        current: String,
        updated: Service,
    },
    RemoveService(String),
    SearchServices(String),
    SortServices,
    ListServices,
    Undo,
    History,
    ClearHistory,
    Summary,
}

/// Positional `|`-separated fields of one command.
struct Fields<'a> {
    command: &'static str,
    parts: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn new(command: &'static str, rest: &'a str) -> Self {
        let parts = if rest.trim().is_empty() {
            Vec::new()
        } else {
            rest.split('|').map(str::trim).collect()
        };
        Self { command, parts }
    }

    fn optional(&self, index: usize) -> Option<&'a str> {
        self.parts.get(index).copied().filter(|part| !part.is_empty())
    }

    fn required(&self, index: usize, field: &'static str) -> Result<String, CommandError> {
        self.optional(index)
            .map(str::to_string)
            .ok_or(CommandError::MissingField {
                command: self.command,
                field,
            })
    }

    fn flag(&self, index: usize, field: &'static str) -> Result<bool, CommandError> {
        let value = self.required(index, field)?;
        match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "active" => Ok(true),
            "false" | "no" | "n" | "0" | "inactive" => Ok(false),
            _ => Err(CommandError::InvalidValue {
                command: self.command,
                value,
                expected: "boolean",
            }),
        }
    }

    fn position(&self, index: usize) -> Result<Option<usize>, CommandError> {
        let Some(raw) = self.optional(index) else {
            return Ok(None);
        };
        // Negative positions insert at the front.
        match raw.parse::<i64>() {
            Ok(value) => Ok(Some(usize::try_from(value).unwrap_or(0))),
            Err(_) => Err(CommandError::InvalidValue {
                command: self.command,
                value: raw.to_string(),
                expected: "position",
            }),
        }
    }

    fn service(&self, offset: usize) -> Result<Service, CommandError> {
        Ok(Service::new(
            self.required(offset, "name")?,
            self.optional(offset + 1).unwrap_or_default(),
            self.optional(offset + 2).unwrap_or_default(),
            self.flag(offset + 3, "active")?,
        ))
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let command = match verb.to_ascii_lowercase().as_str() {
            "add-personnel" => {
                let f = Fields::new("add-personnel", rest);
                Command::AddPersonnel {
                    draft: PersonnelDraft {
                        name: f.required(0, "name")?,
                        role: f.required(1, "role")?,
                        department: f.optional(2).unwrap_or_default().to_string(),
                        email: f.optional(3).unwrap_or_default().to_string(),
                        id: f.optional(5).unwrap_or_default().to_string(),
                    },
                    position: f.position(4)?,
                }
            }
            "remove-personnel" => {
                Command::RemovePersonnel(Fields::new("remove-personnel", rest).required(0, "name")?)
            }
            "find-personnel" => {
                Command::FindPersonnel(Fields::new("find-personnel", rest).required(0, "name")?)
            }
            "sort-personnel" => Command::SortPersonnel,
            "list-personnel" => Command::ListPersonnel,
            "add-task" => {
                let f = Fields::new("add-task", rest);
                Command::AddTask {
                    requestor: f.required(0, "requestor")?,
                    description: f.required(1, "description")?,
                    priority: TaskPriority::from_input(f.optional(2).unwrap_or_default()),
                }
            }
            "serve-task" => Command::ServeTask,
            "peek-task" => Command::PeekTask,
            "list-tasks" => Command::ListTasks,
            "add-service" => Command::AddService(Fields::new("add-service", rest).service(0)?),
            "edit-service" => {
                let f = Fields::new("edit-service", rest);
                Command::EditService {
                    current: f.required(0, "current")?,
                    updated: f.service(1)?,
                }
            }
            "remove-service" => {
                Command::RemoveService(Fields::new("remove-service", rest).required(0, "name")?)
            }
            "search-services" => {
                let f = Fields::new("search-services", rest);
                Command::SearchServices(f.required(0, "keyword")?)
            }
            "sort-services" => Command::SortServices,
            "list-services" => Command::ListServices,
            "undo" => Command::Undo,
            "history" => Command::History,
            "clear-history" => Command::ClearHistory,
            "summary" => Command::Summary,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Apply a command and render the operator-facing reply.
pub fn execute(desk: &mut Desk, command: Command) -> String {
    match command {
        Command::AddPersonnel { draft, position } => {
            match desk.add_personnel(draft, position) {
                Ok((record, index)) => format!("added {record} at {index}"),
                Err(err) => err.to_string(),
            }
        }
        Command::RemovePersonnel(name) => match desk.remove_personnel(&name) {
            Some(record) => format!("removed {record}"),
            None => format!("personnel not found: {name}"),
        },
        Command::FindPersonnel(name) => match desk.find_personnel(&name) {
            Some(record) => record.to_string(),
            None => format!("personnel not found: {name}"),
        },
        Command::SortPersonnel => {
            desk.sort_personnel();
            "personnel sorted by name".to_string()
        }
        Command::ListPersonnel => listing(desk.personnel().iter(), "no personnel"),
        Command::AddTask {
            requestor,
            description,
            priority,
        } => {
            let task = desk.add_task(&requestor, &description, priority);
            format!("queued {task}")
        }
        Command::ServeTask => match desk.serve_task() {
            Some(task) => format!("serving {task}"),
            None => "no tasks available".to_string(),
        },
        Command::PeekTask => match desk.peek_task() {
            Some(task) => format!("next {task}"),
            None => "no tasks available".to_string(),
        },
        Command::ListTasks => listing(desk.tasks().iter(), "no pending tasks"),
        Command::AddService(service) => {
            let name = service.name.clone();
            match desk.add_service(service) {
                Ok(index) => format!("added service {name} at {index}"),
                Err(err) => err.to_string(),
            }
        }
        Command::EditService { current, updated } => {
            match desk.edit_service(&current, updated) {
                Ok(()) => format!("service {current} updated"),
                Err(err) => err.to_string(),
            }
        }
        Command::RemoveService(name) => match desk.remove_service(&name) {
            Some(service) => format!("removed service {service}"),
            None => format!("service not found: {name}"),
        },
        Command::SearchServices(keyword) => {
            listing(desk.services().search(&keyword).into_iter(), "no matching services")
        }
        Command::SortServices => {
            desk.sort_services();
            "services sorted by name".to_string()
        }
        Command::ListServices => listing(desk.services().iter(), "no services"),
        Command::Undo => {
            if desk.undo() {
                "last action undone".to_string()
            } else {
                "nothing to undo".to_string()
            }
        }
        Command::History => listing(desk.history(), "nothing to undo"),
        Command::ClearHistory => {
            desk.clear_history();
            "history cleared".to_string()
        }
        Command::Summary => {
            let summary = desk.summary();
            let next = summary
                .next_task
                .map(|task| task.to_string())
                .unwrap_or_else(|| "None".to_string());
            let last = summary.last_action.unwrap_or_else(|| "None".to_string());
            format!(
                "Personnel: {}\nServices: {}\nPending tasks: {}\nUndo stack: {}\n\
                 Next task: {next}\nLast undoable action: {last}",
                summary.personnel, summary.services, summary.pending_tasks, summary.history_len
            )
        }
    }
}

fn listing<T, I>(items: I, empty: &str) -> String
where
    T: std::fmt::Display,
    I: Iterator<Item = T>,
{
    let lines: Vec<String> = items
        .enumerate()
        .map(|(index, item)| format!("{:>3}. {item}", index + 1))
        .collect();
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}
