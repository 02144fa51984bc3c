use serde::{Deserialize, Serialize};
use std::fmt;

/// A single to-do item as the remote store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

/// Body of a create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

impl NewTask {
    pub fn unchecked(text: impl Into<String>) -> Self {
        NewTask {
            text: text.into(),
            checked: false,
        }
    }
}

/// Partial update. Used both as the PUT body and to read back the fields the
/// server confirmed, since an update response only has to carry the field
/// that was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl TaskPatch {
    pub fn text(text: impl Into<String>) -> Self {
        TaskPatch {
            text: Some(text.into()),
            checked: None,
        }
    }

    pub fn checked(checked: bool) -> Self {
        TaskPatch {
            text: None,
            checked: Some(checked),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.checked.is_none()
    }
}

/// Footer counters, always derived from a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Stats {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.checked).count();
        Stats {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} total, {} done, {} pending",
            self.total, self.completed, self.pending
        )
    }
}

/// Whether the shared input field is composing a new task or editing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "id", rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Creating,
    Editing(String),
}

impl Mode {
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Mode::Creating => None,
            Mode::Editing(id) => Some(id),
        }
    }

    pub fn primary_action(&self) -> PrimaryAction {
        match self {
            Mode::Creating => PrimaryAction::Add,
            Mode::Editing(_) => PrimaryAction::Save,
        }
    }
}

/// The single primary button: "Add" while creating, "Save" while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    Add,
    Save,
}

impl PrimaryAction {
    pub fn label(&self) -> &'static str {
        match self {
            PrimaryAction::Add => "Add",
            PrimaryAction::Save => "Save",
        }
    }
}

impl fmt::Display for PrimaryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
