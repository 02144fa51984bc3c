use serde::Serialize;

use crate::models::{Mode, PrimaryAction, Stats, Task};

/// One immutable snapshot of the task list screen.
///
/// Every transition returns a new `Board`; nothing here talks to the remote
/// store. The controller decides when a transition is allowed to happen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Board {
    tasks: Vec<Task>,
    input: String,
    mode: Mode,
}

impl Board {
    pub fn new(tasks: Vec<Task>) -> Self {
        Board {
            tasks,
            ..Default::default()
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn primary_action(&self) -> PrimaryAction {
        self.mode.primary_action()
    }

    pub fn stats(&self) -> Stats {
        Stats::of(&self.tasks)
    }

    pub fn with_input(&self, input: impl Into<String>) -> Board {
        Board {
            input: input.into(),
            ..self.clone()
        }
    }

    /// Replace the list with what the server returned, in server order.
    pub fn with_loaded(&self, tasks: Vec<Task>) -> Board {
        Board {
            tasks,
            ..self.clone()
        }
    }

    /// Append a created task and clear the input.
    pub fn with_created(&self, task: Task) -> Board {
        let mut tasks = self.tasks.clone();
        tasks.push(task);
        Board {
            tasks,
            input: String::new(),
            mode: self.mode.clone(),
        }
    }

    /// Enter edit mode for `id`, loading its text into the input.
    /// Returns `None` when no such task is listed.
    pub fn with_editing(&self, id: &str) -> Option<Board> {
        let task = self.task(id)?;
        Some(Board {
            tasks: self.tasks.clone(),
            input: task.text.clone(),
            mode: Mode::Editing(task.id.clone()),
        })
    }

    /// Apply a confirmed text edit. Edit mode and the input are only reset
    /// when `id` is still the active edit target.
    pub fn with_saved(&self, id: &str, text: &str) -> Board {
        let tasks = self
            .tasks
            .iter()
            .map(|t| {
                if t.id == id {
                    Task {
                        text: text.to_string(),
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect();
        if self.mode.editing_id() == Some(id) {
            Board {
                tasks,
                input: String::new(),
                mode: Mode::Creating,
            }
        } else {
            Board {
                tasks,
                ..self.clone()
            }
        }
    }

    pub fn with_checked(&self, id: &str, checked: bool) -> Board {
        let tasks = self
            .tasks
            .iter()
            .map(|t| {
                if t.id == id {
                    Task {
                        checked,
                        ..t.clone()
                    }
                } else {
                    t.clone()
                }
            })
            .collect();
        Board {
            tasks,
            ..self.clone()
        }
    }

    /// Remove the task with `id`. Deleting the edit target drops back to
    /// create mode but keeps whatever is in the input.
    pub fn with_deleted(&self, id: &str) -> Board {
        let tasks = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        let mode = if self.mode.editing_id() == Some(id) {
            Mode::Creating
        } else {
            self.mode.clone()
        };
        Board {
            tasks,
            input: self.input.clone(),
            mode,
        }
    }
}
