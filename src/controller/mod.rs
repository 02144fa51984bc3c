//! Client-side state for the task list, reconciled against the remote store.
//!
//! Every mutating handler follows the same policy: issue the remote call,
//! and only once it succeeds commit the server-confirmed values to a new
//! [`Board`] snapshot. Failures are logged, recorded in the failure log and
//! otherwise leave local state as it was.
//!
//! The board lock is never held across a remote call, so handlers may be in
//! flight concurrently. Each one applies its result to the latest snapshot
//! and patches only its own task by id.

mod board;

pub use board::Board;

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::TodoApi;
use crate::error::{ApiError, ApiResult};
use crate::models::{Mode, NewTask, PrimaryAction, Stats, TaskPatch};

/// The remote operation a handler performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Load,
    Create,
    Save,
    Delete,
    Toggle,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Save => "save",
            Operation::Delete => "delete",
            Operation::Toggle => "toggle",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A swallowed remote failure.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub operation: Operation,
    pub task_id: Option<String>,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Most failures the log keeps; older entries are dropped first.
pub const FAILURE_LOG_CAPACITY: usize = 100;

/// What a handler did to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The remote call (if any) succeeded and the board changed.
    Applied,
    /// Preconditions not met; nothing was sent.
    Skipped,
    /// The remote call failed; the board is unchanged.
    Failed,
}

#[derive(Debug)]
pub struct TaskListController<A> {
    api: A,
    board: Mutex<Arc<Board>>,
    failures: Mutex<VecDeque<Failure>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A: TodoApi> TaskListController<A> {
    pub fn new(api: A) -> Self {
        TaskListController {
            api,
            board: Mutex::new(Arc::new(Board::default())),
            failures: Mutex::new(VecDeque::new()),
        }
    }

    /// Build a controller and run the initial load.
    pub async fn mounted(api: A) -> Self {
        let controller = Self::new(api);
        controller.mount().await;
        controller
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current snapshot.
    pub fn board(&self) -> Arc<Board> {
        Arc::clone(&lock(&self.board))
    }

    pub fn stats(&self) -> Stats {
        self.board().stats()
    }

    pub fn primary_action(&self) -> PrimaryAction {
        self.board().primary_action()
    }

    /// The most recent failures, oldest first. At most
    /// [`FAILURE_LOG_CAPACITY`] are kept.
    pub fn failures(&self) -> Vec<Failure> {
        lock(&self.failures).iter().cloned().collect()
    }

    pub fn last_failure(&self) -> Option<Failure> {
        lock(&self.failures).back().cloned()
    }

    /// Remove and return the logged failures, oldest first.
    pub fn take_failures(&self) -> Vec<Failure> {
        lock(&self.failures).drain(..).collect()
    }

    fn commit(&self, transition: impl FnOnce(&Board) -> Board) {
        let mut board = lock(&self.board);
        let next = transition(&board);
        *board = Arc::new(next);
    }

    fn record(&self, operation: Operation, task_id: Option<&str>, err: ApiError) -> Outcome {
        tracing::warn!(%operation, task_id, error = %err, "remote call failed");
        let mut failures = lock(&self.failures);
        if failures.len() == FAILURE_LOG_CAPACITY {
            failures.pop_front();
        }
        failures.push_back(Failure {
            operation,
            task_id: task_id.map(str::to_string),
            message: err.to_string(),
            at: Utc::now(),
        });
        Outcome::Failed
    }

    /// Fetch the whole list once and replace local tasks with it.
    pub async fn mount(&self) -> Outcome {
        match self.api.list().await {
            Ok(tasks) => {
                tracing::debug!(count = tasks.len(), "loaded tasks");
                self.commit(|b| b.with_loaded(tasks));
                Outcome::Applied
            }
            Err(e) => self.record(Operation::Load, None, e),
        }
    }

    /// Update the shared input field.
    pub fn set_input(&self, input: impl Into<String>) {
        let input = input.into();
        self.commit(|b| b.with_input(input));
    }

    /// The primary button: save while editing, create otherwise.
    pub async fn submit(&self) -> Outcome {
        match self.board().mode() {
            Mode::Creating => self.handle_add().await,
            Mode::Editing(_) => self.handle_save().await,
        }
    }

    /// Create a task from the input. Blank input is ignored.
    pub async fn handle_add(&self) -> Outcome {
        let text = self.board().input().to_string();
        if text.trim().is_empty() {
            return Outcome::Skipped;
        }
        match self.api.create(&NewTask::unchecked(text)).await {
            Ok(task) => {
                tracing::debug!(id = %task.id, "created task");
                self.commit(|b| b.with_created(task));
                Outcome::Applied
            }
            Err(e) => self.record(Operation::Create, None, e),
        }
    }

    /// Enter edit mode for `id`. Local only.
    pub fn handle_edit(&self, id: &str) -> Outcome {
        let mut board = lock(&self.board);
        match board.with_editing(id) {
            Some(next) => {
                *board = Arc::new(next);
                Outcome::Applied
            }
            None => Outcome::Skipped,
        }
    }

    /// Send the input as the edit target's new text.
    pub async fn handle_save(&self) -> Outcome {
        let board = self.board();
        let Some(id) = board.mode().editing_id().map(str::to_string) else {
            return Outcome::Skipped;
        };
        let patch = TaskPatch::text(board.input());
        drop(board);

        let confirmed = self
            .api
            .update(&id, &patch)
            .await
            .and_then(|p| p.text.ok_or(ApiError::MissingField("text")));
        match confirmed {
            Ok(text) => {
                self.commit(|b| b.with_saved(&id, &text));
                Outcome::Applied
            }
            Err(e) => self.record(Operation::Save, Some(&id), e),
        }
    }

    pub async fn handle_delete(&self, id: &str) -> Outcome {
        match self.api.delete(id).await {
            Ok(()) => {
                self.commit(|b| b.with_deleted(id));
                Outcome::Applied
            }
            Err(e) => self.record(Operation::Delete, Some(id), e),
        }
    }

    /// Flip completion for `id`, given the value currently shown.
    pub async fn handle_checked(&self, id: &str, checked: bool) -> Outcome {
        let confirmed: ApiResult<bool> = self
            .api
            .update(id, &TaskPatch::checked(!checked))
            .await
            .and_then(|p| p.checked.ok_or(ApiError::MissingField("checked")));
        match confirmed {
            Ok(value) => {
                self.commit(|b| b.with_checked(id, value));
                Outcome::Applied
            }
            Err(e) => self.record(Operation::Toggle, Some(id), e),
        }
    }

    /// Toggle `id` using its checked value from the current snapshot.
    pub async fn toggle(&self, id: &str) -> Outcome {
        let Some(checked) = self.board().task(id).map(|t| t.checked) else {
            return Outcome::Skipped;
        };
        self.handle_checked(id, checked).await
    }
}
