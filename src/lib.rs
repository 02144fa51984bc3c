/// Remote `/todos` API: the `TodoApi` seam and its HTTP client.
pub mod api;
/// Task list controller: board snapshots and the handlers that reconcile them with the API.
pub mod controller;
/// SQLite store backing the reference server.
pub mod db;
/// Error types for remote calls.
pub mod error;
/// Data types: Task, TaskPatch, Stats, Mode.
pub mod models;
/// Axum-based reference `/todos` server.
pub mod web;

pub use api::{ApiConfig, HttpTodoApi, TodoApi};
pub use controller::{Board, Outcome, TaskListController};
pub use error::ApiError;
pub use models::{Mode, PrimaryAction, Stats, Task, TaskPatch};
