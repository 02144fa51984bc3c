pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod stats;
pub mod toggle;

use colored::Colorize;
use tasklist::models::{PrimaryAction, Stats, Task};
use tasklist::{ApiConfig, Board, HttpTodoApi, Outcome, TaskListController};

pub type Controller = TaskListController<HttpTodoApi>;

/// Build a client for `config` and run the initial load.
pub async fn mount(config: &ApiConfig) -> Result<Controller, String> {
    let api = HttpTodoApi::new(config).map_err(|e| e.to_string())?;
    let controller = TaskListController::new(api);
    if controller.mount().await == Outcome::Failed {
        return Err(failure_message(&controller, "could not load tasks"));
    }
    Ok(controller)
}

/// Message for the most recent swallowed failure.
pub fn failure_message(controller: &Controller, context: &str) -> String {
    match controller.last_failure() {
        Some(f) => format!("{context}: {}", f.message),
        None => context.to_string(),
    }
}

/// Look up a listed task or fail with a not-found error.
pub fn listed(board: &Board, id: &str) -> Result<Task, String> {
    board
        .task(id)
        .cloned()
        .ok_or_else(|| format!("task not found: {id}"))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let j = serde_json::to_string_pretty(value).map_err(|e| format!("json error: {e}"))?;
    println!("{j}");
    Ok(())
}

/// Format the primary action the way the button reads.
pub fn format_action(action: PrimaryAction) -> String {
    match action {
        PrimaryAction::Add => action.label().blue().bold().to_string(),
        PrimaryAction::Save => action.label().green().bold().to_string(),
    }
}

/// Format one task row: checkbox, text, id.
pub fn format_task(t: &Task) -> String {
    let id = format!("({})", t.id).bright_black();
    if t.checked {
        format!("[x] {} {id}", t.text.bright_black().strikethrough())
    } else {
        format!("[ ] {} {id}", t.text)
    }
}

/// Format the footer counters.
pub fn format_stats(s: &Stats) -> String {
    format!(
        "{} total   {} done   {} pending",
        s.total.to_string().bold(),
        s.completed.to_string().green(),
        s.pending.to_string().yellow()
    )
}

/// Print the whole board: rows, then the footer.
pub fn print_board(board: &Board) {
    println!(
        "{}  [{}]",
        "My Tasks".bold(),
        format_action(board.primary_action())
    );
    if board.tasks().is_empty() {
        println!("No tasks yet.");
    }
    for t in board.tasks() {
        println!("{}", format_task(t));
    }
    println!("{}", "-".repeat(40));
    println!("{}", format_stats(&board.stats()));
}
