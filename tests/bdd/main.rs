mod steps;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use cucumber::World;
use tasklist::{HttpTodoApi, Outcome, TaskListController};

/// Shared state carried through each scenario.
#[derive(Debug, Default, World)]
pub struct TaskListWorld {
    /// Temporary directory that owns the server's database file.
    pub db_dir: Option<tempfile::TempDir>,
    /// Base URL the client talks to (no trailing `/todos`).
    pub api_url: Option<String>,
    /// Handle of the in-process server task.
    pub server_handle: Option<tokio::task::JoinHandle<()>>,
    /// While set, the server answers every request with 503.
    pub server_failing: Option<Arc<AtomicBool>>,
    /// Client used for raw HTTP checks against the server.
    pub http_client: reqwest::Client,
    /// Controller under test, once mounted.
    pub controller: Option<TaskListController<HttpTodoApi>>,
    /// Outcome(s) of the most recent handler call.
    pub last_outcomes: Vec<Outcome>,
    /// Task text to server id, for tasks seeded through the API.
    pub task_ids: HashMap<String, String>,
    /// Status code of the most recent raw HTTP request.
    pub last_response_status: Option<u16>,
    /// Body of the most recent raw HTTP request.
    pub last_response_body: Option<String>,
    /// The raw stdout of the most recent `tl` invocation.
    pub last_stdout: String,
    /// The raw stderr of the most recent `tl` invocation.
    pub last_stderr: String,
    /// Exit code of the most recent `tl` invocation.
    pub last_exit_code: i32,
}

#[tokio::main]
async fn main() {
    TaskListWorld::run("tests/features").await;
}
