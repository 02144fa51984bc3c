#![allow(deprecated)]
use cucumber::{then, when};
use predicates::prelude::*;
use serde_json::Value;

use crate::TaskListWorld;
use crate::steps::server_steps::{api_url, task_id};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `tl` with the given args against the world's server.
/// Stores stdout, stderr, and exit code on the world.
///
/// The binary runs on a blocking thread so the in-process server keeps
/// serving on the runtime meanwhile.
async fn run_tl(world: &mut TaskListWorld, args: Vec<String>) {
    let url = api_url(world);
    let output = tokio::task::spawn_blocking(move || {
        assert_cmd::Command::cargo_bin("tl")
            .expect("tl binary not found")
            .env("TASKLIST_API_URL", &url)
            .env_remove("RUST_LOG")
            .args(&args)
            .output()
            .expect("failed to run tl")
    })
    .await
    .expect("tl runner panicked");

    world.last_stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    world.last_stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    world.last_exit_code = output.status.code().unwrap_or(-1);
}

fn split(args: &str) -> Vec<String> {
    args.split_whitespace().map(str::to_string).collect()
}

fn stdout_json(world: &TaskListWorld) -> Value {
    serde_json::from_str(&world.last_stdout).unwrap_or_else(|e| {
        panic!(
            "tl output is not valid JSON: {e}\nstdout: {}",
            world.last_stdout
        )
    })
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when(expr = "I run tl {string}")]
async fn i_run_tl(world: &mut TaskListWorld, args: String) {
    run_tl(world, split(&args)).await;
}

/// Run `tl <command> <id> [rest...]` with the id of the task named `text`.
#[when(expr = "I run tl {word} on {string}")]
async fn i_run_tl_on(world: &mut TaskListWorld, command: String, text: String) {
    let id = task_id(world, &text).await;
    run_tl(world, vec!["--json".to_string(), command, id]).await;
}

#[when(expr = "I run tl edit on {string} with text {string}")]
async fn i_run_tl_edit(world: &mut TaskListWorld, text: String, new_text: String) {
    let id = task_id(world, &text).await;
    let mut args = vec!["--json".to_string(), "edit".to_string(), id];
    args.extend(split(&new_text));
    run_tl(world, args).await;
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the command succeeds")]
async fn the_command_succeeds(world: &mut TaskListWorld) {
    assert_eq!(
        world.last_exit_code, 0,
        "tl failed (exit {}): {}",
        world.last_exit_code, world.last_stderr
    );
}

#[then("the command fails")]
async fn the_command_fails(world: &mut TaskListWorld) {
    assert_ne!(
        world.last_exit_code, 0,
        "expected tl to fail but it succeeded: {}",
        world.last_stdout
    );
}

#[then(expr = "the output contains {string}")]
async fn the_output_contains(world: &mut TaskListWorld, expected: String) {
    assert!(
        predicate::str::contains(expected.as_str()).eval(&world.last_stdout),
        "expected stdout to contain {expected:?}, but it was:\n{}",
        world.last_stdout
    );
}

#[then(expr = "the error output contains {string}")]
async fn the_error_output_contains(world: &mut TaskListWorld, expected: String) {
    assert!(
        predicate::str::contains(expected.as_str()).eval(&world.last_stderr),
        "expected stderr to contain {expected:?}, but it was:\n{}",
        world.last_stderr
    );
}

#[then("nothing is printed")]
async fn nothing_is_printed(world: &mut TaskListWorld) {
    assert!(
        predicate::str::is_empty().eval(&world.last_stdout),
        "expected no stdout, but it was:\n{}",
        world.last_stdout
    );
}

#[then(expr = "the JSON output field {string} equals {string}")]
async fn the_json_field_equals_string(world: &mut TaskListWorld, field: String, expected: String) {
    let json = stdout_json(world);
    assert_eq!(
        json[&field].as_str(),
        Some(expected.as_str()),
        "unexpected JSON output: {json}"
    );
}

#[then(expr = "the JSON output field {string} is {word}")]
async fn the_json_field_is_bool(world: &mut TaskListWorld, field: String, expected: String) {
    let expected: bool = expected.parse().expect("expected true or false");
    let json = stdout_json(world);
    assert_eq!(
        json[&field].as_bool(),
        Some(expected),
        "unexpected JSON output: {json}"
    );
}

/// Example path: "stats.pending"
#[then(expr = "the JSON output path {string} equals {int}")]
async fn the_json_path_equals_int(world: &mut TaskListWorld, path: String, expected: i64) {
    let json = stdout_json(world);
    let mut current = &json;
    for key in path.split('.') {
        current = current
            .get(key)
            .unwrap_or_else(|| panic!("expected path '{path}' in JSON output: {json}"));
    }
    assert_eq!(
        current.as_i64(),
        Some(expected),
        "expected JSON path '{path}' to equal {expected} in: {json}"
    );
}
