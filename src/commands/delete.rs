use serde_json::json;
use tasklist::{ApiConfig, Outcome};

use super::{failure_message, listed, mount, print_json};

pub async fn run(config: &ApiConfig, id: &str, json: bool) -> Result<(), String> {
    let controller = mount(config).await?;
    let task = listed(&controller.board(), id)?;

    if controller.handle_delete(id).await == Outcome::Failed {
        return Err(failure_message(&controller, "could not delete task"));
    }

    if json {
        print_json(&json!({ "id": task.id, "deleted": true }))
    } else {
        println!("Deleted {}: {}", task.id, task.text);
        Ok(())
    }
}
