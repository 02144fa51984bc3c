use tasklist::{ApiConfig, Outcome};

use super::{failure_message, format_task, listed, mount, print_json};

pub async fn run(config: &ApiConfig, id: &str, json: bool) -> Result<(), String> {
    let controller = mount(config).await?;
    let current = listed(&controller.board(), id)?;

    if controller.handle_checked(id, current.checked).await == Outcome::Failed {
        return Err(failure_message(&controller, "could not update task"));
    }

    let task = listed(&controller.board(), id)?;
    if json {
        print_json(&task)
    } else {
        let verb = if task.checked { "Checked" } else { "Unchecked" };
        println!("{verb} {}", format_task(&task));
        Ok(())
    }
}
