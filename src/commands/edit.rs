use tasklist::{ApiConfig, Outcome};

use super::{failure_message, format_task, listed, mount, print_json};

/// Enter edit mode for `id`, type `text` into the input and press Save.
pub async fn run(config: &ApiConfig, id: &str, text: &str, json: bool) -> Result<(), String> {
    let controller = mount(config).await?;
    listed(&controller.board(), id)?;

    controller.handle_edit(id);
    controller.set_input(text);
    if controller.submit().await == Outcome::Failed {
        return Err(failure_message(&controller, "could not save task"));
    }

    let task = listed(&controller.board(), id)?;
    if json {
        print_json(&task)
    } else {
        println!("Saved {}", format_task(&task));
        Ok(())
    }
}
