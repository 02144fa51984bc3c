use tasklist::{ApiConfig, Outcome};

use super::{failure_message, format_task, mount, print_json};

pub async fn run(config: &ApiConfig, text: &str, json: bool) -> Result<(), String> {
    let controller = mount(config).await?;
    let before = controller.board().tasks().len();
    controller.set_input(text);

    match controller.submit().await {
        Outcome::Skipped => {
            if json {
                print_json(&serde_json::Value::Null)?;
            } else {
                println!("Nothing to add.");
            }
            Ok(())
        }
        Outcome::Failed => Err(failure_message(&controller, "could not add task")),
        Outcome::Applied => {
            let board = controller.board();
            let task = board
                .tasks()
                .get(before)
                .ok_or_else(|| "created task missing from list".to_string())?;
            if json {
                print_json(task)
            } else {
                println!("Added {}", format_task(task));
                Ok(())
            }
        }
    }
}
