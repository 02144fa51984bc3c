use serde_json::json;
use tasklist::ApiConfig;

use super::{mount, print_board, print_json};

pub async fn run(config: &ApiConfig, json: bool) -> Result<(), String> {
    let controller = mount(config).await?;
    let board = controller.board();
    if json {
        return print_json(&json!({
            "tasks": board.tasks(),
            "stats": board.stats(),
        }));
    }
    print_board(&board);
    Ok(())
}
