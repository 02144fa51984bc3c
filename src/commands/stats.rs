use tasklist::ApiConfig;

use super::{mount, print_json};

pub async fn run(config: &ApiConfig, oneline: bool, json: bool) -> Result<(), String> {
    let controller = mount(config).await?;
    let stats = controller.stats();

    if json {
        return print_json(&stats);
    }

    if oneline {
        println!("{stats}");
        return Ok(());
    }

    println!("Total     {}", stats.total);
    println!("Done      {}", stats.completed);
    println!("Pending   {}", stats.pending);
    Ok(())
}
