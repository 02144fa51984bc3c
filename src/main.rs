mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tasklist::api::{ApiConfig, DEFAULT_API_URL};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tl",
    version,
    about = "Personal task list backed by a remote /todos API"
)]
struct Cli {
    /// Base URL of the remote API; `/todos` is appended
    #[arg(
        long,
        env = "TASKLIST_API_URL",
        default_value = DEFAULT_API_URL,
        global = true
    )]
    api_url: String,

    /// Request timeout in seconds (default: none)
    #[arg(long, env = "TASKLIST_TIMEOUT", global = true)]
    timeout: Option<u64>,

    /// Output as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all tasks with total/done/pending counters
    List,
    /// Add a task
    Add {
        /// Task text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Replace a task's text
    Edit {
        /// Task ID
        id: String,
        /// New text (may be empty)
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },
    /// Flip a task between done and pending
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Show task counts
    Stats {
        /// Output a compact single-line summary
        #[arg(long)]
        oneline: bool,
    },
    /// Run a local /todos server backed by SQLite
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "TASKLIST_PORT", default_value_t = 3000)]
        port: u16,
        /// Path to the database file (default: .tasklist/tasklist.db in current dir)
        #[arg(long, env = "TASKLIST_DB")]
        db: Option<PathBuf>,
    },
}

fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    });

    let mut config = ApiConfig::new(cli.api_url);
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let result = match cli.command {
        Commands::List => commands::list::run(&config, cli.json).await,
        Commands::Add { text } => commands::add::run(&config, &text.join(" "), cli.json).await,
        Commands::Edit { id, text } => {
            commands::edit::run(&config, &id, &text.join(" "), cli.json).await
        }
        Commands::Toggle { id } => commands::toggle::run(&config, &id, cli.json).await,
        Commands::Delete { id } => commands::delete::run(&config, &id, cli.json).await,
        Commands::Stats { oneline } => commands::stats::run(&config, oneline, cli.json).await,
        Commands::Serve { port, db } => {
            let db_path = match db {
                Some(p) => p,
                None => match std::env::current_dir() {
                    Ok(dir) => dir.join(".tasklist").join("tasklist.db"),
                    Err(e) => {
                        eprintln!("error: cannot determine current directory: {e}");
                        std::process::exit(1);
                    }
                },
            };
            tasklist::web::serve(&db_path, port).await
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
