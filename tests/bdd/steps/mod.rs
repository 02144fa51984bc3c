pub mod cli_steps;
