// tagcloud/src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::config::Settings;

pub mod args;
pub mod cloud_commands;
pub mod error;

pub fn execute_command(cli: Cli, settings: &Settings) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }
    match cli.command {
        Some(command @ Commands::Render { .. }) => cloud_commands::render(command, settings),
        Some(command @ Commands::Tags { .. }) => cloud_commands::show_tags(command, settings),
        None => Ok(()),
    }
}
