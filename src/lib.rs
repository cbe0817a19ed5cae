pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod query;
pub mod render;
pub mod services;
pub mod views;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::dashboard::DashboardService;
use crate::services::server::ServerService;
use crate::views::Page;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

/// Build one page against the configured database and print it.
pub fn handle_page(page: Page) -> Result<()> {
    let config = AppConfig::new();
    let service = DashboardService::new(&config);
    let view = service.view(&page);
    print!("{}", render::render(&view));
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
