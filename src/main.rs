use anyhow::Result;

use competitor_dashboard::cli::Command;
use competitor_dashboard::views::{Page, SearchForm};
use competitor_dashboard::{handle_completions, handle_page, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Home => handle_page(Page::Home),
        Command::Search {
            name,
            country,
            min_rank,
            max_rank,
            min_points,
        } => handle_page(Page::Search(SearchForm {
            name,
            country,
            min_rank,
            max_rank,
            min_points,
        })),
        Command::Detail { name } => handle_page(Page::Details(name)),
        Command::Countries => handle_page(Page::Countries),
        Command::Leaderboards => handle_page(Page::Leaderboards),
        Command::Serve { port } => handle_serve(port),
        Command::Completions { shell } => handle_completions(shell),
    }
}
