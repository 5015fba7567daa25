use clap;
use commands::command_argument_builder;
use handlers::{handle_graph, handle_search, handle_top};

mod commands;
mod handlers;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    let outcome = match chosen_command.subcommand() {
        Some(("graph", primary_command)) => handle_graph(primary_command),
        Some(("top", primary_command)) => handle_top(primary_command),
        Some(("search", primary_command)) => handle_search(primary_command).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
