mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, init, render, ApplyArgs, InitArgs, RenderArgs};

/// Pagekit CLI - edit block pages from the command line
#[derive(Parser, Debug)]
#[command(name = "pagekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default pagekit.config.json
    Init(InitArgs),

    /// Apply a list of editor actions to a page
    Apply(ApplyArgs),

    /// Render a page as editor HTML
    Render(RenderArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Apply(args) => apply(args, &cwd),
            Command::Render(args) => render(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
