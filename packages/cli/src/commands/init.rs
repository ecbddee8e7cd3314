use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagekit_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Document key used to seed block ids
    #[arg(short, long)]
    pub document_key: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), DEFAULT_CONFIG_NAME.bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut config = EditorConfig::default();
    if let Some(document_key) = args.document_key {
        config.document_key = document_key;
    }

    fs::write(&config_path, config.to_json()?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: pagekit render --content page.json");
    println!("  2. Run: pagekit apply --content page.json --actions actions.json");

    Ok(())
}
