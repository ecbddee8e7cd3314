use super::{load_config, read_content, resolve};
use anyhow::{Context, Result};
use clap::Args;
use pagekit_editor::{Action, CustomRegistry, EditorStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Page content JSON file
    #[arg(short, long)]
    pub content: PathBuf,

    /// JSON array of actions, e.g. [{"type": "DELETE_BLOCK", "payload": 1}]
    #[arg(short, long)]
    pub actions: PathBuf,

    /// Config file (defaults to pagekit.config.json if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let json = apply_to_json(&args, cwd)?;

    match &args.out {
        Some(out) => {
            let out = resolve(cwd, out);
            fs::write(&out, json).with_context(|| format!("Cannot write {}", out.display()))?;
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Run the action script and return the resulting content as JSON
pub(crate) fn apply_to_json(args: &ApplyArgs, cwd: &Path) -> Result<String> {
    let config = load_config(cwd, args.config.as_deref())?;
    let content = read_content(cwd, &args.content)?;

    let actions_path = resolve(cwd, &args.actions);
    let script = fs::read_to_string(&actions_path)
        .with_context(|| format!("Cannot read {}", actions_path.display()))?;
    let actions: Vec<Action> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid action list in {}", actions_path.display()))?;

    let mut store = EditorStore::new(content, &CustomRegistry::default(), &config);
    let count = actions.len();
    let mut refused = 0;
    for action in actions {
        let name = action.name();
        if !store.submit(action) {
            warn!(action = name, "Action refused");
            refused += 1;
        }
    }
    info!(actions = count, refused, blocks = store.content().len(), "Applied actions");

    Ok(store.content().to_json()?)
}
