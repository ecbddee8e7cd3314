pub mod apply;
pub mod init;
pub mod render;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use pagekit_editor::EditorConfig;
use pagekit_model::PageContent;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a user-supplied path against the working directory
pub(crate) fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

pub(crate) fn read_content(cwd: &Path, path: &Path) -> Result<PageContent> {
    let path = resolve(cwd, path);
    let json = fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))?;
    PageContent::from_json(&json).with_context(|| format!("Invalid page content in {}", path.display()))
}

/// Explicit config file, else pagekit.config.json in the working directory
pub(crate) fn load_config(cwd: &Path, path: Option<&Path>) -> Result<EditorConfig> {
    let config = match path {
        Some(path) => {
            let path = resolve(cwd, path);
            EditorConfig::from_file(&path).with_context(|| format!("Cannot load config {}", path.display()))?
        }
        None => EditorConfig::load(cwd)?,
    };
    Ok(config)
}
