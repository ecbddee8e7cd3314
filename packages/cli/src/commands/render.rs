use super::{load_config, read_content, resolve};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use pagekit_editor::{CustomRegistry, Editor, FormSchema, ViewMode};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    Editing,
    Preview,
}

impl From<Mode> for ViewMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Editing => ViewMode::Editing,
            Mode::Preview => ViewMode::Preview,
        }
    }
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page content JSON file
    #[arg(short, long)]
    pub content: PathBuf,

    /// View mode (defaults to the config's initial view mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Config file (defaults to pagekit.config.json if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Form schema JSON: fields per block type
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Only the page, without the editor layout
    #[arg(long)]
    pub page_only: bool,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    println!("{}", render_to_html(&args, cwd)?);
    Ok(())
}

pub(crate) fn render_to_html(args: &RenderArgs, cwd: &Path) -> Result<String> {
    let mut config = load_config(cwd, args.config.as_deref())?;
    if let Some(mode) = args.mode {
        config.initial_view_mode = mode.into();
    }

    let mut custom = CustomRegistry::default();
    if let Some(schema) = &args.schema {
        let path = resolve(cwd, schema);
        let json = fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))?;
        let schema = FormSchema::from_json(&json).with_context(|| format!("Invalid form schema in {}", path.display()))?;
        custom = custom.with_schema(schema);
    }

    let editor = Editor::new(read_content(cwd, &args.content)?, custom, &config);
    Ok(if args.page_only {
        editor.render_preview()
    } else {
        editor.render()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(dir: &Path) {
        fs::write(
            dir.join("page.json"),
            r#"{ "blocks": [
                { "type": "header-block", "title": "Hello" },
                { "type": "media-block" }
            ] }"#,
        )
        .unwrap();
    }

    #[test]
    fn test_render_editing_layout() {
        let dir = tempfile::tempdir().unwrap();
        page(dir.path());

        let args = RenderArgs {
            content: "page.json".into(),
            mode: None,
            config: None,
            schema: None,
            page_only: false,
        };
        let html = render_to_html(&args, dir.path()).unwrap();

        assert!(html.contains("editor-layout_mode_editing"));
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("error-boundary"));
    }

    #[test]
    fn test_render_mode_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        page(dir.path());
        fs::write(dir.path().join("custom.json"), r#"{ "initialViewMode": "editing" }"#).unwrap();

        let args = RenderArgs {
            content: "page.json".into(),
            mode: Some(Mode::Preview),
            config: Some("custom.json".into()),
            schema: None,
            page_only: false,
        };
        let html = render_to_html(&args, dir.path()).unwrap();

        assert!(html.contains("editor-layout_mode_preview"));
        assert!(!html.contains("edit-block"));
    }

    #[test]
    fn test_render_with_form_schema() {
        let dir = tempfile::tempdir().unwrap();
        page(dir.path());
        fs::write(
            dir.path().join("schema.json"),
            r#"{ "header-block": [{ "name": "subtitle", "label": "Subtitle", "kind": "multiline" }] }"#,
        )
        .unwrap();

        let args = RenderArgs {
            content: "page.json".into(),
            mode: None,
            config: None,
            schema: Some("schema.json".into()),
            page_only: false,
        };
        let html = render_to_html(&args, dir.path()).unwrap();

        assert!(html.contains(r#"<span class="editor-form__label">Subtitle</span><textarea name="subtitle"></textarea>"#));
        assert!(!html.contains(r#"name="title""#));
    }

    #[test]
    fn test_missing_content_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = RenderArgs {
            content: "nope.json".into(),
            mode: None,
            config: None,
            schema: None,
            page_only: true,
        };
        assert!(render_to_html(&args, dir.path()).is_err());
    }
}
