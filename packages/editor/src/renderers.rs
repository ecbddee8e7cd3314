//! # Block Renderers
//!
//! One `BlockRenderer` per block type, looked up by type tag. Built-in
//! renderers cover the standard page blocks; the custom registry can add new
//! types or replace built-ins.
//!
//! Renderers return `RenderError` instead of panicking. In editing mode each
//! block is wrapped in an error boundary, so a failing block shows a fallback
//! while its siblings keep rendering.

use crate::html::HtmlWriter;
use crate::registry::CustomRegistry;
use pagekit_model::{Block, BlockId};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("No renderer registered for block type: {0}")]
    UnknownBlockType(String),

    #[error("Block {block_type} is missing required field: {field}")]
    MissingField { block_type: String, field: String },

    #[error("Block {block_type} has invalid field {field}: expected {expected}")]
    InvalidField {
        block_type: String,
        field: String,
        expected: &'static str,
    },

    #[error("Render failed: {0}")]
    Failed(String),
}

/// Position of a block within its render group.
///
/// The header renders on its own (index 0); every other block is numbered
/// from 0 among the non-header blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDecorationProps {
    pub block_type: String,
    pub index: usize,
    pub block_id: Option<BlockId>,
}

pub trait BlockRenderer: fmt::Debug {
    fn render(&self, block: &Block, props: &BlockDecorationProps) -> Result<String, RenderError>;
}

fn required_str<'a>(block: &'a Block, field: &str) -> Result<&'a str, RenderError> {
    match block.field(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(RenderError::InvalidField {
            block_type: block.block_type.clone(),
            field: field.to_string(),
            expected: "string",
        }),
        None => Err(RenderError::MissingField {
            block_type: block.block_type.clone(),
            field: field.to_string(),
        }),
    }
}

fn required_array<'a>(block: &'a Block, field: &str) -> Result<&'a [Value], RenderError> {
    match block.field(field) {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(RenderError::InvalidField {
            block_type: block.block_type.clone(),
            field: field.to_string(),
            expected: "array",
        }),
        None => Err(RenderError::MissingField {
            block_type: block.block_type.clone(),
            field: field.to_string(),
        }),
    }
}

fn item_str<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    item.get(field).and_then(Value::as_str)
}

fn block_class(block: &Block) -> String {
    format!("pc-{}", block.block_type)
}

fn section_attributes<'a>(class: &'a str, props: &'a BlockDecorationProps) -> Vec<(&'a str, &'a str)> {
    let mut attributes = vec![("class", class)];
    if let Some(id) = &props.block_id {
        attributes.push(("data-block-id", id.as_str()));
    }
    attributes
}

/// Page header: required `title`, optional `description`
#[derive(Debug, Default)]
pub struct HeaderRenderer;

impl BlockRenderer for HeaderRenderer {
    fn render(&self, block: &Block, props: &BlockDecorationProps) -> Result<String, RenderError> {
        let title = required_str(block, "title")?;
        let class = block_class(block);

        let mut html = HtmlWriter::new();
        html.open("header", &section_attributes(&class, props))
            .element("h1", &[], title);
        if let Some(description) = block.str_field("description") {
            html.element("p", &[], description);
        }
        html.close("header");
        Ok(html.finish())
    }
}

/// Header carousel: required `slides`, each with a `title`
#[derive(Debug, Default)]
pub struct HeaderSliderRenderer;

impl BlockRenderer for HeaderSliderRenderer {
    fn render(&self, block: &Block, props: &BlockDecorationProps) -> Result<String, RenderError> {
        let slides = required_array(block, "slides")?;
        let class = block_class(block);

        let mut html = HtmlWriter::new();
        html.open("header", &section_attributes(&class, props));
        for (i, slide) in slides.iter().enumerate() {
            let title = item_str(slide, "title").ok_or_else(|| RenderError::MissingField {
                block_type: block.block_type.clone(),
                field: format!("slides[{}].title", i),
            })?;
            html.open("div", &[("class", "slide")]).element("h1", &[], title).close("div");
        }
        html.close("header");
        Ok(html.finish())
    }
}

/// Generic text block with optional `title` and `text`
#[derive(Debug)]
pub struct TextRenderer {
    block_type: String,
}

impl TextRenderer {
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
        }
    }
}

impl BlockRenderer for TextRenderer {
    fn render(&self, block: &Block, props: &BlockDecorationProps) -> Result<String, RenderError> {
        let class = format!("pc-{}", self.block_type);

        let mut html = HtmlWriter::new();
        html.open("section", &section_attributes(&class, props));
        if let Some(title) = block.str_field("title") {
            html.element("h2", &[], title);
        }
        if let Some(text) = block.str_field("text") {
            html.element("p", &[], text);
        }
        html.close("section");
        Ok(html.finish())
    }
}

/// Image or video with an optional `title`
#[derive(Debug, Default)]
pub struct MediaRenderer;

impl BlockRenderer for MediaRenderer {
    fn render(&self, block: &Block, props: &BlockDecorationProps) -> Result<String, RenderError> {
        let class = block_class(block);

        let mut html = HtmlWriter::new();
        html.open("section", &section_attributes(&class, props));
        if let Some(title) = block.str_field("title") {
            html.element("h2", &[], title);
        }
        if let Some(image) = block.str_field("image") {
            html.open("img", &[("src", image)]);
        } else if let Some(video) = block.str_field("video") {
            html.open("video", &[("src", video)]).close("video");
        } else {
            return Err(RenderError::MissingField {
                block_type: block.block_type.clone(),
                field: "image".to_string(),
            });
        }
        html.close("section");
        Ok(html.finish())
    }
}

/// FAQ list: required `items`, each with `title` and `text`
#[derive(Debug, Default)]
pub struct QuestionsRenderer;

impl BlockRenderer for QuestionsRenderer {
    fn render(&self, block: &Block, props: &BlockDecorationProps) -> Result<String, RenderError> {
        let items = required_array(block, "items")?;
        let class = block_class(block);

        let mut html = HtmlWriter::new();
        html.open("section", &section_attributes(&class, props)).open("dl", &[]);
        for item in items {
            html.element("dt", &[], item_str(item, "title").unwrap_or_default())
                .element("dd", &[], item_str(item, "text").unwrap_or_default());
        }
        html.close("dl").close("section");
        Ok(html.finish())
    }
}

/// Stands in for block types nobody registered
#[derive(Debug)]
pub struct MissingRenderer;

impl BlockRenderer for MissingRenderer {
    fn render(&self, block: &Block, _props: &BlockDecorationProps) -> Result<String, RenderError> {
        Err(RenderError::UnknownBlockType(block.block_type.clone()))
    }
}

/// Type tag → renderer lookup
#[derive(Debug, Clone)]
pub struct RendererRegistry {
    renderers: BTreeMap<String, Rc<dyn BlockRenderer>>,
}

impl RendererRegistry {
    pub fn builtin() -> Self {
        let mut renderers: BTreeMap<String, Rc<dyn BlockRenderer>> = BTreeMap::new();
        renderers.insert("header-block".into(), Rc::new(HeaderRenderer));
        renderers.insert("header-slider-block".into(), Rc::new(HeaderSliderRenderer));
        renderers.insert("media-block".into(), Rc::new(MediaRenderer));
        renderers.insert("question-block".into(), Rc::new(QuestionsRenderer));
        for text_type in ["content-layout-block", "banner-block"] {
            renderers.insert(text_type.into(), Rc::new(TextRenderer::new(text_type)));
        }
        Self { renderers }
    }

    /// Built-in renderers overlaid with the registry's custom blocks and headers
    pub fn with_custom(custom: &CustomRegistry) -> Self {
        let mut registry = Self::builtin();
        for (block_type, renderer) in custom.renderers() {
            registry.renderers.insert(block_type.to_string(), renderer.clone());
        }
        registry
    }

    pub fn get(&self, block_type: &str) -> Option<Rc<dyn BlockRenderer>> {
        self.renderers.get(block_type).cloned()
    }

    /// Renderer for the type, or one that reports the type as unknown
    pub fn resolve(&self, block_type: &str) -> Rc<dyn BlockRenderer> {
        self.get(block_type).unwrap_or_else(|| Rc::new(MissingRenderer))
    }

    pub fn block_types(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }
}
