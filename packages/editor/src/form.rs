//! # Block Form
//!
//! The left editor pane: the block list plus a property form for the active
//! block. Fields come from the block type's schema when one is registered,
//! otherwise from the scalar fields already present on the block.
//!
//! Schemas use the same JSON shape hosts store next to their pages:
//!
//! ```json
//! { "banner-block": [
//!     { "name": "title", "label": "Title" },
//!     { "name": "text", "kind": "multiline" }
//! ] }
//! ```

use crate::html::HtmlWriter;
use crate::view_model::ViewModel;
use pagekit_model::Block;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Multiline,
    Number,
    Checkbox,
}

impl FieldKind {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::String(_) => Some(FieldKind::Text),
            Value::Number(_) => Some(FieldKind::Number),
            Value::Bool(_) => Some(FieldKind::Checkbox),
            _ => None,
        }
    }

    /// Convert raw input text into the JSON value stored on the block
    pub fn parse(&self, raw: &str) -> Option<Value> {
        match self {
            FieldKind::Text | FieldKind::Multiline => Some(Value::String(raw.to_string())),
            FieldKind::Number => {
                let raw = raw.trim();
                raw.parse::<i64>()
                    .map(Value::from)
                    .ok()
                    .or_else(|| raw.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number))
            }
            FieldKind::Checkbox => match raw {
                "true" | "on" | "checked" => Some(Value::Bool(true)),
                "false" | "off" | "" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }
}

/// One editable property of a block
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormField {
    pub name: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub kind: FieldKind,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Form fields per block type
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FormSchema(BTreeMap<String, Vec<FormField>>);

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_fields(mut self, block_type: impl Into<String>, fields: Vec<FormField>) -> Self {
        self.0.insert(block_type.into(), fields);
        self
    }

    pub fn get(&self, block_type: &str) -> Option<&[FormField]> {
        self.0.get(block_type).map(Vec::as_slice)
    }

    /// Fields to edit for a block: its schema, or its scalar data fields
    pub fn fields_for(&self, block: &Block) -> Vec<FormField> {
        match self.get(&block.block_type) {
            Some(fields) => fields.to_vec(),
            None => block
                .data
                .iter()
                .filter_map(|(name, value)| FieldKind::of(value).map(|kind| FormField::new(name.as_str(), kind)))
                .collect(),
        }
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Block list, then the active block's fields
pub fn render_form(view_model: &ViewModel, schema: &FormSchema) -> String {
    let mut html = HtmlWriter::new();
    html.open("ol", &[("class", "editor-form")]);
    for (index, block) in view_model.content.blocks.iter().enumerate() {
        let class = if view_model.active_block_index == Some(index) {
            "editor-form__item editor-form__item_active"
        } else {
            "editor-form__item"
        };
        let index = index.to_string();
        html.element(
            "li",
            &[("class", class), ("data-index", index.as_str())],
            &block.block_type,
        );
    }
    html.close("ol");

    let active = view_model
        .active_block_index
        .and_then(|index| view_model.content.blocks.get(index).map(|block| (index, block)));
    if let Some((index, block)) = active {
        html.raw(&render_fields(index, block, schema));
    }
    html.finish()
}

fn render_fields(index: usize, block: &Block, schema: &FormSchema) -> String {
    let index = index.to_string();
    let mut html = HtmlWriter::new();
    html.open(
        "form",
        &[
            ("class", "editor-form__fields"),
            ("data-index", index.as_str()),
            ("data-block-type", block.block_type.as_str()),
        ],
    );

    for field in schema.fields_for(block) {
        let value = display_value(block.field(&field.name));
        let name = field.name.as_str();

        html.open("label", &[("class", "editor-form__field")])
            .element("span", &[("class", "editor-form__label")], field.label());
        match field.kind {
            FieldKind::Text => {
                html.open("input", &[("type", "text"), ("name", name), ("value", value.as_str())]);
            }
            FieldKind::Number => {
                html.open("input", &[("type", "number"), ("name", name), ("value", value.as_str())]);
            }
            FieldKind::Multiline => {
                html.element("textarea", &[("name", name)], &value);
            }
            FieldKind::Checkbox if value == "true" => {
                html.open("input", &[("type", "checkbox"), ("name", name), ("checked", "checked")]);
            }
            FieldKind::Checkbox => {
                html.open("input", &[("type", "checkbox"), ("name", name)]);
            }
        }
        html.close("label");
    }

    html.close("form");
    html.finish()
}
