//! # Page Content
//!
//! `PageContent` is the document handed between the editor and its host.
//! Each [`Block`] is a JSON object with a `type` tag and arbitrary
//! type-specific fields:
//!
//! ```json
//! { "blocks": [
//!     { "type": "header-block", "title": "Welcome" },
//!     { "type": "content-layout-block", "title": "About", "text": "..." }
//! ] }
//! ```
//!
//! The editor tags blocks with a [`BlockId`] on the way in. The id is skipped
//! by serde, so hosts persisting content never see it.

use crate::{BlockId, IdGenerator, ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// One typed unit of page content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Discriminator used to pick a renderer
    #[serde(rename = "type")]
    pub block_type: String,

    /// Type-specific fields, flattened on the wire
    #[serde(flatten)]
    pub data: Map<String, Value>,

    #[serde(skip)]
    id: Option<BlockId>,
}

impl Block {
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            data: Map::new(),
            id: None,
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// String field lookup, `None` for missing or non-string values
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&BlockId> {
        self.id.as_ref()
    }

    pub fn set_id(&mut self, id: BlockId) {
        self.id = Some(id);
    }

    /// Compare type and data, ignoring the editor id
    pub fn same_content(&self, other: &Block) -> bool {
        self.block_type == other.block_type && self.data == other.data
    }
}

/// Ordered block sequence making up a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl PageContent {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Parse content JSON, rejecting blocks with an empty type tag
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let content: PageContent = serde_json::from_str(json)?;
        if content.blocks.iter().any(|b| b.block_type.is_empty()) {
            return Err(ModelError::MissingType);
        }
        Ok(content)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Ids of all blocks in order (`None` for untagged blocks)
    pub fn block_ids(&self) -> Vec<Option<&BlockId>> {
        self.blocks.iter().map(Block::id).collect()
    }
}

/// Attach a unique editor id to every block.
///
/// Blocks that already carry an id keep it, unless an earlier block in the
/// sequence has the same id, in which case the later one gets a fresh id.
/// Applying this twice is the same as applying it once.
pub fn with_editor_ids(mut content: PageContent, ids: &mut IdGenerator) -> PageContent {
    let mut seen: HashSet<BlockId> = HashSet::with_capacity(content.blocks.len());

    for block in &mut content.blocks {
        let keep = match &block.id {
            Some(id) => seen.insert(id.clone()),
            None => false,
        };

        if !keep {
            let id = ids.new_id();
            seen.insert(id.clone());
            block.id = Some(id);
        }
    }

    content
}
