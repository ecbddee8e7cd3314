//! Header block resolution.
//!
//! A page has at most one header block. Which type tags count as headers is
//! the built-in set below plus whatever the custom registry declares.

use crate::registry::CustomRegistry;
use pagekit_model::Block;
use std::collections::BTreeSet;

/// Built-in header block types
pub const HEADER_BLOCK_TYPES: &[&str] = &["header-block", "header-slider-block"];

/// Resolved set of header type tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTypes(BTreeSet<String>);

impl HeaderTypes {
    pub fn builtin() -> Self {
        Self(HEADER_BLOCK_TYPES.iter().map(|t| t.to_string()).collect())
    }

    pub fn is_header(&self, block_type: &str) -> bool {
        self.0.contains(block_type)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Union of built-in header types and the registry's custom headers
pub fn resolve_header_types(custom: &CustomRegistry) -> HeaderTypes {
    let mut types = HeaderTypes::builtin();
    types.0.extend(custom.header_types().map(str::to_string));
    types
}

/// First block whose type is a header, if any
pub fn find_header_block<'a>(blocks: &'a [Block], header_types: &HeaderTypes) -> Option<&'a Block> {
    blocks.iter().find(|b| header_types.is_header(&b.block_type))
}
