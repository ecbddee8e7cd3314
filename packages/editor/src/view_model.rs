//! Derived view of the editor state.
//!
//! `derive_view_model` is a pure projection recomputed after every
//! transition. It answers the questions a renderer asks about a block: where
//! it really sits in the content, whether it is selected and which edit
//! controls it offers.

use crate::headers::{find_header_block, HeaderTypes};
use crate::reducer::{Action, EditorState, ViewMode};
use crate::renderers::BlockDecorationProps;
use pagekit_model::PageContent;
use serde::Serialize;
use std::collections::BTreeMap;

/// Edit controls shown next to a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditBlockControl {
    Up,
    Down,
    Copy,
    Delete,
}

impl EditBlockControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditBlockControl::Up => "up",
            EditBlockControl::Down => "down",
            EditBlockControl::Copy => "copy",
            EditBlockControl::Delete => "delete",
        }
    }
}

/// Props injected into a rendered block by the edit controls decorator
#[derive(Debug, Clone, PartialEq)]
pub struct EditBlockProps {
    /// Index of the block in the content sequence
    pub index: usize,
    pub is_header: bool,
    pub is_active: bool,
    /// Available controls and the action each one dispatches
    pub actions: BTreeMap<EditBlockControl, Action>,
    /// Action dispatched when the block is clicked
    pub select: Action,
}

impl EditBlockProps {
    pub fn has(&self, control: EditBlockControl) -> bool {
        self.actions.contains_key(&control)
    }

    pub fn action(&self, control: EditBlockControl) -> Option<&Action> {
        self.actions.get(&control)
    }
}

/// Snapshot of everything a renderer needs from the editor
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub content: PageContent,
    pub active_block_index: Option<usize>,
    pub error_boundary_state: u64,
    pub view_mode: ViewMode,
    pub header_types: HeaderTypes,
    pub has_header: bool,
}

pub fn derive_view_model(state: &EditorState, header_types: &HeaderTypes) -> ViewModel {
    ViewModel {
        content: state.content.clone(),
        active_block_index: state.active_block_index,
        error_boundary_state: state.error_boundary_state,
        view_mode: state.view_mode,
        header_types: header_types.clone(),
        has_header: find_header_block(state.blocks(), header_types).is_some(),
    }
}

impl ViewModel {
    pub fn is_editing(&self) -> bool {
        self.view_mode == ViewMode::Editing
    }

    pub fn is_header(&self, block_type: &str) -> bool {
        self.header_types.is_header(block_type)
    }

    /// Index of the first non-header block
    pub fn ordered_blocks_start(&self) -> usize {
        usize::from(self.has_header)
    }

    /// Map a render-group position to the block's index in the content
    pub fn true_index(&self, props: &BlockDecorationProps) -> usize {
        if self.is_header(&props.block_type) {
            0
        } else {
            props.index + self.ordered_blocks_start()
        }
    }

    pub fn inject_edit_block_props(&self, props: &BlockDecorationProps) -> EditBlockProps {
        let start = self.ordered_blocks_start();
        let is_header = self.is_header(&props.block_type);
        let index = self.true_index(props);

        let mut actions = BTreeMap::new();
        actions.insert(EditBlockControl::Delete, Action::DeleteBlock(index));

        if !is_header {
            actions.insert(EditBlockControl::Copy, Action::CopyBlock(index));

            if index > start {
                actions.insert(
                    EditBlockControl::Up,
                    Action::OrderBlock { old_index: index, new_index: index - 1 },
                );
            }

            if index + 1 < self.content.len() {
                actions.insert(
                    EditBlockControl::Down,
                    Action::OrderBlock { old_index: index, new_index: index + 1 },
                );
            }
        }

        EditBlockProps {
            index,
            is_header,
            is_active: self.active_block_index == Some(index),
            actions,
            select: Action::SelectBlock(Some(index)),
        }
    }

    /// Decoration props for every block, in content order
    pub fn decoration_props(&self) -> Vec<BlockDecorationProps> {
        let mut ordered = 0;
        self.content
            .blocks
            .iter()
            .map(|block| {
                let index = if self.is_header(&block.block_type) {
                    0
                } else {
                    ordered += 1;
                    ordered - 1
                };
                BlockDecorationProps {
                    block_type: block.block_type.clone(),
                    index,
                    block_id: block.id().cloned(),
                }
            })
            .collect()
    }
}
