//! # Editor Reducer
//!
//! Pure state transitions for page content.
//!
//! ## Design Principles
//!
//! 1. **Total**: every `Action` maps a state to a state, nothing panics
//! 2. **Tolerant**: an action whose indices are out of range is a no-op
//! 3. **Deterministic**: block ids come from the generator stored in the state
//!
//! ## Error boundary key
//!
//! Structural actions (add, delete, copy, order, content update) increment
//! `error_boundary_state`. Renderers key their error boundaries on it, so a
//! block that failed to render gets another chance after the next edit.
//! Selection and view mode changes leave it alone.

use pagekit_model::{with_editor_ids, Block, IdGenerator, PageContent};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Document key used when the caller does not name the page
pub const DEFAULT_DOCUMENT_KEY: &str = "page";

/// Whether editing affordances are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Editing,
    Preview,
}

/// State owned by the reducer
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub content: PageContent,

    /// Selected block; `None` means nothing is selected
    pub active_block_index: Option<usize>,

    /// Re-mount key for error boundaries
    pub error_boundary_state: u64,

    pub view_mode: ViewMode,

    ids: IdGenerator,
}

impl EditorState {
    /// Create state from caller content, tagging every block with an id.
    ///
    /// The first block is selected when there is one.
    pub fn new(content: PageContent, mut ids: IdGenerator) -> Self {
        let content = with_editor_ids(content, &mut ids);
        let active_block_index = clamp_active(Some(0), content.len());

        Self {
            content,
            active_block_index,
            error_boundary_state: 0,
            view_mode: ViewMode::Editing,
            ids,
        }
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn with_active_block(mut self, index: Option<usize>) -> Self {
        self.active_block_index = clamp_active(index, self.content.len());
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.content.blocks
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    fn bump_error_boundary(&mut self) {
        self.error_boundary_state += 1;
    }

    /// Give `block` an id unless it already has one not used in the content
    fn ensure_fresh_id(&mut self, block: &mut Block) {
        let taken = match block.id() {
            Some(id) => self.content.blocks.iter().any(|b| b.id() == Some(id)),
            None => true,
        };
        if taken {
            block.set_id(self.ids.new_id());
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(PageContent::default(), IdGenerator::new(DEFAULT_DOCUMENT_KEY))
    }
}

/// Content mutations and selection changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Insert a block at index, shifting later blocks right
    AddBlock { block: Block, index: usize },

    /// Remove the block at index
    DeleteBlock(usize),

    /// Duplicate the block at index right after itself
    CopyBlock(usize),

    /// Move a block, keeping the relative order of the others
    #[serde(rename_all = "camelCase")]
    OrderBlock { old_index: usize, new_index: usize },

    /// Change the selection without touching content
    SelectBlock(Option<usize>),

    /// Replace the whole content
    UpdateContent(PageContent),

    /// Switch between editing and preview
    UpdateViewMode(ViewMode),
}

impl Action {
    /// Whether applying this action changes content structurally
    pub fn is_structural(&self) -> bool {
        !matches!(self, Action::SelectBlock(_) | Action::UpdateViewMode(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::AddBlock { .. } => "ADD_BLOCK",
            Action::DeleteBlock(_) => "DELETE_BLOCK",
            Action::CopyBlock(_) => "COPY_BLOCK",
            Action::OrderBlock { .. } => "ORDER_BLOCK",
            Action::SelectBlock(_) => "SELECT_BLOCK",
            Action::UpdateContent(_) => "UPDATE_CONTENT",
            Action::UpdateViewMode(_) => "UPDATE_VIEW_MODE",
        }
    }
}

/// Apply an action to the state.
///
/// Returns the input state untouched when the action's preconditions fail.
pub fn reduce(mut state: EditorState, action: Action) -> EditorState {
    let len = state.content.len();

    match action {
        Action::AddBlock { mut block, index } => {
            if index > len {
                debug!(index, len, "ADD_BLOCK index out of range, ignoring");
                return state;
            }
            state.ensure_fresh_id(&mut block);
            state.content.blocks.insert(index, block);
            state.active_block_index = Some(index);
            state.bump_error_boundary();
        }

        Action::DeleteBlock(index) => {
            if index >= len {
                debug!(index, len, "DELETE_BLOCK index out of range, ignoring");
                return state;
            }
            state.content.blocks.remove(index);
            state.active_block_index = match state.active_block_index {
                Some(active) if active > index => Some(active - 1),
                Some(active) if active == index => clamp_active(Some(index), len - 1),
                other => other,
            };
            state.bump_error_boundary();
        }

        Action::CopyBlock(index) => {
            if index >= len {
                debug!(index, len, "COPY_BLOCK index out of range, ignoring");
                return state;
            }
            let mut copy = state.content.blocks[index].clone();
            copy.set_id(state.ids.new_id());
            state.content.blocks.insert(index + 1, copy);
            state.active_block_index = Some(index + 1);
            state.bump_error_boundary();
        }

        Action::OrderBlock { old_index, new_index } => {
            if old_index >= len || new_index >= len || old_index == new_index {
                debug!(old_index, new_index, len, "ORDER_BLOCK indices invalid, ignoring");
                return state;
            }
            let block = state.content.blocks.remove(old_index);
            state.content.blocks.insert(new_index, block);
            state.active_block_index = state
                .active_block_index
                .map(|active| track_moved(active, old_index, new_index));
            state.bump_error_boundary();
        }

        Action::SelectBlock(index) => {
            if matches!(index, Some(i) if i >= len) {
                debug!(?index, len, "SELECT_BLOCK index out of range, ignoring");
                return state;
            }
            state.active_block_index = index;
        }

        Action::UpdateContent(content) => {
            state.content = with_editor_ids(content, &mut state.ids);
            state.active_block_index = clamp_active(state.active_block_index, state.content.len());
            state.bump_error_boundary();
        }

        Action::UpdateViewMode(view_mode) => {
            state.view_mode = view_mode;
        }
    }

    state
}

/// Keep an active index inside `0..len`, `None` when there are no blocks
fn clamp_active(active: Option<usize>, len: usize) -> Option<usize> {
    match active {
        Some(_) if len == 0 => None,
        Some(index) => Some(index.min(len - 1)),
        None => None,
    }
}

/// Where the block at `active` ends up after moving `old` to `new`
fn track_moved(active: usize, old: usize, new: usize) -> usize {
    if active == old {
        new
    } else if old < active && active <= new {
        active - 1
    } else if new <= active && active < old {
        active + 1
    } else {
        active
    }
}
