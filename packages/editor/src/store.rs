//! # Editor Store
//!
//! Owns the reducer state for one editing session and turns user intents
//! into actions.
//!
//! The store is where header uniqueness is enforced: a second header is
//! refused before it ever reaches the reducer, and the caller learns about
//! it through [`AddResult`].

use crate::config::EditorConfig;
use crate::headers::{find_header_block, resolve_header_types, HeaderTypes};
use crate::reducer::{reduce, Action, EditorState, ViewMode};
use crate::registry::CustomRegistry;
use crate::renderers::BlockDecorationProps;
use crate::view_model::{derive_view_model, EditBlockControl, EditBlockProps, ViewModel};
use pagekit_model::{Block, IdGenerator, PageContent};
use tracing::{debug, info, warn};

/// Outcome of [`EditorStore::on_add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddResult {
    Accepted,
    RejectedDuplicateHeader,
}

pub struct EditorStore {
    state: EditorState,
    header_types: HeaderTypes,
}

impl EditorStore {
    /// Start a session from caller content.
    ///
    /// Blocks get their editor ids here. A header found later in the sequence
    /// is moved to the front so positions match what gets rendered.
    pub fn new(content: PageContent, custom: &CustomRegistry, config: &EditorConfig) -> Self {
        let header_types = resolve_header_types(custom);
        let content = pin_header_first(content, &header_types);
        let ids = IdGenerator::new(&config.document_key);

        info!(
            document_key = %config.document_key,
            blocks = content.len(),
            header_types = header_types.len(),
            "Starting editor session"
        );

        let initial_active = if config.select_first_block { Some(0) } else { None };
        let state = EditorState::new(content, ids)
            .with_view_mode(config.initial_view_mode)
            .with_active_block(initial_active);

        Self { state, header_types }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn content(&self) -> &PageContent {
        &self.state.content
    }

    pub fn active_block_index(&self) -> Option<usize> {
        self.state.active_block_index
    }

    pub fn error_boundary_state(&self) -> u64 {
        self.state.error_boundary_state
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    pub fn header_types(&self) -> &HeaderTypes {
        &self.header_types
    }

    pub fn has_header(&self) -> bool {
        find_header_block(self.state.blocks(), &self.header_types).is_some()
    }

    /// Run an action through the reducer
    pub fn dispatch(&mut self, action: Action) {
        debug!(action = action.name(), "Dispatching");
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    /// Add a block next to the selection.
    ///
    /// Headers always go first and only one is allowed. Other blocks go right
    /// after the active block, or at the end when nothing is selected.
    pub fn on_add(&mut self, block: Block) -> AddResult {
        let is_header = self.header_types.is_header(&block.block_type);

        if is_header && self.has_header() {
            warn!(block_type = %block.block_type, "Page already has a header block, ignoring add");
            return AddResult::RejectedDuplicateHeader;
        }

        let index = if is_header {
            0
        } else {
            match self.state.active_block_index {
                Some(active) => active + 1,
                None => self.state.content.len(),
            }
        };

        self.dispatch(Action::AddBlock { block, index });
        AddResult::Accepted
    }

    /// Run an action from outside the editor's own controls.
    ///
    /// Applies the same header rules as [`on_add`](Self::on_add) and
    /// [`on_content_update`](Self::on_content_update): a header is only ever
    /// added at index 0 and only when there is none yet, nothing is moved or
    /// inserted ahead of an existing header, and the header is never copied.
    /// Returns false when the action was refused.
    pub fn submit(&mut self, action: Action) -> bool {
        let start = usize::from(self.has_header());

        match action {
            Action::AddBlock { block, index } if self.header_types.is_header(&block.block_type) => {
                if index != 0 {
                    debug!(index, "Header block always goes first");
                }
                self.on_add(block) == AddResult::Accepted
            }
            Action::AddBlock { block, index } => {
                self.dispatch(Action::AddBlock { block, index: index.max(start) });
                true
            }
            Action::CopyBlock(index) if start == 1 && index == 0 => {
                warn!("Refusing to copy the header block");
                false
            }
            Action::OrderBlock { old_index, new_index } if start == 1 && (old_index == 0 || new_index == 0) => {
                warn!(old_index, new_index, "Refusing to move blocks across the header");
                false
            }
            Action::UpdateContent(content) => {
                self.on_content_update(content);
                true
            }
            action => {
                self.dispatch(action);
                true
            }
        }
    }

    pub fn on_select(&mut self, index: Option<usize>) {
        self.dispatch(Action::SelectBlock(index));
    }

    pub fn on_content_update(&mut self, content: PageContent) {
        let content = pin_header_first(content, &self.header_types);
        self.dispatch(Action::UpdateContent(content));
    }

    pub fn on_view_mode_update(&mut self, view_mode: ViewMode) {
        self.dispatch(Action::UpdateViewMode(view_mode));
    }

    pub fn view_model(&self) -> ViewModel {
        derive_view_model(&self.state, &self.header_types)
    }

    pub fn inject_edit_block_props(&self, props: &BlockDecorationProps) -> EditBlockProps {
        self.view_model().inject_edit_block_props(props)
    }

    /// Press one of a block's edit controls.
    ///
    /// Returns false when the block does not offer that control.
    pub fn trigger(&mut self, props: &BlockDecorationProps, control: EditBlockControl) -> bool {
        let edit = self.inject_edit_block_props(props);
        match edit.actions.get(&control) {
            Some(action) => {
                self.dispatch(action.clone());
                true
            }
            None => {
                debug!(control = control.as_str(), index = edit.index, "Control not available");
                false
            }
        }
    }
}

/// Move the first header block to index 0 and drop any further headers,
/// keeping everything else in order
fn pin_header_first(mut content: PageContent, header_types: &HeaderTypes) -> PageContent {
    let mut header = None;
    let mut blocks = Vec::with_capacity(content.blocks.len());

    for (position, block) in content.blocks.into_iter().enumerate() {
        if !header_types.is_header(&block.block_type) {
            blocks.push(block);
        } else if header.is_none() {
            if position > 0 {
                debug!(position, "Moving header block to the front");
            }
            header = Some(block);
        } else {
            warn!(position, block_type = %block.block_type, "Dropping extra header block");
        }
    }

    if let Some(header) = header {
        blocks.insert(0, header);
    }
    content.blocks = blocks;
    content
}
