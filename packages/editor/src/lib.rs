//! # Pagekit Editor
//!
//! Block content editor core for Pagekit pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: PageContent, Block, BlockId          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: one editing session                  │
//! │  - Tag blocks with ids                      │
//! │  - Enforce a single header block            │
//! │  - Turn intents into reducer actions        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ reducer: (state, action) → state            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ view model → editor: layout, form pane,     │
//! │ decorators, error boundaries, on_change     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Content is owned by the editor**: hosts get copies through `on_change`
//! 2. **Invalid requests are no-ops**: bad indices never abort a session
//! 3. **Failures stay local**: a broken block renders a fallback, not an error
//! 4. **Renderers are untouched**: editing affordances come from decorators
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagekit_editor::{CustomRegistry, Editor, EditorConfig};
//! use pagekit_model::{Block, PageContent};
//!
//! let content = PageContent::from_json(&json)?;
//! let mut editor = Editor::new(content, CustomRegistry::default(), &EditorConfig::default())
//!     .on_change(|content| save(content));
//!
//! editor.add(Block::new("banner-block").with_field("title", "Sale"));
//! let html = editor.render();
//! ```

mod config;
mod decorators;
mod errors;
mod form;
mod headers;
mod html;
mod orchestrator;
mod reducer;
mod registry;
mod renderers;
mod store;
mod view_model;

pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use decorators::{
    apply_decorators, edit_controls, error_boundary, BoundaryCache, BoundaryKey, Decorator, EditControls,
    ErrorBoundary,
};
pub use errors::EditorError;
pub use form::{render_form, FieldKind, FormField, FormSchema};
pub use headers::{find_header_block, resolve_header_types, HeaderTypes, HEADER_BLOCK_TYPES};
pub use html::{escape_html, HtmlWriter};
pub use orchestrator::{ChangeListener, Editor};
pub use reducer::{reduce, Action, EditorState, ViewMode, DEFAULT_DOCUMENT_KEY};
pub use registry::CustomRegistry;
pub use renderers::{
    BlockDecorationProps, BlockRenderer, HeaderRenderer, HeaderSliderRenderer, MediaRenderer, MissingRenderer,
    QuestionsRenderer, RenderError, RendererRegistry, TextRenderer,
};
pub use store::{AddResult, EditorStore};
pub use view_model::{derive_view_model, EditBlockControl, EditBlockProps, ViewModel};

// Re-export the content model for convenience
pub use pagekit_model::{Block, BlockId, IdGenerator, PageContent};
