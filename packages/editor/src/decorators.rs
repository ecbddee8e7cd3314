//! # Block Decorators
//!
//! A decorator takes a renderer and returns a renderer that wraps it. The
//! editor stacks two of them around every block in editing mode:
//!
//! 1. `EditControls` adds the control overlay built from the view model
//! 2. `ErrorBoundary` contains a render failure to the block it came from
//!
//! Decorators compose left to right, so the first one in the list sits
//! closest to the block.

use crate::html::HtmlWriter;
use crate::renderers::{BlockDecorationProps, BlockRenderer, RenderError};
use crate::view_model::ViewModel;
use pagekit_model::Block;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::warn;

pub type Decorator = Rc<dyn Fn(Rc<dyn BlockRenderer>) -> Rc<dyn BlockRenderer>>;

/// Wrap `renderer` in each decorator in turn
pub fn apply_decorators(renderer: Rc<dyn BlockRenderer>, decorators: &[Decorator]) -> Rc<dyn BlockRenderer> {
    decorators
        .iter()
        .fold(renderer, |inner, decorate| decorate(inner))
}

/// Overlay with the block's edit controls
#[derive(Debug)]
pub struct EditControls {
    inner: Rc<dyn BlockRenderer>,
    view_model: Rc<ViewModel>,
}

impl EditControls {
    pub fn new(inner: Rc<dyn BlockRenderer>, view_model: Rc<ViewModel>) -> Self {
        Self { inner, view_model }
    }
}

impl BlockRenderer for EditControls {
    fn render(&self, block: &Block, props: &BlockDecorationProps) -> Result<String, RenderError> {
        let body = self.inner.render(block, props)?;
        let edit = self.view_model.inject_edit_block_props(props);

        let mut class = String::from("edit-block");
        if edit.is_active {
            class.push_str(" edit-block_active");
        }
        if edit.is_header {
            class.push_str(" edit-block_header");
        }
        let index = edit.index.to_string();

        let mut html = HtmlWriter::new();
        html.open("div", &[("class", class.as_str()), ("data-index", index.as_str())])
            .open("div", &[("class", "edit-block__controls")]);
        for control in edit.actions.keys() {
            html.element(
                "button",
                &[("class", "edit-block__control"), ("data-control", control.as_str())],
                "",
            );
        }
        html.close("div").raw(&body).close("div");
        Ok(html.finish())
    }
}

pub fn edit_controls(view_model: Rc<ViewModel>) -> Decorator {
    Rc::new(move |inner: Rc<dyn BlockRenderer>| -> Rc<dyn BlockRenderer> {
        Rc::new(EditControls::new(inner, view_model.clone()))
    })
}

/// Identity of one error boundary instance.
///
/// A boundary is "remounted" whenever its generation changes, which clears
/// any failure it caught before.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundaryKey {
    pub scope: String,
    pub generation: u64,
}

/// Failures caught by error boundaries, shared across renders
#[derive(Clone, Default)]
pub struct BoundaryCache(Rc<RefCell<HashMap<BoundaryKey, RenderError>>>);

impl BoundaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure(&self, key: &BoundaryKey) -> Option<RenderError> {
        self.0.borrow().get(key).cloned()
    }

    fn record(&self, key: BoundaryKey, error: RenderError) {
        self.0.borrow_mut().insert(key, error);
    }

    /// Forget boundaries from older generations
    pub fn retain_generation(&self, generation: u64) {
        self.0.borrow_mut().retain(|key, _| key.generation == generation);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Run `render` inside the boundary identified by `key`.
    ///
    /// Once the boundary has caught a failure it keeps showing the fallback
    /// without calling `render` again until the key changes.
    pub fn isolate(&self, key: BoundaryKey, render: impl FnOnce() -> Result<String, RenderError>) -> String {
        if let Some(error) = self.failure(&key) {
            return fallback(&error);
        }

        match render() {
            Ok(html) => html,
            Err(error) => {
                warn!(scope = %key.scope, generation = key.generation, error = %error, "Render failed, showing fallback");
                let html = fallback(&error);
                self.record(key, error);
                html
            }
        }
    }
}

impl fmt::Debug for BoundaryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoundaryCache").field(&self.len()).finish()
    }
}

fn fallback(error: &RenderError) -> String {
    let message = error.to_string();
    let mut html = HtmlWriter::new();
    html.element(
        "div",
        &[("class", "error-boundary"), ("data-error", message.as_str())],
        "This block failed to render",
    );
    html.finish()
}

/// Per-block error isolation keyed by block id and generation
#[derive(Debug)]
pub struct ErrorBoundary {
    inner: Rc<dyn BlockRenderer>,
    cache: BoundaryCache,
    generation: u64,
}

impl ErrorBoundary {
    pub fn new(inner: Rc<dyn BlockRenderer>, cache: BoundaryCache, generation: u64) -> Self {
        Self { inner, cache, generation }
    }
}

impl BlockRenderer for ErrorBoundary {
    fn render(&self, block: &Block, props: &BlockDecorationProps) -> Result<String, RenderError> {
        let scope = match &props.block_id {
            Some(id) => id.to_string(),
            None => format!("{}#{}", props.block_type, props.index),
        };
        let key = BoundaryKey {
            scope,
            generation: self.generation,
        };
        Ok(self.cache.isolate(key, || self.inner.render(block, props)))
    }
}

pub fn error_boundary(cache: BoundaryCache, generation: u64) -> Decorator {
    Rc::new(move |inner: Rc<dyn BlockRenderer>| -> Rc<dyn BlockRenderer> {
        Rc::new(ErrorBoundary::new(inner, cache.clone(), generation))
    })
}
