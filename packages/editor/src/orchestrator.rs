//! # Editor
//!
//! Puts the store and the renderers together:
//!
//! ```text
//! ┌──────────────────────────── editor-layout ────────────────────────────┐
//! │ toolbar: view mode switch                                             │
//! │ left (editing only)          │ right                                   │
//! │  block list, active marked   │  preview inside a root error boundary   │
//! │  active block's form fields  │                                         │
//! │                              │   each block: renderer + decorators     │
//! │                              │  add-block buttons (editing only)       │
//! └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every change to the content is reported to the `on_change` listeners so
//! the host can persist it.

use crate::config::EditorConfig;
use crate::decorators::{apply_decorators, edit_controls, error_boundary, BoundaryCache, BoundaryKey, Decorator};
use crate::form::render_form;
use crate::html::HtmlWriter;
use crate::reducer::{Action, ViewMode};
use crate::registry::CustomRegistry;
use crate::renderers::{BlockDecorationProps, RenderError, RendererRegistry};
use crate::store::{AddResult, EditorStore};
use crate::view_model::{EditBlockControl, ViewModel};
use pagekit_model::{Block, PageContent};
use std::rc::Rc;
use tracing::{debug, instrument};

pub type ChangeListener = Box<dyn FnMut(&PageContent)>;

const ROOT_BOUNDARY: &str = "root";

pub struct Editor {
    store: EditorStore,
    custom: CustomRegistry,
    renderers: RendererRegistry,
    boundaries: BoundaryCache,
    listeners: Vec<ChangeListener>,
}

impl Editor {
    pub fn new(content: PageContent, custom: CustomRegistry, config: &EditorConfig) -> Self {
        let store = EditorStore::new(content, &custom, config);
        let renderers = RendererRegistry::with_custom(&custom);

        Self {
            store,
            custom,
            renderers,
            boundaries: BoundaryCache::new(),
            listeners: Vec::new(),
        }
    }

    /// Register a change listener. It is called once right away with the
    /// current content, then after every content change.
    pub fn on_change(mut self, mut listener: impl FnMut(&PageContent) + 'static) -> Self {
        listener(self.store.content());
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn store(&self) -> &EditorStore {
        &self.store
    }

    pub fn content(&self) -> &PageContent {
        self.store.content()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.store.view_mode()
    }

    pub fn view_model(&self) -> ViewModel {
        self.store.view_model()
    }

    pub fn add(&mut self, block: Block) -> AddResult {
        self.commit(|store| store.on_add(block))
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.commit(|store| store.on_select(index))
    }

    pub fn update_content(&mut self, content: PageContent) {
        self.commit(|store| store.on_content_update(content))
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.commit(|store| store.on_view_mode_update(view_mode))
    }

    /// Flip between editing and preview, as the layout's mode switch does
    pub fn toggle_view_mode(&mut self) {
        let next = match self.view_mode() {
            ViewMode::Editing => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Editing,
        };
        self.set_view_mode(next)
    }

    /// Set one block field from raw form input.
    ///
    /// The input is converted with the field's kind and the edited content
    /// goes through the regular content update. Returns false when the input
    /// is invalid or changes nothing.
    pub fn update_field(&mut self, index: usize, name: &str, raw: &str) -> bool {
        let Some(block) = self.content().blocks.get(index) else {
            debug!(index, "No block to edit");
            return false;
        };

        let kind = self
            .custom
            .schema()
            .fields_for(block)
            .into_iter()
            .find(|field| field.name == name)
            .map(|field| field.kind)
            .unwrap_or_default();
        let Some(value) = kind.parse(raw) else {
            debug!(index, field = name, ?kind, "Invalid field input");
            return false;
        };
        if block.field(name) == Some(&value) {
            return false;
        }

        let mut content = self.content().clone();
        content.blocks[index].data.insert(name.to_string(), value);
        self.update_content(content);
        true
    }

    pub fn dispatch(&mut self, action: Action) {
        self.commit(|store| store.dispatch(action))
    }

    pub fn trigger(&mut self, props: &BlockDecorationProps, control: EditBlockControl) -> bool {
        self.commit(|store| store.trigger(props, control))
    }

    /// Run a store operation and notify listeners if the content changed
    fn commit<R>(&mut self, operation: impl FnOnce(&mut EditorStore) -> R) -> R {
        let before = self.store.error_boundary_state();
        let result = operation(&mut self.store);
        let after = self.store.error_boundary_state();

        if after != before {
            self.boundaries.retain_generation(after);
            debug!(listeners = self.listeners.len(), generation = after, "Content changed");
            let content = self.store.content();
            for listener in &mut self.listeners {
                listener(content);
            }
        }
        result
    }

    /// Decorators for the current mode: the editor's own first, custom ones outside
    fn decorators(&self, view_model: &Rc<ViewModel>) -> Vec<Decorator> {
        let mut decorators = Vec::new();
        if view_model.is_editing() {
            decorators.push(edit_controls(view_model.clone()));
            decorators.push(error_boundary(
                self.boundaries.clone(),
                view_model.error_boundary_state,
            ));
        }
        decorators.extend(self.custom.decorators().iter().cloned());
        decorators
    }

    /// Full editor markup for the current state
    #[instrument(skip(self), fields(mode = ?self.view_mode(), blocks = self.content().len()))]
    pub fn render(&self) -> String {
        let view_model = Rc::new(self.store.view_model());
        let editing = view_model.is_editing();
        let (layout_class, switch_to, switch_label) = match view_model.view_mode {
            ViewMode::Editing => ("editor-layout editor-layout_mode_editing", "preview", "Preview"),
            ViewMode::Preview => ("editor-layout editor-layout_mode_preview", "editing", "Edit"),
        };

        let mut html = HtmlWriter::new();
        html.open("div", &[("class", layout_class)]);
        html.open("div", &[("class", "editor-layout__toolbar")])
            .element(
                "button",
                &[("class", "view-mode-switch"), ("data-view-mode", switch_to)],
                switch_label,
            )
            .close("div");
        if editing {
            html.open("div", &[("class", "editor-layout__left")])
                .raw(&render_form(&view_model, self.custom.schema()))
                .close("div");
        }
        html.open("div", &[("class", "editor-layout__right")])
            .raw(&self.render_page(&view_model));
        if editing {
            html.raw(&self.render_add_block());
        }
        html.close("div").close("div");
        html.finish()
    }

    /// Page preview only, without the editor chrome
    pub fn render_preview(&self) -> String {
        self.render_page(&Rc::new(self.store.view_model()))
    }

    fn render_page(&self, view_model: &Rc<ViewModel>) -> String {
        let decorators = self.decorators(view_model);
        let key = BoundaryKey {
            scope: ROOT_BOUNDARY.to_string(),
            generation: view_model.error_boundary_state,
        };

        self.boundaries.isolate(key, || -> Result<String, RenderError> {
            let mut html = HtmlWriter::new();
            html.open("main", &[("class", "page-content")]);
            for (block, props) in view_model.content.blocks.iter().zip(view_model.decoration_props()) {
                let renderer = apply_decorators(self.renderers.resolve(&block.block_type), &decorators);
                html.raw(&renderer.render(block, &props)?);
            }
            html.close("main");
            Ok(html.finish())
        })
    }

    fn render_add_block(&self) -> String {
        let mut html = HtmlWriter::new();
        html.open("div", &[("class", "add-block")]);
        for block_type in self.renderers.block_types() {
            html.element(
                "button",
                &[("class", "add-block__item"), ("data-block-type", block_type)],
                block_type,
            );
        }
        html.close("div");
        html.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldKind, FormField, FormSchema};
    use crate::renderers::BlockRenderer;
    use std::cell::RefCell;

    fn seen_title(sink: &Rc<RefCell<Vec<String>>>, content: &PageContent) {
        let title = content.blocks[0].str_field("title").unwrap_or_default().to_string();
        sink.borrow_mut().push(title);
    }

    fn text(name: &str) -> Block {
        Block::new("content-layout-block").with_field("title", name)
    }

    fn editor(blocks: Vec<Block>) -> Editor {
        Editor::new(PageContent::new(blocks), CustomRegistry::default(), &EditorConfig::default())
    }

    #[test]
    fn test_on_change_fires_on_mount_and_content_changes() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let sink = seen.clone();
        let mut editor = editor(vec![text("A")]).on_change(move |content| sink.borrow_mut().push(content.len()));

        editor.add(text("B"));
        editor.select(Some(0));
        editor.set_view_mode(ViewMode::Preview);
        editor.dispatch(Action::DeleteBlock(0));
        editor.dispatch(Action::DeleteBlock(7));

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn test_editing_layout_has_two_panes() {
        let html = editor(vec![text("A")]).render();

        assert!(html.starts_with(r#"<div class="editor-layout editor-layout_mode_editing">"#));
        assert!(html.contains(r#"<button class="view-mode-switch" data-view-mode="preview">Preview</button>"#));
        assert!(html.contains("editor-layout__left"));
        assert!(html.contains(r#"<li class="editor-form__item editor-form__item_active" data-index="0">content-layout-block</li>"#));
        assert!(html.contains("edit-block__controls"));
        assert!(html.contains(r#"data-block-type="media-block""#));
    }

    #[test]
    fn test_preview_layout_has_no_editing_affordances() {
        let mut editor = editor(vec![text("A")]);
        editor.set_view_mode(ViewMode::Preview);
        let html = editor.render();

        assert!(html.starts_with(r#"<div class="editor-layout editor-layout_mode_preview">"#));
        assert!(html.contains(r#"<button class="view-mode-switch" data-view-mode="editing">Edit</button>"#));
        assert!(!html.contains("editor-layout__left"));
        assert!(!html.contains("edit-block"));
        assert!(!html.contains("add-block"));
        assert!(html.contains("<h2>A</h2>"));
    }

    #[test]
    fn test_broken_block_does_not_break_siblings() {
        let editor = editor(vec![text("A"), Block::new("media-block"), text("C")]);
        let html = editor.render_preview();

        assert!(html.contains("<h2>A</h2>"));
        assert!(html.contains("<h2>C</h2>"));
        assert_eq!(html.matches("error-boundary").count(), 1);
        assert!(html.contains("missing required field: image"));
    }

    #[test]
    fn test_structural_edit_resets_block_boundary() {
        let mut editor = editor(vec![Block::new("media-block")]);
        assert!(editor.render_preview().contains("error-boundary"));

        let mut fixed = editor.content().clone();
        fixed.blocks[0].data.insert("image".into(), "/a.png".into());
        editor.update_content(fixed);

        let html = editor.render_preview();
        assert!(!html.contains("error-boundary"));
        assert!(html.contains(r#"<img src="/a.png">"#));
    }

    #[test]
    fn test_preview_failure_is_caught_by_root_boundary() {
        let mut editor = editor(vec![text("A"), Block::new("unknown-block")]);
        editor.set_view_mode(ViewMode::Preview);

        let html = editor.render_preview();
        assert!(html.starts_with(r#"<div class="error-boundary""#));
        assert!(html.contains("No renderer registered for block type: unknown-block"));

        editor.dispatch(Action::DeleteBlock(1));
        assert!(editor.render_preview().contains("<h2>A</h2>"));
    }

    #[test]
    fn test_custom_decorators_wrap_editor_decorators() {
        #[derive(Debug)]
        struct Frame(Rc<dyn BlockRenderer>);

        impl BlockRenderer for Frame {
            fn render(&self, block: &Block, props: &BlockDecorationProps) -> Result<String, RenderError> {
                Ok(format!("<figure>{}</figure>", self.0.render(block, props)?))
            }
        }

        let custom = CustomRegistry::default().with_decorator(Rc::new(
            |inner: Rc<dyn BlockRenderer>| -> Rc<dyn BlockRenderer> { Rc::new(Frame(inner)) },
        ));
        let editor = Editor::new(PageContent::new(vec![text("A")]), custom, &EditorConfig::default());

        let html = editor.render_preview();
        assert!(html.contains(r#"<figure><div class="edit-block edit-block_active""#));
    }

    #[test]
    fn test_toggle_view_mode() {
        let mut editor = editor(vec![text("A")]);

        editor.toggle_view_mode();
        assert_eq!(editor.view_mode(), ViewMode::Preview);
        editor.toggle_view_mode();
        assert_eq!(editor.view_mode(), ViewMode::Editing);
    }

    #[test]
    fn test_field_edit_reaches_listeners() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = seen.clone();
        let custom = CustomRegistry::default().with_schema(FormSchema::new().with_fields(
            "banner-block",
            vec![FormField::new("title", FieldKind::Text), FormField::new("width", FieldKind::Number)],
        ));
        let mut editor = Editor::new(
            PageContent::new(vec![Block::new("banner-block").with_field("title", "Sale")]),
            custom,
            &EditorConfig::default(),
        )
        .on_change(move |content| seen_title(&sink, content));

        let html = editor.render();
        assert!(html.contains(r#"<input type="text" name="title" value="Sale">"#));
        assert!(html.contains(r#"<input type="number" name="width" value="">"#));

        assert!(editor.update_field(0, "title", "Big sale"));
        assert!(editor.update_field(0, "width", "640"));
        assert!(!editor.update_field(0, "width", "wide"));
        assert!(!editor.update_field(0, "title", "Big sale"));
        assert!(!editor.update_field(3, "title", "Nope"));

        assert_eq!(*seen.borrow(), vec!["Sale", "Big sale", "Big sale"]);
        assert_eq!(editor.content().blocks[0].field("width"), Some(&serde_json::Value::from(640)));
        assert!(editor.content().blocks[0].id().is_some());
        assert!(editor.render().contains(r#"value="Big sale""#));
    }

    #[test]
    fn test_field_edit_without_schema_uses_existing_fields() {
        let mut editor = editor(vec![text("A")]);

        assert!(editor.render().contains(r#"<input type="text" name="title" value="A">"#));
        assert!(editor.update_field(0, "title", "B"));
        assert!(editor.render_preview().contains("<h2>B</h2>"));
    }

    #[test]
    fn test_trigger_copy_through_editor() {
        let mut editor = editor(vec![text("A")]);
        let props = editor.view_model().decoration_props().remove(0);

        assert!(editor.trigger(&props, EditBlockControl::Copy));
        assert_eq!(editor.content().len(), 2);
        assert_eq!(editor.store().active_block_index(), Some(1));
    }
}
