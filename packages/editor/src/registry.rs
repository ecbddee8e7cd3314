//! Caller-supplied extensions: extra block renderers, extra header types,
//! decorators wrapped around every block and the property form schema.

use crate::decorators::Decorator;
use crate::form::FormSchema;
use crate::renderers::BlockRenderer;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct CustomRegistry {
    blocks: BTreeMap<String, Rc<dyn BlockRenderer>>,
    headers: BTreeMap<String, Rc<dyn BlockRenderer>>,
    decorators: Vec<Decorator>,
    schema: FormSchema,
}

impl CustomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body block renderer
    pub fn with_block(mut self, block_type: impl Into<String>, renderer: Rc<dyn BlockRenderer>) -> Self {
        self.blocks.insert(block_type.into(), renderer);
        self
    }

    /// Register a renderer whose type counts as the page header
    pub fn with_header(mut self, block_type: impl Into<String>, renderer: Rc<dyn BlockRenderer>) -> Self {
        self.headers.insert(block_type.into(), renderer);
        self
    }

    /// Add a decorator applied outside the editor's own decorators
    pub fn with_decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Fields offered by the editor form, per block type
    pub fn with_schema(mut self, schema: FormSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn header_types(&self) -> impl Iterator<Item = &str> {
        self.headers.keys().map(String::as_str)
    }

    /// All custom renderers, body blocks first then headers
    pub fn renderers(&self) -> impl Iterator<Item = (&str, &Rc<dyn BlockRenderer>)> {
        self.blocks
            .iter()
            .chain(self.headers.iter())
            .map(|(block_type, renderer)| (block_type.as_str(), renderer))
    }

    pub fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }
}

impl fmt::Debug for CustomRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRegistry")
            .field("blocks", &self.blocks.keys().collect::<Vec<_>>())
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("decorators", &self.decorators.len())
            .field("schema", &self.schema)
            .finish()
    }
}
