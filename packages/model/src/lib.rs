//! Page content model shared by the editor and its hosts.
//!
//! A page is an ordered list of typed blocks. Blocks are plain JSON objects
//! with a `type` tag; the editor attaches a [`BlockId`] to each one when it
//! takes ownership of the content. Ids never leave the editor on the wire.

pub mod content;
pub mod error;
pub mod id_generator;
pub mod result;

pub use content::*;
pub use error::*;
pub use id_generator::*;
pub use result::*;
