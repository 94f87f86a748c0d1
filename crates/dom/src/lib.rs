//! Document tree model.
//!
//! The renderer consumes an immutable tree of named elements and text leaves.
//! This crate builds that tree from XML with `roxmltree` and provides the
//! read-only accessors the renderers need.

mod error;
mod node;
mod parse;

pub use error::DomError;
pub use node::{Element, Node, TEXT_NODE_NAME};
pub use parse::{parse_document, parse_file};
