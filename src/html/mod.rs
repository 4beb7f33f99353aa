//! HTML scan
//!
//! Light tag scanning of the edited document, focused solely on what the
//! analyzer queries: which elements exist and which attributes they carry.
//! This is deliberately not a conforming HTML parser; malformed markup never
//! produces an error, it just yields fewer elements.

pub mod scanner;
pub mod tree;

pub use scanner::{scan, Attribute, Tag, Token};
pub use tree::{DocumentTree, Element};

/// Scan a document into a queryable tree of elements.
pub fn parse(content: &str) -> DocumentTree {
    DocumentTree::parse(content)
}
