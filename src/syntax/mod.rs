//! Swift source front end.
//!
//! Parses source text with the tree-sitter Swift grammar and builds an arena
//! of type declarations with their property members and leading doc
//! comments. Function bodies and expressions are never inspected.

pub mod parser;
pub mod tree;

pub use parser::{node_text, parse, parse_swift};
pub use tree::{DeclId, DeclKind, DeclNode, DeclTree, Property};
