#![forbid(unsafe_code)]

//! # fixturegen
//!
//! Generates Swift test fixture factories for annotated types.
//!
//! A `struct`, `final class` or `actor` preceded by a `/// @fixturable` doc
//! comment gets a `static func fixture(...) -> Self` whose parameters are
//! the type's stored properties, each defaulted to a value synthesized
//! from its declared type or to an override given in the marker.
//!
//! ## Features
//!
//! - **Swift front end**: the tree-sitter Swift grammar, no compiler needed
//! - **Type-driven defaults**: optionals, collections, tuples, closures and
//!   well-known Foundation types
//! - **Overrides**: `/// @fixturable(override: id = 42)`
//! - **Deterministic output**: fragments are sorted, so reruns are stable
//!
//! ## Example
//!
//! ```rust
//! use fixturegen::{FixtureGenerator, Preamble, SourceFile};
//!
//! let source = "/// @fixturable\nstruct Point {\n    let x: Int\n    let y: Int\n}\n";
//! let generator = FixtureGenerator::new(Preamble::default());
//! let document = generator.generate(&[SourceFile::new("Point.swift", source)]);
//!
//! assert!(document.contains("        x: Int = 0,\n        y: Int = 0\n"));
//! ```

pub mod annotation;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod syntax;
pub mod types;
pub mod visit;

// Re-exports
pub use annotation::{find_marker, parse_settings, Marker, OverrideError, Overrides};
pub use config::Config;
pub use error::{FixtureError, Result};
pub use pipeline::FixtureGenerator;
pub use render::{render_document, render_fragment, Preamble};
pub use scan::{find_sources, read_sources, SourceFile};
pub use syntax::{parse, DeclKind, DeclTree};
pub use types::{classify, default_expression, parameter_type, DeclaredType, Primitive};
pub use visit::{DeclarationVisitor, Field, MarkedDeclaration};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
