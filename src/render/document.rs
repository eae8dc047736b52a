//! Generated document assembly.

use serde::{Deserialize, Serialize};

/// Banner at the top of every generated document.
pub const GENERATED_BANNER: &str = "///\n///  @Generated by fixturegen\n///\n";

/// Import section of the generated document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preamble {
    /// Modules imported after Foundation, in order
    #[serde(default)]
    pub additional_imports: Vec<String>,
    /// Module imported with `@testable`
    #[serde(default)]
    pub testable_import: Option<String>,
}

impl Preamble {
    pub fn new(additional_imports: Vec<String>, testable_import: Option<String>) -> Self {
        Self {
            additional_imports,
            testable_import,
        }
    }

    fn render(&self) -> String {
        let mut out = String::from(GENERATED_BANNER);
        out.push_str("\nimport Foundation\n");
        for module in &self.additional_imports {
            out.push_str(&format!("import {module}\n"));
        }
        if let Some(module) = &self.testable_import {
            out.push_str(&format!("\n@testable import {module}\n"));
        }
        out
    }
}

/// Assemble the full document.
///
/// Fragments are sorted by their text, so the result does not depend on the
/// order in which sources were read.
pub fn render_document(preamble: &Preamble, mut fragments: Vec<String>) -> String {
    fragments.sort();
    let mut out = preamble.render();
    out.push_str("\n\n");
    out.push_str(&fragments.join("\n\n"));
    out
}
