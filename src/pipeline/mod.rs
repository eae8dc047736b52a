//! End-to-end generation.
//!
//! Each source is parsed and visited independently; the rendered fragments
//! are then sorted, so the document is identical for any source order.

use crate::render::{render_document, render_fragment, Preamble};
use crate::scan::SourceFile;
use crate::syntax::parse;
use crate::visit::{DeclarationVisitor, MarkedDeclaration};

/// Generates the fixture document for a set of sources.
#[derive(Debug, Clone, Default)]
pub struct FixtureGenerator {
    preamble: Preamble,
}

impl FixtureGenerator {
    pub fn new(preamble: Preamble) -> Self {
        Self { preamble }
    }

    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    /// Marked declarations in one source text, in source order.
    pub fn discover(&self, source: &str) -> Vec<MarkedDeclaration> {
        let tree = parse(source);
        let mut visitor = DeclarationVisitor::new();
        visitor.walk(&tree);
        visitor.into_declarations()
    }

    /// Document for already discovered declarations.
    pub fn render(&self, declarations: &[MarkedDeclaration]) -> String {
        let fragments = declarations.iter().map(render_fragment).collect();
        render_document(&self.preamble, fragments)
    }

    /// Discover and render across all sources.
    pub fn generate(&self, sources: &[SourceFile]) -> String {
        let declarations: Vec<MarkedDeclaration> = sources
            .iter()
            .flat_map(|source| {
                let found = self.discover(&source.text);
                tracing::debug!(
                    "{}: {} marked declarations",
                    source.path.display(),
                    found.len()
                );
                found
            })
            .collect();
        self.render(&declarations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ZETA: &str = "/// @fixturable\nstruct Zeta {\n    let value: Int\n}\n";
    const ALPHA: &str = "/// @fixturable\nstruct Alpha {\n    let value: Int\n}\n";

    #[test]
    fn test_output_is_independent_of_source_order() {
        let generator = FixtureGenerator::default();
        let forward = generator.generate(&[
            SourceFile::new("Zeta.swift", ZETA),
            SourceFile::new("Alpha.swift", ALPHA),
        ]);
        let backward = generator.generate(&[
            SourceFile::new("Alpha.swift", ALPHA),
            SourceFile::new("Zeta.swift", ZETA),
        ]);
        assert_eq!(forward, backward);

        let alpha = forward.find("extension Alpha").unwrap();
        let zeta = forward.find("extension Zeta").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn test_no_declarations_yields_preamble_only() {
        let generator = FixtureGenerator::new(Preamble::new(vec!["UIKit".to_string()], None));
        let document = generator.generate(&[SourceFile::new("Plain.swift", "struct Plain {}\n")]);
        assert_eq!(
            document,
            "///\n///  @Generated by fixturegen\n///\n\nimport Foundation\nimport UIKit\n\n\n"
        );
    }

    #[test]
    fn test_discover_keeps_source_order() {
        let generator = FixtureGenerator::default();
        let source = format!("{ZETA}\n{ALPHA}");
        let names: Vec<_> = generator
            .discover(&source)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }
}
