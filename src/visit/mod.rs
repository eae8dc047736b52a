//! Marked declaration discovery.
//!
//! [`DeclarationVisitor`] walks a [`DeclTree`] and collects every
//! declaration carrying a fixture marker, together with its eligible fields,
//! its overrides and the path of enclosing types needed to name it.

use serde::{Serialize, Serializer};

use crate::annotation::{find_marker, Overrides};
use crate::syntax::{DeclId, DeclKind, DeclNode, DeclTree, Property};
use crate::types::DeclaredType;

/// A stored property that the generated factory takes as a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", serialize_with = "serialize_display")]
    pub ty: DeclaredType,
}

impl Field {
    fn from_property(property: &Property) -> Option<Self> {
        if !property.is_required_stored() {
            return None;
        }
        Some(Self {
            name: property.name.clone(),
            ty: property.declared_type.clone()?,
        })
    }

    /// Field name without backtick quoting.
    pub fn bare_name(&self) -> &str {
        self.name.trim_matches('`')
    }
}

/// A declaration selected for fixture generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkedDeclaration {
    pub name: String,
    /// Enclosing type names, outermost first
    pub namespace: Vec<String>,
    pub kind: DeclKind,
    pub line: usize,
    pub fields: Vec<Field>,
    pub overrides: Overrides,
}

impl MarkedDeclaration {
    /// Dotted name usable from file scope, e.g. `Outer.Inner.Target`.
    pub fn qualified_name(&self) -> String {
        let mut parts = self.namespace.clone();
        parts.push(self.name.clone());
        parts.join(".")
    }

    /// Override expression for a field, if one was declared.
    pub fn override_for(&self, field: &Field) -> Option<&str> {
        self.overrides.get(field.bare_name()).map(String::as_str)
    }
}

/// Collects marked declarations from declaration trees.
#[derive(Debug, Default)]
pub struct DeclarationVisitor {
    declarations: Vec<MarkedDeclaration>,
}

impl DeclarationVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit every declaration of `tree` in source order, nested ones included.
    pub fn walk(&mut self, tree: &DeclTree) {
        for &root in tree.roots() {
            self.visit(tree, root);
        }
    }

    /// Declarations found so far, in encounter order.
    pub fn declarations(&self) -> &[MarkedDeclaration] {
        &self.declarations
    }

    pub fn into_declarations(self) -> Vec<MarkedDeclaration> {
        self.declarations
    }

    fn visit(&mut self, tree: &DeclTree, id: DeclId) {
        let node = tree.get(id);

        if let Some(marker) = find_marker(&node.doc_comments) {
            if node.is_markable() {
                let overrides = marker.overrides().unwrap_or_else(|error| {
                    tracing::warn!(
                        "Ignoring overrides on {} (line {}): {}",
                        node.name,
                        node.line,
                        error
                    );
                    Overrides::new()
                });

                let declaration = MarkedDeclaration {
                    name: node.name.clone(),
                    namespace: namespace_path(tree, id),
                    kind: node.kind,
                    line: node.line,
                    fields: node
                        .properties
                        .iter()
                        .filter_map(Field::from_property)
                        .collect(),
                    overrides,
                };
                tracing::debug!(
                    "Found fixture target {} with {} fields",
                    declaration.qualified_name(),
                    declaration.fields.len()
                );
                self.declarations.push(declaration);
            } else {
                tracing::warn!(
                    "Fixture marker on {} {} (line {}) ignored: {}",
                    node.kind,
                    node.name,
                    node.line,
                    unmarkable_reason(node)
                );
            }
        }

        for &child in &node.children {
            self.visit(tree, child);
        }
    }
}

fn unmarkable_reason(node: &DeclNode) -> &'static str {
    if node.kind == DeclKind::Class {
        "only final classes are supported"
    } else {
        "only struct, final class and actor are supported"
    }
}

/// Names of the enclosing declarations, outermost first.
///
/// Extensions contribute the (possibly dotted) name of the type they extend.
pub fn namespace_path(tree: &DeclTree, id: DeclId) -> Vec<String> {
    let mut path: Vec<String> = tree
        .ancestors(id)
        .flat_map(|node| node.name.rsplit('.').map(str::to_string).collect::<Vec<_>>())
        .collect();
    path.reverse();
    path
}

fn serialize_display<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: std::fmt::Display,
{
    serializer.collect_str(value)
}
