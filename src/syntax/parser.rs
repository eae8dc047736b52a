//! Declaration extraction over the tree-sitter Swift grammar.
//!
//! Builds a [`DeclTree`] from the concrete syntax tree. Only type
//! declarations and their `let`/`var` members are modelled. Regions the
//! grammar cannot parse contribute no declarations, so parsing never fails.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tree_sitter::{Node, Parser, Tree};

use super::tree::{DeclId, DeclKind, DeclNode, DeclTree, Property};
use crate::types::{classify_annotation, DeclaredType};

/// `#if`-family directive lines.
static CONDITIONAL_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*#(?:if|elseif|else|endif)\b[^\r\n]*").unwrap()
});

/// Parse Swift source into a declaration tree.
pub fn parse(source: &str) -> DeclTree {
    let text = blank_conditional_directives(source);
    let mut tree = DeclTree::new();
    if let Some(syntax) = parse_swift(&text) {
        collect_members(syntax.root_node(), text.as_bytes(), None, &mut tree);
    }
    tree
}

/// Run the Swift grammar over `source`.
///
/// `None` only if the grammar cannot be loaded, which is logged.
pub fn parse_swift(source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&tree_sitter_swift::LANGUAGE.into()) {
        tracing::error!("Failed to load the Swift grammar: {}", e);
        return None;
    }
    parser.parse(source, None)
}

pub fn node_text<'a>(node: &Node, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

/// Blank `#if`/`#elseif`/`#else`/`#endif` lines so that members of every
/// branch parse as plain members.
///
/// The grammar closes a type body early at a directive, so the directive
/// text is replaced with spaces of the same byte length. Rows and offsets
/// are unchanged.
fn blank_conditional_directives(source: &str) -> Cow<'_, str> {
    CONDITIONAL_DIRECTIVE.replace_all(source, |caps: &Captures| " ".repeat(caps[0].len()))
}

/// Collect the type declarations and properties directly inside `container`.
fn collect_members(container: Node, src: &[u8], owner: Option<DeclId>, tree: &mut DeclTree) {
    let mut cursor = container.walk();
    for child in container.named_children(&mut cursor) {
        match child.kind() {
            "class_declaration" | "protocol_declaration" => {
                collect_type(child, src, owner, tree);
            }
            "property_declaration" => {
                if let Some(owner) = owner {
                    let properties = collect_properties(child, src);
                    tree.get_mut(owner).properties.extend(properties);
                }
            }
            // Keep whatever the grammar recovered inside a broken region.
            "ERROR" => collect_members(child, src, owner, tree),
            _ => {}
        }
    }
}

fn collect_type(node: Node, src: &[u8], owner: Option<DeclId>, tree: &mut DeclTree) {
    let Some(kind) = node
        .child_by_field_name("declaration_kind")
        .and_then(|keyword| DeclKind::from_keyword(keyword.kind()))
    else {
        return;
    };
    // Extensions name a `user_type`, possibly dotted.
    let name: String = node
        .child_by_field_name("name")
        .map(|name| node_text(&name, src).split_whitespace().collect())
        .unwrap_or_default();
    if name.is_empty() {
        return;
    }

    let mut decl = DeclNode::new(kind, name, node.start_position().row + 1);
    decl.modifiers = declaration_modifiers(node, src);
    decl.doc_comments = leading_doc_comments(node, src);
    let id = tree.push(decl, owner);

    if let Some(body) = node.child_by_field_name("body") {
        collect_members(body, src, Some(id), tree);
    }
}

/// Modifier keywords of a declaration, attributes excluded.
fn declaration_modifiers(node: Node, src: &[u8]) -> Vec<String> {
    let mut cursor = node.walk();
    let Some(modifiers) = node
        .children(&mut cursor)
        .find(|child| child.kind() == "modifiers")
    else {
        return Vec::new();
    };

    let mut cursor = modifiers.walk();
    modifiers
        .named_children(&mut cursor)
        .filter(|modifier| modifier.kind() != "attribute")
        .map(|modifier| node_text(&modifier, src).to_string())
        .collect()
}

/// The `///` lines directly above `node`, top to bottom.
///
/// The run ends at a blank line, at any other kind of comment, and at a
/// comment that trails code on its own line.
fn leading_doc_comments(node: Node, src: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut next_row = node.start_position().row;
    let mut sibling = node.prev_sibling();

    while let Some(comment) = sibling {
        let text = node_text(&comment, src).trim_end();
        if comment.kind() != "comment"
            || !text.starts_with("///")
            || comment.end_position().row + 1 != next_row
        {
            break;
        }
        let previous = comment.prev_sibling();
        if previous.is_some_and(|code| code.end_position().row == comment.start_position().row) {
            break;
        }
        lines.push(text.to_string());
        next_row = comment.start_position().row;
        sibling = previous;
    }

    lines.reverse();
    lines
}

/// One property per bound identifier of a `let`/`var` declaration.
fn collect_properties(node: Node, src: &[u8]) -> Vec<Property> {
    let line = node.start_position().row + 1;
    let is_static = declaration_modifiers(node, src)
        .iter()
        .any(|modifier| modifier == "static" || modifier == "class");

    // Tuple destructuring binds no single name and yields `None`.
    let mut bindings: Vec<(Option<String>, Property)> = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "pattern" {
            let name = child
                .child_by_field_name("bound_identifier")
                .map(|ident| node_text(&ident, src).to_string());
            bindings.push((
                name,
                Property {
                    name: String::new(),
                    declared_type: None,
                    has_initializer: false,
                    is_computed: false,
                    is_static,
                    line,
                },
            ));
            continue;
        }

        let Some((_, property)) = bindings.last_mut() else {
            continue;
        };
        match child.kind() {
            "type_annotation" => property.declared_type = Some(classify_annotation(child, src)),
            "=" => property.has_initializer = true,
            // Observer blocks (`willset_didset_block`) leave the property stored.
            "computed_property" => property.is_computed = true,
            _ => {}
        }
    }

    // `let a, b: Int` declares both as Int.
    let mut following: Option<DeclaredType> = None;
    for (_, binding) in bindings.iter_mut().rev() {
        match &binding.declared_type {
            Some(ty) => following = Some(ty.clone()),
            None if !binding.has_initializer => binding.declared_type = following.clone(),
            None => {}
        }
    }

    bindings
        .into_iter()
        .filter_map(|(name, property)| name.map(|name| Property { name, ..property }))
        .collect()
}
