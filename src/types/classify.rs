//! Type classification over the grammar's type nodes.

use tree_sitter::Node;

use super::{DeclaredType, FunctionType, Primitive, TupleElement};
use crate::syntax::{node_text, parse_swift};

/// Declaration used to parse a standalone type.
const TYPE_HOST: &str = "let value: ";

/// Classify a type written as text.
///
/// Never fails: text that is not a well-formed type becomes
/// [`DeclaredType::Named`] with whitespace collapsed.
pub fn classify(text: &str) -> DeclaredType {
    let source = format!("{TYPE_HOST}{text}\n");
    let fallback = || DeclaredType::Named(collapse_whitespace(text));

    let Some(tree) = parse_swift(&source) else {
        return fallback();
    };
    let root = tree.root_node();
    if root.has_error() || root.named_child_count() != 1 {
        return fallback();
    }

    let mut cursor = root.walk();
    let annotation = root
        .named_child(0)
        .filter(|declaration| declaration.kind() == "property_declaration")
        .and_then(|declaration| {
            declaration
                .children(&mut cursor)
                .find(|child| child.kind() == "type_annotation")
        });
    match annotation {
        Some(annotation) => classify_annotation(annotation, source.as_bytes()),
        None => fallback(),
    }
}

/// Classify a `type_annotation` node: `: @attributes Type` with an optional
/// trailing `!`.
///
/// Annotations the grammar could not parse, such as typed throws, are kept
/// verbatim as [`DeclaredType::Named`].
pub fn classify_annotation(annotation: Node, src: &[u8]) -> DeclaredType {
    let text = node_text(&annotation, src).trim_start_matches(':');
    let ty = match annotation.child_by_field_name("name") {
        Some(ty) if !annotation.has_error() => ty,
        _ => return DeclaredType::Named(collapse_whitespace(text)),
    };

    let mut base = classify_node(ty, src);
    let mut attributes = Vec::new();
    let mut cursor = annotation.walk();
    for child in annotation.children(&mut cursor) {
        match child.kind() {
            "type_modifiers" => attributes.extend(attribute_texts(child, src)),
            "!" => base = DeclaredType::ImplicitlyUnwrappedOptional(Box::new(base)),
            _ => {}
        }
    }
    with_attributes(base, attributes)
}

fn classify_node(node: Node, src: &[u8]) -> DeclaredType {
    match node.kind() {
        "user_type" => classify_user_type(node, src),
        "optional_type" => {
            let Some(wrapped) = node.child_by_field_name("wrapped") else {
                return named(node, src);
            };
            // `Int??` is one node with a `?` token per level.
            let mut ty = classify_node(wrapped, src);
            let mut cursor = node.walk();
            for _ in node.children(&mut cursor).filter(|child| child.kind() == "?") {
                ty = DeclaredType::Optional(Box::new(ty));
            }
            ty
        }
        "array_type" => match node.child_by_field_name("name") {
            Some(element) => DeclaredType::Array(Box::new(classify_node(element, src))),
            None => named(node, src),
        },
        "dictionary_type" => {
            let mut cursor = node.walk();
            let parts: Vec<Node> = node.children_by_field_name("name", &mut cursor).collect();
            match parts.as_slice() {
                [key, value] => DeclaredType::Dictionary(
                    Box::new(classify_node(*key, src)),
                    Box::new(classify_node(*value, src)),
                ),
                _ => named(node, src),
            }
        }
        "tuple_type" => DeclaredType::Tuple(tuple_elements(node, src)),
        "function_type" => classify_function(node, src),
        _ => named(node, src),
    }
}

/// `Name<Args>.Member<Args>`
fn classify_user_type(node: Node, src: &[u8]) -> DeclaredType {
    let mut components: Vec<(&str, Vec<DeclaredType>)> = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "type_identifier" => components.push((node_text(&child, src), Vec::new())),
            "type_arguments" => {
                if let Some((_, arguments)) = components.last_mut() {
                    let mut cursor = child.walk();
                    *arguments = child
                        .children_by_field_name("name", &mut cursor)
                        .map(|argument| classify_node(argument, src))
                        .collect();
                }
            }
            _ => {}
        }
    }

    if let [(name, arguments)] = components.as_slice() {
        match arguments.as_slice() {
            [] => {
                if let Some(primitive) = Primitive::from_name(name) {
                    return DeclaredType::Primitive(primitive);
                }
            }
            [element] if *name == "Set" => {
                return DeclaredType::Set(Box::new(element.clone()));
            }
            _ => {}
        }
    }

    let text = components
        .iter()
        .map(|(name, arguments)| {
            if arguments.is_empty() {
                name.to_string()
            } else {
                let arguments: Vec<String> = arguments.iter().map(ToString::to_string).collect();
                format!("{name}<{}>", arguments.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join(".");
    DeclaredType::Named(text)
}

/// `(P1, P2) async throws -> R`
fn classify_function(node: Node, src: &[u8]) -> DeclaredType {
    let Some(return_type) = node.child_by_field_name("name") else {
        return named(node, src);
    };
    let parameters = match node.child_by_field_name("params") {
        Some(params) if params.kind() == "tuple_type" => tuple_elements(params, src)
            .into_iter()
            .map(|element| element.ty)
            .collect(),
        Some(params) => vec![classify_node(params, src)],
        None => Vec::new(),
    };

    let mut effects = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "async" => effects.push("async".to_string()),
            // `throws` or `rethrows`
            "throws" => effects.push(node_text(&child, src).to_string()),
            _ => {}
        }
    }

    DeclaredType::Function(FunctionType {
        parameters,
        effects,
        return_type: Box::new(classify_node(return_type, src)),
        is_escaping: false,
    })
}

fn tuple_elements(node: Node, src: &[u8]) -> Vec<TupleElement> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() == "tuple_type_item")
        .map(|item| tuple_element(item, src))
        .collect()
}

/// `label: T`, `_ name: T`, `inout T` or `T`
fn tuple_element(item: Node, src: &[u8]) -> TupleElement {
    let mut label = None;
    let mut wildcard = false;
    let mut ty = None;
    let mut attributes = Vec::new();

    let mut cursor = item.walk();
    for child in item.named_children(&mut cursor) {
        match child.kind() {
            "wildcard_pattern" => wildcard = true,
            "simple_identifier" => label = Some(node_text(&child, src).to_string()),
            "type_modifiers" => attributes.extend(attribute_texts(child, src)),
            "parameter_modifiers" => {
                attributes.push(collapse_whitespace(node_text(&child, src)));
            }
            "comment" | "multiline_comment" => {}
            _ => ty = Some(classify_node(child, src)),
        }
    }

    TupleElement {
        label: label.filter(|_| !wildcard),
        ty: with_attributes(ty.unwrap_or_else(|| named(item, src)), attributes),
    }
}

/// Attach attributes to a classified type.
///
/// `@escaping` on a function type, parenthesised or not, becomes
/// [`FunctionType::is_escaping`] and the redundant parentheses are dropped.
/// Every other attribute is kept verbatim.
fn with_attributes(base: DeclaredType, mut attributes: Vec<String>) -> DeclaredType {
    let escaping = attributes.iter().any(|attribute| attribute == "@escaping");
    let function = if escaping {
        base.as_function().map(FunctionType::escaping)
    } else {
        None
    };
    let base = match function {
        Some(function) => {
            attributes.retain(|attribute| attribute != "@escaping");
            DeclaredType::Function(function)
        }
        None => base,
    };

    if attributes.is_empty() {
        base
    } else {
        DeclaredType::Attributed {
            base: Box::new(base),
            attributes,
        }
    }
}

fn attribute_texts(modifiers: Node, src: &[u8]) -> Vec<String> {
    let mut cursor = modifiers.walk();
    modifiers
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "attribute")
        .map(|attribute| collapse_whitespace(node_text(&attribute, src)))
        .collect()
}

/// Opaque, existential, composition and anything else, in source spelling.
fn named(node: Node, src: &[u8]) -> DeclaredType {
    DeclaredType::Named(collapse_whitespace(node_text(&node, src)))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
