//! Swift source rendering.
//!
//! [`render_fragment`] turns one [`MarkedDeclaration`] into an extension
//! declaring its `fixture` factory; [`render_document`] assembles the
//! generated file from a preamble and any number of fragments.

mod document;

pub use document::{render_document, Preamble, GENERATED_BANNER};

use crate::types::{default_expression, parameter_type};
use crate::visit::{Field, MarkedDeclaration};

const INDENT: &str = "    ";

/// Render the `fixture` factory extension for one declaration.
///
/// Parameters follow the declaration's field order; each default is the
/// field's override when present, otherwise the synthesized default for its
/// type.
pub fn render_fragment(declaration: &MarkedDeclaration) -> String {
    let mut out = format!("extension {} {{\n", declaration.qualified_name());

    if declaration.fields.is_empty() {
        out.push_str(&format!("{INDENT}static func fixture() -> Self {{\n"));
        out.push_str(&format!("{INDENT}{INDENT}.init()\n"));
    } else {
        let parameters: Vec<String> = declaration
            .fields
            .iter()
            .map(|field| {
                format!(
                    "{INDENT}{INDENT}{}: {} = {}",
                    field.name,
                    parameter_type(&field.ty),
                    default_value(declaration, field)
                )
            })
            .collect();
        let arguments: Vec<String> = declaration
            .fields
            .iter()
            .map(|field| format!("{INDENT}{INDENT}{INDENT}{}: {}", field.bare_name(), field.name))
            .collect();

        out.push_str(&format!("{INDENT}static func fixture(\n"));
        out.push_str(&parameters.join(",\n"));
        out.push_str(&format!("\n{INDENT}) -> Self {{\n"));
        out.push_str(&format!("{INDENT}{INDENT}.init(\n"));
        out.push_str(&arguments.join(",\n"));
        out.push_str(&format!("\n{INDENT}{INDENT})\n"));
    }

    out.push_str(&format!("{INDENT}}}\n"));
    out.push_str("}\n");
    out
}

fn default_value(declaration: &MarkedDeclaration, field: &Field) -> String {
    match declaration.override_for(field) {
        Some(expression) => expression.to_string(),
        None => default_expression(&field.ty, field.bare_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Overrides;
    use crate::syntax::DeclKind;
    use crate::types::classify;
    use pretty_assertions::assert_eq;

    fn declaration(name: &str, namespace: &[&str], fields: &[(&str, &str)]) -> MarkedDeclaration {
        MarkedDeclaration {
            name: name.to_string(),
            namespace: namespace.iter().map(|s| s.to_string()).collect(),
            kind: DeclKind::Struct,
            line: 1,
            fields: fields
                .iter()
                .map(|(name, ty)| Field {
                    name: name.to_string(),
                    ty: classify(ty),
                })
                .collect(),
            overrides: Overrides::new(),
        }
    }

    #[test]
    fn test_point_fragment() {
        let point = declaration("Point", &[], &[("x", "Int"), ("y", "Int")]);
        assert_eq!(
            render_fragment(&point),
            "extension Point {
    static func fixture(
        x: Int = 0,
        y: Int = 0
    ) -> Self {
        .init(
            x: x,
            y: y
        )
    }
}
"
        );
    }

    #[test]
    fn test_empty_fragment() {
        let empty = declaration("Empty", &["Outer"], &[]);
        assert_eq!(
            render_fragment(&empty),
            "extension Outer.Empty {
    static func fixture() -> Self {
        .init()
    }
}
"
        );
    }

    #[test]
    fn test_override_replaces_default_verbatim() {
        let mut point = declaration("Point", &[], &[("x", "Int"), ("y", "Int")]);
        point.overrides.insert("y".to_string(), "Int.max  - 1".to_string());
        let fragment = render_fragment(&point);
        assert!(fragment.contains("        x: Int = 0,\n"));
        assert!(fragment.contains("        y: Int = Int.max  - 1\n"));
    }

    #[test]
    fn test_closure_parameters_are_escaping() {
        let handlers = declaration(
            "Handlers",
            &[],
            &[
                ("onTap", "() -> Void"),
                ("transform", "(Int) -> String"),
                ("lazy", "@autoclosure () -> Void"),
                ("optional", "(() -> Void)?"),
            ],
        );
        let fragment = render_fragment(&handlers);
        assert!(fragment.contains("onTap: @escaping () -> Void = { },"));
        assert!(fragment.contains("transform: @escaping (Int) -> String = { _ in \"\" },"));
        assert!(fragment.contains("lazy: @autoclosure @escaping () -> Void = { },"));
        assert!(fragment.contains("optional: (() -> Void)? = nil\n"));
    }

    #[test]
    fn test_backticked_field_names() {
        let keyword = declaration("Token", &[], &[("`default`", "String")]);
        let fragment = render_fragment(&keyword);
        assert!(fragment.contains("        `default`: String = \"default\"\n"));
        assert!(fragment.contains("            default: `default`\n"));
    }
}
