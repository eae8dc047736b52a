//! Default value synthesis.

use super::{DeclaredType, FunctionType};

/// Expression used for a named type without a built-in default.
///
/// Assumes the referenced type has its own generated factory.
const NESTED_FIXTURE: &str = ".fixture()";

/// Default value expression for a field of type `ty`.
///
/// `hint` is the field name (or tuple label/position) and seeds the
/// hint-dependent literals such as strings.
pub fn default_expression(ty: &DeclaredType, hint: &str) -> String {
    match ty {
        DeclaredType::Optional(_) => "nil".to_string(),
        // An implicitly unwrapped field still needs a real value.
        DeclaredType::ImplicitlyUnwrappedOptional(inner) => default_expression(inner, hint),
        DeclaredType::Array(_) | DeclaredType::Set(_) => "[]".to_string(),
        DeclaredType::Dictionary(..) => "[:]".to_string(),
        DeclaredType::Tuple(elements) => {
            let values: Vec<String> = elements
                .iter()
                .enumerate()
                .map(|(index, element)| match &element.label {
                    Some(label) => format!("{label}: {}", default_expression(&element.ty, label)),
                    None => default_expression(&element.ty, &index.to_string()),
                })
                .collect();
            format!("({})", values.join(", "))
        }
        DeclaredType::Function(function) => closure(function),
        DeclaredType::Attributed { base, .. } => default_expression(base, hint),
        DeclaredType::Primitive(primitive) => primitive.default_literal(hint),
        DeclaredType::Named(_) => NESTED_FIXTURE.to_string(),
    }
}

/// A closure that ignores its arguments and returns the default result.
fn closure(function: &FunctionType) -> String {
    let mut value = String::from("{");
    if !function.parameters.is_empty() {
        let placeholders = vec!["_"; function.parameters.len()];
        value.push_str(&format!(" {} in", placeholders.join(", ")));
    }
    if function.return_type.is_void() {
        value.push_str(" }");
    } else {
        value.push_str(&format!(" {} }}", default_expression(&function.return_type, "")));
    }
    value
}
