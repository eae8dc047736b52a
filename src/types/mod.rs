//! Declared types of fixture fields.
//!
//! A field's type annotation is classified from the grammar's type nodes
//! into a closed [`DeclaredType`] tree. The classification is total: a type
//! that does not parse falls back to [`DeclaredType::Named`]. Every variant yields a default
//! value expression through [`default_expression`].

mod classify;
mod defaults;
mod primitive;

use std::fmt;

pub use defaults::default_expression;
pub use classify::{classify, classify_annotation};
pub use primitive::Primitive;

/// Structural category of a type annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// Built-in type with a literal default
    Primitive(Primitive),
    /// `T?`
    Optional(Box<DeclaredType>),
    /// `T!`
    ImplicitlyUnwrappedOptional(Box<DeclaredType>),
    /// `[T]`
    Array(Box<DeclaredType>),
    /// `[K: V]`
    Dictionary(Box<DeclaredType>, Box<DeclaredType>),
    /// `Set<T>`
    Set(Box<DeclaredType>),
    /// `(T, label: U)`; a single parenthesised type is a one-element tuple
    Tuple(Vec<TupleElement>),
    Function(FunctionType),
    /// Attributes or ownership specifiers other than `@escaping` on a function
    Attributed {
        base: Box<DeclaredType>,
        attributes: Vec<String>,
    },
    /// Anything else, rendered in canonical form
    Named(String),
}

/// One element of a tuple type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleElement {
    pub label: Option<String>,
    pub ty: DeclaredType,
}

/// `(P1, P2) async throws -> R`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub parameters: Vec<DeclaredType>,
    /// `async`, `throws`, `throws(E)`, `rethrows` in source order
    pub effects: Vec<String>,
    pub return_type: Box<DeclaredType>,
    pub is_escaping: bool,
}

impl FunctionType {
    fn escaping(&self) -> Self {
        Self {
            is_escaping: true,
            ..self.clone()
        }
    }
}

impl DeclaredType {
    /// Whether the type denotes "no value" as a function result.
    pub fn is_void(&self) -> bool {
        match self {
            Self::Named(name) => name == "Void" || name == "Swift.Void",
            Self::Tuple(elements) => elements.is_empty(),
            _ => false,
        }
    }

    /// The function type this denotes, looking through redundant parentheses.
    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Self::Function(function) => Some(function),
            Self::Tuple(elements) => match elements.as_slice() {
                [TupleElement { label: None, ty }] => ty.as_function(),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Type text for a factory parameter of this type.
///
/// Closures passed to the factory are stored by the initializer, so function
/// types are always declared `@escaping`. Attributes are kept and an
/// existing `@escaping` is not repeated.
pub fn parameter_type(ty: &DeclaredType) -> String {
    match ty {
        DeclaredType::Attributed { base, attributes } => match base.as_function() {
            Some(function) => {
                let mut words: Vec<String> = attributes
                    .iter()
                    .filter(|attribute| *attribute != "@escaping")
                    .cloned()
                    .collect();
                words.push(function.escaping().to_string());
                words.join(" ")
            }
            None => ty.to_string(),
        },
        _ => match ty.as_function() {
            Some(function) => function.escaping().to_string(),
            None => ty.to_string(),
        },
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::ImplicitlyUnwrappedOptional(inner) => write!(f, "{inner}!"),
            Self::Array(element) => write!(f, "[{element}]"),
            Self::Dictionary(key, value) => write!(f, "[{key}: {value}]"),
            Self::Set(element) => write!(f, "Set<{element}>"),
            Self::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if let Some(label) = &element.label {
                        write!(f, "{label}: ")?;
                    }
                    write!(f, "{}", element.ty)?;
                }
                f.write_str(")")
            }
            Self::Function(function) => write!(f, "{function}"),
            Self::Attributed { base, attributes } => {
                write!(f, "{} {base}", attributes.join(" "))
            }
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_escaping {
            f.write_str("@escaping ")?;
        }
        f.write_str("(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{parameter}")?;
        }
        f.write_str(")")?;
        for effect in &self.effects {
            write!(f, " {effect}")?;
        }
        write!(f, " -> {}", self.return_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_round_trips_canonical_spelling() {
        for text in [
            "[String: Any]?",
            "(name: String, age: Int)",
            "((Int) -> String)?",
            "Set<String>",
            "@autoclosure () -> Void",
            "() async throws -> Int",
            "Dictionary<String, Any>",
            "String!",
        ] {
            assert_eq!(classify(text).to_string(), text);
        }
    }

    #[test]
    fn test_parameter_type_marks_closures_escaping() {
        let cases = [
            ("() -> Void", "@escaping () -> Void"),
            ("@escaping () -> Void", "@escaping () -> Void"),
            ("@autoclosure () -> Void", "@autoclosure @escaping () -> Void"),
            ("@MainActor (Int) -> Void", "@MainActor @escaping (Int) -> Void"),
            ("(() -> Void)", "@escaping () -> Void"),
            ("(() -> Void)?", "(() -> Void)?"),
            ("@escaping (() -> Void)?", "@escaping (() -> Void)?"),
            ("@escaping (() -> Void)", "@escaping () -> Void"),
            ("@Sendable @escaping (() -> Void)", "@Sendable @escaping () -> Void"),
            ("[Int]", "[Int]"),
        ];
        for (input, expected) in cases {
            assert_eq!(parameter_type(&classify(input)), expected, "for {input}");
        }
    }

    #[test]
    fn test_void_detection() {
        assert!(classify("Void").is_void());
        assert!(classify("()").is_void());
        assert!(classify("Swift.Void").is_void());
        assert!(!classify("Int").is_void());
    }

    #[test]
    fn test_attributed_closure_never_repeats_escaping() {
        let ty = DeclaredType::Attributed {
            base: Box::new(classify("(() -> Void)")),
            attributes: vec!["@escaping".to_string(), "@Sendable".to_string()],
        };
        assert_eq!(parameter_type(&ty), "@Sendable @escaping () -> Void");
    }
}
