//! Built-in types with a canonical literal default.

use std::fmt;

/// A standard library or Foundation type with a fixed default literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Any,
    AnyObject,
    Bool,
    Character,
    Data,
    Date,
    Double,
    Error,
    Float,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    String,
    TimeInterval,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Url,
    Uuid,
}

impl Primitive {
    /// Look up a bare type identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "Any" => Self::Any,
            "AnyObject" => Self::AnyObject,
            "Bool" => Self::Bool,
            "Character" => Self::Character,
            "Data" => Self::Data,
            "Date" => Self::Date,
            "Double" => Self::Double,
            "Error" => Self::Error,
            "Float" => Self::Float,
            "Int" => Self::Int,
            "Int8" => Self::Int8,
            "Int16" => Self::Int16,
            "Int32" => Self::Int32,
            "Int64" => Self::Int64,
            "String" => Self::String,
            "TimeInterval" => Self::TimeInterval,
            "UInt" => Self::UInt,
            "UInt8" => Self::UInt8,
            "UInt16" => Self::UInt16,
            "UInt32" => Self::UInt32,
            "UInt64" => Self::UInt64,
            "URL" => Self::Url,
            "UUID" => Self::Uuid,
            _ => return None,
        };
        Some(primitive)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::AnyObject => "AnyObject",
            Self::Bool => "Bool",
            Self::Character => "Character",
            Self::Data => "Data",
            Self::Date => "Date",
            Self::Double => "Double",
            Self::Error => "Error",
            Self::Float => "Float",
            Self::Int => "Int",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::String => "String",
            Self::TimeInterval => "TimeInterval",
            Self::UInt => "UInt",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Url => "URL",
            Self::Uuid => "UUID",
        }
    }

    /// Default literal; `hint` is the field name or tuple position.
    pub fn default_literal(&self, hint: &str) -> String {
        match self {
            Self::Any => "0".to_string(),
            Self::AnyObject => "0 as AnyObject".to_string(),
            Self::Bool => "false".to_string(),
            Self::Character => format!("\"{}\"", hint.chars().next().unwrap_or('a')),
            Self::Data | Self::Date | Self::Uuid => ".init()".to_string(),
            Self::Double | Self::Float | Self::TimeInterval => "0.0".to_string(),
            Self::Error => format!("NSError(domain: \"{hint}\", code: 0, userInfo: [:])"),
            Self::Int
            | Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::Int64
            | Self::UInt
            | Self::UInt8
            | Self::UInt16
            | Self::UInt32
            | Self::UInt64 => "0".to_string(),
            Self::String => format!("\"{hint}\""),
            Self::Url => ".init(string: \"http://localhost\")!".to_string(),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup_is_exact() {
        assert_eq!(Primitive::from_name("URL"), Some(Primitive::Url));
        assert_eq!(Primitive::from_name("Url"), None);
        assert_eq!(Primitive::from_name("CGFloat"), None);
        assert_eq!(Primitive::from_name("TimeInterval").map(|p| p.name()), Some("TimeInterval"));
    }

    #[test]
    fn test_hinted_literals() {
        assert_eq!(Primitive::String.default_literal("title"), "\"title\"");
        assert_eq!(Primitive::Character.default_literal("grade"), "\"g\"");
        assert_eq!(Primitive::Character.default_literal(""), "\"a\"");
        assert_eq!(
            Primitive::Error.default_literal("failure"),
            "NSError(domain: \"failure\", code: 0, userInfo: [:])"
        );
    }

    #[test]
    fn test_fixed_literals() {
        assert_eq!(Primitive::UInt16.default_literal("n"), "0");
        assert_eq!(Primitive::Float.default_literal("n"), "0.0");
        assert_eq!(Primitive::AnyObject.default_literal("n"), "0 as AnyObject");
        assert_eq!(
            Primitive::Url.default_literal("n"),
            ".init(string: \"http://localhost\")!"
        );
    }
}
