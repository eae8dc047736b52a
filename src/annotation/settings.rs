//! Marker settings clause parser.
//!
//! Grammar:
//!
//! ```text
//! clause := '(' ws ( 'override' ws ':' ws pairs? )? ws ')'
//! pairs  := pair ( ',' pair )* ','?
//! pair   := ident ws '=' ws expr
//! expr   := non-empty text, balanced in () [] {} <> and string literals,
//!           ending at a top-level ',' or the closing ')'
//! ```
//!
//! A `<` opens generic arguments only directly after an identifier, and a
//! `>` closes them only directly after a non-space character other than
//! `-`. If that reading does not balance, the expression is rescanned with
//! `<` and `>` as plain operators, so `a < b` and `a<b` both work.
//!
//! Values are trimmed and otherwise kept verbatim. A repeated key keeps its
//! last value.

use std::collections::BTreeMap;

use thiserror::Error;

/// Field name to override expression.
pub type Overrides = BTreeMap<String, String>;

/// A malformed settings clause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverrideError {
    #[error("settings clause must be parenthesized")]
    NotParenthesized,

    #[error("settings must start with `override:`, found `{found}`")]
    MissingLabel { found: String },

    #[error("expected a field name at offset {offset}")]
    ExpectedIdentifier { offset: usize },

    #[error("expected `=` after `{key}`")]
    ExpectedEquals { key: String },

    #[error("override for `{key}` has no value")]
    EmptyValue { key: String },

    #[error("unbalanced delimiters in override for `{key}`")]
    Unbalanced { key: String },

    #[error("unexpected input at offset {offset}")]
    TrailingInput { offset: usize },
}

/// Parse a settings clause such as `(override: x = 1, y = .init(z: 2))`.
pub fn parse_settings(clause: &str) -> Result<Overrides, OverrideError> {
    SettingsParser {
        src: clause.trim(),
        pos: 0,
    }
    .parse()
}

struct SettingsParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> SettingsParser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let start = self.pos;
        if !self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
            return None;
        }
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        Some(&self.src[start..self.pos])
    }

    fn parse(mut self) -> Result<Overrides, OverrideError> {
        if !self.eat('(') {
            return Err(OverrideError::NotParenthesized);
        }
        self.skip_ws();

        let mut overrides = Overrides::new();
        if !self.eat(')') {
            self.label()?;
            self.pairs(&mut overrides)?;
        }

        self.skip_ws();
        if self.pos < self.src.len() {
            return Err(OverrideError::TrailingInput { offset: self.pos });
        }
        Ok(overrides)
    }

    fn label(&mut self) -> Result<(), OverrideError> {
        let start = self.pos;
        let word = self.ident();
        self.skip_ws();
        if word == Some("override") && self.eat(':') {
            return Ok(());
        }
        let found: String = self.src[start..]
            .chars()
            .take_while(|c| *c != ')')
            .collect();
        Err(OverrideError::MissingLabel {
            found: found.trim().to_string(),
        })
    }

    /// Pairs up to and including the closing parenthesis.
    fn pairs(&mut self, overrides: &mut Overrides) -> Result<(), OverrideError> {
        loop {
            self.skip_ws();
            if self.eat(')') {
                return Ok(());
            }

            let offset = self.pos;
            let key = self
                .ident()
                .ok_or(OverrideError::ExpectedIdentifier { offset })?;
            self.skip_ws();
            if !self.eat('=') {
                return Err(OverrideError::ExpectedEquals {
                    key: key.to_string(),
                });
            }

            let value = self.expression(key)?.trim();
            if value.is_empty() {
                return Err(OverrideError::EmptyValue {
                    key: key.to_string(),
                });
            }
            overrides.insert(key.to_string(), value.to_string());

            if self.eat(')') {
                return Ok(());
            }
            // expression() stops only at ',' or ')'
            self.eat(',');
        }
    }

    /// Raw expression text up to a top-level `,` or `)`, not consumed.
    fn expression(&mut self, key: &str) -> Result<&'a str, OverrideError> {
        let start = self.pos;
        match self.scan_expression(key, true) {
            Ok(text) => Ok(text),
            Err(_) => {
                self.pos = start;
                self.scan_expression(key, false)
            }
        }
    }

    fn scan_expression(&mut self, key: &str, generics: bool) -> Result<&'a str, OverrideError> {
        let unbalanced = || OverrideError::Unbalanced {
            key: key.to_string(),
        };
        let start = self.pos;
        let mut closers: Vec<char> = Vec::new();
        let mut previous = ' ';

        loop {
            let Some(c) = self.peek() else {
                return Err(unbalanced());
            };
            match c {
                ',' | ')' if closers.is_empty() => return Ok(&self.src[start..self.pos]),
                '(' => closers.push(')'),
                '[' => closers.push(']'),
                '{' => closers.push('}'),
                '<' if generics && (previous.is_alphanumeric() || previous == '_') => {
                    closers.push('>');
                }
                '>' if closers.last() == Some(&'>')
                    && !previous.is_whitespace()
                    && previous != '-' =>
                {
                    closers.pop();
                }
                ')' | ']' | '}' => {
                    if closers.pop() != Some(c) {
                        return Err(unbalanced());
                    }
                }
                '"' => {
                    self.bump();
                    self.string_literal().ok_or_else(unbalanced)?;
                    previous = '"';
                    continue;
                }
                _ => {}
            }
            previous = c;
            self.bump();
        }
    }

    /// Skip the rest of a string literal after its opening quote.
    fn string_literal(&mut self) -> Option<()> {
        loop {
            match self.bump()? {
                '\\' => {
                    self.bump()?;
                }
                '"' => return Some(()),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(clause: &str) -> Vec<(String, String)> {
        parse_settings(clause).unwrap().into_iter().collect()
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_simple_pairs() {
        assert_eq!(
            pairs("(override: y = 5, x = 1)"),
            vec![pair("x", "1"), pair("y", "5")]
        );
    }

    #[test]
    fn test_values_are_verbatim_expressions() {
        assert_eq!(
            pairs("(override: kind = .some(.value), date = Date(timeIntervalSince1970: 0, tz: [1, 2]))"),
            vec![
                pair("date", "Date(timeIntervalSince1970: 0, tz: [1, 2])"),
                pair("kind", ".some(.value)"),
            ]
        );
        assert_eq!(
            pairs(r#"(override: name = "a, (b)", other = "q\"")"#),
            vec![pair("name", r#""a, (b)""#), pair("other", r#""q\"""#)]
        );
    }

    #[test]
    fn test_generic_arguments_stay_in_one_value() {
        assert_eq!(
            pairs("(override: x = 1, m = Dictionary<String, Int>())"),
            vec![pair("m", "Dictionary<String, Int>()"), pair("x", "1")]
        );
        assert_eq!(
            pairs("(override: f = { (a: Int) -> Bool in a > 1 }, n = Set<Array<Int>>())"),
            vec![
                pair("f", "{ (a: Int) -> Bool in a > 1 }"),
                pair("n", "Set<Array<Int>>()"),
            ]
        );
        assert_eq!(
            pairs("(override: make = Box<() -> Void>(), z = 0)"),
            vec![pair("make", "Box<() -> Void>()"), pair("z", "0")]
        );
    }

    #[test]
    fn test_comparisons_are_not_generics() {
        assert_eq!(
            pairs("(override: less = a<b, more = c > d)"),
            vec![pair("less", "a<b"), pair("more", "c > d")]
        );
        assert_eq!(
            pairs("(override: flag = count <= limit, y = 2)"),
            vec![pair("flag", "count <= limit"), pair("y", "2")]
        );
    }

    #[test]
    fn test_whitespace_and_trailing_comma() {
        assert_eq!(
            pairs("(  override :x=1 ,  y =  .init( )  , )"),
            vec![pair("x", "1"), pair("y", ".init( )")]
        );
    }

    #[test]
    fn test_last_duplicate_wins() {
        assert_eq!(pairs("(override: a = 1, a = 2)"), vec![pair("a", "2")]);
    }

    #[test]
    fn test_empty_clauses() {
        assert!(parse_settings("()").unwrap().is_empty());
        assert!(parse_settings("(override:)").unwrap().is_empty());
        assert!(parse_settings("( override: )").unwrap().is_empty());
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_settings("(x = 1)"),
            Err(OverrideError::MissingLabel {
                found: "x = 1".to_string()
            })
        );
        assert_eq!(
            parse_settings("(override: = 1)"),
            Err(OverrideError::ExpectedIdentifier { offset: 11 })
        );
        assert_eq!(
            parse_settings("(override: x 1)"),
            Err(OverrideError::ExpectedEquals {
                key: "x".to_string()
            })
        );
        assert_eq!(
            parse_settings("(override: x = , y = 2)"),
            Err(OverrideError::EmptyValue {
                key: "x".to_string()
            })
        );
        assert_eq!(
            parse_settings("(override: x = foo(]))"),
            Err(OverrideError::Unbalanced {
                key: "x".to_string()
            })
        );
        assert_eq!(
            parse_settings("(override: x = 1) extra"),
            Err(OverrideError::TrailingInput { offset: 18 })
        );
        assert_eq!(parse_settings("override: x = 1"), Err(OverrideError::NotParenthesized));
    }
}
