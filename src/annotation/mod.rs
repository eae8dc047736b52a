//! Fixture marker comments.
//!
//! A declaration opts into fixture generation with a doc line comment:
//!
//! ```text
//! /// @fixturable
//! /// @fixtureable(override: status = .active, createdAt = Date(timeIntervalSince1970: 0))
//! ```
//!
//! The marker must fill the whole comment line. The optional clause is a
//! small language of its own and is parsed by [`parse_settings`], which
//! reports malformed clauses instead of dropping them.

mod settings;

use std::sync::LazyLock;

use regex::Regex;

pub use settings::{parse_settings, OverrideError, Overrides};

/// Matches: `/// @fixturable` or `/// @fixtureable`, optionally followed by `(...)`
/// Groups: 1=settings clause including its parentheses
static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^///\s?@(?:fixturable|fixtureable)\s?(\(.*\))?$").unwrap()
});

/// A detected marker comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Raw settings clause, parentheses included
    pub settings: Option<String>,
}

impl Marker {
    /// Parse the settings clause into field overrides.
    pub fn overrides(&self) -> Result<Overrides, OverrideError> {
        match &self.settings {
            Some(clause) => parse_settings(clause),
            None => Ok(Overrides::new()),
        }
    }
}

/// First marker among a declaration's doc comment lines.
pub fn find_marker<S: AsRef<str>>(lines: &[S]) -> Option<Marker> {
    lines.iter().find_map(|line| {
        MARKER_PATTERN
            .captures(line.as_ref().trim())
            .map(|caps| Marker {
                settings: caps.get(1).map(|m| m.as_str().to_string()),
            })
    })
}

/// Whether the comment lines mark their declaration for generation.
pub fn detect<S: AsRef<str>>(lines: &[S]) -> bool {
    find_marker(lines).is_some()
}

/// Overrides declared by the marker among `lines`; empty when unmarked.
pub fn parse_overrides<S: AsRef<str>>(lines: &[S]) -> Result<Overrides, OverrideError> {
    match find_marker(lines) {
        Some(marker) => marker.overrides(),
        None => Ok(Overrides::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_both_spellings() {
        assert!(detect(&["/// @fixturable"]));
        assert!(detect(&["/// @fixtureable"]));
        assert!(detect(&["///@fixturable"]));
        assert!(detect(&["/// @fixturable   "]));
        assert!(detect(&["/// Some summary.", "/// @fixturable"]));
    }

    #[test]
    fn test_detect_rejects_prose_and_plain_comments() {
        assert!(!detect(&["/// Use @fixturable to generate fixtures"]));
        assert!(!detect(&["/// @fixturable is great"]));
        assert!(!detect(&["// @fixturable"]));
        assert!(!detect(&["///  @fixturable"]));
        assert!(!detect(&["/// @fixture"]));
        assert!(!detect::<&str>(&[]));
    }

    #[test]
    fn test_marker_settings_clause() {
        let marker = find_marker(&["/// @fixturable(override: y = 5)"]).unwrap();
        assert_eq!(marker.settings.as_deref(), Some("(override: y = 5)"));

        let marker = find_marker(&["/// @fixturable (override: y = 5)"]).unwrap();
        assert_eq!(marker.settings.as_deref(), Some("(override: y = 5)"));

        let bare = find_marker(&["/// @fixturable"]).unwrap();
        assert_eq!(bare.settings, None);
        assert!(bare.overrides().unwrap().is_empty());
    }

    #[test]
    fn test_parse_overrides_from_lines() {
        let overrides = parse_overrides(&[
            "/// A point.",
            "/// @fixturable(override: x = 1, kind = .origin)",
        ])
        .unwrap();
        assert_eq!(overrides.get("x").map(String::as_str), Some("1"));
        assert_eq!(overrides.get("kind").map(String::as_str), Some(".origin"));

        assert!(parse_overrides(&["/// nothing here"]).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_clause_is_reported() {
        let result = parse_overrides(&["/// @fixturable(overrides: x = 1)"]);
        assert!(matches!(result, Err(OverrideError::MissingLabel { .. })));
    }
}
