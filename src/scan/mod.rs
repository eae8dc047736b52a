//! Source discovery and loading.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

const SWIFT_EXTENSION: &str = "swift";

/// A loaded source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Swift sources under `root`, sorted by path.
///
/// A directory is walked recursively and its files are filtered by the
/// include and exclude globs, matched against the path relative to `root`.
/// A file root is returned as is when it is a Swift source.
pub fn find_sources<P: AsRef<Path>>(root: P, include: &[String], exclude: &[String]) -> Vec<PathBuf> {
    let root = root.as_ref();

    if !root.exists() {
        tracing::warn!("Source path {} does not exist", root.display());
        return Vec::new();
    }

    if root.is_file() {
        if has_swift_extension(root) {
            return vec![root.to_path_buf()];
        }
        tracing::warn!("Source file {} is not a Swift file", root.display());
        return Vec::new();
    }

    let include_patterns = compile_patterns(include);
    let exclude_patterns = compile_patterns(exclude);
    let match_opts = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let relative_path = e
                .path()
                .strip_prefix(root)
                .unwrap_or(e.path())
                .to_string_lossy()
                .to_string();

            let included = include_patterns.is_empty()
                || include_patterns
                    .iter()
                    .any(|p| p.matches_with(&relative_path, match_opts));
            let excluded = exclude_patterns
                .iter()
                .any(|p| p.matches_with(&relative_path, match_opts));

            included && !excluded
        })
        .map(|e| e.into_path())
        .collect();

    files.sort();
    tracing::debug!("Found {} source files under {}", files.len(), root.display());
    files
}

/// Read every path as UTF-8, skipping unreadable files.
pub fn read_sources(paths: &[PathBuf]) -> Vec<SourceFile> {
    paths
        .iter()
        .filter_map(|path| match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!("Scanning {}", path.display());
                Some(SourceFile::new(path.clone(), text))
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable file {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

fn has_swift_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SWIFT_EXTENSION)
}

fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!("Ignoring invalid glob {:?}: {}", p, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn globs(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| p.to_string()).collect()
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "struct S {}\n").unwrap();
    }

    #[test]
    fn test_walks_and_filters_directory() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.swift");
        touch(dir.path(), "Sources/a.swift");
        touch(dir.path(), "Sources/readme.md");
        touch(dir.path(), ".build/checkouts/dep.swift");

        let found = find_sources(
            dir.path(),
            &globs(&["**/*.swift"]),
            &globs(&["**/.build/**"]),
        );
        let relative: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![PathBuf::from("Sources/a.swift"), PathBuf::from("b.swift")]
        );
    }

    #[test]
    fn test_single_file_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Model.swift");
        touch(dir.path(), "notes.txt");

        let swift = dir.path().join("Model.swift");
        assert_eq!(find_sources(&swift, &[], &[]), vec![swift.clone()]);
        assert!(find_sources(dir.path().join("notes.txt"), &[], &[]).is_empty());
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(find_sources(dir.path().join("missing"), &globs(&["**/*.swift"]), &[]).is_empty());
    }

    #[test]
    fn test_read_sources_skips_unreadable() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.swift");
        let paths = vec![dir.path().join("a.swift"), dir.path().join("gone.swift")];

        let sources = read_sources(&paths);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].text, "struct S {}\n");
    }
}
