//! List command: show marked declarations.

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::config::Config;
use crate::pipeline::FixtureGenerator;
use crate::scan::{find_sources, read_sources};
use crate::visit::MarkedDeclaration;

/// Options for the list command
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Source directory or file, overriding the config
    pub source: Option<PathBuf>,
    /// Output as JSON
    pub json: bool,
}

/// A marked declaration with the file it was found in.
#[derive(Debug, Clone, Serialize)]
pub struct ListedDeclaration {
    pub file: PathBuf,
    pub qualified_name: String,
    #[serde(flatten)]
    pub declaration: MarkedDeclaration,
}

/// Marked declarations of every source under `source`, file by file.
pub fn collect_declarations(source: &Path, config: &Config) -> Vec<ListedDeclaration> {
    let generator = FixtureGenerator::new(config.preamble());
    let paths = find_sources(source, &config.include, &config.exclude);

    read_sources(&paths)
        .into_iter()
        .flat_map(|file| {
            generator
                .discover(&file.text)
                .into_iter()
                .map(move |declaration| ListedDeclaration {
                    file: file.path.clone(),
                    qualified_name: declaration.qualified_name(),
                    declaration,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Execute the list command
pub fn execute_list(options: ListOptions, config: Config) -> Result<()> {
    let source = options.source.unwrap_or_else(|| config.source.clone());
    let listed = collect_declarations(&source, &config);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    if listed.is_empty() {
        println!("{} No marked declarations under {}", style("✗").red(), source.display());
        return Ok(());
    }

    let width = listed
        .iter()
        .map(|l| l.qualified_name.len())
        .max()
        .unwrap_or(0);

    for item in &listed {
        let declaration = &item.declaration;
        println!(
            "  {:<width$}  {:<6}  {} fields, {} overrides  {}",
            style(&item.qualified_name).bold(),
            declaration.kind.as_str(),
            declaration.fields.len(),
            declaration.overrides.len(),
            style(format!("{}:{}", item.file.display(), declaration.line)).dim(),
        );
    }
    println!(
        "{} {} marked declarations",
        style("✓").green(),
        listed.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collects_across_files_in_path_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("b.swift"),
            "/// @fixturable(override: x = 1)\nfinal class Beta {\n    let x: Int\n}\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("a.swift"),
            "enum Scope {\n    /// @fixturable\n    struct Alpha {}\n}\n",
        )
        .unwrap();

        let listed = collect_declarations(dir.path(), &Config::default());
        let names: Vec<_> = listed.iter().map(|l| l.qualified_name.as_str()).collect();
        assert_eq!(names, vec!["Scope.Alpha", "Beta"]);
        assert_eq!(listed[0].declaration.line, 3);
        assert_eq!(listed[1].declaration.overrides.len(), 1);
    }

    #[test]
    fn test_json_shape() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("Point.swift"),
            "/// @fixturable\nstruct Point {\n    let x: Int\n}\n",
        )
        .unwrap();

        let listed = collect_declarations(dir.path(), &Config::default());
        let json = serde_json::to_value(&listed).unwrap();
        assert_eq!(json[0]["qualified_name"], "Point");
        assert_eq!(json[0]["name"], "Point");
        assert_eq!(json[0]["kind"], "struct");
        assert_eq!(json[0]["fields"][0]["name"], "x");
        assert_eq!(json[0]["fields"][0]["type"], "Int");
    }
}
