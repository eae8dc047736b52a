//! Generate command: write (or verify) the fixture document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use similar::TextDiff;

use crate::config::Config;
use crate::error::FixtureError;
use crate::pipeline::FixtureGenerator;
use crate::scan::{find_sources, read_sources};
use crate::visit::MarkedDeclaration;

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Source directory or file, overriding the config
    pub source: Option<PathBuf>,
    /// Output path, overriding the config
    pub output: Option<PathBuf>,
    /// Extra imports, replacing the configured ones when non-empty
    pub additional_imports: Vec<String>,
    /// Module to import with `@testable`
    pub testable_import: Option<String>,
    /// Compare with the existing output instead of writing
    pub check: bool,
    /// Print the document instead of writing it
    pub stdout: bool,
}

impl GenerateOptions {
    /// Config with command-line values taking precedence.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if !self.additional_imports.is_empty() {
            config.additional_imports = self.additional_imports.clone();
        }
        if self.testable_import.is_some() {
            config.testable_import = self.testable_import.clone();
        }
        config
    }
}

/// Result of a generate run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStatus {
    Written,
    Printed,
    UpToDate,
    Stale,
}

/// Execute the generate command
pub fn execute_generate(options: GenerateOptions, config: Config) -> Result<GenerateStatus> {
    let config = options.apply(config);
    let generator = FixtureGenerator::new(config.preamble());

    if !options.stdout {
        println!(
            "{} Scanning {}...",
            style("→").cyan(),
            config.source.display()
        );
    }

    let paths = find_sources(&config.source, &config.include, &config.exclude);
    let sources = read_sources(&paths);
    let declarations: Vec<MarkedDeclaration> = sources
        .iter()
        .flat_map(|source| generator.discover(&source.text))
        .collect();
    let document = generator.render(&declarations);

    if options.stdout {
        print!("{document}");
        return Ok(GenerateStatus::Printed);
    }

    if options.check {
        return check_output(&config.output, &document);
    }

    write_output(&config.output, &document)?;
    println!(
        "{} Generated {} fixtures from {} files",
        style("✓").green(),
        declarations.len(),
        sources.len()
    );
    println!("  Output: {}", config.output.display());
    Ok(GenerateStatus::Written)
}

/// Write the document, creating missing parent directories.
pub fn write_output(path: &Path, document: &str) -> crate::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FixtureError::io(parent, e))?;
    }
    std::fs::write(path, document).map_err(|e| FixtureError::io(path, e))
}

fn check_output(path: &Path, document: &str) -> Result<GenerateStatus> {
    let existing = if path.exists() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };

    if existing == document {
        println!(
            "{} {} is up to date",
            style("✓").green(),
            path.display()
        );
        return Ok(GenerateStatus::UpToDate);
    }

    let old_header = path.display().to_string();
    let diff = TextDiff::from_lines(existing.as_str(), document)
        .unified_diff()
        .context_radius(3)
        .header(&old_header, "generated")
        .to_string();

    println!("{} {} is out of date", style("✗").red(), path.display());
    print!("{diff}");
    Ok(GenerateStatus::Stale)
}
