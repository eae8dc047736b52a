#![forbid(unsafe_code)]
//! fixturegen command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use fixturegen::commands::{
    execute_generate, execute_list, GenerateOptions, GenerateStatus, ListOptions,
};
use fixturegen::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(name = "fixturegen")]
#[command(about = "Generate Swift fixture factories for annotated types")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the fixture document
    Generate {
        /// Source directory or Swift file
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Modules to import in the generated file (can specify multiple)
        #[arg(long, num_args = 1..)]
        additional_imports: Vec<String>,

        /// Module to import with @testable
        #[arg(long)]
        testable_import: Option<String>,

        /// Fail if the output file is out of date instead of writing it
        #[arg(long, conflicts_with = "stdout")]
        check: bool,

        /// Print the generated document instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// List declarations marked for fixture generation
    List {
        /// Source directory or Swift file
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            std::process::exit(2);
        }
    };

    match cli.command {
        Commands::Generate {
            source,
            output,
            additional_imports,
            testable_import,
            check,
            stdout,
        } => {
            let options = GenerateOptions {
                source,
                output,
                additional_imports,
                testable_import,
                check,
                stdout,
            };
            if execute_generate(options, config)? == GenerateStatus::Stale {
                std::process::exit(1);
            }
        }

        Commands::List { source, json } => {
            let options = ListOptions { source, json };
            execute_list(options, config)?;
        }
    }

    Ok(())
}
