//! CLI command implementations.
//!
//! Each command is in its own submodule and exposes an options struct plus
//! an `execute_*` entry point.

pub mod generate;
pub mod list;

pub use generate::{execute_generate, write_output, GenerateOptions, GenerateStatus};
pub use list::{collect_declarations, execute_list, ListOptions, ListedDeclaration};
