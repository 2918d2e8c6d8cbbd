//! CLI library for testing purposes

pub mod config;
pub mod generate;
pub mod inspect;
pub mod logging;
pub mod path_glob;

pub use config::{CliOverrides, FileConfig, ResolvedConfig};
pub use generate::{GenerateOptions, GeneratedFile, run_generate};
pub use inspect::{InspectReport, inspect_file};
pub use path_glob::expand_input_globs;
