//! Optional `stringsgen.toml` configuration.
//!
//! ```toml
//! enum_name = "Loc"
//! indentation = "spaces:4"   # or "tab", or "4"
//! output_dir = "Generated"
//! strict = true
//! ```
//!
//! Command-line flags override file values, which override the defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use stringsgen::{BuildConfig, Indentation};

pub const DEFAULT_CONFIG_FILE: &str = "stringsgen.toml";

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub enum_name: Option<String>,
    pub indentation: Option<Indentation>,
    pub output_dir: Option<PathBuf>,
    pub strict: Option<bool>,
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub enum_name: Option<String>,
    pub indentation: Option<Indentation>,
    pub output_dir: Option<PathBuf>,
    pub strict: bool,
}

/// Effective settings for one `generate` run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub build: BuildConfig,
    pub output_dir: Option<PathBuf>,
    pub strict: bool,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading config {}: {}", path.display(), e))?;
        toml::from_str(&content)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))
    }

    /// Loads `explicit` when given, otherwise `stringsgen.toml` from `dir` if present.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, String> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    tracing::debug!(path = %candidate.display(), "using config file");
                    Self::load(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn resolve(self, overrides: CliOverrides) -> ResolvedConfig {
        let defaults = BuildConfig::default();
        ResolvedConfig {
            build: BuildConfig {
                enum_name: overrides
                    .enum_name
                    .or(self.enum_name)
                    .unwrap_or(defaults.enum_name),
                indentation: overrides
                    .indentation
                    .or(self.indentation)
                    .unwrap_or(defaults.indentation),
            },
            output_dir: overrides.output_dir.or(self.output_dir),
            strict: overrides.strict || self.strict.unwrap_or(false),
        }
    }
}
