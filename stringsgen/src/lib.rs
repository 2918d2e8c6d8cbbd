#![forbid(unsafe_code)]
//! Typed Swift accessors from Apple `.strings` localization files.
//!
//! Every `"key" = "value";` record becomes one case of a generated enum whose
//! associated values follow the `printf` placeholders found in the value:
//! `"Greetings" = "Hello %@, you are %d";` yields `case Greetings(String, Int)`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringsgen::{BuildConfig, EnumBuilder, Indentation};
//!
//! let mut builder = EnumBuilder::new();
//! let skipped = builder.parse_strings_file("en.lproj/Localizable.strings")?;
//! for record in &skipped {
//!     eprintln!("line {}: could not parse `{}`", record.line, record.text);
//! }
//!
//! let config = BuildConfig::default()
//!     .with_enum_name("Loc")
//!     .with_indentation(Indentation::Spaces(4));
//! std::fs::write("Loc.swift", builder.build_with(&config))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Placeholder parsing is available on its own:
//!
//! ```rust
//! use stringsgen::{PlaceholderType, parse_placeholders};
//!
//! assert_eq!(
//!     parse_placeholders("%2$d-%4$f-%3$@-%c"),
//!     vec![
//!         PlaceholderType::Char,
//!         PlaceholderType::Int,
//!         PlaceholderType::Object,
//!         PlaceholderType::Float,
//!     ]
//! );
//! ```

pub mod builder;
pub mod entry;
pub mod error;
pub mod formats;
pub mod placeholder;
pub mod render;

// Re-export most used types for easy consumption
pub use crate::{
    builder::{Duplicate, EnumBuilder},
    entry::Entry,
    error::Error,
    formats::{SkippedRecord, StringsFile},
    placeholder::{
        PlaceholderConflict, PlaceholderSignature, PlaceholderType, parse_placeholders,
        parse_placeholders_detailed,
    },
    render::{BuildConfig, DEFAULT_ENUM_NAME, Indentation, Member, render_swift, swift_type},
};
