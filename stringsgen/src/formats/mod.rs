//! Localization file formats stringsgen can read.

pub mod strings;

use std::path::Path;

pub use strings::{SkippedRecord, StringsFile};

/// Returns `true` for paths with a `.strings` extension.
pub fn is_strings_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("strings"))
}
