use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSetBuilder};
use ignore::WalkBuilder;
use rayon::prelude::*;
use stringsgen::formats::is_strings_file;

fn has_glob_meta(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
}

// Static directory prefix before the first glob meta-character
fn static_prefix_dir(pattern: &str) -> PathBuf {
    let idx = pattern
        .bytes()
        .position(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
        .unwrap_or(pattern.len());
    let p = Path::new(&pattern[..idx]);
    if p.is_dir() {
        p.to_path_buf()
    } else {
        p.parent()
            .filter(|pp| !pp.as_os_str().is_empty())
            .map(|pp| pp.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Expand glob patterns among the inputs into concrete `.strings` paths.
///
/// Literal paths are passed through untouched so a missing file surfaces as a
/// read error later. Each pattern must match at least one `.strings` file.
/// Results keep input order, are sorted within a pattern, and are deduplicated.
pub fn expand_input_globs(inputs: &[String]) -> Result<Vec<PathBuf>, String> {
    let expanded = inputs
        .par_iter()
        .map(|input| {
            if !has_glob_meta(input) {
                return Ok(vec![PathBuf::from(input)]);
            }

            // literal_separator to avoid '*' matching '/'
            let glob = GlobBuilder::new(input)
                .literal_separator(true)
                .build()
                .map_err(|e| format!("Invalid glob pattern '{}': {}", input, e))?;
            let set = GlobSetBuilder::new()
                .add(glob)
                .build()
                .map_err(|e| format!("Failed to build glob set: {}", e))?;

            let walker = WalkBuilder::new(static_prefix_dir(input))
                .git_ignore(true)
                .git_global(true)
                .git_exclude(true)
                .hidden(false)
                .ignore(true)
                .parents(true)
                .sort_by_file_name(|a, b| a.cmp(b))
                .build();

            let mut matched = Vec::new();
            for dent in walker.flatten() {
                if !dent.file_type().is_some_and(|t| t.is_file()) {
                    continue;
                }
                let path = dent.path();
                let candidate = path.strip_prefix("./").unwrap_or(path);
                if (set.is_match(path) || set.is_match(candidate)) && is_strings_file(path) {
                    matched.push(candidate.to_path_buf());
                }
            }

            if matched.is_empty() {
                return Err(format!("No .strings files match pattern '{}'", input));
            }
            Ok(matched)
        })
        .collect::<Result<Vec<_>, String>>()?;

    // Deduplicate while preserving order
    let mut seen: HashSet<PathBuf> = HashSet::new();
    Ok(expanded
        .into_iter()
        .flatten()
        .filter(|p| seen.insert(p.clone()))
        .collect())
}
