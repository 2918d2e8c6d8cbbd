//! A single localization key and the parameter list derived from its value.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::placeholder::{PlaceholderType, parse_placeholders_detailed};

lazy_static! {
    // "key" = "value"; followed by any number of // or /* */ comments
    static ref RECORD_REGEX: Regex = Regex::new(
        r#"(?s)^\s*"((?:[^"\\]|\\.)+)"\s*=\s*"((?:[^"\\]|\\.)*)"\s*;(?:\s*(?://.*|/\*.*?\*/))*\s*$"#
    )
    .expect("record regex is valid");
}

/// One localization key plus its ordered placeholder signature.
///
/// Entries are immutable once built. Use [`Entry::from_line`] to read one out of
/// a `.strings` record, or [`Entry::new`] / [`Entry::with_placeholders`] to
/// build one directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    key: String,
    placeholders: Vec<PlaceholderType>,
}

impl Entry {
    /// An entry whose value takes no parameters.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_placeholders(key, [])
    }

    pub fn with_placeholders(
        key: impl Into<String>,
        placeholders: impl IntoIterator<Item = PlaceholderType>,
    ) -> Self {
        Entry {
            key: key.into(),
            placeholders: placeholders.into_iter().collect(),
        }
    }

    /// Parses a `"KEY" = "VALUE";` record, with an optional trailing comment.
    ///
    /// Returns `None` when the text does not have that shape. The key is
    /// unescaped; the value is only used to derive the placeholders.
    pub fn from_line(line: &str) -> Option<Self> {
        let captures = RECORD_REGEX.captures(line)?;
        let key = unescape(captures.get(1)?.as_str());
        let signature = parse_placeholders_detailed(captures.get(2)?.as_str());
        for conflict in &signature.conflicts {
            warn!(
                key = %key,
                position = conflict.position,
                previous = %conflict.previous,
                replacement = %conflict.replacement,
                "placeholder position bound to two different types"
            );
        }
        Some(Entry {
            key,
            placeholders: signature.types,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn placeholders(&self) -> &[PlaceholderType] {
        &self.placeholders
    }

    /// Identifier used for the generated member.
    ///
    /// The key is split on every non-alphanumeric ASCII character and the parts
    /// are joined in UpperCamelCase (`alert.title` becomes `AlertTitle`). A
    /// leading digit gets a `_` prefix.
    pub fn member_name(&self) -> String {
        let mut name = String::with_capacity(self.key.len());
        for part in self
            .key
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
        {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                name.push(first.to_ascii_uppercase());
                name.push_str(chars.as_str());
            }
        }

        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        name
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(c @ ('"' | '\\' | '\'')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
