//! Accumulate entries, then render them.
//!
//! ```rust
//! use stringsgen::{EnumBuilder, Entry, PlaceholderType};
//!
//! let mut builder = EnumBuilder::new();
//! builder.add_entry(Entry::new("Title"));
//! builder.add_entry(Entry::with_placeholders(
//!     "Greetings",
//!     [PlaceholderType::Object, PlaceholderType::Int],
//! ));
//! let swift = builder.build();
//! assert!(swift.contains("case Greetings(String, Int)"));
//! ```

use std::collections::HashSet;
use std::path::Path;

use tracing::warn;

use crate::{
    entry::Entry,
    error::Error,
    formats::strings::{SkippedRecord, StringsFile},
    render::{BuildConfig, Member, render_swift},
};

/// Append-only, insertion-ordered list of entries.
///
/// Adding never deduplicates. When rendering, the first entry for a given key
/// (or member name) wins and later ones are dropped; [`EnumBuilder::build_validated`]
/// refuses to render instead.
#[derive(Debug, Clone, Default)]
pub struct EnumBuilder {
    entries: Vec<Entry>,
}

/// A later entry hidden by an earlier one at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Duplicate {
    /// Same key added twice.
    Key { key: String },
    /// Different keys that produce the same member name.
    MemberName {
        name: String,
        first_key: String,
        key: String,
    },
}

impl std::fmt::Display for Duplicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Duplicate::Key { key } => write!(f, "duplicate key `{}`", key),
            Duplicate::MemberName {
                name,
                first_key,
                key,
            } => write!(
                f,
                "keys `{}` and `{}` both map to member `{}`",
                first_key, key, name
            ),
        }
    }
}

impl EnumBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn add_entries<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = Entry>,
    {
        self.entries.extend(entries);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reads a `.strings` file and appends its entries in file order.
    ///
    /// Fails only when the file cannot be read or decoded, in which case no
    /// entry is added. Unparsable records are returned, not fatal.
    pub fn parse_strings_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<Vec<SkippedRecord>, Error> {
        let file = StringsFile::read_from(path)?;
        Ok(self.absorb(file))
    }

    /// Same as [`EnumBuilder::parse_strings_file`] for content already in memory.
    pub fn parse_strings(&mut self, content: &str) -> Vec<SkippedRecord> {
        self.absorb(StringsFile::parse(content))
    }

    fn absorb(&mut self, file: StringsFile) -> Vec<SkippedRecord> {
        self.entries.extend(file.entries);
        file.skipped
    }

    /// Later entries that rendering drops, in insertion order.
    pub fn duplicates(&self) -> Vec<Duplicate> {
        self.partition().1
    }

    /// The generated members, in insertion order, duplicates removed.
    pub fn members(&self) -> Vec<Member> {
        let (members, duplicates) = self.partition();
        for duplicate in &duplicates {
            warn!(%duplicate, "dropping entry from generated output");
        }
        members
    }

    /// Renders with the default [`BuildConfig`].
    pub fn build(&self) -> String {
        self.build_with(&BuildConfig::default())
    }

    pub fn build_with(&self, config: &BuildConfig) -> String {
        render_swift(&self.members(), config)
    }

    /// Renders only if no entry would be dropped and no key is empty.
    pub fn build_validated(&self, config: &BuildConfig) -> Result<String, Error> {
        if let Some(index) = self.entries.iter().position(|e| e.key().is_empty()) {
            return Err(Error::validation_error(format!(
                "entry at index {} has an empty key",
                index
            )));
        }

        let (members, duplicates) = self.partition();
        if !duplicates.is_empty() {
            return Err(Error::validation_error(
                duplicates
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            ));
        }
        Ok(render_swift(&members, config))
    }

    fn partition(&self) -> (Vec<Member>, Vec<Duplicate>) {
        let mut members: Vec<Member> = Vec::with_capacity(self.entries.len());
        let mut duplicates = Vec::new();
        let mut keys = HashSet::new();

        for entry in &self.entries {
            if !keys.insert(entry.key()) {
                duplicates.push(Duplicate::Key {
                    key: entry.key().to_string(),
                });
                continue;
            }

            let name = entry.member_name();
            if let Some(first) = members.iter().find(|m| m.name == name) {
                duplicates.push(Duplicate::MemberName {
                    name,
                    first_key: first.key.clone(),
                    key: entry.key().to_string(),
                });
                continue;
            }

            members.push(Member {
                name,
                key: entry.key().to_string(),
                placeholders: entry.placeholders().to_vec(),
            });
        }

        (members, duplicates)
    }
}
