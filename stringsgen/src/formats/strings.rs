//! Support for reading Apple `.strings` localization files.
//!
//! The content is split into logical records (blank lines and comments are
//! dropped, a record broken over several lines is joined back into one) and
//! each record is turned into an [`Entry`]. Records that do not parse are kept
//! aside as [`SkippedRecord`]s instead of failing the file.

use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{entry::Entry, error::Error};

lazy_static! {
    // A record cut short by a line break: the key, optionally `=`, optionally
    // a value whose closing quote is still missing
    static ref OPEN_RECORD_REGEX: Regex =
        Regex::new(r#"(?s)^"(?:[^"\\]|\\.)+"\s*(?:=\s*(?:"(?:[^"\\]|\\.)*)?)?$"#)
            .expect("open record regex is valid");
}

/// Parsed content of one `.strings` file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringsFile {
    pub entries: Vec<Entry>,
    /// Records that did not match `"KEY" = "VALUE";`.
    pub skipped: Vec<SkippedRecord>,
}

/// A record dropped while parsing. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// 1-based line the record starts on.
    pub line: usize,
    pub text: String,
}

impl StringsFile {
    /// Parses already decoded content.
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut file = StringsFile::default();

        for (line, text) in logical_records(content) {
            match Entry::from_line(&text) {
                Some(entry) => file.entries.push(entry),
                None => {
                    warn!(line, record = %text, "skipping malformed .strings record");
                    file.skipped.push(SkippedRecord { line, text });
                }
            }
        }

        debug!(
            entries = file.entries.len(),
            skipped = file.skipped.len(),
            "parsed .strings content"
        );
        file
    }

    /// Decodes raw file content, UTF-16 when it starts with a BOM and UTF-8
    /// otherwise, then parses it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::parse(&decode(bytes)?))
    }

    /// Reads the whole input, then behaves like [`StringsFile::from_bytes`].
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let text = decode(&bytes).map_err(|e| match e {
            Error::Decode(reason) => Error::Decode(format!("{}: {}", path.display(), reason)),
            other => other,
        })?;
        Ok(Self::parse(&text))
    }
}

fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, Error> {
    let (encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        return Err(Error::Decode(format!(
            "input is not valid {}",
            encoding.name()
        )));
    }
    Ok(text)
}

/// Splits content into `(start line, record text)` pairs.
fn logical_records(content: &str) -> Vec<(usize, String)> {
    let mut records = Vec::new();
    let mut pending: Option<(usize, String)> = None;
    let mut in_block_comment = false;

    for (index, raw) in content.lines().enumerate() {
        if let Some((start, mut buffer)) = pending.take() {
            if Entry::from_line(raw).is_some() {
                // A complete record ends the open one as is
                records.push((start, buffer));
            } else {
                buffer.push('\n');
                buffer.push_str(raw);
                if OPEN_RECORD_REGEX.is_match(&buffer) {
                    pending = Some((start, buffer));
                } else {
                    in_block_comment = cut_open_comment(&mut buffer);
                    records.push((start, buffer));
                }
                continue;
            }
        }

        let mut rest = raw.trim();
        if in_block_comment {
            match rest.find("*/") {
                Some(end) => {
                    in_block_comment = false;
                    rest = rest[end + 2..].trim_start();
                }
                None => continue,
            }
        }

        // Leading block comments, possibly several on one line
        while let Some(after_open) = rest.strip_prefix("/*") {
            match after_open.find("*/") {
                Some(end) => rest = after_open[end + 2..].trim_start(),
                None => {
                    in_block_comment = true;
                    rest = "";
                }
            }
        }

        if rest.is_empty() || rest.starts_with("//") {
            continue;
        }

        let mut record = rest.to_string();
        if OPEN_RECORD_REGEX.is_match(&record) {
            pending = Some((index + 1, record));
        } else {
            in_block_comment = cut_open_comment(&mut record);
            records.push((index + 1, record));
        }
    }

    // Still open at end of input; let the record parser reject it.
    records.extend(pending);
    records
}

/// Drops a trailing `/*` comment that is not closed on the same line.
///
/// Returns `true` when such a comment was found, so the lines after it are
/// comment text until the next `*/`.
fn cut_open_comment(record: &mut String) -> bool {
    match open_comment_start(record) {
        Some(start) => {
            record.truncate(start);
            record.truncate(record.trim_end().len());
            true
        }
        None => false,
    }
}

fn open_comment_start(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut in_quote = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_quote => i += 1,
            b'"' => in_quote = !in_quote,
            b'/' if !in_quote => match bytes.get(i + 1) {
                Some(b'/') => return None,
                Some(b'*') => match text[i + 2..].find("*/") {
                    Some(end) => {
                        i += end + 4;
                        continue;
                    }
                    None => return Some(i),
                },
                _ => {}
            },
            _ => {}
        }
        i += 1;
    }
    None
}
