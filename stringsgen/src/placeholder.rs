//! Format placeholder parsing.
//!
//! Scans `printf`-style conversion specifiers
//! (`%[position$][flags][width][.precision][length]conversion`) out of a
//! localized value and resolves them to the ordered list of parameter types a
//! caller has to supply. Parsing is total: unknown conversions degrade to
//! [`PlaceholderType::Unknown`] and stray `%` signs are skipped.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Highest explicit `N$` position honoured. Larger positions are ignored.
pub const MAX_POSITION: usize = 4096;

/// Semantic kind of one format parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderType {
    /// `%@`
    Object,
    /// `%d %i %o %u %x` (any case)
    Int,
    /// `%f %e %g` (any case)
    Float,
    /// `%c`, `%C`
    Char,
    /// `%s`, `%S`
    CString,
    /// Any other conversion letter, or a position nothing refers to.
    Unknown,
}

impl PlaceholderType {
    /// Classifies a conversion character.
    ///
    /// Returns `None` when the byte cannot end a specifier at all.
    pub fn from_conversion(ch: u8) -> Option<Self> {
        match ch {
            b'@' => Some(PlaceholderType::Object),
            b'd' | b'i' | b'o' | b'u' | b'x' | b'D' | b'I' | b'O' | b'U' | b'X' => {
                Some(PlaceholderType::Int)
            }
            b'f' | b'e' | b'g' | b'F' | b'E' | b'G' => Some(PlaceholderType::Float),
            b'c' | b'C' => Some(PlaceholderType::Char),
            b's' | b'S' => Some(PlaceholderType::CString),
            c if c.is_ascii_alphabetic() => Some(PlaceholderType::Unknown),
            _ => None,
        }
    }

    /// Shorthand for [`parse_placeholders`].
    pub fn from_format_string(format: &str) -> Vec<PlaceholderType> {
        parse_placeholders(format)
    }
}

impl Display for PlaceholderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlaceholderType::Object => "Object",
            PlaceholderType::Int => "Int",
            PlaceholderType::Float => "Float",
            PlaceholderType::Char => "Char",
            PlaceholderType::CString => "CString",
            PlaceholderType::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// One conversion specifier as it appears in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Specifier {
    /// Explicit 1-based `N$` position, if any.
    pub position: Option<usize>,
    pub kind: PlaceholderType,
}

/// Two specifiers resolved to the same position with different types.
///
/// The later specifier wins; `previous` is the type it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaceholderConflict {
    pub position: usize,
    pub previous: PlaceholderType,
    pub replacement: PlaceholderType,
}

/// Resolved parameter list plus any position conflicts found on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderSignature {
    pub types: Vec<PlaceholderType>,
    pub conflicts: Vec<PlaceholderConflict>,
}

/// Extracts specifiers in occurrence order. `%%` is skipped.
pub fn extract_specifiers(input: &str) -> Vec<Specifier> {
    let bytes = input.as_bytes();
    let mut i = 0;
    let mut out = Vec::new();

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        // Escaped percent
        if i + 1 < bytes.len() && bytes[i + 1] == b'%' {
            i += 2;
            continue;
        }

        let mut j = i + 1;

        // Optional positional index: digits followed by '$'
        let mut position = None;
        let digits_end = skip_digits(bytes, j);
        if digits_end > j && digits_end < bytes.len() && bytes[digits_end] == b'$' {
            // An overflowing index maps past MAX_POSITION and gets dropped later.
            position = Some(input[j..digits_end].parse::<usize>().unwrap_or(usize::MAX));
            j = digits_end + 1;
        }

        while j < bytes.len() && matches!(bytes[j], b'+' | b'-' | b'0' | b' ' | b'#') {
            j += 1;
        }
        j = skip_digits(bytes, j);
        if j < bytes.len() && bytes[j] == b'.' {
            j = skip_digits(bytes, j + 1);
        }

        let after_length = skip_length_modifier(bytes, j);
        // Fall back to the modifier letter itself when nothing valid follows it.
        let conversion = [after_length, j].into_iter().find_map(|k| {
            let kind = PlaceholderType::from_conversion(*bytes.get(k)?)?;
            Some((k, kind))
        });

        match conversion {
            Some((k, kind)) => {
                out.push(Specifier { position, kind });
                i = k + 1;
            }
            // Not a specifier; skip this '%'
            None => i += 1,
        }
    }

    out
}

/// Resolves the parameter list for a format string.
///
/// Unpositioned specifiers take positions 1, 2, 3... in the order they appear,
/// counted independently of the positioned ones. Gaps are filled with
/// [`PlaceholderType::Unknown`].
pub fn parse_placeholders(format: &str) -> Vec<PlaceholderType> {
    parse_placeholders_detailed(format).types
}

/// Like [`parse_placeholders`], also reporting positions bound twice with
/// different types.
pub fn parse_placeholders_detailed(format: &str) -> PlaceholderSignature {
    let mut slots: Vec<Option<PlaceholderType>> = Vec::new();
    let mut conflicts = Vec::new();
    let mut next_implicit = 1;

    for spec in extract_specifiers(format) {
        let position = match spec.position {
            Some(p) if p == 0 || p > MAX_POSITION => continue,
            Some(p) => p,
            None => {
                next_implicit += 1;
                next_implicit - 1
            }
        };

        if slots.len() < position {
            slots.resize(position, None);
        }
        let slot = &mut slots[position - 1];
        if let Some(previous) = *slot {
            if previous != spec.kind {
                conflicts.push(PlaceholderConflict {
                    position,
                    previous,
                    replacement: spec.kind,
                });
            }
        }
        *slot = Some(spec.kind);
    }

    PlaceholderSignature {
        types: slots
            .into_iter()
            .map(|t| t.unwrap_or(PlaceholderType::Unknown))
            .collect(),
        conflicts,
    }
}

fn skip_digits(bytes: &[u8], mut j: usize) -> usize {
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    j
}

// hh h ll l q L z t j
fn skip_length_modifier(bytes: &[u8], j: usize) -> usize {
    match bytes.get(j) {
        Some(b'h') if bytes.get(j + 1) == Some(&b'h') => j + 2,
        Some(b'l') if bytes.get(j + 1) == Some(&b'l') => j + 2,
        Some(b'h' | b'l' | b'q' | b'L' | b'z' | b't' | b'j') => j + 1,
        _ => j,
    }
}

#[cfg(test)]
mod tests {
    use super::PlaceholderType::*;
    use super::*;

    #[test]
    fn test_object_placeholder() {
        assert_eq!(parse_placeholders("%@"), vec![Object]);
    }

    #[test]
    fn test_float_placeholder() {
        assert_eq!(parse_placeholders("%f"), vec![Float]);
        assert_eq!(parse_placeholders("%g-%e"), vec![Float, Float]);
    }

    #[test]
    fn test_float_with_width_and_precision() {
        assert_eq!(
            parse_placeholders("%1.2f : %.3f : %+3f : %-6.2f"),
            vec![Float, Float, Float, Float]
        );
    }

    #[test]
    fn test_int_placeholders() {
        assert_eq!(
            parse_placeholders("%d-%i-%o-%u-%x"),
            vec![Int, Int, Int, Int, Int]
        );
    }

    #[test]
    fn test_uppercase_conversions() {
        assert_eq!(
            parse_placeholders("%X %D %E %G %C %S"),
            vec![Int, Int, Float, Float, Char, CString]
        );
    }

    #[test]
    fn test_char_and_cstring_placeholders() {
        assert_eq!(parse_placeholders("%c-%s"), vec![Char, CString]);
    }

    #[test]
    fn test_positional_with_unpositioned_fallback() {
        assert_eq!(
            parse_placeholders("%2$d-%4$f-%3$@-%c"),
            vec![Char, Int, Object, Float]
        );
    }

    #[test]
    fn test_positional_gap_is_unknown() {
        assert_eq!(
            parse_placeholders("%2$1.3d - %4$-.7f - %3$@ - %% - %5$+3c - %%"),
            vec![Unknown, Int, Object, Float, Char]
        );
    }

    #[test]
    fn test_escaped_percent_is_not_a_placeholder() {
        assert!(parse_placeholders("%%foo").is_empty());
        assert_eq!(parse_placeholders("100%% of %d"), vec![Int]);
        assert_eq!(parse_placeholders("%%%d"), vec![Int]);
    }

    #[test]
    fn test_unknown_letter_degrades() {
        assert_eq!(parse_placeholders("%k and %d"), vec![Unknown, Int]);
    }

    #[test]
    fn test_stray_percent_is_ignored() {
        assert!(parse_placeholders("100%").is_empty());
        assert!(parse_placeholders("50%!").is_empty());
        assert!(parse_placeholders("").is_empty());
    }

    #[test]
    fn test_length_modifiers() {
        assert_eq!(
            parse_placeholders("%ld %lld %hu %hhd %Lf %zu"),
            vec![Int, Int, Int, Int, Float, Int]
        );
        // A lone modifier letter still counts as a specifier.
        assert_eq!(parse_placeholders("%l!"), vec![Unknown]);
    }

    #[test]
    fn test_zero_padding_is_a_flag_not_a_position() {
        assert_eq!(parse_placeholders("%05d|%-08.3f"), vec![Int, Float]);
    }

    #[test]
    fn test_invalid_positions_are_ignored() {
        assert!(parse_placeholders("%0$d").is_empty());
        assert!(parse_placeholders("%99999999999999999999999$d").is_empty());
        assert_eq!(parse_placeholders("%4097$d %@"), vec![Object]);
    }

    #[test]
    fn test_non_ascii_text_is_skipped() {
        assert_eq!(parse_placeholders("Grüße, %@ — %d€"), vec![Object, Int]);
    }

    #[test]
    fn test_conflicting_positions_last_wins() {
        let signature = parse_placeholders_detailed("%1$d %1$@ %2$f %2$f");
        assert_eq!(signature.types, vec![Object, Float]);
        assert_eq!(
            signature.conflicts,
            vec![PlaceholderConflict {
                position: 1,
                previous: Int,
                replacement: Object,
            }]
        );
    }

    #[test]
    fn test_implicit_specifier_overwrites_explicit_slot() {
        let signature = parse_placeholders_detailed("%1$d %@");
        assert_eq!(signature.types, vec![Object]);
        assert_eq!(
            signature.conflicts,
            vec![PlaceholderConflict {
                position: 1,
                previous: Int,
                replacement: Object,
            }]
        );
    }

    #[test]
    fn test_extract_specifiers_keeps_occurrence_order() {
        let specs = extract_specifiers("%2$d %@");
        assert_eq!(
            specs,
            vec![
                Specifier {
                    position: Some(2),
                    kind: Int
                },
                Specifier {
                    position: None,
                    kind: Object
                },
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CString.to_string(), "CString");
        assert_eq!(Unknown.to_string(), "Unknown");
    }
}
