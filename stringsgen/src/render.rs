//! Rendering of accumulated entries into Swift source.
//!
//! [`render_swift`] is a pure function of the member list and a
//! [`BuildConfig`]; the same input always produces byte-identical output.

use std::{fmt::Display, str::FromStr};

use indoc::indoc;
use serde::{Deserialize, Serialize};

use crate::{error::Error, placeholder::PlaceholderType};

pub const DEFAULT_ENUM_NAME: &str = "L10n";

const HEADER: &str = indoc! {"
    // Generated using stringsgen. Do not edit.

    import Foundation

"};

/// Whitespace used for one level of nesting in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Indentation {
    Spaces(usize),
    Tab,
}

impl Indentation {
    pub fn unit(&self) -> String {
        match self {
            Indentation::Spaces(count) => " ".repeat(*count),
            Indentation::Tab => "\t".to_string(),
        }
    }
}

impl Default for Indentation {
    fn default() -> Self {
        Indentation::Spaces(2)
    }
}

/// Accepts `tab`, `tabs`, `spaces:N` or a bare `N`.
impl FromStr for Indentation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "tab" | "tabs" => Ok(Indentation::Tab),
            other => other
                .strip_prefix("spaces:")
                .unwrap_or(other)
                .trim()
                .parse::<usize>()
                .map(Indentation::Spaces)
                .map_err(|_| Error::InvalidIndentation(s.to_string())),
        }
    }
}

impl TryFrom<String> for Indentation {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Indentation> for String {
    fn from(value: Indentation) -> Self {
        value.to_string()
    }
}

impl Display for Indentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Indentation::Spaces(count) => write!(f, "spaces:{}", count),
            Indentation::Tab => write!(f, "tab"),
        }
    }
}

/// Naming and layout options for [`render_swift`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Name of the generated enum.
    pub enum_name: String,
    pub indentation: Indentation,
}

impl BuildConfig {
    pub fn with_enum_name(mut self, enum_name: impl Into<String>) -> Self {
        self.enum_name = enum_name.into();
        self
    }

    pub fn with_indentation(mut self, indentation: Indentation) -> Self {
        self.indentation = indentation;
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            enum_name: DEFAULT_ENUM_NAME.to_string(),
            indentation: Indentation::default(),
        }
    }
}

/// One generated enum case: its identifier, the lookup key and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    pub key: String,
    pub placeholders: Vec<PlaceholderType>,
}

/// Swift parameter type for a placeholder.
pub fn swift_type(placeholder: PlaceholderType) -> &'static str {
    match placeholder {
        PlaceholderType::Object => "String",
        PlaceholderType::Int => "Int",
        PlaceholderType::Float => "Float",
        PlaceholderType::Char => "Character",
        PlaceholderType::CString => "UnsafePointer<CChar>",
        PlaceholderType::Unknown => "Any",
    }
}

struct SwiftWriter {
    out: String,
    unit: String,
}

impl SwiftWriter {
    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push_str(&self.unit);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

/// Renders the members as a Swift enum with a `tr` lookup helper.
pub fn render_swift(members: &[Member], config: &BuildConfig) -> String {
    let name = &config.enum_name;
    let mut w = SwiftWriter {
        out: String::from(HEADER),
        unit: config.indentation.unit(),
    };

    w.line(0, format!("enum {} {{", name));
    for member in members {
        if member.placeholders.is_empty() {
            w.line(1, format!("case {}", member.name));
        } else {
            let types = member
                .placeholders
                .iter()
                .map(|p| swift_type(*p))
                .collect::<Vec<_>>()
                .join(", ");
            w.line(1, format!("case {}({})", member.name, types));
        }
    }
    w.line(0, "}");
    w.blank();

    w.line(0, format!("extension {}: CustomStringConvertible {{", name));
    w.line(1, "var description: String { return self.string }");
    w.blank();
    w.line(1, "var string: String {");
    w.line(2, "switch self {");
    for member in members {
        let key = swift_string_literal(&member.key);
        if member.placeholders.is_empty() {
            w.line(2, format!("case .{}:", member.name));
            w.line(3, format!("return {}.tr({})", name, key));
        } else {
            let args = (0..member.placeholders.len())
                .map(|i| format!("p{}", i))
                .collect::<Vec<_>>();
            let bindings = args
                .iter()
                .map(|a| format!("let {}", a))
                .collect::<Vec<_>>()
                .join(", ");
            w.line(2, format!("case .{}({}):", member.name, bindings));
            w.line(3, format!("return {}.tr({}, {})", name, key, args.join(", ")));
        }
    }
    w.line(2, "}");
    w.line(1, "}");
    w.blank();
    w.line(
        1,
        "private static func tr(_ key: String, _ args: CVarArg...) -> String {",
    );
    w.line(2, "let format = NSLocalizedString(key, comment: \"\")");
    w.line(
        2,
        "return String(format: format, locale: Locale.current, arguments: args)",
    );
    w.line(1, "}");
    w.line(0, "}");
    w.blank();

    w.line(0, format!("func tr(_ key: {}) -> String {{", name));
    w.line(1, "return key.string");
    w.line(0, "}");

    w.out
}

fn swift_string_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
