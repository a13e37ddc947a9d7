//! Decoding of the object-literal dialect found in verbose entries.
//!
//! Verbose entries print objects like
//!
//! ```text
//! {
//!     identifier = 12345;
//!     type = caldav;
//!     title = "Work \U2013 shared";
//!     color = (
//!         0.1,
//!         0.2,
//!         0.3,
//!         1
//!     );
//! }
//! ```
//!
//! The text is rewritten into JSON by a fixed sequence of stages and then
//! decoded with `serde_json`. Each stage expects the shape left by the one
//! before it, so the order in [`normalize_object_literal`] must not change.
//!
//! The first three stages are plain text substitutions and also apply inside
//! quoted values: `=` becomes `:`, parentheses become brackets and `;` before
//! a line break becomes `,`. The key and trailing-separator stages skip
//! quoted strings.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use synclog_types::Value;

use crate::{Error, Result};

/// `key : value,` line whose value may need quoting
static BARE_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(?P<key>[ \t]+(?:\w+|"[^"\n]*")[ \t]:[ \t])(?P<value>[^,\n]+),$"#).unwrap()
});

/// A quoted string, or an unquoted key at the start of a line
static BARE_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)"(?:\\.|[^"\\])*"|^(?P<indent>[ \t]*)(?P<key>\w+)(?P<sep>[ \t]*:)"#).unwrap()
});

/// A quoted string, or a separator directly before a closing bracket or brace
static TRAILING_SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:\\.|[^"\\])*"|,(?P<close>\s*[}\]])"#).unwrap()
});

/// Statement terminators become value separators.
pub fn separate_statements(text: &str) -> String {
    text.replace(";\n", ",\n")
}

/// Assignments become key/value separators.
pub fn assignments_to_colons(text: &str) -> String {
    text.replace('=', ":")
}

/// Parenthesized lists become arrays.
pub fn parens_to_brackets(text: &str) -> String {
    text.replace('(', "[").replace(')', "]")
}

/// Quote every bare `key : value,` value that is neither a quoted string nor
/// an integer. The whole value up to the trailing comma is quoted, spaces
/// included.
pub fn quote_bare_values(text: &str) -> String {
    BARE_VALUE_REGEX
        .replace_all(text, |caps: &Captures| {
            let value = &caps["value"];
            if value.starts_with('"') || is_exact_integer(value) {
                caps[0].to_string()
            } else {
                format!("{}\"{}\",", &caps["key"], value.replace('"', "\\\""))
            }
        })
        .into_owned()
}

/// Digits that decode to the same integer: no leading zero and within `u64`.
fn is_exact_integer(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
        && (value == "0" || !value.starts_with('0'))
        && value.parse::<u64>().is_ok()
}

/// `\U` escapes become JSON `\u` escapes.
pub fn fix_unicode_escapes(text: &str) -> String {
    text.replace("\\U", "\\u")
}

/// Quote keys that are still bare words. Quoted strings are left alone.
pub fn quote_bare_keys(text: &str) -> String {
    BARE_KEY_REGEX
        .replace_all(text, |caps: &Captures| match caps.name("key") {
            Some(key) => format!("{}\"{}\"{}", &caps["indent"], key.as_str(), &caps["sep"]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Drop the separator left after the last member of an object or array.
/// Quoted strings are left alone.
pub fn drop_trailing_separators(text: &str) -> String {
    TRAILING_SEPARATOR_REGEX
        .replace_all(text, |caps: &Captures| match caps.name("close") {
            Some(close) => close.as_str().to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Rewrite an object literal into JSON text.
pub fn normalize_object_literal(text: &str) -> String {
    let text = separate_statements(text);
    let text = assignments_to_colons(&text);
    let text = parens_to_brackets(&text);
    let text = quote_bare_values(&text);
    let text = fix_unicode_escapes(&text);
    let text = quote_bare_keys(&text);
    drop_trailing_separators(&text)
}

/// Normalize and decode an object literal.
///
/// A decode failure carries the original literal for diagnosis.
pub fn decode_object_literal(text: &str) -> Result<Value> {
    serde_json::from_str(&normalize_object_literal(text)).map_err(|source| Error::ObjectLiteral {
        raw: text.to_string(),
        source,
    })
}
