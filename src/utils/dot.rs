//! DOT format utilities for graph visualization.
//!
//! Two escaping flavours are needed: [`escape_dot`] makes arbitrary text safe
//! inside a quoted DOT string, while [`escape_label`] only protects the angle
//! brackets of C operators inside a record label whose line breaks (`\l`) are
//! produced by the caller.

/// Escapes a string for safe use in quoted DOT identifiers and attributes.
///
/// Handles backslashes, quotes, newlines and angle brackets.
///
/// # Arguments
///
/// * `s` - The string to escape
///
/// # Returns
///
/// A new string with all special characters escaped.
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::utils::escape_dot;
///
/// assert_eq!(escape_dot("f \"start\""), "f \\\"start\\\"");
/// ```
#[must_use]
pub fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
        .replace('<', "\\<")
        .replace('>', "\\>")
}

/// Escapes a rendered C statement for a record-shaped node label.
///
/// Only `<` and `>` are escaped; they would otherwise be read as record port
/// delimiters.
///
/// # Examples
///
/// ```rust
/// use c_lang_ssa::utils::escape_label;
///
/// assert_eq!(escape_label("y > 0"), "y \\> 0");
/// ```
#[must_use]
pub fn escape_label(s: &str) -> String {
    s.replace('<', "\\<").replace('>', "\\>")
}
