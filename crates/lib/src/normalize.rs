//! Conversion of arbitrary keys into member names.
//!
//! [`normalize`] is total and deterministic: every [`Key`] maps to exactly one
//! string, and that string is always a valid member name. Unicode letters are
//! preserved; anything that cannot appear in an identifier becomes `_`.
//!
//! The rules, applied in order:
//!
//! 1. A key with a numeric identity (other than the two booleans) is replaced
//!    by that integer, so `1234.0` is treated as `1234`.
//! 2. The key is converted to its literal text (see [`Key`]'s `Display`).
//! 3. Empty text, text starting with a digit (in any script) and reserved
//!    words get a leading `_`.
//! 4. The first character must be an identifier start (`XID_Start` or `_`),
//!    every other character an identifier continue (`XID_Continue`); failing
//!    characters are replaced with `_`.
//!
//! ```
//! use aliasdict::{Key, normalize::normalize};
//!
//! assert_eq!(normalize(&Key::from("short name")), "short_name");
//! assert_eq!(normalize(&Key::from("who are you?")), "who_are_you_");
//! assert_eq!(normalize(&Key::from(3)), "_3");
//! assert_eq!(normalize(&Key::from(false)), "_False");
//! assert_eq!(normalize(&Key::from(1234.0)), "_1234");
//! assert_eq!(normalize(&Key::from("")), "_");
//! ```

use crate::Key;

/// Words that are never valid member names on their own.
pub const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Returns true if `word` is in [`RESERVED_WORDS`].
pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

fn is_start(ch: char) -> bool {
    ch == '_' || unicode_ident::is_xid_start(ch)
}

fn is_continue(ch: char) -> bool {
    unicode_ident::is_xid_continue(ch)
}

/// Digits of any script, plus superscript and circled digits.
fn is_digit(ch: char) -> bool {
    ch.is_numeric() && !unicode_ident::is_xid_start(ch)
}

/// Returns true if `name` can be used as a member name without any change.
///
/// ```
/// # use aliasdict::normalize::is_member_name;
/// assert!(is_member_name("abcве"));
/// assert!(is_member_name("_1"));
/// assert!(!is_member_name("1a"));
/// assert!(!is_member_name("else"));
/// assert!(!is_member_name(""));
/// ```
pub fn is_member_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => is_start(first) && chars.all(is_continue) && !is_reserved(name),
        None => false,
    }
}

/// Normalizes a key into a valid member name.
pub fn normalize(key: &Key) -> String {
    let text = match key.numeric_identity() {
        Some(n) if !key.is_bool() => n.to_string(),
        _ => key.to_string(),
    };

    let needs_prefix = text.is_empty()
        || text.starts_with(is_digit)
        || is_reserved(&text);
    let text = if needs_prefix { format!("_{text}") } else { text };

    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            let valid = if i == 0 { is_start(ch) } else { is_continue(ch) };
            if valid { ch } else { '_' }
        })
        .collect()
}
