//! Keys and their equivalence classes.
//!
//! A [`Key`] is any hashable value an item can be stored under. Keys that
//! denote the same number are the same key: `false`, `0` and `0.0` form one
//! class, `true`, `1` and `1.0` another, and every integral float joins the
//! class of the integer it equals. The rule lives in [`Key::numeric_identity`]
//! and drives both `PartialEq` and `Hash`, so a `Key` can be used directly as
//! a map key.
//!
//! # Usage
//!
//! ```
//! use aliasdict::Key;
//!
//! assert_eq!(Key::from(true), Key::from(1));
//! assert_eq!(Key::from(1234.0), Key::from(1234));
//! assert_ne!(Key::from("1"), Key::from(1));
//! assert_eq!(Key::from(false).to_string(), "False");
//! ```

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// A hashable value that an item (or an alias) can be stored under.
///
/// The serialized form is untagged, so a key travels through JSON as a plain
/// `null`, boolean, number, string or array and comes back as the same variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// The "no value" sentinel
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// A fixed sequence of keys, hashable as a whole
    Tuple(Vec<Key>),
}

/// The value a key is compared and hashed by.
#[derive(PartialEq, Eq, Hash)]
enum Identity<'a> {
    Null,
    Number(i64),
    Float(u64),
    Text(&'a str),
    Tuple(&'a [Key]),
}

/// Returns the integer an integral, finite, in-range float is equal to.
fn integral(f: f64) -> Option<i64> {
    // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl Key {
    /// Builds a tuple key from anything that converts into keys.
    pub fn tuple<I, K>(items: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Key::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// The integer this key is numerically identical to, if any.
    ///
    /// Booleans map to 0 and 1, integers to themselves and integral floats to
    /// the integer they equal. Text, tuples, `Null` and fractional floats have
    /// no numeric identity.
    pub fn numeric_identity(&self) -> Option<i64> {
        match self {
            Key::Bool(b) => Some(i64::from(*b)),
            Key::Int(n) => Some(*n),
            Key::Float(f) => integral(*f),
            _ => None,
        }
    }

    /// Returns true for the two boolean literals.
    pub fn is_bool(&self) -> bool {
        matches!(self, Key::Bool(_))
    }

    /// Returns the text if this is a text key.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Key::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Key::Null => "null",
            Key::Bool(_) => "bool",
            Key::Int(_) => "int",
            Key::Float(_) => "float",
            Key::Text(_) => "text",
            Key::Tuple(_) => "tuple",
        }
    }

    /// Renders the key the way it would be written as a literal.
    ///
    /// Identical to [`Display`](fmt::Display) except that text is quoted.
    ///
    /// ```
    /// # use aliasdict::Key;
    /// assert_eq!(Key::from("a b").repr(), "'a b'");
    /// assert_eq!(Key::from(2).repr(), "2");
    /// assert_eq!(Key::tuple([Key::from(1), Key::from("x")]).repr(), "(1, 'x')");
    /// ```
    pub fn repr(&self) -> String {
        match self {
            Key::Text(s) => quote(s),
            other => other.to_string(),
        }
    }

    fn identity(&self) -> Identity<'_> {
        match self {
            Key::Null => Identity::Null,
            Key::Bool(b) => Identity::Number(i64::from(*b)),
            Key::Int(n) => Identity::Number(*n),
            Key::Float(f) => match integral(*f) {
                Some(n) => Identity::Number(n),
                None => Identity::Float(f.to_bits()),
            },
            Key::Text(s) => Identity::Text(s),
            Key::Tuple(items) => Identity::Tuple(items),
        }
    }
}

fn quote(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{}\"", s.replace('\\', "\\\\"))
    } else {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Null => write!(f, "None"),
            Key::Bool(true) => write!(f, "True"),
            Key::Bool(false) => write!(f, "False"),
            Key::Int(n) => write!(f, "{n}"),
            Key::Float(x) if x.is_nan() => write!(f, "nan"),
            Key::Float(x) => write_float(f, *x),
            Key::Text(s) => write!(f, "{s}"),
            Key::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.repr())?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Debug keeps the trailing ".0" on integral values and switches to exponent
/// form outside `1e-4..1e16`; the exponent is written signed with at least two
/// digits (`1e-05`, `1.5e+20`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let text = format!("{x:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
        None => f.write_str(&text),
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

macro_rules! int_into_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(n: $t) -> Self {
                    Key::Int(i64::from(n))
                }
            }
        )*
    };
}

int_into_key!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Key {
    fn from(x: f64) -> Self {
        Key::Float(x)
    }
}

impl From<f32> for Key {
    fn from(x: f32) -> Self {
        Key::Float(f64::from(x))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Text(s.clone())
    }
}

impl From<()> for Key {
    fn from(_: ()) -> Self {
        Key::Null
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

impl From<Vec<Key>> for Key {
    fn from(items: Vec<Key>) -> Self {
        Key::Tuple(items)
    }
}

impl<T: Into<Key>> From<Option<T>> for Key {
    fn from(value: Option<T>) -> Self {
        value.map_or(Key::Null, Into::into)
    }
}

/// Arguments that accept either a single key or a collection of keys.
///
/// Used wherever an operation takes "an alias or a list of aliases", such as
/// [`AliasDict::add_alias`](crate::AliasDict::add_alias) and the export
/// filter options.
///
/// ```
/// # use aliasdict::{Key, IntoKeys};
/// assert_eq!("a".into_keys(), vec![Key::from("a")]);
/// assert_eq!(vec![1, 2].into_keys(), vec![Key::from(1), Key::from(2)]);
/// ```
pub trait IntoKeys {
    fn into_keys(self) -> Vec<Key>;
}

macro_rules! scalar_into_keys {
    ($($t:ty),*) => {
        $(
            impl IntoKeys for $t {
                fn into_keys(self) -> Vec<Key> {
                    vec![Key::from(self)]
                }
            }
        )*
    };
}

scalar_into_keys!(Key, &Key, &str, String, bool, i32, i64, u32, f64, ());

impl<K: Into<Key>> IntoKeys for Vec<K> {
    fn into_keys(self) -> Vec<Key> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<K: Into<Key>, const N: usize> IntoKeys for [K; N] {
    fn into_keys(self) -> Vec<Key> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<K: Into<Key> + Clone> IntoKeys for &[K] {
    fn into_keys(self) -> Vec<Key> {
        self.iter().cloned().map(Into::into).collect()
    }
}
