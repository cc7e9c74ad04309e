//! Selection of the items an export includes.

use crate::{AliasDict, IntoKeys, Key, Result, export::ExportError};

/// Raw filter arguments, at most one of which may be set.
///
/// Each option takes a single key or a list of keys. Convert into an
/// [`ExportFilter`] with `try_into()`:
///
/// ```
/// # use aliasdict::{Key, export::{ExportFilter, FilterOptions}};
/// let filter: ExportFilter = FilterOptions::default().only("name").try_into()?;
/// assert_eq!(filter, ExportFilter::Only(vec![Key::from("name")]));
///
/// let both = FilterOptions {
///     ignore: Some(vec![Key::from("a")]),
///     exclude: Some(vec![Key::from("b")]),
///     only: None,
/// };
/// assert!(ExportFilter::try_from(both).is_err());
/// # Ok::<(), aliasdict::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Drop the items these keys or aliases reach
    pub ignore: Option<Vec<Key>>,
    /// Same as `ignore`
    pub exclude: Option<Vec<Key>>,
    /// Keep only the items these keys or aliases reach
    pub only: Option<Vec<Key>>,
}

impl FilterOptions {
    pub fn ignore(mut self, keys: impl IntoKeys) -> Self {
        self.ignore = Some(keys.into_keys());
        self
    }

    pub fn exclude(mut self, keys: impl IntoKeys) -> Self {
        self.exclude = Some(keys.into_keys());
        self
    }

    pub fn only(mut self, keys: impl IntoKeys) -> Self {
        self.only = Some(keys.into_keys());
        self
    }
}

/// A validated export filter.
///
/// Items are matched through any of their keys or aliases; direct attributes
/// are matched by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExportFilter {
    /// Every item
    #[default]
    All,
    /// Every item except those reached through the given keys or aliases
    Ignore(Vec<Key>),
    /// Only the items reached through the given keys or aliases
    Only(Vec<Key>),
}

impl ExportFilter {
    pub fn ignore(keys: impl IntoKeys) -> Self {
        ExportFilter::Ignore(keys.into_keys())
    }

    pub fn only(keys: impl IntoKeys) -> Self {
        ExportFilter::Only(keys.into_keys())
    }

    /// The items of `dict` this filter keeps, in insertion order.
    ///
    /// Entries that resolve to nothing are skipped.
    pub fn select<'a, V>(&self, dict: &'a AliasDict<V>) -> Vec<(&'a Key, &'a V)> {
        match self {
            ExportFilter::All => dict.iter().collect(),
            ExportFilter::Ignore(keys) => {
                let ignored = resolve_all(dict, keys);
                dict.iter().filter(|(k, _)| !ignored.contains(k)).collect()
            }
            ExportFilter::Only(keys) => {
                let kept = resolve_all(dict, keys);
                dict.iter().filter(|(k, _)| kept.contains(k)).collect()
            }
        }
    }

    /// The direct attributes of `dict` this filter keeps, matched by name.
    pub fn select_direct<'a, V>(&self, dict: &'a AliasDict<V>) -> Vec<(&'a str, &'a V)> {
        dict.direct_attrs()
            .map(|(name, value)| (name.as_str(), value))
            .filter(|(name, _)| match self {
                ExportFilter::All => true,
                ExportFilter::Ignore(keys) => !names_attr(keys, name),
                ExportFilter::Only(keys) => names_attr(keys, name),
            })
            .collect()
    }
}

fn names_attr(keys: &[Key], name: &str) -> bool {
    keys.iter().any(|key| key.as_text() == Some(name))
}

fn resolve_all<'a, V>(dict: &'a AliasDict<V>, keys: &[Key]) -> Vec<&'a Key> {
    keys.iter()
        .filter_map(|key| dict.alias_table().lookup(key))
        .collect()
}

impl TryFrom<FilterOptions> for ExportFilter {
    type Error = crate::Error;

    fn try_from(options: FilterOptions) -> Result<Self> {
        let given: Vec<&'static str> = [
            ("ignore", options.ignore.is_some()),
            ("exclude", options.exclude.is_some()),
            ("only", options.only.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();
        if given.len() > 1 {
            return Err(ExportError::InvalidFilterCombination { options: given }.into());
        }

        Ok(match options {
            FilterOptions { ignore: Some(keys), .. } | FilterOptions { exclude: Some(keys), .. } => {
                ExportFilter::Ignore(keys)
            }
            FilterOptions { only: Some(keys), .. } => ExportFilter::Only(keys),
            _ => ExportFilter::All,
        })
    }
}
