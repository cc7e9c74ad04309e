//! JSON export and import.
//!
//! Two formats are supported:
//!
//! - [`ExportFormat::DataOnly`] writes a plain JSON object mapping each
//!   canonical key (rendered as text) to its value. It is meant for other
//!   tools; aliases, direct attributes and key types are lost.
//! - [`ExportFormat::Full`] writes a versioned document that keeps key types,
//!   the expansion mode, every alias that cannot be derived again, and the
//!   direct attributes, so [`import`] rebuilds an equal dictionary:
//!
//! ```json
//! {
//!   "_v": 0,
//!   "expand": true,
//!   "data": [["a b", 1], [2, 2]],
//!   "aliases": [["nickname", "a b"]],
//!   "direct": {"setting": 3}
//! }
//! ```
//!
//! Items whose derived aliases were deleted or now belong to another item are
//! listed under `"unexpanded"`. They are imported without expansion and all of
//! their aliases are written out, so re-deriving never claims a name that was
//! moved elsewhere.
//!
//! ```
//! use aliasdict::{AliasDict, export::{ExportFilter, ExportFormat, import}};
//!
//! let mut dict: AliasDict<i64> = AliasDict::new();
//! dict.set("a b", 1)?;
//! dict.add_alias("a b", "nickname")?;
//!
//! let text = dict.to_json(ExportFormat::Full, &ExportFilter::All)?;
//! let restored: AliasDict<i64> = import(&text)?;
//! assert_eq!(restored, dict);
//! assert_eq!(restored.get("nickname")?, &1);
//! # Ok::<(), aliasdict::Error>(())
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer, de::DeserializeOwned};

use crate::{AliasDict, Key, Result, dict::AliasTable};

pub mod errors;
pub mod filter;

pub use errors::ExportError;
pub use filter::{ExportFilter, FilterOptions};

/// The current full-format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const EXPORT_VERSION: u8 = 0;

/// Field that marks a full-format document.
const VERSION_FIELD: &str = "_v";

/// The shape of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Canonical keys and values only
    #[default]
    DataOnly,
    /// Everything needed to rebuild the dictionary
    Full,
}

/// Canonical keys rendered as text, in insertion order.
///
/// Keys that render alike (`1` and `'1'`) both appear; JSON readers keep the
/// last one.
struct DataOnlyDocument<'a, V>(Vec<(&'a Key, &'a V)>);

impl<V: Serialize> Serialize for DataOnlyDocument<'_, V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key.to_string(), value)))
    }
}

#[derive(Serialize)]
struct FullDocumentRef<'a, V> {
    #[serde(rename = "_v")]
    version: u8,
    expand: bool,
    data: Vec<(&'a Key, &'a V)>,
    aliases: Vec<(&'a Key, &'a Key)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unexpanded: Vec<&'a Key>,
    direct: IndexMap<&'a str, &'a V>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "V: Deserialize<'de>"))]
struct FullDocument<V> {
    expand: bool,
    data: Vec<(Key, V)>,
    #[serde(default)]
    aliases: Vec<(Key, Key)>,
    #[serde(default)]
    unexpanded: Vec<Key>,
    #[serde(default)]
    direct: IndexMap<String, V>,
}

/// Serialize the items `filter` selects as pretty-printed JSON.
pub fn export<V: Serialize>(
    dict: &AliasDict<V>,
    format: ExportFormat,
    filter: &ExportFilter,
) -> Result<String> {
    let selected = filter.select(dict);
    tracing::debug!(?format, items = selected.len(), "Exporting dictionary");

    let text = match format {
        ExportFormat::DataOnly => serde_json::to_string_pretty(&DataOnlyDocument(selected)),
        ExportFormat::Full => {
            let expand = dict.scope().is_enabled();
            let (aliases, unexpanded) = extra_aliases(dict, &selected, expand);
            let document = FullDocumentRef {
                version: EXPORT_VERSION,
                expand,
                data: selected,
                aliases,
                unexpanded,
                direct: filter.select_direct(dict).into_iter().collect(),
            };
            serde_json::to_string_pretty(&document)
        }
    };
    text.map_err(|source| ExportError::SerializationFailed { source }.into())
}

/// Aliases of the selected items that re-inserting the keys would not recreate,
/// and the items that must be re-inserted without expansion.
///
/// An item keeps expansion only while every derived candidate is still bound
/// to it; otherwise all of its aliases are listed.
fn extra_aliases<'a, V>(
    dict: &'a AliasDict<V>,
    selected: &[(&'a Key, &'a V)],
    expand: bool,
) -> (Vec<(&'a Key, &'a Key)>, Vec<&'a Key>) {
    let table = dict.alias_table();
    let mut extra = Vec::new();
    let mut unexpanded = Vec::new();
    for (canonical, _) in selected {
        let derived = AliasTable::all_candidates(canonical, expand);
        let intact = derived
            .iter()
            .all(|candidate| table.lookup(candidate) == Some(*canonical));
        if !intact {
            unexpanded.push(*canonical);
        }
        for alias in table.aliases_of(canonical) {
            let rederived = intact && derived.contains(alias);
            if !rederived && alias != *canonical {
                extra.push((alias, *canonical));
            }
        }
    }
    (extra, unexpanded)
}

/// Rebuild a dictionary from either export format.
///
/// Full documents are replayed under the expansion mode they were captured
/// with; the shared expansion scope is left alone. Data-only documents are
/// inserted with text keys under the current mode of the global scope.
pub fn import<V: DeserializeOwned>(text: &str) -> Result<AliasDict<V>> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|source| ExportError::DeserializationFailed { source })?;

    let Some(version) = value.get(VERSION_FIELD) else {
        let data: IndexMap<String, V> = serde_json::from_value(value)
            .map_err(|source| ExportError::DeserializationFailed { source })?;
        tracing::debug!(items = data.len(), "Importing data-only document");
        return AliasDict::from_pairs(data);
    };

    if version.as_u64() != Some(u64::from(EXPORT_VERSION)) {
        return Err(ExportError::UnsupportedVersion {
            version: version.to_string(),
            supported: EXPORT_VERSION,
        }
        .into());
    }

    let document: FullDocument<V> = serde_json::from_value(value)
        .map_err(|source| ExportError::DeserializationFailed { source })?;
    tracing::debug!(
        items = document.data.len(),
        aliases = document.aliases.len(),
        unexpanded = document.unexpanded.len(),
        expand = document.expand,
        "Importing full document"
    );

    let mut dict = AliasDict::new();
    for (key, value) in document.data {
        let expand = document.expand && !document.unexpanded.contains(&key);
        dict.set_with(key, value, expand)?;
    }
    for (alias, canonical) in document.aliases {
        dict.restore_alias(&canonical, alias)?;
    }
    for (name, value) in document.direct {
        dict.set_direct(name, value);
    }
    Ok(dict)
}

impl<V: Serialize> AliasDict<V> {
    /// Shorthand for [`export`].
    pub fn to_json(&self, format: ExportFormat, filter: &ExportFilter) -> Result<String> {
        export(self, format, filter)
    }
}
