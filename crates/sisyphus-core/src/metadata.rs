//! User metadata and its tagged-union wire encoding.
//!
//! The registry program stores metadata as a map of strings, which its call
//! surface renders as:
//!
//! ```text
//! { "map": [ { "key": { "string": "k" }, "val": { "string": "v" } }, ... ] }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plain key/value metadata attached to a user.
pub type Metadata = BTreeMap<String, String>;

/// A value wrapped with its explicit type tag.
///
/// Serializes externally tagged, so `TaggedValue::String("x")` is
/// `{"string": "x"}`. Any other tag fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaggedValue {
    String(String),
}

impl TaggedValue {
    /// Returns the text content.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String(s) => s,
        }
    }

    /// Consumes the value, returning the text content.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
        }
    }
}

impl From<String> for TaggedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for TaggedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// One entry of a [`ContractMetadataMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataPair {
    pub key: TaggedValue,
    pub val: TaggedValue,
}

impl MetadataPair {
    /// Creates a pair from plain strings.
    #[must_use]
    pub fn new(key: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            key: TaggedValue::String(key.into()),
            val: TaggedValue::String(val.into()),
        }
    }
}

/// Wire shape of user metadata on the remote call surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMetadataMap {
    pub map: Vec<MetadataPair>,
}

impl ContractMetadataMap {
    /// Encodes entries in iteration order, one pair per entry.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: entries
                .into_iter()
                .map(|(key, val)| MetadataPair::new(key, val))
                .collect(),
        }
    }

    /// Decodes into plain metadata. Later pairs win on duplicate keys.
    #[must_use]
    pub fn into_metadata(self) -> Metadata {
        self.map
            .into_iter()
            .map(|pair| (pair.key.into_string(), pair.val.into_string()))
            .collect()
    }

    /// Number of encoded pairs, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no pairs are encoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl From<&Metadata> for ContractMetadataMap {
    fn from(metadata: &Metadata) -> Self {
        Self::from_entries(metadata.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

impl From<ContractMetadataMap> for Metadata {
    fn from(map: ContractMetadataMap) -> Self {
        map.into_metadata()
    }
}

/// Encodes plain metadata into its wire shape.
#[must_use]
pub fn encode_metadata(metadata: &Metadata) -> ContractMetadataMap {
    ContractMetadataMap::from(metadata)
}

/// Decodes the wire shape back into plain metadata.
#[must_use]
pub fn decode_metadata(map: ContractMetadataMap) -> Metadata {
    map.into_metadata()
}
