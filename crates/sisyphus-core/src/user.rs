//! User record shapes: the plain domain record and its wire form.

use crate::metadata::{ContractMetadataMap, Metadata};
use serde::{Deserialize, Serialize};

/// A user record as seen by callers of the registry client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl UserRecord {
    /// Creates a new user record.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            metadata,
        }
    }
}

/// A user record as returned by the remote `get_user` call.
///
/// Every field is required; a response missing one fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractUserRecord {
    pub name: String,
    pub email: String,
    pub metadata: ContractMetadataMap,
}

impl From<ContractUserRecord> for UserRecord {
    fn from(record: ContractUserRecord) -> Self {
        Self {
            name: record.name,
            email: record.email,
            metadata: record.metadata.into_metadata(),
        }
    }
}

impl From<&UserRecord> for ContractUserRecord {
    fn from(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            metadata: ContractMetadataMap::from(&record.metadata),
        }
    }
}
