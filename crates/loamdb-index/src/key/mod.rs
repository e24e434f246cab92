//! Module: key
//! Responsibility: the index-key codec and everything that operates on
//! encoded keys: encode, decode, compare, inspect, scan bounds, sort-order
//! matching.
//! Boundary: the store's B-tree holds `RawIndexKey` blobs and calls
//! `compare`/`skip_past`; it never interprets key bytes itself.

mod bounds;
mod compare;
mod decode;
mod encode;
mod inspect;
mod order;

#[cfg(test)]
mod tests;

use crate::{types::ObjectId, value::IndexValue};
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use bounds::KeyRange;
pub use inspect::KeyDump;
pub use order::OrderBy;

///
/// IndexKey
///
/// A decoded key: the field values in schema order plus the trailing object
/// id. `exists == false` is the "no key" form, which sorts strictly before
/// every existing key and carries no fields.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexKey {
    exists: bool,
    fields: Vec<IndexValue>,
    object_id: ObjectId,
}

impl IndexKey {
    #[must_use]
    pub fn new(fields: Vec<IndexValue>, object_id: ObjectId) -> Self {
        Self {
            exists: true,
            fields,
            object_id,
        }
    }

    /// The non-existent key. Encodes to a single zero byte.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            exists: false,
            fields: Vec::new(),
            object_id: ObjectId::nil(),
        }
    }

    #[must_use]
    pub const fn exists(&self) -> bool {
        self.exists
    }

    #[must_use]
    pub fn fields(&self) -> &[IndexValue] {
        &self.fields
    }

    #[must_use]
    pub const fn object_id(&self) -> ObjectId {
        self.object_id
    }
}

///
/// RawIndexKey
///
/// One encoded key, exactly as the B-tree stores it. Equality is byte
/// equality; deliberately no `Ord`, because raw byte order is not the index
/// order (the comparator is schema-aware).
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawIndexKey(#[serde(with = "serde_bytes")] Vec<u8>);

impl RawIndexKey {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for RawIndexKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for RawIndexKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for RawIndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
