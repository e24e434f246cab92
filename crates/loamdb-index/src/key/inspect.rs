//! Module: key::inspect
//! Responsibility: structural questions about encoded keys — walking a
//! buffer of concatenated records, bounded extraction, diagnostic rendering.
//! Does not own: ordering or encoding.

use crate::{
    bits::BitReader,
    error::KeyDecodeError,
    key::{RawIndexKey, decode::skip_field},
    schema::KeySchema,
    types::ObjectId,
};
use std::fmt;

impl KeySchema {
    /// Advance `offset` past one encoded key. Returns `false` for a
    /// non-existent key record (its single byte is still consumed). On
    /// error the cursor does not move.
    pub fn skip_past(&self, bytes: &[u8], offset: &mut usize) -> Result<bool, KeyDecodeError> {
        let mut reader = BitReader::starting_at(bytes, *offset);

        if !reader.read_bit()? {
            *offset = reader.byte_pos();
            return Ok(false);
        }

        for _ in self.fields() {
            skip_field(&mut reader)?;
        }
        reader.skip_bytes(ObjectId::STORED_SIZE)?;

        *offset = reader.byte_pos();

        Ok(true)
    }

    /// Copy one key out of `bytes` when its length fits `key_size_limit`,
    /// `None` when it does not. The cursor advances either way, so one
    /// oversized key drops out of its index without ending the read.
    pub fn extract_bounded(
        &self,
        bytes: &[u8],
        offset: &mut usize,
        key_size_limit: usize,
    ) -> Result<Option<RawIndexKey>, KeyDecodeError> {
        let start = *offset;
        let mut end = start;
        self.skip_past(bytes, &mut end)?;
        *offset = end;

        if end - start > key_size_limit {
            return Ok(None);
        }

        Ok(Some(RawIndexKey::from(bytes[start..end].to_vec())))
    }

    /// Decode one key into its diagnostic dump.
    pub fn render(&self, bytes: &[u8]) -> Result<KeyDump, KeyDecodeError> {
        let key = self.decode(bytes)?;
        if !key.exists() {
            return Ok(KeyDump::default());
        }

        let entries = self
            .fields()
            .iter()
            .zip(key.fields())
            .map(|(spec, value)| (spec.name().to_string(), value.to_text()))
            .collect();

        Ok(KeyDump {
            entries,
            object_id: Some(key.object_id()),
        })
    }
}

///
/// KeyDump
///
/// Locale-independent text form of one decoded key: an ordered
/// `name=value` pair per field plus the object id, rendered on one line.
/// The non-existent key dumps empty.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyDump {
    entries: Vec<(String, String)>,
    object_id: Option<ObjectId>,
}

impl KeyDump {
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    #[must_use]
    pub const fn object_id(&self) -> Option<ObjectId> {
        self.object_id
    }
}

impl fmt::Display for KeyDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, text) in &self.entries {
            write!(f, "{name}={text} ")?;
        }
        match self.object_id {
            Some(id) => write!(f, "objectId={id}"),
            None => Ok(()),
        }
    }
}
