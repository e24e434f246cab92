//! Module: error
//! Responsibility: the crate's two failure families.
//! Does not own: where each error is raised; modules construct their own.
//! Boundary: encode errors are expected per-index outcomes, decode errors
//! are corruption signals for the storage layer. The two never mix.

use crate::bits::BitIoError;
use thiserror::Error as ThisError;

///
/// KeyEncodeError
///
/// Recoverable outcomes of building one index key. The object is excluded
/// from that index; nothing global has failed.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum KeyEncodeError {
    #[error("field '{field}' has no value and the index prohibits missing fields")]
    MissingField { field: String },

    #[error("field '{field}': {kind} values cannot be indexed")]
    UnsupportedType { field: String, kind: &'static str },

    #[error("field '{field}': payload is {len} bytes, over the {max} byte segment cap")]
    SegmentTooLarge { field: String, len: usize, max: usize },

    #[error("encoded key is {size} bytes, over the {limit} byte limit")]
    KeyTooLarge { size: usize, limit: usize },
}

///
/// KeyDecodeError
///
/// Structural corruption in encoded key bytes. Fatal to the operation that
/// hit it; surfaced to the storage layer, never treated as a missing or
/// unsupported value.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum KeyDecodeError {
    #[error("corrupted index key: truncated at byte {offset}, wanted {wanted} more")]
    Truncated { offset: usize, wanted: usize },

    #[error("corrupted index key: tag {tag:#04x} at byte {offset} is not decodable")]
    InvalidTag { tag: u8, offset: usize },

    #[error("corrupted index key: text payload ending at byte {offset} is not UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("corrupted index key: char code unit {unit:#06x} at byte {offset}")]
    InvalidChar { unit: u16, offset: usize },

    #[error("corrupted index key: {extra} trailing bytes after the object id")]
    TrailingBytes { extra: usize },
}

impl From<BitIoError> for KeyDecodeError {
    fn from(err: BitIoError) -> Self {
        match err {
            BitIoError::UnexpectedEnd { offset, wanted } => Self::Truncated { offset, wanted },
        }
    }
}
