use derive_more::{Deref, Display, FromStr};
use serde::{Deserialize, Serialize, Serializer, de::Deserializer};
use thiserror::Error as ThisError;
use ulid::Ulid as WrappedUlid;

///
/// ObjectIdDecodeError
///

#[derive(Debug, ThisError)]
pub enum ObjectIdDecodeError {
    #[error("invalid object id length: {len} bytes")]
    InvalidSize { len: usize },
}

///
/// ObjectId
///
/// 128-bit unique identity of a stored object (ULID layout). Appended to
/// every index key as the final, direction-independent tie-break, so two
/// objects with identical field values still encode to distinct keys.
///

#[derive(Clone, Copy, Debug, Deref, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct ObjectId(WrappedUlid);

impl ObjectId {
    pub const STORED_SIZE: usize = 16;

    pub const MIN: Self = Self::from_bytes([0x00; 16]);
    pub const MAX: Self = Self::from_bytes([0xFF; 16]);

    #[must_use]
    pub const fn nil() -> Self {
        Self(WrappedUlid::nil())
    }

    #[must_use]
    pub const fn from_parts(timestamp_ms: u64, random: u128) -> Self {
        Self(WrappedUlid::from_parts(timestamp_ms, random))
    }

    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(WrappedUlid(value))
    }

    #[must_use]
    pub const fn to_u128(self) -> u128 {
        self.0.0
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(WrappedUlid(u128::from_be_bytes(bytes)))
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0.0.to_be_bytes()
    }

    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, ObjectIdDecodeError> {
        if bytes.len() != Self::STORED_SIZE {
            return Err(ObjectIdDecodeError::InvalidSize { len: bytes.len() });
        }

        let mut buf = [0u8; Self::STORED_SIZE];
        buf.copy_from_slice(bytes);

        Ok(Self::from_bytes(buf))
    }
}

impl From<WrappedUlid> for ObjectId {
    fn from(ulid: WrappedUlid) -> Self {
        Self(ulid)
    }
}

// Text form on the wire-adjacent surfaces (fixtures, dumps): the canonical
// 26-character Crockford base32 string.
impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse::<WrappedUlid>()
            .map(Self)
            .map_err(|_| serde::de::Error::custom(format!("invalid object id string: {text}")))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip_is_identity() {
        let id = ObjectId::from_u128(0x0123_4567_89AB_CDEF_0011_2233_4455_6677);
        assert_eq!(ObjectId::from_bytes(id.to_bytes()), id);
    }

    #[test]
    fn min_and_max_bracket_every_id() {
        let id = ObjectId::from_parts(1_700_000_000_000, 42);
        assert!(ObjectId::MIN < id);
        assert!(id < ObjectId::MAX);
    }

    #[test]
    fn try_from_bytes_rejects_wrong_length() {
        assert!(matches!(
            ObjectId::try_from_bytes(&[0u8; 5]),
            Err(ObjectIdDecodeError::InvalidSize { len: 5 })
        ));
    }

    #[test]
    fn serde_uses_the_string_form() {
        let id = ObjectId::from_u128(7);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{id}\""));
        let back: ObjectId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
