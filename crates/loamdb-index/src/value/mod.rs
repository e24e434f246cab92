//! Module: value
//! Responsibility: the tagged value domain index keys carry, its stable
//! tags, its textual forms, and the cross-type ordering rules.
//! Does not own: wire layout or key framing; the key codec owns those.

pub(crate) mod ordered;
mod tag;


use crate::types::{DateTime, DateTimeOffset, Decimal, Duration, Float32, Float64, ObjectId};
use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;
use std::fmt::Write as _;

// re-exports
pub use ordered::field_cmp;
pub use tag::TypeTag;

///
/// IndexValue
///
/// One field payload of an index key, including the two sentinels and the
/// structural shapes a field source may hand over. Deliberately implements
/// no `Ord`: index ordering is the comparator's cross-type rule set, not a
/// derivable variant order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum IndexValue {
    /// Sentinel below every value, including null.
    Min,
    Null,
    Bool(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(Float32),
    Double(Float64),
    Decimal(Decimal),
    Char(char),
    String(String),
    /// Folded to a canonical case during comparison; stored as written.
    StringIgnoreCase(String),
    /// A declared enum's label. Compared under the string rules.
    EnumLabel(String),
    Bytes(ByteBuf),
    DateTime(DateTime),
    DateTimeOffset(DateTimeOffset),
    Duration(Duration),
    ObjectId(ObjectId),
    /// Never encodable; rejected whole-key at serialization.
    Array(Vec<Self>),
    /// Never encodable; rejected whole-key at serialization.
    Object(Vec<(String, Self)>),
    /// Sentinel above every value.
    Max,
}

impl IndexValue {
    /// Stable type tag of this value.
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        tag::type_tag(self)
    }

    /// Stable human-readable kind label for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.type_tag().label()
    }

    /// Whether this value may appear in an encoded key. The single place
    /// that decides; array and object shapes fail the whole key.
    #[must_use]
    pub const fn is_indexable(&self) -> bool {
        !self.type_tag().is_structural()
    }

    /// Locale-independent text form: `.` decimal point, fixed ISO-8601-style
    /// dates, `MIN`/`MAX` for the sentinels, lowercase hex for bytes. Shared
    /// by diagnostics rendering and the value-versus-string comparison rule.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Min => "MIN".to_string(),
            Self::Null => "null".to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Int8(v) => v.to_string(),
            Self::UInt8(v) => v.to_string(),
            Self::Int16(v) => v.to_string(),
            Self::UInt16(v) => v.to_string(),
            Self::Int32(v) => v.to_string(),
            Self::UInt32(v) => v.to_string(),
            Self::Int64(v) => v.to_string(),
            Self::UInt64(v) => v.to_string(),
            Self::Single(v) => v.to_string(),
            Self::Double(v) => v.to_string(),
            Self::Decimal(v) => v.to_string(),
            Self::Char(v) => v.to_string(),
            Self::String(v) | Self::StringIgnoreCase(v) | Self::EnumLabel(v) => v.clone(),
            Self::Bytes(v) => {
                let mut out = String::with_capacity(v.len() * 2);
                for byte in v.iter() {
                    let _ = write!(out, "{byte:02x}");
                }
                out
            }
            Self::DateTime(v) => v.to_string(),
            Self::DateTimeOffset(v) => v.to_string(),
            Self::Duration(v) => v.to_string(),
            Self::ObjectId(v) => v.to_string(),
            Self::Array(_) | Self::Object(_) => format!("[{}]", self.kind()),
            Self::Max => "MAX".to_string(),
        }
    }
}

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for IndexValue {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool           => Bool,
    i8             => Int8,
    i16            => Int16,
    i32            => Int32,
    i64            => Int64,
    u8             => UInt8,
    u16            => UInt16,
    u32            => UInt32,
    u64            => UInt64,
    f32            => Single,
    f64            => Double,
    Decimal        => Decimal,
    char           => Char,
    &str           => String,
    String         => String,
    DateTime       => DateTime,
    DateTimeOffset => DateTimeOffset,
    Duration       => Duration,
    ObjectId       => ObjectId,
}

impl From<Vec<u8>> for IndexValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(ByteBuf::from(bytes))
    }
}

impl From<Vec<Self>> for IndexValue {
    fn from(values: Vec<Self>) -> Self {
        Self::Array(values)
    }
}
