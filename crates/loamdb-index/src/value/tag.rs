use crate::value::IndexValue;

///
/// TypeTag
///
/// Stable 6-bit type tag written in front of every field payload.
///
/// IMPORTANT:
/// Tag values are part of the stored key format and must remain fixed.
/// `Min` is all-bits-clear and `Max` all-bits-set so the sentinels own the
/// ends of the tag space; `Array`/`Object` exist only to classify corrupt or
/// structural data and never appear in a well-formed key.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TypeTag {
    Min = 0,
    Null = 1,
    Bool = 2,
    Int8 = 3,
    UInt8 = 4,
    Int16 = 5,
    UInt16 = 6,
    Int32 = 7,
    UInt32 = 8,
    Int64 = 9,
    UInt64 = 10,
    Single = 11,
    Double = 12,
    Decimal = 13,
    Char = 14,
    String = 15,
    StringIgnoreCase = 16,
    EnumLabel = 17,
    Bytes = 18,
    DateTime = 19,
    DateTimeOffset = 20,
    Duration = 21,
    ObjectId = 22,
    Array = 23,
    Object = 24,
    Max = 63,
}

impl TypeTag {
    /// Wire width of a tag, in bits.
    pub const BITS: usize = 6;

    /// Stable 6-bit wire tag for this variant.
    #[must_use]
    pub const fn to_u6(self) -> u8 {
        self as u8
    }

    /// Decode a 6-bit wire tag; unassigned values are corruption.
    #[must_use]
    pub const fn from_u6(tag: u8) -> Option<Self> {
        let decoded = match tag {
            0 => Self::Min,
            1 => Self::Null,
            2 => Self::Bool,
            3 => Self::Int8,
            4 => Self::UInt8,
            5 => Self::Int16,
            6 => Self::UInt16,
            7 => Self::Int32,
            8 => Self::UInt32,
            9 => Self::Int64,
            10 => Self::UInt64,
            11 => Self::Single,
            12 => Self::Double,
            13 => Self::Decimal,
            14 => Self::Char,
            15 => Self::String,
            16 => Self::StringIgnoreCase,
            17 => Self::EnumLabel,
            18 => Self::Bytes,
            19 => Self::DateTime,
            20 => Self::DateTimeOffset,
            21 => Self::Duration,
            22 => Self::ObjectId,
            23 => Self::Array,
            24 => Self::Object,
            63 => Self::Max,
            _ => return None,
        };

        Some(decoded)
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Single => "single",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::String => "string",
            Self::StringIgnoreCase => "string-ci",
            Self::EnumLabel => "enum-label",
            Self::Bytes => "bytes",
            Self::DateTime => "datetime",
            Self::DateTimeOffset => "datetime-offset",
            Self::Duration => "duration",
            Self::ObjectId => "object-id",
            Self::Array => "array",
            Self::Object => "object",
            Self::Max => "max",
        }
    }

    /// Array/object shapes: never valid field payloads, ordered as corrupt
    /// data when met in stored bytes.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

/// Stable tag of a value, including the structural shapes.
#[must_use]
pub(super) const fn type_tag(value: &IndexValue) -> TypeTag {
    match value {
        IndexValue::Min => TypeTag::Min,
        IndexValue::Null => TypeTag::Null,
        IndexValue::Bool(_) => TypeTag::Bool,
        IndexValue::Int8(_) => TypeTag::Int8,
        IndexValue::UInt8(_) => TypeTag::UInt8,
        IndexValue::Int16(_) => TypeTag::Int16,
        IndexValue::UInt16(_) => TypeTag::UInt16,
        IndexValue::Int32(_) => TypeTag::Int32,
        IndexValue::UInt32(_) => TypeTag::UInt32,
        IndexValue::Int64(_) => TypeTag::Int64,
        IndexValue::UInt64(_) => TypeTag::UInt64,
        IndexValue::Single(_) => TypeTag::Single,
        IndexValue::Double(_) => TypeTag::Double,
        IndexValue::Decimal(_) => TypeTag::Decimal,
        IndexValue::Char(_) => TypeTag::Char,
        IndexValue::String(_) => TypeTag::String,
        IndexValue::StringIgnoreCase(_) => TypeTag::StringIgnoreCase,
        IndexValue::EnumLabel(_) => TypeTag::EnumLabel,
        IndexValue::Bytes(_) => TypeTag::Bytes,
        IndexValue::DateTime(_) => TypeTag::DateTime,
        IndexValue::DateTimeOffset(_) => TypeTag::DateTimeOffset,
        IndexValue::Duration(_) => TypeTag::Duration,
        IndexValue::ObjectId(_) => TypeTag::ObjectId,
        IndexValue::Array(_) => TypeTag::Array,
        IndexValue::Object(_) => TypeTag::Object,
        IndexValue::Max => TypeTag::Max,
    }
}

///
/// TESTS
///
