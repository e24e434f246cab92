//! Module: key::decode
//! Responsibility: reading key bytes back out — full typed decode, the
//! comparator's per-field lift, and payload skipping.
//! Boundary: every malformed-bytes condition surfaces as `KeyDecodeError`;
//! nothing here panics on foreign data.

use crate::{
    bits::BitReader,
    error::KeyDecodeError,
    key::IndexKey,
    schema::KeySchema,
    types::{DateTime, DateTimeOffset, Decimal, Duration, Float32, Float64, ObjectId},
    value::{
        IndexValue, TypeTag,
        ordered::{OrderedField, OrderedValue},
    },
};
use serde_bytes::ByteBuf;
use std::str;

impl KeySchema {
    /// Fully decode one key. Field count is schema-driven and trailing
    /// bytes are rejected, so a decoded key always matches its schema.
    pub fn decode(&self, bytes: &[u8]) -> Result<IndexKey, KeyDecodeError> {
        let mut reader = BitReader::new(bytes);

        if !reader.read_bit()? {
            if reader.remaining_bytes() > 0 {
                return Err(KeyDecodeError::TrailingBytes {
                    extra: reader.remaining_bytes(),
                });
            }
            return Ok(IndexKey::none());
        }

        let mut fields = Vec::with_capacity(self.len());
        for _ in self.fields() {
            fields.push(read_value(&mut reader)?);
        }

        let object_id = ObjectId::from_bytes(reader.read_array()?);
        if reader.remaining_bytes() > 0 {
            return Err(KeyDecodeError::TrailingBytes {
                extra: reader.remaining_bytes(),
            });
        }

        Ok(IndexKey::new(fields, object_id))
    }
}

/// Read one field's 6-bit tag and move to its payload.
fn read_tag(reader: &mut BitReader<'_>) -> Result<TypeTag, KeyDecodeError> {
    let offset = reader.current_byte();
    let raw = reader.read_bits(TypeTag::BITS)?;
    reader.align();

    TypeTag::from_u6(raw).ok_or(KeyDecodeError::InvalidTag { tag: raw, offset })
}

/// Lift one encoded field into the comparison domain, borrowing text and
/// byte payloads straight from the input buffer.
pub(crate) fn read_ordered_field<'a>(
    reader: &mut BitReader<'a>,
) -> Result<OrderedField<'a>, KeyDecodeError> {
    let tag = read_tag(reader)?;
    let value = match tag {
        TypeTag::Min => OrderedValue::Min,
        TypeTag::Null => OrderedValue::Null,
        TypeTag::Max => OrderedValue::Max,
        TypeTag::Bool => OrderedValue::Unsigned(u64::from(reader.read_array::<1>()?[0] != 0)),
        TypeTag::Int8 => OrderedValue::Signed(i64::from(i8::from_be_bytes(reader.read_array()?))),
        TypeTag::UInt8 => OrderedValue::Unsigned(u64::from(reader.read_array::<1>()?[0])),
        TypeTag::Int16 => OrderedValue::Signed(i64::from(i16::from_be_bytes(reader.read_array()?))),
        TypeTag::UInt16 => {
            OrderedValue::Unsigned(u64::from(u16::from_be_bytes(reader.read_array()?)))
        }
        TypeTag::Int32 => OrderedValue::Signed(i64::from(i32::from_be_bytes(reader.read_array()?))),
        TypeTag::UInt32 => {
            OrderedValue::Unsigned(u64::from(u32::from_be_bytes(reader.read_array()?)))
        }
        TypeTag::Int64 => OrderedValue::Signed(i64::from_be_bytes(reader.read_array()?)),
        TypeTag::UInt64 => OrderedValue::Unsigned(u64::from_be_bytes(reader.read_array()?)),
        TypeTag::Single => OrderedValue::Single(Float32::from_be_bytes(reader.read_array()?)),
        TypeTag::Double => OrderedValue::Double(Float64::from_be_bytes(reader.read_array()?)),
        TypeTag::Decimal => OrderedValue::Decimal(Decimal::from_canonical_bytes(
            reader.read_array()?,
        )),
        TypeTag::Char => OrderedValue::Unsigned(u64::from(u32::from(read_char(reader)?))),
        TypeTag::String | TypeTag::EnumLabel => OrderedValue::Text(read_text(reader)?),
        TypeTag::StringIgnoreCase => OrderedValue::TextCi(read_text(reader)?),
        TypeTag::Bytes => OrderedValue::Bytes(read_segment(reader)?),
        TypeTag::DateTime => OrderedValue::Instant {
            nanos: i64::from_be_bytes(reader.read_array()?),
            offset_minutes: 0,
        },
        TypeTag::DateTimeOffset => OrderedValue::Instant {
            nanos: i64::from_be_bytes(reader.read_array()?),
            offset_minutes: i16::from_be_bytes(reader.read_array()?),
        },
        TypeTag::Duration => OrderedValue::Span(i64::from_be_bytes(reader.read_array()?)),
        TypeTag::ObjectId => OrderedValue::Id(u128::from_be_bytes(reader.read_array()?)),
        // payload shape unknown; the comparator decides whether it can
        // still produce an answer
        TypeTag::Array | TypeTag::Object => OrderedValue::Structural,
    };

    Ok(OrderedField::new(tag, value))
}

/// Read one field as a typed value. Structural tags are corruption here,
/// because a typed key cannot carry an unknown payload.
fn read_value(reader: &mut BitReader<'_>) -> Result<IndexValue, KeyDecodeError> {
    let offset = reader.current_byte();
    let tag = read_tag(reader)?;
    let value = match tag {
        TypeTag::Min => IndexValue::Min,
        TypeTag::Null => IndexValue::Null,
        TypeTag::Max => IndexValue::Max,
        TypeTag::Bool => IndexValue::Bool(reader.read_array::<1>()?[0] != 0),
        TypeTag::Int8 => IndexValue::Int8(i8::from_be_bytes(reader.read_array()?)),
        TypeTag::UInt8 => IndexValue::UInt8(reader.read_array::<1>()?[0]),
        TypeTag::Int16 => IndexValue::Int16(i16::from_be_bytes(reader.read_array()?)),
        TypeTag::UInt16 => IndexValue::UInt16(u16::from_be_bytes(reader.read_array()?)),
        TypeTag::Int32 => IndexValue::Int32(i32::from_be_bytes(reader.read_array()?)),
        TypeTag::UInt32 => IndexValue::UInt32(u32::from_be_bytes(reader.read_array()?)),
        TypeTag::Int64 => IndexValue::Int64(i64::from_be_bytes(reader.read_array()?)),
        TypeTag::UInt64 => IndexValue::UInt64(u64::from_be_bytes(reader.read_array()?)),
        TypeTag::Single => IndexValue::Single(Float32::from_be_bytes(reader.read_array()?)),
        TypeTag::Double => IndexValue::Double(Float64::from_be_bytes(reader.read_array()?)),
        TypeTag::Decimal => {
            IndexValue::Decimal(Decimal::from_canonical_bytes(reader.read_array()?))
        }
        TypeTag::Char => IndexValue::Char(read_char(reader)?),
        TypeTag::String => IndexValue::String(read_text(reader)?.to_string()),
        TypeTag::StringIgnoreCase => {
            IndexValue::StringIgnoreCase(read_text(reader)?.to_string())
        }
        TypeTag::EnumLabel => IndexValue::EnumLabel(read_text(reader)?.to_string()),
        TypeTag::Bytes => IndexValue::Bytes(ByteBuf::from(read_segment(reader)?.to_vec())),
        TypeTag::DateTime => IndexValue::DateTime(DateTime::from_be_bytes(reader.read_array()?)),
        TypeTag::DateTimeOffset => {
            let instant = DateTime::from_be_bytes(reader.read_array()?);
            let offset_minutes = i16::from_be_bytes(reader.read_array()?);
            IndexValue::DateTimeOffset(DateTimeOffset::new(instant, offset_minutes))
        }
        TypeTag::Duration => IndexValue::Duration(Duration::from_be_bytes(reader.read_array()?)),
        TypeTag::ObjectId => IndexValue::ObjectId(ObjectId::from_bytes(reader.read_array()?)),
        TypeTag::Array | TypeTag::Object => {
            return Err(KeyDecodeError::InvalidTag {
                tag: tag.to_u6(),
                offset,
            });
        }
    };

    Ok(value)
}

/// Advance past one field without decoding its payload.
pub(crate) fn skip_field(reader: &mut BitReader<'_>) -> Result<(), KeyDecodeError> {
    let offset = reader.current_byte();
    let tag = read_tag(reader)?;

    match payload_width(tag) {
        PayloadWidth::Fixed(len) => reader.skip_bytes(len)?,
        PayloadWidth::Segment => {
            let len = u16::from_be_bytes(reader.read_array()?);
            reader.skip_bytes(usize::from(len))?;
        }
        PayloadWidth::Unskippable => {
            return Err(KeyDecodeError::InvalidTag {
                tag: tag.to_u6(),
                offset,
            });
        }
    }

    Ok(())
}

pub(crate) enum PayloadWidth {
    Fixed(usize),
    Segment,
    /// Structural tags carry no known payload shape; a key holding one
    /// cannot be walked past.
    Unskippable,
}

pub(crate) const fn payload_width(tag: TypeTag) -> PayloadWidth {
    match tag {
        TypeTag::Min | TypeTag::Null | TypeTag::Max => PayloadWidth::Fixed(0),
        TypeTag::Bool | TypeTag::Int8 | TypeTag::UInt8 => PayloadWidth::Fixed(1),
        TypeTag::Int16 | TypeTag::UInt16 | TypeTag::Char => PayloadWidth::Fixed(2),
        TypeTag::Int32 | TypeTag::UInt32 | TypeTag::Single => PayloadWidth::Fixed(4),
        TypeTag::Int64
        | TypeTag::UInt64
        | TypeTag::Double
        | TypeTag::DateTime
        | TypeTag::Duration => PayloadWidth::Fixed(8),
        TypeTag::DateTimeOffset => PayloadWidth::Fixed(10),
        TypeTag::Decimal | TypeTag::ObjectId => PayloadWidth::Fixed(16),
        TypeTag::String | TypeTag::StringIgnoreCase | TypeTag::EnumLabel | TypeTag::Bytes => {
            PayloadWidth::Segment
        }
        TypeTag::Array | TypeTag::Object => PayloadWidth::Unskippable,
    }
}

fn read_segment<'a>(reader: &mut BitReader<'a>) -> Result<&'a [u8], KeyDecodeError> {
    let len = u16::from_be_bytes(reader.read_array()?);

    Ok(reader.read_bytes(usize::from(len))?)
}

fn read_text<'a>(reader: &mut BitReader<'a>) -> Result<&'a str, KeyDecodeError> {
    let bytes = read_segment(reader)?;
    let offset = reader.current_byte();

    str::from_utf8(bytes).map_err(|_| KeyDecodeError::InvalidUtf8 { offset })
}

fn read_char(reader: &mut BitReader<'_>) -> Result<char, KeyDecodeError> {
    let offset = reader.current_byte();
    let unit = u16::from_be_bytes(reader.read_array()?);

    // surrogate code units are not scalar values
    char::from_u32(u32::from(unit)).ok_or(KeyDecodeError::InvalidChar { unit, offset })
}
