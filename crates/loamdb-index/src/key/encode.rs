//! Module: key::encode
//! Responsibility: turning an object's field values into key bytes under a
//! missing-field policy and a per-index size limit.
//! Does not own: ordering. Encoding is direction-agnostic; the comparator
//! applies the sign flip.

use crate::{
    bits::BitWriter,
    direction::Direction,
    error::KeyEncodeError,
    key::{IndexKey, RawIndexKey},
    schema::{FieldSource, FieldSpec, KeySchema, MissingFieldAction},
    types::ObjectId,
    value::{IndexValue, TypeTag},
};

impl KeySchema {
    /// Build the key for one object: look each indexed field up in the
    /// source, apply `policy` where a field is absent, append the object id.
    /// Deterministic; the whole key fails on the first bad field.
    pub fn serialize(
        &self,
        object_id: ObjectId,
        source: &impl FieldSource,
        policy: MissingFieldAction,
        key_size_limit: usize,
    ) -> Result<RawIndexKey, KeyEncodeError> {
        let mut writer = self.key_writer();
        writer.write_bit(true);

        for spec in self.fields() {
            match source.try_get_field(spec.name()) {
                Some(value) => write_field(&mut writer, spec.name(), &value)?,
                None => write_missing(&mut writer, spec, policy)?,
            }
        }

        finish(writer, object_id, key_size_limit)
    }

    /// Encode an already-typed key. Range-bound construction and tests come
    /// through here; the byte layout is identical to [`Self::serialize`].
    pub fn encode(
        &self,
        key: &IndexKey,
        key_size_limit: usize,
    ) -> Result<RawIndexKey, KeyEncodeError> {
        if !key.exists() {
            return Ok(RawIndexKey::from(vec![0x00]));
        }
        debug_assert_eq!(
            key.fields().len(),
            self.len(),
            "typed key field count must match the schema"
        );

        let mut writer = self.key_writer();
        writer.write_bit(true);

        for (spec, value) in self.fields().iter().zip(key.fields()) {
            write_field(&mut writer, spec.name(), value)?;
        }

        finish(writer, key.object_id(), key_size_limit)
    }

    fn key_writer(&self) -> BitWriter {
        // tag byte plus a typical fixed payload per field
        BitWriter::with_capacity(1 + self.len() * 9 + ObjectId::STORED_SIZE)
    }
}

fn write_missing(
    writer: &mut BitWriter,
    spec: &FieldSpec,
    policy: MissingFieldAction,
) -> Result<(), KeyEncodeError> {
    let value = match policy {
        MissingFieldAction::Prohibit => {
            return Err(KeyEncodeError::MissingField {
                field: spec.name().to_string(),
            });
        }
        MissingFieldAction::Null => IndexValue::Null,
        // First/Last pick the sentinel whose visible position survives the
        // comparator's direction flip: on a descending field MAX sorts first.
        MissingFieldAction::First => match spec.direction() {
            Direction::Asc => IndexValue::Min,
            Direction::Desc => IndexValue::Max,
        },
        MissingFieldAction::Last => match spec.direction() {
            Direction::Asc => IndexValue::Max,
            Direction::Desc => IndexValue::Min,
        },
    };

    write_field(writer, spec.name(), &value)
}

fn write_field(
    writer: &mut BitWriter,
    field: &str,
    value: &IndexValue,
) -> Result<(), KeyEncodeError> {
    // structural values never reach the wire
    if !value.is_indexable() {
        return Err(KeyEncodeError::UnsupportedType {
            field: field.to_string(),
            kind: value.kind(),
        });
    }

    writer.write_bits(value.type_tag().to_u6(), TypeTag::BITS);
    writer.align();
    write_payload(writer, field, value)
}

fn write_payload(
    writer: &mut BitWriter,
    field: &str,
    value: &IndexValue,
) -> Result<(), KeyEncodeError> {
    match value {
        IndexValue::Min | IndexValue::Null | IndexValue::Max => {}
        IndexValue::Bool(v) => writer.write_bytes(&[u8::from(*v)]),
        IndexValue::Int8(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::Int16(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::Int32(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::Int64(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::UInt8(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::UInt16(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::UInt32(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::UInt64(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::Single(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::Double(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::Decimal(v) => writer.write_bytes(&v.to_canonical_bytes()),
        IndexValue::Char(v) => {
            let unit =
                u16::try_from(u32::from(*v)).map_err(|_| KeyEncodeError::UnsupportedType {
                    field: field.to_string(),
                    kind: "char outside the basic multilingual plane",
                })?;
            writer.write_bytes(&unit.to_be_bytes());
        }
        IndexValue::String(v) | IndexValue::StringIgnoreCase(v) | IndexValue::EnumLabel(v) => {
            write_segment(writer, field, v.as_bytes())?;
        }
        IndexValue::Bytes(v) => write_segment(writer, field, v)?,
        IndexValue::DateTime(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::DateTimeOffset(v) => {
            writer.write_bytes(&v.instant().to_be_bytes());
            writer.write_bytes(&v.offset_minutes().to_be_bytes());
        }
        IndexValue::Duration(v) => writer.write_bytes(&v.to_be_bytes()),
        IndexValue::ObjectId(v) => writer.write_bytes(&v.to_bytes()),
        // rejected before the tag was written
        IndexValue::Array(_) | IndexValue::Object(_) => {}
    }

    Ok(())
}

/// Length-prefixed payload: 2-byte big-endian length, then the bytes. The
/// u16 prefix caps a single segment at 65535 bytes.
fn write_segment(writer: &mut BitWriter, field: &str, bytes: &[u8]) -> Result<(), KeyEncodeError> {
    let Ok(len) = u16::try_from(bytes.len()) else {
        return Err(KeyEncodeError::SegmentTooLarge {
            field: field.to_string(),
            len: bytes.len(),
            max: usize::from(u16::MAX),
        });
    };

    writer.write_bytes(&len.to_be_bytes());
    writer.write_bytes(bytes);

    Ok(())
}

fn finish(
    mut writer: BitWriter,
    object_id: ObjectId,
    key_size_limit: usize,
) -> Result<RawIndexKey, KeyEncodeError> {
    writer.align();
    writer.write_bytes(&object_id.to_bytes());

    let bytes = writer.into_bytes();
    if bytes.len() > key_size_limit {
        return Err(KeyEncodeError::KeyTooLarge {
            size: bytes.len(),
            limit: key_size_limit,
        });
    }

    Ok(RawIndexKey::from(bytes))
}
