use super::*;
use crate::{
    error::{KeyDecodeError, KeyEncodeError},
    key::IndexKey,
    types::{DateTime, DateTimeOffset, Decimal, Duration},
    value::IndexValue,
};

// ── Layout ──────────────────────────────────────────────────────────────

#[test]
fn nonexistent_key_is_a_single_zero_byte() {
    let schema = age_name_schema();
    let encoded = schema.encode(&IndexKey::none(), LIMIT).expect("encode");

    assert_eq!(encoded.as_bytes(), &[0x00]);
    assert_eq!(schema.decode(encoded.as_bytes()).expect("decode"), IndexKey::none());
}

#[test]
fn first_byte_packs_existence_bit_and_tag() {
    let schema = one_field(Direction::Asc);
    let key = IndexKey::new(vec![IndexValue::Bool(true)], oid(7));
    let encoded = schema.encode(&key, LIMIT).expect("encode");

    // exists bit, six tag bits for bool, one pad bit, then the payload
    let mut expected = vec![0b1_000010_0, 0x01];
    expected.extend_from_slice(&oid(7).to_bytes());
    assert_eq!(encoded.as_bytes(), expected.as_slice());
}

#[test]
fn later_tags_start_on_their_own_byte() {
    let schema = KeySchema::new(vec![FieldSpec::asc("a"), FieldSpec::asc("b")]);
    let key = IndexKey::new(
        vec![IndexValue::Bool(true), IndexValue::UInt8(7)],
        oid(7),
    );
    let encoded = schema.encode(&key, LIMIT).expect("encode");

    let mut expected = vec![0b1_000010_0, 0x01, 0b000100_00, 0x07];
    expected.extend_from_slice(&oid(7).to_bytes());
    assert_eq!(encoded.as_bytes(), expected.as_slice());
}

#[test]
fn sentinel_and_null_payloads_are_empty() {
    let schema = one_field(Direction::Asc);
    let cases = [
        (IndexValue::Min, 0b1_000000_0),
        (IndexValue::Null, 0b1_000001_0),
        (IndexValue::Max, 0b1_111111_0),
    ];

    for (value, first_byte) in cases {
        let key = IndexKey::new(vec![value.clone()], oid(1));
        let encoded = schema.encode(&key, LIMIT).expect("encode");

        assert_eq!(encoded.len(), 1 + ObjectId::STORED_SIZE, "{value:?}");
        assert_eq!(encoded.as_bytes()[0], first_byte, "{value:?}");
    }
}

#[test]
fn serialize_and_encode_produce_identical_bytes() {
    let schema = age_name_schema();
    let looked_up = person_key(&schema, 30, "Bob", 7);

    let typed = IndexKey::new(
        vec![IndexValue::Int32(30), IndexValue::String("Bob".to_string())],
        oid(7),
    );
    let encoded = schema.encode(&typed, LIMIT).expect("encode");

    assert_eq!(looked_up, encoded);
}

// ── Round trips ─────────────────────────────────────────────────────────

#[test]
fn every_kind_survives_a_round_trip() {
    let values = vec![
        IndexValue::Min,
        IndexValue::Null,
        IndexValue::Bool(true),
        IndexValue::Int8(-5),
        IndexValue::UInt8(200),
        IndexValue::Int16(-3_000),
        IndexValue::UInt16(60_000),
        IndexValue::Int32(i32::MIN),
        IndexValue::UInt32(u32::MAX),
        IndexValue::Int64(i64::MIN),
        IndexValue::UInt64(u64::MAX),
        IndexValue::Single(1.5_f32.into()),
        IndexValue::Double((-0.1_f64).into()),
        IndexValue::Decimal(Decimal::from_f64(12.345).expect("decimal")),
        IndexValue::Char('é'),
        IndexValue::String("héllo".to_string()),
        IndexValue::StringIgnoreCase("AbC".to_string()),
        IndexValue::EnumLabel("Pending".to_string()),
        IndexValue::from(vec![0x00_u8, 0xFF, 0x7F]),
        IndexValue::DateTime(DateTime::from_unix_secs(1_700_000_000)),
        IndexValue::DateTimeOffset(DateTimeOffset::new(DateTime::from_unix_secs(5), -330)),
        IndexValue::Duration(Duration::from_millis(-1_500)),
        IndexValue::ObjectId(oid(42)),
        IndexValue::Max,
    ];
    let schema: KeySchema = (0..values.len())
        .map(|i| FieldSpec::asc(format!("f{i}")))
        .collect();

    let key = IndexKey::new(values, oid(9));
    let encoded = schema.encode(&key, LIMIT).expect("encode");
    let decoded = schema.decode(encoded.as_bytes()).expect("decode");

    assert_eq!(decoded, key);
}

#[test]
fn empty_text_and_byte_segments_round_trip() {
    let schema = KeySchema::new(vec![FieldSpec::asc("s"), FieldSpec::asc("b")]);
    let key = IndexKey::new(
        vec![
            IndexValue::String(String::new()),
            IndexValue::from(Vec::<u8>::new()),
        ],
        oid(1),
    );

    let encoded = schema.encode(&key, LIMIT).expect("encode");
    assert_eq!(schema.decode(encoded.as_bytes()).expect("decode"), key);
}

// ── Missing-field policies ──────────────────────────────────────────────

#[test]
fn prohibit_policy_fails_the_key_on_a_missing_field() {
    let schema = age_name_schema();
    let source = FieldMap::new().with("age", 30);
    let err = schema
        .serialize(oid(1), &source, MissingFieldAction::Prohibit, LIMIT)
        .expect_err("missing name");

    assert_eq!(
        err,
        KeyEncodeError::MissingField {
            field: "name".to_string()
        }
    );
}

#[test]
fn null_policy_encodes_an_explicit_null() {
    let schema = age_name_schema();
    let source = FieldMap::new().with("age", 30);
    let encoded = schema
        .serialize(oid(1), &source, MissingFieldAction::Null, LIMIT)
        .expect("encode");

    let decoded = schema.decode(encoded.as_bytes()).expect("decode");
    assert_eq!(
        decoded.fields(),
        &[IndexValue::Int32(30), IndexValue::Null]
    );
}

#[test]
fn first_and_last_policies_pick_direction_aware_sentinels() {
    let empty = FieldMap::new();
    let cases = [
        (Direction::Asc, MissingFieldAction::First, IndexValue::Min),
        (Direction::Asc, MissingFieldAction::Last, IndexValue::Max),
        (Direction::Desc, MissingFieldAction::First, IndexValue::Max),
        (Direction::Desc, MissingFieldAction::Last, IndexValue::Min),
    ];

    for (direction, policy, expected) in cases {
        let schema = one_field(direction);
        let encoded = schema
            .serialize(oid(1), &empty, policy, LIMIT)
            .expect("encode");
        let decoded = schema.decode(encoded.as_bytes()).expect("decode");

        assert_eq!(
            decoded.fields(),
            &[expected.clone()],
            "{direction:?} / {policy:?}"
        );
    }
}

// ── Encode rejections ───────────────────────────────────────────────────

#[test]
fn structural_values_fail_the_whole_key() {
    let schema = age_name_schema();
    let source = FieldMap::new()
        .with("age", 30)
        .with("name", vec![IndexValue::Int32(1)]);
    let err = schema
        .serialize(oid(1), &source, MissingFieldAction::Prohibit, LIMIT)
        .expect_err("array value");

    assert_eq!(
        err,
        KeyEncodeError::UnsupportedType {
            field: "name".to_string(),
            kind: "array",
        }
    );
}

#[test]
fn chars_outside_the_bmp_are_rejected() {
    let schema = one_field(Direction::Asc);
    let key = IndexKey::new(vec![IndexValue::Char('😀')], oid(1));
    let err = schema.encode(&key, LIMIT).expect_err("astral char");

    assert!(
        matches!(err, KeyEncodeError::UnsupportedType { ref field, .. } if field == "v"),
        "{err:?}"
    );
}

#[test]
fn a_segment_over_the_u16_cap_is_rejected() {
    let schema = one_field(Direction::Asc);
    let key = IndexKey::new(
        vec![IndexValue::String("x".repeat(70_000))],
        oid(1),
    );
    let err = schema.encode(&key, 1_000_000).expect_err("oversized segment");

    assert_eq!(
        err,
        KeyEncodeError::SegmentTooLarge {
            field: "v".to_string(),
            len: 70_000,
            max: 65_535,
        }
    );
}

#[test]
fn a_key_over_the_size_limit_is_rejected() {
    let schema = one_field(Direction::Asc);
    let key = IndexKey::new(vec![IndexValue::Int64(1)], oid(1));
    let err = schema.encode(&key, 8).expect_err("tiny limit");

    // tag byte, eight payload bytes, sixteen id bytes
    assert_eq!(err, KeyEncodeError::KeyTooLarge { size: 25, limit: 8 });
}

#[test]
fn the_size_limit_counts_the_whole_key() {
    let schema = one_field(Direction::Asc);
    let key = IndexKey::new(vec![IndexValue::Int64(1)], oid(1));

    assert!(schema.encode(&key, 25).is_ok());
    assert!(schema.encode(&key, 24).is_err());
}

// ── Decode rejections ───────────────────────────────────────────────────

#[test]
fn an_unassigned_tag_is_corruption() {
    let schema = one_field(Direction::Asc);
    let mut bytes = vec![0b1_011110_0]; // tag 30 is unassigned
    bytes.extend_from_slice(&oid(1).to_bytes());

    let err = schema.decode(&bytes).expect_err("unassigned tag");
    assert_eq!(err, KeyDecodeError::InvalidTag { tag: 30, offset: 0 });
}

#[test]
fn a_structural_tag_in_stored_bytes_is_corruption() {
    let schema = one_field(Direction::Asc);
    let mut bytes = vec![0b1_010111_0]; // the array tag never encodes
    bytes.extend_from_slice(&oid(1).to_bytes());

    let err = schema.decode(&bytes).expect_err("structural tag");
    assert_eq!(err, KeyDecodeError::InvalidTag { tag: 23, offset: 0 });
}

#[test]
fn a_truncated_key_reports_where_it_ended() {
    let schema = one_field(Direction::Asc);
    let key = IndexKey::new(vec![IndexValue::Int64(1)], oid(1));
    let encoded = schema.encode(&key, LIMIT).expect("encode");

    let err = schema
        .decode(&encoded.as_bytes()[..20])
        .expect_err("truncated");
    assert!(matches!(err, KeyDecodeError::Truncated { .. }), "{err:?}");
}

#[test]
fn bytes_after_the_object_id_are_corruption() {
    let schema = age_name_schema();
    let mut bytes = person_key(&schema, 30, "Bob", 7).into_bytes();
    bytes.push(0x00);

    let err = schema.decode(&bytes).expect_err("trailing byte");
    assert_eq!(err, KeyDecodeError::TrailingBytes { extra: 1 });

    let err = schema.decode(&[0x00, 0x00]).expect_err("trailing byte");
    assert_eq!(err, KeyDecodeError::TrailingBytes { extra: 1 });
}

#[test]
fn a_non_utf8_text_payload_is_corruption() {
    let schema = one_field(Direction::Asc);
    let mut bytes = vec![0b1_001111_0, 0x00, 0x02, 0xFF, 0xFE];
    bytes.extend_from_slice(&oid(1).to_bytes());

    let err = schema.decode(&bytes).expect_err("bad utf-8");
    assert_eq!(err, KeyDecodeError::InvalidUtf8 { offset: 5 });
}

#[test]
fn a_surrogate_char_code_unit_is_corruption() {
    let schema = one_field(Direction::Asc);
    let mut bytes = vec![0b1_001110_0, 0xD8, 0x00];
    bytes.extend_from_slice(&oid(1).to_bytes());

    let err = schema.decode(&bytes).expect_err("surrogate");
    assert_eq!(
        err,
        KeyDecodeError::InvalidChar {
            unit: 0xD800,
            offset: 1,
        }
    );
}

#[test]
fn decoding_an_empty_buffer_is_corruption() {
    let schema = one_field(Direction::Asc);
    assert!(matches!(
        schema.decode(&[]).expect_err("empty"),
        KeyDecodeError::Truncated { .. }
    ));
}

// ── Serde ───────────────────────────────────────────────────────────────

#[test]
fn schemas_round_trip_through_json() {
    let schema = age_name_schema();
    let json = serde_json::to_string(&schema).expect("serialize");
    let back: KeySchema = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back, schema);
}

#[test]
fn raw_keys_round_trip_through_json() {
    let schema = age_name_schema();
    let raw = person_key(&schema, 30, "Bob", 7);

    let json = serde_json::to_string(&raw).expect("serialize");
    let back: RawIndexKey = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, raw);
}
