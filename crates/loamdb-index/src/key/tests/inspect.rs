use super::*;
use crate::{
    error::KeyDecodeError,
    key::{IndexKey, KeyDump},
    types::DateTime,
    value::IndexValue,
};

// ── Walking packed buffers ──────────────────────────────────────────────

#[test]
fn skip_past_walks_a_packed_buffer() {
    let schema = age_name_schema();
    let records = [
        person_key(&schema, 30, "Bob", 1).into_bytes(),
        person_key(&schema, 31, "Alice", 2).into_bytes(),
        vec![0x00],
        person_key(&schema, 32, "Cy", 3).into_bytes(),
    ];
    let buffer: Vec<u8> = records.iter().flatten().copied().collect();

    let mut offset = 0;
    let mut expected_offset = 0;
    for (i, record) in records.iter().enumerate() {
        let exists = schema.skip_past(&buffer, &mut offset).expect("skip");
        expected_offset += record.len();

        assert_eq!(exists, record != &[0x00_u8], "record {i}");
        assert_eq!(offset, expected_offset, "record {i}");
    }
    assert_eq!(offset, buffer.len());
}

#[test]
fn skip_past_leaves_the_cursor_on_error() {
    let schema = age_name_schema();
    let whole = person_key(&schema, 30, "Bob", 1).into_bytes();
    let second = person_key(&schema, 31, "Alice", 2).into_bytes();

    let mut buffer = whole.clone();
    buffer.extend_from_slice(&second[..5]);

    let mut offset = 0;
    assert!(schema.skip_past(&buffer, &mut offset).expect("skip"));
    assert_eq!(offset, whole.len());

    let err = schema.skip_past(&buffer, &mut offset).expect_err("truncated");
    assert!(matches!(err, KeyDecodeError::Truncated { .. }), "{err:?}");
    assert_eq!(offset, whole.len(), "cursor must not move on error");
}

// ── Bounded extraction ──────────────────────────────────────────────────

#[test]
fn extract_bounded_returns_exactly_the_skipped_bytes() {
    let schema = age_name_schema();
    let first = person_key(&schema, 30, "Bob", 1);
    let second = person_key(&schema, 31, "Alice", 2);

    let mut buffer = first.clone().into_bytes();
    buffer.extend_from_slice(second.as_bytes());

    let mut offset = 0;
    let extracted = schema
        .extract_bounded(&buffer, &mut offset, LIMIT)
        .expect("extract")
        .expect("fits");
    assert_eq!(extracted, first);
    assert_eq!(offset, first.len());

    let extracted = schema
        .extract_bounded(&buffer, &mut offset, LIMIT)
        .expect("extract")
        .expect("fits");
    assert_eq!(extracted, second);
    assert_eq!(offset, buffer.len());
}

#[test]
fn extract_bounded_drops_an_oversized_key_but_advances() {
    let schema = age_name_schema();
    let first = person_key(&schema, 30, "Bobby-with-a-long-name", 1);
    let second = person_key(&schema, 31, "Al", 2);

    let mut buffer = first.clone().into_bytes();
    buffer.extend_from_slice(second.as_bytes());

    let mut offset = 0;
    let extracted = schema
        .extract_bounded(&buffer, &mut offset, first.len() - 1)
        .expect("extract");
    assert_eq!(extracted, None);
    assert_eq!(offset, first.len(), "the oversized key is still consumed");

    let extracted = schema
        .extract_bounded(&buffer, &mut offset, LIMIT)
        .expect("extract")
        .expect("fits");
    assert_eq!(extracted, second);
}

#[test]
fn extract_bounded_handles_nonexistent_records() {
    let schema = age_name_schema();
    let mut buffer = vec![0x00];
    buffer.extend_from_slice(person_key(&schema, 30, "Bob", 1).as_bytes());

    let mut offset = 0;
    let extracted = schema
        .extract_bounded(&buffer, &mut offset, LIMIT)
        .expect("extract")
        .expect("fits");
    assert_eq!(extracted.as_bytes(), &[0x00]);
    assert_eq!(offset, 1);
}

// ── Rendering ───────────────────────────────────────────────────────────

#[test]
fn render_names_every_field_and_the_id() {
    let schema = age_name_schema();
    let key = person_key(&schema, 30, "Bob", 7);
    let dump = schema.render(key.as_bytes()).expect("render");

    assert_eq!(
        dump.entries(),
        &[
            ("age".to_string(), "30".to_string()),
            ("name".to_string(), "Bob".to_string()),
        ]
    );
    assert_eq!(dump.object_id(), Some(oid(7)));
    assert_eq!(dump.to_string(), format!("age=30 name=Bob objectId={}", oid(7)));
}

#[test]
fn render_uses_the_shared_text_forms() {
    let schema = KeySchema::new(vec![
        FieldSpec::asc("n"),
        FieldSpec::asc("b"),
        FieldSpec::asc("t"),
    ]);
    let key = IndexKey::new(
        vec![
            IndexValue::Null,
            IndexValue::from(vec![0x0A_u8, 0xFF]),
            IndexValue::DateTime(DateTime::EPOCH),
        ],
        oid(1),
    );
    let encoded = schema.encode(&key, LIMIT).expect("encode");
    let dump = schema.render(encoded.as_bytes()).expect("render");

    let texts: Vec<&str> = dump.entries().iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(texts, ["null", "0aff", "1970-01-01T00:00:00.000000000Z"]);
}

#[test]
fn render_of_a_nonexistent_key_is_empty() {
    let schema = age_name_schema();
    let dump = schema.render(&[0x00]).expect("render");

    assert_eq!(dump, KeyDump::default());
    assert!(dump.entries().is_empty());
    assert_eq!(dump.object_id(), None);
    assert_eq!(dump.to_string(), "");
}
