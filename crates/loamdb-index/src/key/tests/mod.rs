mod codec;
mod inspect;

use crate::{
    direction::Direction,
    key::RawIndexKey,
    schema::{FieldMap, FieldSpec, KeySchema, MissingFieldAction},
    types::ObjectId,
};
use std::cmp::Ordering;

const LIMIT: usize = 1024;

/// The worked example used throughout: people indexed by ascending age,
/// then descending name.
fn age_name_schema() -> KeySchema {
    KeySchema::new(vec![FieldSpec::asc("age"), FieldSpec::desc("name")])
}

fn one_field(direction: Direction) -> KeySchema {
    KeySchema::new(vec![FieldSpec::new("v", direction)])
}

fn person(age: i32, name: &str) -> FieldMap {
    FieldMap::new().with("age", age).with("name", name)
}

fn oid(n: u128) -> ObjectId {
    ObjectId::from_u128(n)
}

fn person_key(schema: &KeySchema, age: i32, name: &str, id: u128) -> RawIndexKey {
    schema
        .serialize(oid(id), &person(age, name), MissingFieldAction::Prohibit, LIMIT)
        .expect("person key encodes")
}

fn cmp_bytes(schema: &KeySchema, x: &RawIndexKey, y: &RawIndexKey) -> Ordering {
    schema.compare(x.as_bytes(), y.as_bytes()).expect("compare")
}
