//! Module: schema
//! Responsibility: per-index configuration (field list, directions) and the
//! field-source seam the encoder pulls object values through.
//! Does not own: key bytes or ordering.

use crate::{direction::Direction, value::IndexValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// FieldSpec
///
/// One indexed field: its name in the source object and the sort direction
/// declared at index creation.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldSpec {
    name: String,
    direction: Direction,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }

    #[must_use]
    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Asc)
    }

    #[must_use]
    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(name, Direction::Desc)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

///
/// MissingFieldAction
///
/// What the encoder does when the source object has no value for an indexed
/// field. A per-call choice, not part of the schema.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum MissingFieldAction {
    /// Fail the key with a recoverable error.
    #[default]
    Prohibit,
    /// Encode an explicit null.
    Null,
    /// Sort the object before every object with a real value, in visible
    /// order, whatever the field's direction.
    First,
    /// Sort the object after every object with a real value.
    Last,
}

///
/// KeySchema
///
/// The ordered field list one index encodes, compares, and inspects keys
/// through. Fixed at index creation.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct KeySchema {
    fields: Vec<FieldSpec>,
}

impl KeySchema {
    #[must_use]
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FieldSpec> for KeySchema {
    fn from_iter<I: IntoIterator<Item = FieldSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

///
/// FieldSource
///
/// Where the encoder reads field values from. The host object layer
/// implements this over its documents; `None` means the field is absent
/// (as opposed to present-and-null).
///

pub trait FieldSource {
    fn try_get_field(&self, field: &str) -> Option<IndexValue>;
}

///
/// FieldMap
///
/// Map-backed field source for tests, tools, and fixtures.
///

#[derive(Clone, Debug, Default)]
pub struct FieldMap {
    values: BTreeMap<String, IndexValue>,
}

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<IndexValue>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<IndexValue>) {
        self.values.insert(field.into(), value.into());
    }
}

impl FieldSource for FieldMap {
    fn try_get_field(&self, field: &str) -> Option<IndexValue> {
        self.values.get(field).cloned()
    }
}

impl<S: Into<String>, V: Into<IndexValue>> FromIterator<(S, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        }
    }
}
