//! Module: key::bounds
//! Responsibility: scan bounds — the raw key pair bracketing every key that
//! shares a field prefix.
//! Does not own: the scan; the store's range layer consumes these.

use crate::{
    direction::Direction,
    error::KeyEncodeError,
    key::{IndexKey, RawIndexKey},
    schema::KeySchema,
    types::ObjectId,
    value::IndexValue,
};

///
/// KeyRange
///
/// Inclusive lower and upper raw keys for one prefix scan, in comparator
/// order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyRange {
    lower: RawIndexKey,
    upper: RawIndexKey,
}

impl KeyRange {
    #[must_use]
    pub const fn lower(&self) -> &RawIndexKey {
        &self.lower
    }

    #[must_use]
    pub const fn upper(&self) -> &RawIndexKey {
        &self.upper
    }

    #[must_use]
    pub fn into_parts(self) -> (RawIndexKey, RawIndexKey) {
        (self.lower, self.upper)
    }
}

impl KeySchema {
    /// Build the inclusive key pair bracketing every key whose leading
    /// fields equal `prefix`. The remaining fields pad with the sentinel
    /// that lands first/last in visible order (direction-aware, exactly
    /// like the missing-field policy), and the object id pads with its
    /// extremes.
    pub fn prefix_bounds(
        &self,
        prefix: &[IndexValue],
        key_size_limit: usize,
    ) -> Result<KeyRange, KeyEncodeError> {
        debug_assert!(prefix.len() <= self.len(), "prefix longer than the schema");

        let mut lower_fields = Vec::with_capacity(self.len());
        let mut upper_fields = Vec::with_capacity(self.len());

        for (i, spec) in self.fields().iter().enumerate() {
            match prefix.get(i) {
                Some(value) => {
                    lower_fields.push(value.clone());
                    upper_fields.push(value.clone());
                }
                None => {
                    let (first, last) = match spec.direction() {
                        Direction::Asc => (IndexValue::Min, IndexValue::Max),
                        Direction::Desc => (IndexValue::Max, IndexValue::Min),
                    };
                    lower_fields.push(first);
                    upper_fields.push(last);
                }
            }
        }

        let lower = self.encode(&IndexKey::new(lower_fields, ObjectId::MIN), key_size_limit)?;
        let upper = self.encode(&IndexKey::new(upper_fields, ObjectId::MAX), key_size_limit)?;

        Ok(KeyRange { lower, upper })
    }
}
