//! Module: key::order
//! Responsibility: whether this index's declared sort order can satisfy, or
//! exactly reverse, a requested sort order.
//! Does not own: predicate analysis; callers name the constant fields.

use crate::{direction::Direction, schema::KeySchema};
use serde::{Deserialize, Serialize};

///
/// OrderBy
///
/// One term of a requested sort order: field name plus wanted direction.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderBy {
    field: String,
    direction: Direction,
}

impl OrderBy {
    #[must_use]
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

impl KeySchema {
    /// True when this index's order satisfies `requested` as-is. Schema
    /// fields named in `constant_fields` (held to one value by an equality
    /// predicate) may be skipped during the walk; the requested order may
    /// be a prefix of the schema order; an empty request trivially matches.
    #[must_use]
    pub fn same_sort_order(&self, constant_fields: &[&str], requested: &[OrderBy]) -> bool {
        self.order_matches(constant_fields, requested, false)
    }

    /// True when walking this index backwards satisfies `requested`: the
    /// same lock-step walk, but every compared field's direction must be
    /// the exact opposite.
    #[must_use]
    pub fn reverse_sort_order(&self, constant_fields: &[&str], requested: &[OrderBy]) -> bool {
        self.order_matches(constant_fields, requested, true)
    }

    fn order_matches(
        &self,
        constant_fields: &[&str],
        requested: &[OrderBy],
        reversed: bool,
    ) -> bool {
        let mut wanted = requested.iter();
        let mut next = wanted.next();

        for spec in self.fields() {
            let Some(req) = next else {
                // requested order exhausted; it is a prefix of the index order
                return true;
            };

            if req.field() == spec.name() {
                let want = if reversed {
                    spec.direction().reversed()
                } else {
                    spec.direction()
                };
                if req.direction() != want {
                    return false;
                }
                next = wanted.next();
            } else if !constant_fields.contains(&spec.name()) {
                return false;
            }
        }

        // leftover requested fields are not part of this index
        next.is_none()
    }
}
