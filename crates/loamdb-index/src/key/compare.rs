//! Module: key::compare
//! Responsibility: the total order over encoded keys the B-tree relies on,
//! and its typed twin.
//! Does not own: the cross-type rule table; that lives in `value::ordered`.

use crate::{
    bits::BitReader,
    error::KeyDecodeError,
    key::{IndexKey, decode::read_ordered_field},
    schema::KeySchema,
    value::{field_cmp, ordered::cmp_fields},
};
use std::cmp::Ordering;

impl KeySchema {
    /// Compare two encoded keys. Existence markers order first, then each
    /// field under the cross-type rules with the field's direction applied,
    /// then the object ids (ascending, never flipped). No heap allocation
    /// on the common path; text and byte payloads are compared in place.
    pub fn compare(&self, x: &[u8], y: &[u8]) -> Result<Ordering, KeyDecodeError> {
        let mut left = BitReader::new(x);
        let mut right = BitReader::new(y);

        match (left.read_bit()?, right.read_bit()?) {
            (false, false) => return Ok(Ordering::Equal),
            (false, true) => return Ok(Ordering::Less),
            (true, false) => return Ok(Ordering::Greater),
            (true, true) => {}
        }

        for spec in self.fields() {
            let offset = left.current_byte();
            let a = read_ordered_field(&mut left)?;
            let b = read_ordered_field(&mut right)?;

            // one structural side still orders; two cannot be walked past
            if a.is_structural() && b.is_structural() {
                return Err(KeyDecodeError::InvalidTag {
                    tag: a.tag().to_u6(),
                    offset,
                });
            }

            let ord = spec.direction().apply(cmp_fields(&a, &b));
            if ord != Ordering::Equal {
                return Ok(ord);
            }
        }

        let a: [u8; 16] = left.read_array()?;
        let b: [u8; 16] = right.read_array()?;

        Ok(a.cmp(&b))
    }

    /// Typed twin of [`Self::compare`]: same ordering over decoded keys,
    /// minus the corruption cases.
    #[must_use]
    pub fn compare_keys(&self, x: &IndexKey, y: &IndexKey) -> Ordering {
        match (x.exists(), y.exists()) {
            (false, false) => return Ordering::Equal,
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            (true, true) => {}
        }
        debug_assert_eq!(
            x.fields().len(),
            self.len(),
            "typed key field count must match the schema"
        );
        debug_assert_eq!(
            y.fields().len(),
            self.len(),
            "typed key field count must match the schema"
        );

        for ((spec, a), b) in self.fields().iter().zip(x.fields()).zip(y.fields()) {
            let ord = spec.direction().apply(field_cmp(a, b));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        x.object_id().cmp(&y.object_id())
    }
}
