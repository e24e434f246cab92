//! Index-key subsystem for LoamDB: the codec that turns an object's indexed
//! field values into one self-delimiting byte string, the total order the
//! store's B-tree applies to those byte strings, and the inspection and
//! sort-order primitives built on top. Ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod bits;
pub mod direction;
pub mod error;
pub mod key;
pub mod schema;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, cursors, or encoding helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        direction::Direction,
        key::{IndexKey, OrderBy, RawIndexKey},
        schema::{FieldSource, FieldSpec, KeySchema, MissingFieldAction},
        types::ObjectId,
        value::IndexValue,
    };
}
