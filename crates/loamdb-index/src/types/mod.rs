//! Module: types
//! Responsibility: the domain wrapper types index keys are built from.
//! Does not own: tag assignment or wire layout; the key codec owns those.
//! Boundary: each wrapper is the single authority for its canonical byte
//! form and its locale-independent text form.

mod decimal;
mod float;
mod object_id;
mod temporal;

pub use decimal::Decimal;
pub use float::{Float32, Float64};
pub use object_id::{ObjectId, ObjectIdDecodeError};
pub use temporal::{DateTime, DateTimeOffset, Duration};
