//! Module: value::ordered
//! Responsibility: the widened domain every field comparison runs in, and
//! the cross-type rule table that makes it total.
//! Does not own: wire decoding, direction handling, or the object-id
//! tie-break (those live in `key`).

use crate::{
    types::{DateTime, DateTimeOffset, Decimal, Duration, Float32, Float64, ObjectId},
    value::{IndexValue, TypeTag},
};
use std::{cmp::Ordering, fmt::Write as _};

///
/// OrderedField
///
/// One key field lifted into the comparison domain. The original wire tag
/// rides along because the widened value alone no longer knows its stored
/// width or how to render itself (an `int8` and an `int64` both widen to
/// [`OrderedValue::Signed`]).
///

#[derive(Clone, Debug)]
pub(crate) struct OrderedField<'a> {
    tag: TypeTag,
    value: OrderedValue<'a>,
}

///
/// OrderedValue
///
/// The widened comparison form of a field value. Integer kinds collapse to
/// `Signed`/`Unsigned`, both timestamp kinds normalize to a UTC `Instant`,
/// and text borrows straight from its source so the common comparison path
/// never allocates.
///

#[derive(Clone, Debug)]
pub(crate) enum OrderedValue<'a> {
    Min,
    Null,
    Signed(i64),
    Unsigned(u64),
    Single(Float32),
    Double(Float64),
    Decimal(Decimal),
    Text(&'a str),
    TextCi(&'a str),
    Bytes(&'a [u8]),
    Instant { nanos: i64, offset_minutes: i16 },
    Span(i64),
    Id(u128),
    Max,
    Structural,
}

impl<'a> OrderedField<'a> {
    pub(crate) const fn new(tag: TypeTag, value: OrderedValue<'a>) -> Self {
        Self { tag, value }
    }

    #[must_use]
    pub(crate) fn from_value(value: &'a IndexValue) -> Self {
        let tag = value.type_tag();
        let value = match value {
            IndexValue::Min => OrderedValue::Min,
            IndexValue::Null => OrderedValue::Null,
            IndexValue::Bool(v) => OrderedValue::Unsigned(u64::from(*v)),
            IndexValue::Int8(v) => OrderedValue::Signed(i64::from(*v)),
            IndexValue::Int16(v) => OrderedValue::Signed(i64::from(*v)),
            IndexValue::Int32(v) => OrderedValue::Signed(i64::from(*v)),
            IndexValue::Int64(v) => OrderedValue::Signed(*v),
            IndexValue::UInt8(v) => OrderedValue::Unsigned(u64::from(*v)),
            IndexValue::UInt16(v) => OrderedValue::Unsigned(u64::from(*v)),
            IndexValue::UInt32(v) => OrderedValue::Unsigned(u64::from(*v)),
            IndexValue::UInt64(v) => OrderedValue::Unsigned(*v),
            IndexValue::Single(v) => OrderedValue::Single(*v),
            IndexValue::Double(v) => OrderedValue::Double(*v),
            IndexValue::Decimal(v) => OrderedValue::Decimal(*v),
            IndexValue::Char(v) => OrderedValue::Unsigned(u64::from(u32::from(*v))),
            IndexValue::String(v) | IndexValue::EnumLabel(v) => OrderedValue::Text(v),
            IndexValue::StringIgnoreCase(v) => OrderedValue::TextCi(v),
            IndexValue::Bytes(v) => OrderedValue::Bytes(v),
            IndexValue::DateTime(v) => OrderedValue::Instant {
                nanos: v.as_unix_nanos(),
                offset_minutes: 0,
            },
            IndexValue::DateTimeOffset(v) => OrderedValue::Instant {
                nanos: v.instant().as_unix_nanos(),
                offset_minutes: v.offset_minutes(),
            },
            IndexValue::Duration(v) => OrderedValue::Span(v.as_nanos()),
            IndexValue::ObjectId(v) => OrderedValue::Id(v.to_u128()),
            IndexValue::Array(_) | IndexValue::Object(_) => OrderedValue::Structural,
            IndexValue::Max => OrderedValue::Max,
        };

        Self { tag, value }
    }

    pub(crate) const fn tag(&self) -> TypeTag {
        self.tag
    }

    pub(crate) const fn is_structural(&self) -> bool {
        matches!(self.value, OrderedValue::Structural)
    }

    const fn folds(&self) -> bool {
        matches!(self.value, OrderedValue::TextCi(_))
    }

    /// Textual form used when this field meets a string-kind field.
    /// Must agree with [`IndexValue::to_text`] so the typed and raw
    /// comparison paths order identically.
    fn to_text(&self) -> String {
        match (self.tag, &self.value) {
            (TypeTag::Bool, OrderedValue::Unsigned(v)) => (*v != 0).to_string(),
            (TypeTag::Char, OrderedValue::Unsigned(v)) => {
                u32::try_from(*v)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
                    .to_string()
            }
            (
                TypeTag::DateTimeOffset,
                OrderedValue::Instant {
                    nanos,
                    offset_minutes,
                },
            ) => DateTimeOffset::new(DateTime::from_unix_nanos(*nanos), *offset_minutes).to_string(),
            (_, OrderedValue::Instant { nanos, .. }) => {
                DateTime::from_unix_nanos(*nanos).to_string()
            }
            (_, OrderedValue::Signed(v)) => v.to_string(),
            (_, OrderedValue::Unsigned(v)) => v.to_string(),
            (_, OrderedValue::Single(v)) => v.to_string(),
            (_, OrderedValue::Double(v)) => v.to_string(),
            (_, OrderedValue::Decimal(v)) => v.to_string(),
            (_, OrderedValue::Text(v) | OrderedValue::TextCi(v)) => (*v).to_string(),
            (_, OrderedValue::Bytes(v)) => {
                let mut out = String::with_capacity(v.len() * 2);
                for byte in *v {
                    let _ = write!(out, "{byte:02x}");
                }
                out
            }
            (_, OrderedValue::Span(v)) => Duration::from_nanos(*v).to_string(),
            (_, OrderedValue::Id(v)) => ObjectId::from_u128(*v).to_string(),
            (_, OrderedValue::Min) => "MIN".to_string(),
            (_, OrderedValue::Null) => "null".to_string(),
            (_, OrderedValue::Max) => "MAX".to_string(),
            (_, OrderedValue::Structural) => format!("[{}]", self.tag.label()),
        }
    }
}

impl OrderedValue<'_> {
    const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_) | Self::TextCi(_))
    }

    const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Signed(_) | Self::Unsigned(_) | Self::Single(_) | Self::Double(_) | Self::Decimal(_)
        )
    }

    // Rank used only for cross-kind pairs no documented rule covers, so
    // those pairs still order deterministically.
    const fn class_rank(&self) -> u8 {
        match self {
            Self::Min => 0,
            Self::Null => 1,
            Self::Signed(_)
            | Self::Unsigned(_)
            | Self::Single(_)
            | Self::Double(_)
            | Self::Decimal(_) => 2,
            Self::Instant { .. } => 3,
            Self::Span(_) => 4,
            Self::Id(_) => 5,
            Self::Text(_) | Self::TextCi(_) => 6,
            Self::Bytes(_) => 7,
            Self::Max => 8,
            Self::Structural => 9,
        }
    }
}

///
/// field_cmp
///
/// Compare two field values under the index ordering rules. This is the
/// typed entry into the rule table; the raw-key comparator reaches the same
/// table through [`OrderedField`] without materializing `IndexValue`s.
///

#[must_use]
pub fn field_cmp(left: &IndexValue, right: &IndexValue) -> Ordering {
    cmp_fields(
        &OrderedField::from_value(left),
        &OrderedField::from_value(right),
    )
}

/// Total order over lifted fields. Sentinels first, then the cross-type
/// rules, so `MIN < NULL < values < MAX < structural`.
pub(crate) fn cmp_fields(left: &OrderedField<'_>, right: &OrderedField<'_>) -> Ordering {
    match (&left.value, &right.value) {
        // Structural data cannot legally appear in a key; when it does
        // (corrupt bytes) it sorts as its own class above MAX so scans
        // shove it to one end instead of interleaving it.
        (OrderedValue::Structural, OrderedValue::Structural) => Ordering::Equal,
        (OrderedValue::Structural, _) => Ordering::Greater,
        (_, OrderedValue::Structural) => Ordering::Less,

        (OrderedValue::Min, OrderedValue::Min)
        | (OrderedValue::Max, OrderedValue::Max)
        | (OrderedValue::Null, OrderedValue::Null) => Ordering::Equal,
        (OrderedValue::Min, _) => Ordering::Less,
        (_, OrderedValue::Min) => Ordering::Greater,
        (OrderedValue::Max, _) => Ordering::Greater,
        (_, OrderedValue::Max) => Ordering::Less,
        (OrderedValue::Null, _) => Ordering::Less,
        (_, OrderedValue::Null) => Ordering::Greater,

        _ => cmp_plain(left, right),
    }
}

/// Rule table for two non-sentinel values.
fn cmp_plain(left: &OrderedField<'_>, right: &OrderedField<'_>) -> Ordering {
    match (&left.value, &right.value) {
        // A string-kind side pulls the other side into text. One-way rule:
        // the non-string side converts, never the reverse.
        (
            OrderedValue::Text(a) | OrderedValue::TextCi(a),
            OrderedValue::Text(b) | OrderedValue::TextCi(b),
        ) => cmp_text(a, b, left.folds() || right.folds()),
        (OrderedValue::Text(a) | OrderedValue::TextCi(a), _) => {
            cmp_text(a, &right.to_text(), left.folds())
        }
        (_, OrderedValue::Text(b) | OrderedValue::TextCi(b)) => {
            cmp_text(&left.to_text(), b, right.folds())
        }

        // A byte-sequence side compares against the other side's stored
        // payload bytes, bytewise with length as the last discriminator.
        (OrderedValue::Bytes(a), OrderedValue::Bytes(b)) => a.cmp(b),
        (OrderedValue::Bytes(a), _) => (*a).cmp(ScalarBytes::of(right).as_slice()),
        (_, OrderedValue::Bytes(b)) => ScalarBytes::of(left).as_slice().cmp(*b),

        (OrderedValue::Instant { nanos: a, .. }, OrderedValue::Instant { nanos: b, .. }) => {
            a.cmp(b)
        }
        (OrderedValue::Span(a), OrderedValue::Span(b)) => a.cmp(b),
        (OrderedValue::Id(a), OrderedValue::Id(b)) => a.cmp(b),

        (a, b) if a.is_numeric() && b.is_numeric() => cmp_numeric(a, b),

        // Mixed pairs with no documented rule (a timestamp against a
        // duration, a number against an id) fall back to class rank.
        (a, b) => a.class_rank().cmp(&b.class_rank()),
    }
}

/// Numeric tower. Any decimal side lifts both into decimal; any float side
/// lifts both into `f64` under IEEE total order; pure integers compare in
/// a signed/unsigned-aware way without widening past 64 bits.
fn cmp_numeric(left: &OrderedValue<'_>, right: &OrderedValue<'_>) -> Ordering {
    let float = |v: &OrderedValue<'_>| matches!(v, OrderedValue::Single(_) | OrderedValue::Double(_));

    if matches!(left, OrderedValue::Decimal(_)) || matches!(right, OrderedValue::Decimal(_)) {
        return match (to_decimal(left), to_decimal(right)) {
            (Some(a), Some(b)) => a.cmp(&b),
            // a NaN or infinity has no decimal form; fall back to floats
            _ => to_f64(left).total_cmp(&to_f64(right)),
        };
    }
    if float(left) || float(right) {
        return to_f64(left).total_cmp(&to_f64(right));
    }

    match (left, right) {
        (OrderedValue::Signed(a), OrderedValue::Signed(b)) => a.cmp(b),
        (OrderedValue::Unsigned(a), OrderedValue::Unsigned(b)) => a.cmp(b),
        (OrderedValue::Signed(a), OrderedValue::Unsigned(b)) => {
            if *a < 0 {
                Ordering::Less
            } else {
                a.cast_unsigned().cmp(b)
            }
        }
        (OrderedValue::Unsigned(a), OrderedValue::Signed(b)) => {
            if *b < 0 {
                Ordering::Greater
            } else {
                a.cmp(&b.cast_unsigned())
            }
        }
        _ => Ordering::Equal,
    }
}

fn to_decimal(value: &OrderedValue<'_>) -> Option<Decimal> {
    match value {
        OrderedValue::Signed(v) => Some(Decimal::from(*v)),
        OrderedValue::Unsigned(v) => Some(Decimal::from(*v)),
        OrderedValue::Single(v) => Decimal::from_f32(v.get()),
        OrderedValue::Double(v) => Decimal::from_f64(v.get()),
        OrderedValue::Decimal(v) => Some(*v),
        _ => None,
    }
}

#[expect(clippy::cast_precision_loss)]
fn to_f64(value: &OrderedValue<'_>) -> f64 {
    match value {
        OrderedValue::Signed(v) => *v as f64,
        OrderedValue::Unsigned(v) => *v as f64,
        OrderedValue::Single(v) => f64::from(v.get()),
        OrderedValue::Double(v) => v.get(),
        OrderedValue::Decimal(v) => v.to_f64_lossy(),
        _ => 0.0,
    }
}

fn cmp_text(a: &str, b: &str, fold: bool) -> Ordering {
    if fold { cmp_text_folded(a, b) } else { a.cmp(b) }
}

/// Case-insensitive text order without allocating. ASCII gets the byte
/// fast path; anything else folds through `char::to_lowercase`, which can
/// expand one char into several and still streams.
fn cmp_text_folded(a: &str, b: &str) -> Ordering {
    if a.is_ascii() && b.is_ascii() {
        let fold_a = a.bytes().map(|v| v.to_ascii_lowercase());
        let fold_b = b.bytes().map(|v| v.to_ascii_lowercase());

        return fold_a.cmp(fold_b);
    }

    let fold_a = a.chars().flat_map(char::to_lowercase);
    let fold_b = b.chars().flat_map(char::to_lowercase);

    fold_a.cmp(fold_b)
}

///
/// ScalarBytes
///
/// The stored payload bytes of a fixed-width scalar, rebuilt on the stack
/// for the byte-sequence rule. Both timestamp kinds contribute their
/// normalized 8-byte UTC instant, matching how they order against each
/// other.
///

struct ScalarBytes {
    buf: [u8; 16],
    len: usize,
}

impl ScalarBytes {
    // Widened values re-narrow losslessly here; construction guarantees
    // each fits its original tag's width.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn of(field: &OrderedField<'_>) -> Self {
        match (field.tag, &field.value) {
            (TypeTag::Bool, OrderedValue::Unsigned(v)) => Self::from_slice(&[u8::from(*v != 0)]),
            (TypeTag::Int8, OrderedValue::Signed(v)) => Self::from_slice(&(*v as i8).to_be_bytes()),
            (TypeTag::UInt8, OrderedValue::Unsigned(v)) => {
                Self::from_slice(&(*v as u8).to_be_bytes())
            }
            (TypeTag::Int16, OrderedValue::Signed(v)) => {
                Self::from_slice(&(*v as i16).to_be_bytes())
            }
            (TypeTag::UInt16 | TypeTag::Char, OrderedValue::Unsigned(v)) => {
                Self::from_slice(&(*v as u16).to_be_bytes())
            }
            (TypeTag::Int32, OrderedValue::Signed(v)) => {
                Self::from_slice(&(*v as i32).to_be_bytes())
            }
            (TypeTag::UInt32, OrderedValue::Unsigned(v)) => {
                Self::from_slice(&(*v as u32).to_be_bytes())
            }
            (TypeTag::Int64, OrderedValue::Signed(v)) => Self::from_slice(&v.to_be_bytes()),
            (TypeTag::UInt64, OrderedValue::Unsigned(v)) => Self::from_slice(&v.to_be_bytes()),
            (TypeTag::Single, OrderedValue::Single(v)) => Self::from_slice(&v.to_be_bytes()),
            (TypeTag::Double, OrderedValue::Double(v)) => Self::from_slice(&v.to_be_bytes()),
            (TypeTag::Decimal, OrderedValue::Decimal(v)) => {
                Self::from_slice(&v.to_canonical_bytes())
            }
            (
                TypeTag::DateTime | TypeTag::DateTimeOffset,
                OrderedValue::Instant { nanos, .. },
            ) => Self::from_slice(&nanos.to_be_bytes()),
            (TypeTag::Duration, OrderedValue::Span(v)) => Self::from_slice(&v.to_be_bytes()),
            (TypeTag::ObjectId, OrderedValue::Id(v)) => Self::from_slice(&v.to_be_bytes()),
            _ => Self { buf: [0; 16], len: 0 },
        }
    }

    fn from_slice(bytes: &[u8]) -> Self {
        let mut buf = [0; 16];
        buf[..bytes.len()].copy_from_slice(bytes);

        Self {
            buf,
            len: bytes.len(),
        }
    }

    fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}
