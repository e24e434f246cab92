use derive_more::{Display, FromStr};
use rust_decimal::{
    Decimal as WrappedDecimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Serialize};

///
/// Decimal
///
/// 128-bit fixed-point decimal field value. Equality and ordering are value
/// based (`1.5 == 1.50`); the canonical byte form preserves scale so
/// encoding stays deterministic for a given stored value.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq,
    PartialOrd, Serialize,
)]
#[repr(transparent)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    pub const STORED_SIZE: usize = 16;

    pub const ZERO: Self = Self(WrappedDecimal::ZERO);

    #[must_use]
    pub const fn new(inner: WrappedDecimal) -> Self {
        Self(inner)
    }

    #[must_use]
    pub const fn get(self) -> WrappedDecimal {
        self.0
    }

    /// The crate-internal 16-byte layout of `rust_decimal`, used verbatim as
    /// the wire payload.
    #[must_use]
    pub fn to_canonical_bytes(self) -> [u8; 16] {
        self.0.serialize()
    }

    #[must_use]
    pub fn from_canonical_bytes(bytes: [u8; 16]) -> Self {
        Self(WrappedDecimal::deserialize(bytes))
    }

    #[must_use]
    pub fn from_f32(value: f32) -> Option<Self> {
        WrappedDecimal::from_f32(value).map(Self)
    }

    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        WrappedDecimal::from_f64(value).map(Self)
    }

    /// Nearest f64, for comparisons that had to leave the decimal domain.
    #[must_use]
    pub fn to_f64_lossy(self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self(WrappedDecimal::from(value))
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self(WrappedDecimal::from(value))
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self(WrappedDecimal::from(value))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_scale_bytes_do_not() {
        let short: Decimal = "1.5".parse().expect("parse");
        let long: Decimal = "1.50".parse().expect("parse");
        assert_eq!(short, long);
        assert_ne!(short.to_canonical_bytes(), long.to_canonical_bytes());
    }

    #[test]
    fn canonical_bytes_round_trip() {
        let value: Decimal = "-123456.789".parse().expect("parse");
        assert_eq!(Decimal::from_canonical_bytes(value.to_canonical_bytes()), value);
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert!(Decimal::from_f64(f64::NAN).is_none());
        assert!(Decimal::from_f64(f64::INFINITY).is_none());
        assert_eq!(Decimal::from_f64(2.5), "2.5".parse().ok());
    }

    #[test]
    fn display_uses_a_plain_decimal_point() {
        let value: Decimal = "10.25".parse().expect("parse");
        assert_eq!(value.to_string(), "10.25");
    }
}
