use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

///
/// Float32 / Float64
///
/// IEEE-754 field values. Any bit pattern a stored object carries is
/// accepted, so equality is bitwise and ordering is the IEEE-754 total
/// order (`total_cmp`): negative NaN below everything, positive NaN above,
/// -0.0 strictly below 0.0. Deterministic for the comparator and consistent
/// with the bitwise wire payload.
///

macro_rules! float_wrapper {
    ($name:ident, $float:ty, $bits:ty, $size:literal) => {
        #[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
        #[repr(transparent)]
        pub struct $name($float);

        impl $name {
            pub const STORED_SIZE: usize = $size;

            #[must_use]
            pub const fn new(value: $float) -> Self {
                Self(value)
            }

            #[must_use]
            pub const fn get(self) -> $float {
                self.0
            }

            #[must_use]
            pub const fn to_be_bytes(self) -> [u8; $size] {
                self.0.to_bits().to_be_bytes()
            }

            #[must_use]
            pub const fn from_be_bytes(bytes: [u8; $size]) -> Self {
                Self(<$float>::from_bits(<$bits>::from_be_bytes(bytes)))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Eq for $name {}

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0.to_bits() == other.0.to_bits()
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                state.write(&self.to_be_bytes());
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl From<$float> for $name {
            fn from(value: $float) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $float {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

float_wrapper!(Float32, f32, u32, 4);
float_wrapper!(Float64, f64, u64, 8);

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_order_places_nan_by_sign() {
        let neg_nan = Float64::new(f64::from_bits(0xFFF8_0000_0000_0000));
        let pos_nan = Float64::new(f64::NAN);
        assert!(neg_nan < Float64::new(f64::NEG_INFINITY));
        assert!(pos_nan > Float64::new(f64::INFINITY));
    }

    #[test]
    fn negative_zero_sorts_below_positive_zero() {
        assert!(Float64::new(-0.0) < Float64::new(0.0));
        assert_ne!(Float64::new(-0.0), Float64::new(0.0));
    }

    #[test]
    fn byte_round_trip_preserves_bits() {
        for value in [0.0f64, -1.5, f64::NAN, f64::MIN_POSITIVE] {
            let wrapped = Float64::new(value);
            assert_eq!(Float64::from_be_bytes(wrapped.to_be_bytes()), wrapped);
        }
    }

    #[test]
    fn float32_round_trip_preserves_bits() {
        let wrapped = Float32::new(-3.25);
        assert_eq!(Float32::from_be_bytes(wrapped.to_be_bytes()), wrapped);
    }
}
