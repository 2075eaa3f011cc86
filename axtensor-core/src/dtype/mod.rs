use std::{
    fmt::{Debug, Display},
    ops::{Add, Div, Mul, Sub},
};

#[cfg(feature = "bfloat")]
use half::bf16;
#[cfg(feature = "half")]
use half::f16;

pub use self::rand::RandDispatch;

mod rand;

pub trait DTypeOps:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Div<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + RandDispatch
{
    /// The larger of `self` and `other`. `self` wins ties and unordered pairs.
    fn max_of(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// The smaller of `self` and `other`. `self` wins ties and unordered pairs.
    fn min_of(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

/// Marker trait for tensor datatypes.
pub trait DType: Debug + Display + Clone + DTypeOps + Send + Sync + 'static {
    const ZERO: Self;
    const ONE: Self;
    const NAME: &'static str;

    fn to_f64(&self) -> f64;
    fn from_f64(x: f64) -> Self;

    /// Offset i by start and step using the formula `i*step + start`, or
    /// `None` if the result (or `i` itself) does not fit in this type.
    fn offset(i: usize, start: Self, step: Self) -> Option<Self>;

    /// Convert a count to this type, or `None` if it is not exactly representable.
    fn from_count(n: usize) -> Option<Self> {
        let v = Self::from_f64(n as f64);
        (v.to_f64() == n as f64).then_some(v)
    }
}

macro_rules! dtype {
    ($rt:ident, $zero:expr, $one:expr, int) => {
        impl DTypeOps for $rt {}
        impl DType for $rt {
            const ZERO: $rt = $zero;
            const ONE: $rt = $one;
            const NAME: &'static str = stringify!($rt);

            fn to_f64(&self) -> f64 {
                *self as f64
            }
            fn from_f64(x: f64) -> Self {
                x as $rt
            }
            fn offset(i: usize, start: Self, step: Self) -> Option<Self> {
                // exact in i128 for every supported integer type
                let v = i128::try_from(i).ok()? * step as i128 + start as i128;
                <$rt>::try_from(v).ok()
            }
        }
    };
    ($rt:ident, $zero:expr, $one:expr, float) => {
        impl DTypeOps for $rt {}
        impl DType for $rt {
            const ZERO: $rt = $zero;
            const ONE: $rt = $one;
            const NAME: &'static str = stringify!($rt);

            fn to_f64(&self) -> f64 {
                *self as f64
            }
            fn from_f64(x: f64) -> Self {
                x as $rt
            }
            fn offset(i: usize, start: Self, step: Self) -> Option<Self> {
                Some(Self::from_count(i)? * step + start)
            }
        }
    };
}

dtype!(u8, 0u8, 1u8, int);
dtype!(u32, 0u32, 1u32, int);
dtype!(i32, 0i32, 1i32, int);
dtype!(i64, 0i64, 1i64, int);
dtype!(f32, 0f32, 1f32, float);
dtype!(f64, 0f64, 1f64, float);

#[cfg(feature = "half")]
impl DTypeOps for f16 {}
#[cfg(feature = "half")]
impl DType for f16 {
    const ZERO: f16 = f16::from_f64_const(0.0);
    const ONE: f16 = f16::from_f64_const(1.0);
    const NAME: &'static str = "f16";

    fn to_f64(&self) -> f64 {
        self.to_f64_const()
    }
    fn from_f64(x: f64) -> Self {
        Self::from_f64_const(x)
    }
    fn offset(i: usize, start: Self, step: Self) -> Option<Self> {
        Some(Self::from_count(i)? * step + start)
    }
}
#[cfg(feature = "bfloat")]
impl DTypeOps for bf16 {}
#[cfg(feature = "bfloat")]
impl DType for bf16 {
    const ZERO: bf16 = bf16::from_f64_const(0.0);
    const ONE: bf16 = bf16::from_f64_const(1.0);
    const NAME: &'static str = "bf16";

    fn to_f64(&self) -> f64 {
        self.to_f64_const()
    }
    fn from_f64(x: f64) -> Self {
        Self::from_f64_const(x)
    }
    fn offset(i: usize, start: Self, step: Self) -> Option<Self> {
        Some(Self::from_count(i)? * step + start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_count_rejects_unrepresentable() {
        assert_eq!(u8::from_count(255), Some(255));
        assert_eq!(u8::from_count(256), None);
        assert_eq!(f32::from_count(5), Some(5.0));
        assert_eq!(f32::from_count((1 << 24) + 1), None);
    }

    #[test]
    fn max_of_prefers_self_on_nan() {
        assert_eq!(1.0f32.max_of(f32::NAN), 1.0);
        assert_eq!(3i32.max_of(7), 7);
        assert_eq!(3i32.min_of(7), 3);
    }

    #[test]
    fn offset_is_affine() {
        assert_eq!(i32::offset(4, 1, 3), Some(13));
        assert_eq!(i64::offset(3, 5, -4), Some(-7));
        assert_eq!(f64::offset(2, 0.5, 0.25), Some(1.0));
    }

    #[test]
    fn offset_rejects_values_outside_the_type() {
        assert_eq!(u8::offset(255, 0, 1), Some(255));
        assert_eq!(u8::offset(256, 0, 1), None);
        assert_eq!(u8::offset(100, 0, 3), None);
        assert_eq!(u32::offset(2, 1, u32::MAX), None);
        assert_eq!(f32::offset((1 << 24) + 1, 0.0, 1.0), None);
    }
}
