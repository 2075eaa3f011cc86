// Optional half-precision types
#[cfg(feature = "bfloat")]
use half::bf16;
#[cfg(feature = "half")]
use half::f16;

use ::rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{Error, Result};

/// Dispatch random fills based on the data type.
pub trait RandDispatch {
    /// Fill the slice with uniform random values in `[0, 1)`.
    fn fill_with_uniform<R: Rng + ?Sized>(rng: &mut R, slice: &mut [Self]) -> Result<()>
    where
        Self: Sized;

    /// Fill the slice with normal (Gaussian) random values.
    fn fill_with_normal<R: Rng + ?Sized>(
        rng: &mut R,
        slice: &mut [Self],
        mean: f64,
        std: f64,
    ) -> Result<()>
    where
        Self: Sized;
}

macro_rules! rand_float {
    ($t:ty) => {
        impl RandDispatch for $t {
            fn fill_with_uniform<R: Rng + ?Sized>(rng: &mut R, slice: &mut [Self]) -> Result<()> {
                slice.iter_mut().for_each(|x| *x = rng.random::<$t>());
                Ok(())
            }
            fn fill_with_normal<R: Rng + ?Sized>(
                rng: &mut R,
                slice: &mut [Self],
                mean: f64,
                std: f64,
            ) -> Result<()> {
                let normal = Normal::new(mean as $t, std as $t).map_err(Error::wrap)?;
                slice.iter_mut().for_each(|x| *x = normal.sample(&mut *rng));
                Ok(())
            }
        }
    };
}

rand_float!(f32);
rand_float!(f64);

// Half types sample in f32 and round.
macro_rules! rand_half {
    ($t:ty) => {
        impl RandDispatch for $t {
            fn fill_with_uniform<R: Rng + ?Sized>(rng: &mut R, slice: &mut [Self]) -> Result<()> {
                slice
                    .iter_mut()
                    .for_each(|x| *x = <$t>::from_f32(rng.random::<f32>()));
                Ok(())
            }
            fn fill_with_normal<R: Rng + ?Sized>(
                rng: &mut R,
                slice: &mut [Self],
                mean: f64,
                std: f64,
            ) -> Result<()> {
                let normal = Normal::new(mean as f32, std as f32).map_err(Error::wrap)?;
                slice
                    .iter_mut()
                    .for_each(|x| *x = <$t>::from_f32(normal.sample(&mut *rng)));
                Ok(())
            }
        }
    };
}

#[cfg(feature = "half")]
rand_half!(f16);
#[cfg(feature = "bfloat")]
rand_half!(bf16);

// All integral types: unsupported
macro_rules! rand_unsupported {
    ($t:ty) => {
        impl RandDispatch for $t {
            fn fill_with_uniform<R: Rng + ?Sized>(_rng: &mut R, _slice: &mut [Self]) -> Result<()> {
                crate::bail!(
                    "Uniform random fill is not supported for dtype {}",
                    stringify!($t)
                )
            }
            fn fill_with_normal<R: Rng + ?Sized>(
                _rng: &mut R,
                _slice: &mut [Self],
                _mean: f64,
                _std: f64,
            ) -> Result<()> {
                crate::bail!(
                    "Normal random fill is not supported for dtype {}",
                    stringify!($t)
                )
            }
        }
    };
}

rand_unsupported!(u8);
rand_unsupported!(u32);
rand_unsupported!(i32);
rand_unsupported!(i64);
