mod arith;
mod display;
mod reduce;
mod repeat;
mod transform;

pub use arith::BinaryOpType;
pub use reduce::Seed;

use rand::Rng;

use crate::{shape::Layout, Context, DType, Error, Result};

/// A dense n dimensional array with contiguous, outermost-first storage.
///
/// The tensor owns its storage; `clone` is a deep copy. Operations that take
/// an `axis` count it from the right (0 is the contiguous axis). Only
/// functions which validate shapes, coordinates or axes return `Result`s.
#[derive(Clone, PartialEq)]
pub struct Tensor<T: DType> {
    layout: Layout,
    data: Vec<T>,
}

impl<T: DType> Tensor<T> {
    /// Create a tensor filled with some value.
    pub fn full(dims: &[usize], v: T) -> Result<Self> {
        let layout = Layout::new(dims)?;
        let data = vec![v; layout.element_count()];
        Ok(Self { layout, data })
    }

    /// Create a tensor filled with zeros.
    pub fn zeros(dims: &[usize]) -> Result<Self> {
        Self::full(dims, T::ZERO)
    }

    /// Create a tensor filled with ones.
    pub fn ones(dims: &[usize]) -> Result<Self> {
        Self::full(dims, T::ONE)
    }

    /// Wrap existing storage. `data.len()` must equal the product of `dims`.
    pub fn from_vec(dims: &[usize], data: Vec<T>) -> Result<Self> {
        let layout = Layout::new(dims)?;
        if data.len() != layout.element_count() {
            return Err(Error::shape(
                "from_vec",
                &[layout.element_count()],
                &[data.len()],
            ));
        }
        Ok(Self { layout, data })
    }

    /// Create a tensor whose element at flat location `i` is `i*step + start`.
    ///
    /// Fails if some element of the sequence is not representable in `T`.
    pub fn arange(dims: &[usize], start: T, step: T) -> Result<Self> {
        let mut t = Self::zeros(dims)?;
        t.fill_arange(start, step)?;
        Ok(t)
    }

    /// Create a tensor with uniform random values in `[0, 1)`.
    pub fn rand<R: Rng + ?Sized>(dims: &[usize], rng: &mut R) -> Result<Self> {
        let mut t = Self::zeros(dims)?;
        T::fill_with_uniform(rng, &mut t.data)?;
        Ok(t)
    }

    /// Create a tensor with normally distributed random values.
    pub fn randn<R: Rng + ?Sized>(dims: &[usize], mean: f64, std: f64, rng: &mut R) -> Result<Self> {
        let mut t = Self::zeros(dims)?;
        T::fill_with_normal(rng, &mut t.data, mean, std)?;
        Ok(t)
    }

    pub(crate) fn from_parts(layout: Layout, data: Vec<T>) -> Self {
        debug_assert_eq!(layout.element_count(), data.len());
        Self { layout, data }
    }

    /// Overwrite storage with `0, 1, 2, ...` in flat order.
    ///
    /// Fails without touching storage if the count does not fit in `T`.
    pub fn fill_sequence(&mut self) -> Result<&mut Self> {
        self.fill_arange(T::ZERO, T::ONE)
    }

    fn fill_arange(&mut self, start: T, step: T) -> Result<&mut Self> {
        let data = (0..self.data.len())
            .map(|i| {
                T::offset(i, start, step).with_context(|| {
                    format!("sequence element {i} does not fit in {}", T::NAME)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.data = data;
        Ok(self)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Axis sizes, outermost first.
    pub fn dims(&self) -> &[usize] {
        self.layout.dims()
    }

    /// Strides, outermost first.
    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    pub fn element_count(&self) -> usize {
        self.layout.element_count()
    }

    /// Flat storage.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable flat storage. The length is fixed by the shape.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn location(&self, coord: &[usize]) -> Result<usize> {
        self.layout.location(coord)
    }

    pub fn coordinate(&self, location: usize) -> Result<Vec<usize>> {
        self.layout.coordinate(location)
    }

    pub fn plane(&self, axis: usize, k: usize) -> Result<Vec<usize>> {
        self.layout.plane(axis, k)
    }

    /// Element at `coord` (storage order).
    pub fn get(&self, coord: &[usize]) -> Result<T> {
        Ok(self.data[self.layout.location(coord)?])
    }

    pub fn get_mut(&mut self, coord: &[usize]) -> Result<&mut T> {
        let loc = self.layout.location(coord)?;
        Ok(&mut self.data[loc])
    }

    pub fn set(&mut self, coord: &[usize], v: T) -> Result<()> {
        *self.get_mut(coord)? = v;
        Ok(())
    }

    /// Cast this tensor to a different dtype `U`.
    ///
    /// Values pass through `f64` with `as` semantics: floats truncate toward
    /// zero and saturate at the bounds of an integer `U` (`300.0` becomes
    /// `255u8`, NaN becomes 0), and integers above 2^53 lose precision. Use
    /// [`Tensor::try_cast`] when every value must survive unchanged.
    pub fn cast<U: DType>(&self) -> Tensor<U> {
        Tensor {
            layout: self.layout.clone(),
            data: self.data.iter().map(|x| U::from_f64(x.to_f64())).collect(),
        }
    }

    /// Cast to `U`, failing if any element does not convert back to itself.
    ///
    /// NaN casts between float types are accepted.
    pub fn try_cast<U: DType>(&self) -> Result<Tensor<U>> {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let u = U::from_f64(x.to_f64());
                let back = T::from_f64(u.to_f64());
                let both_nan = x.partial_cmp(&x).is_none() && u.partial_cmp(&u).is_none();
                if back == x || both_nan {
                    Ok(u)
                } else {
                    crate::bail!(
                        "{x} at location {i} is not representable in {}",
                        U::NAME
                    )
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Tensor {
            layout: self.layout.clone(),
            data,
        })
    }
}

impl<T: DType> std::fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("dtype", &T::NAME)
            .field("dims", &self.dims())
            .field("data", &self.data)
            .finish()
    }
}
