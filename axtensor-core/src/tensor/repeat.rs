use super::Tensor;
use crate::{DType, Result};

impl<T: DType> Tensor<T> {
    /// Append a new innermost axis of size `n`, repeating every element `n`
    /// times in a row.
    ///
    /// ```
    /// use axtensor_core::Tensor;
    ///
    /// let t = Tensor::<i32>::arange(&[2], 1, 1).unwrap();
    /// let r = t.repeat_inner(3).unwrap();
    /// assert_eq!(r.dims(), &[2, 3]);
    /// assert_eq!(r.data(), &[1, 1, 1, 2, 2, 2]);
    /// ```
    pub fn repeat_inner(&self, n: usize) -> Result<Self> {
        let layout = self.layout.with_inner(n)?;
        tracing::trace!(n, dims = ?self.dims(), "repeat_inner");
        let mut data = Vec::with_capacity(layout.element_count());
        for &v in &self.data {
            data.extend(std::iter::repeat_n(v, n));
        }
        Ok(Self::from_parts(layout, data))
    }

    /// Prepend a new outermost axis of size `n`, repeating the whole storage
    /// `n` times.
    ///
    /// ```
    /// use axtensor_core::Tensor;
    ///
    /// let t = Tensor::<i32>::arange(&[2], 1, 1).unwrap();
    /// let r = t.repeat_outer(3).unwrap();
    /// assert_eq!(r.dims(), &[3, 2]);
    /// assert_eq!(r.data(), &[1, 2, 1, 2, 1, 2]);
    /// ```
    pub fn repeat_outer(&self, n: usize) -> Result<Self> {
        let layout = self.layout.with_outer(n)?;
        tracing::trace!(n, dims = ?self.dims(), "repeat_outer");
        let data = self.data.repeat(n);
        Ok(Self::from_parts(layout, data))
    }
}
