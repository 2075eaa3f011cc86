use super::{BinaryOpType, Tensor};
use crate::{DType, Error, Result};

impl<T: DType> Tensor<T> {
    // Unlike folds, transforms have no implicit unit weights.
    fn check_transform_weights(&self, op: &'static str, len: usize, weights: &[T]) -> Result<()> {
        if weights.len() != len {
            tracing::debug!(op, len, weights = weights.len(), "weight length mismatch");
            return Err(Error::shape(op, &[len], &[weights.len()]));
        }
        Ok(())
    }

    fn transform_line<F>(&mut self, start: usize, idx: usize, op: &F, weights: &[T])
    where
        F: Fn(T, T) -> T,
    {
        let stride = self.strides()[idx];
        for (step, &w) in weights.iter().enumerate() {
            let i = start + step * stride;
            // value on the left: `op` need not commute
            self.data[i] = op(self.data[i], w);
        }
    }

    /// Replace each value of the line starting at `start` along `axis` with
    /// `op(value, weights[step])`, in increasing coordinate order.
    ///
    /// `weights` must have exactly one entry per step along the axis.
    pub fn transform_along_axis<F>(
        &mut self,
        start: usize,
        axis: usize,
        op: F,
        weights: &[T],
    ) -> Result<&mut Self>
    where
        F: Fn(T, T) -> T,
    {
        let idx = self.layout.check_line_start(start, axis)?;
        self.check_transform_weights("transform_along_axis", self.dims()[idx], weights)?;
        self.transform_line(start, idx, &op, weights);
        Ok(self)
    }

    /// Apply `op(value, weights[k])` to every element whose coordinate along
    /// `axis` is `k`. Nothing is modified if the call fails.
    pub fn transform<F>(&mut self, axis: usize, op: F, weights: &[T]) -> Result<&mut Self>
    where
        F: Fn(T, T) -> T,
    {
        let idx = self.layout.storage_index(axis)?;
        self.check_transform_weights("transform", self.dims()[idx], weights)?;
        let starts = self.layout.plane(axis, 0)?;
        tracing::trace!(axis, storage_index = idx, dims = ?self.dims(), "transform");

        for start in starts {
            self.transform_line(start, idx, &op, weights);
        }
        Ok(self)
    }

    /// [`Tensor::transform`] with one of the builtin binary operators.
    pub fn transform_with(
        &mut self,
        axis: usize,
        op: BinaryOpType,
        weights: &[T],
    ) -> Result<&mut Self> {
        self.transform(axis, op.as_closure::<T>(), weights)
    }
}
