use super::Tensor;
use crate::{Context, DType, Error, Result};

/// Initial accumulator of a fold along an axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Seed<T> {
    /// Start from a fixed value, usually the identity of the combining operator.
    Value(T),
    /// Start from the first (weighted) element of each window.
    First,
}

impl<T: DType> Tensor<T> {
    // Empty weights mean a weight of one for every step.
    fn check_fold_weights(&self, op: &'static str, len: usize, weights: &[T]) -> Result<()> {
        if !weights.is_empty() && weights.len() != len {
            tracing::debug!(op, len, weights = weights.len(), "weight length mismatch");
            return Err(Error::shape(op, &[len], &[weights.len()]));
        }
        Ok(())
    }

    /// Fold the line starting at `start` along storage index `idx`.
    /// Preconditions are checked by the caller.
    fn fold_line<F>(&self, start: usize, idx: usize, seed: Seed<T>, combine: &F, weights: &[T]) -> T
    where
        F: Fn(T, T) -> T,
    {
        let (len, stride) = (self.dims()[idx], self.strides()[idx]);
        let weighted = |step: usize| {
            let v = self.data[start + step * stride];
            if weights.is_empty() {
                v
            } else {
                weights[step] * v
            }
        };
        match seed {
            Seed::Value(v0) => (0..len).fold(v0, |acc, step| combine(acc, weighted(step))),
            Seed::First => (1..len).fold(weighted(0), |acc, step| combine(acc, weighted(step))),
        }
    }

    /// Fold the values of one line along `axis`, starting at flat location
    /// `start`, with `acc = combine(acc, weight * value)`.
    ///
    /// `start` must have coordinate zero along `axis`. `weights` is either
    /// empty or one entry per step along the axis.
    pub fn fold_along_axis<F>(
        &self,
        start: usize,
        axis: usize,
        seed: Seed<T>,
        combine: F,
        weights: &[T],
    ) -> Result<T>
    where
        F: Fn(T, T) -> T,
    {
        let idx = self.layout.check_line_start(start, axis)?;
        self.check_fold_weights("fold_along_axis", self.dims()[idx], weights)?;
        Ok(self.fold_line(start, idx, seed, &combine, weights))
    }

    /// Fold every line along `axis`, producing a tensor with that axis removed.
    ///
    /// Entry `i` of the result is the fold of the line starting at
    /// `plane(axis, 0)[i]`.
    pub fn reduce<F>(&self, axis: usize, seed: Seed<T>, combine: F, weights: &[T]) -> Result<Self>
    where
        F: Fn(T, T) -> T,
    {
        let idx = self.layout.storage_index(axis)?;
        self.check_fold_weights("reduce", self.dims()[idx], weights)?;
        let layout = self.layout.without_axis(axis)?;
        let starts = self.layout.plane(axis, 0)?;
        tracing::trace!(axis, storage_index = idx, dims = ?self.dims(), "reduce");

        let data = starts
            .into_iter()
            .map(|start| self.fold_line(start, idx, seed, &combine, weights))
            .collect();
        Ok(Self::from_parts(layout, data))
    }

    pub fn sum_along_axis(&self, axis: usize) -> Result<Self> {
        self.weighted_sum_along_axis(axis, &[])
    }

    pub fn weighted_sum_along_axis(&self, axis: usize, weights: &[T]) -> Result<Self> {
        self.reduce(axis, Seed::Value(T::ZERO), |a, b| a + b, weights)
    }

    pub fn average_along_axis(&self, axis: usize) -> Result<Self> {
        self.weighted_average_along_axis(axis, &[])
    }

    /// Weighted sum along `axis` divided by the axis length.
    ///
    /// The divisor is the number of elements, not the sum of the weights.
    pub fn weighted_average_along_axis(&self, axis: usize, weights: &[T]) -> Result<Self> {
        let len = self.layout.dim_along(axis)?;
        let n = T::from_count(len).with_context(|| {
            format!("axis length {len} is not representable as {}", T::NAME)
        })?;
        let mut out = self.weighted_sum_along_axis(axis, weights)?;
        out.div_assign_scalar(n);
        Ok(out)
    }

    /// Maximum along `axis`. Each window is seeded from its own first element.
    pub fn max_along_axis(&self, axis: usize) -> Result<Self> {
        self.reduce(axis, Seed::First, T::max_of, &[])
    }

    /// Minimum along `axis`. Each window is seeded from its own first element.
    pub fn min_along_axis(&self, axis: usize) -> Result<Self> {
        self.reduce(axis, Seed::First, T::min_of, &[])
    }
}
