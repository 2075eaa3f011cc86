//! Shape and stride model.
//!
//! Dims are stored outermost-first: the last entry is the contiguous axis.
//! Every public operation that takes an `axis` counts it from the right, so
//! axis 0 is the innermost axis and maps to storage index `rank - 1`.

use std::fmt;

use crate::{Error, Result};

/// Compute contiguous strides for `dims`.
///
/// Fails if any axis has size zero or the element count overflows `usize`.
pub fn strides_from(dims: &[usize]) -> Result<Vec<usize>> {
    contiguous(dims).map(|(strides, _)| strides)
}

/// Strides and element count in one checked pass.
fn contiguous(dims: &[usize]) -> Result<(Vec<usize>, usize)> {
    if dims.iter().any(|&d| d == 0) {
        return Err(Error::EmptyAxis {
            dims: dims.to_vec(),
        }
        .bt());
    }
    let mut strides = Vec::with_capacity(dims.len());
    let mut acc: usize = 1;
    // Iterate dims in reverse to accumulate products
    for dim in dims.iter().rev() {
        strides.push(acc);
        acc = match acc.checked_mul(*dim) {
            Some(acc) => acc,
            None => {
                tracing::debug!(?dims, "element count overflows usize");
                return Err(Error::TooLarge {
                    dims: dims.to_vec(),
                }
                .bt());
            }
        };
    }
    strides.reverse();
    Ok((strides, acc))
}

/// Validated dims together with their derived strides.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    dims: Vec<usize>,
    strides: Vec<usize>,
    nelem: usize,
}

impl Layout {
    pub fn new(dims: &[usize]) -> Result<Self> {
        let (strides, nelem) = contiguous(dims)?;
        Ok(Self {
            dims: dims.to_vec(),
            strides,
            nelem,
        })
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn element_count(&self) -> usize {
        self.nelem
    }

    /// Convert an axis counted from the right into an index into `dims`.
    pub fn storage_index(&self, axis: usize) -> Result<usize> {
        let rank = self.rank();
        if axis >= rank {
            tracing::debug!(axis, rank, "axis out of range");
            return Err(Error::Axis { axis, rank }.bt());
        }
        Ok(rank - 1 - axis)
    }

    /// Size of `axis` (counted from the right).
    pub fn dim_along(&self, axis: usize) -> Result<usize> {
        Ok(self.dims[self.storage_index(axis)?])
    }

    /// Stride of `axis` (counted from the right).
    pub fn stride_along(&self, axis: usize) -> Result<usize> {
        Ok(self.strides[self.storage_index(axis)?])
    }

    /// Flat location of `coord`, given in storage order.
    pub fn location(&self, coord: &[usize]) -> Result<usize> {
        if coord.len() != self.rank() || coord.iter().zip(&self.dims).any(|(c, d)| c >= d) {
            return Err(Error::Index {
                coord: coord.to_vec(),
                dims: self.dims.clone(),
            }
            .bt());
        }
        Ok(coord
            .iter()
            .zip(&self.strides)
            .map(|(c, s)| c * s)
            .sum())
    }

    /// Coordinate (storage order) of a flat location. Inverse of [`Layout::location`].
    pub fn coordinate(&self, location: usize) -> Result<Vec<usize>> {
        self.check_location(location)?;
        let mut coord = vec![0; self.rank()];
        let mut loc = location;
        for i in (0..self.rank()).rev() {
            coord[i] = loc % self.dims[i];
            loc /= self.dims[i];
        }
        Ok(coord)
    }

    pub(crate) fn check_location(&self, location: usize) -> Result<()> {
        if location >= self.nelem {
            return Err(Error::LocationOutOfRange {
                location,
                nelem: self.nelem,
            }
            .bt());
        }
        Ok(())
    }

    /// Coordinate of a flat location along a single storage index.
    fn coordinate_at(&self, location: usize, idx: usize) -> usize {
        (location / self.strides[idx]) % self.dims[idx]
    }

    /// Check that `start` is the first element of a line along `axis`.
    /// Returns the storage index of `axis`.
    pub(crate) fn check_line_start(&self, start: usize, axis: usize) -> Result<usize> {
        let idx = self.storage_index(axis)?;
        self.check_location(start)?;
        if self.coordinate_at(start, idx) != 0 {
            let coord = self.coordinate(start)?;
            return Err(Error::Index {
                coord,
                dims: self.dims.clone(),
            }
            .bt());
        }
        Ok(idx)
    }

    /// Locations of every element at depth `k` along `axis`, one per line
    /// through the tensor along that axis.
    ///
    /// The entries follow storage order of the `k == 0` slice, so the result
    /// has `element_count() / dim_along(axis)` entries.
    pub fn plane(&self, axis: usize, k: usize) -> Result<Vec<usize>> {
        let idx = self.storage_index(axis)?;
        let (dim, stride) = (self.dims[idx], self.strides[idx]);
        if k >= dim {
            let mut coord = vec![0; self.rank()];
            coord[idx] = k;
            return Err(Error::Index {
                coord,
                dims: self.dims.clone(),
            }
            .bt());
        }
        let shift = k * stride;
        let mut locs = Vec::with_capacity(self.nelem / dim);
        locs.extend(
            (0..self.nelem)
                .filter(|&i| self.coordinate_at(i, idx) == 0)
                .map(|i| i + shift),
        );
        Ok(locs)
    }

    /// Layout with `axis` removed.
    pub fn without_axis(&self, axis: usize) -> Result<Self> {
        let idx = self.storage_index(axis)?;
        let mut dims = self.dims.clone();
        dims.remove(idx);
        Self::new(&dims)
    }

    /// Layout with a new innermost axis of size `n`.
    pub fn with_inner(&self, n: usize) -> Result<Self> {
        let mut dims = self.dims.clone();
        dims.push(n);
        Self::new(&dims)
    }

    /// Layout with a new outermost axis of size `n`.
    pub fn with_outer(&self, n: usize) -> Result<Self> {
        let mut dims = Vec::with_capacity(self.rank() + 1);
        dims.push(n);
        dims.extend_from_slice(&self.dims);
        Self::new(&dims)
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layout(dims={:?}, strides={:?})", self.dims, self.strides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_are_contiguous() {
        assert_eq!(strides_from(&[2, 3, 5]).unwrap(), vec![15, 5, 1]);
        assert_eq!(strides_from(&[7]).unwrap(), vec![1]);
        assert!(strides_from(&[]).unwrap().is_empty());
    }

    #[test]
    fn zero_sized_axis_is_rejected() {
        let err = strides_from(&[2, 0, 5]).unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn overflowing_element_count_is_rejected() {
        let err = strides_from(&[usize::MAX, 2]).unwrap_err();
        assert!(matches!(err.inner(), Error::TooLarge { .. }));
        assert!(Layout::new(&[1 << 32, 1 << 32]).unwrap_err().is_shape());
        // the last product is the element count, not a stride
        assert_eq!(strides_from(&[2, usize::MAX / 2]).unwrap(), vec![usize::MAX / 2, 1]);
    }

    #[test]
    fn storage_index_counts_from_the_right() {
        let layout = Layout::new(&[2, 3, 5]).unwrap();
        assert_eq!(layout.storage_index(0).unwrap(), 2);
        assert_eq!(layout.storage_index(2).unwrap(), 0);
        assert_eq!(layout.dim_along(0).unwrap(), 5);
        assert_eq!(layout.stride_along(1).unwrap(), 5);
        assert!(layout.storage_index(3).unwrap_err().is_axis());
    }

    #[test]
    fn plane_offsets_by_depth() {
        let layout = Layout::new(&[2, 3]).unwrap();
        // axis 1 (outer, size 2): one entry per column
        assert_eq!(layout.plane(1, 0).unwrap(), vec![0, 1, 2]);
        assert_eq!(layout.plane(1, 1).unwrap(), vec![3, 4, 5]);
        // axis 0 (inner, size 3): one entry per row
        assert_eq!(layout.plane(0, 2).unwrap(), vec![2, 5]);
        assert!(layout.plane(0, 3).unwrap_err().is_index());
    }

    #[test]
    fn line_start_must_sit_at_depth_zero() {
        let layout = Layout::new(&[2, 3]).unwrap();
        assert_eq!(layout.check_line_start(3, 0).unwrap(), 1);
        assert!(layout.check_line_start(4, 0).unwrap_err().is_index());
        assert!(layout.check_line_start(6, 1).unwrap_err().is_index());
    }

    #[test]
    fn derived_layouts() {
        let layout = Layout::new(&[2, 3, 5]).unwrap();
        assert_eq!(layout.without_axis(0).unwrap().dims(), &[2, 3]);
        assert_eq!(layout.without_axis(2).unwrap().dims(), &[3, 5]);
        assert_eq!(layout.with_inner(4).unwrap().dims(), &[2, 3, 5, 4]);
        assert_eq!(layout.with_outer(4).unwrap().dims(), &[4, 2, 3, 5]);
        assert!(layout.with_inner(0).unwrap_err().is_shape());
    }
}
