//! Axtensor is a small dense tensor library built around strided addressing.
//!
//! A [`Tensor`] owns a flat, contiguous buffer together with a [`Layout`]: the
//! axis sizes (outermost first) and the strides derived from them. Everything
//! else is expressed in terms of that layout: converting between flat
//! locations and coordinates, enumerating the lines through the tensor along
//! one axis ([`Layout::plane`]), and running folds or in-place transforms
//! along those lines.
//!
//! Axes passed to operations are counted from the right, so axis `0` is the
//! innermost, contiguous axis.
//!
//! ## A quick guide
//! - Create a tensor with [`Tensor::zeros`], [`Tensor::full`], [`Tensor::from_vec`] or [`Tensor::arange`].
//! - Reduce along an axis with [`Tensor::sum_along_axis`], [`Tensor::average_along_axis`],
//!   [`Tensor::max_along_axis`] or the general [`Tensor::reduce`].
//! - Rewrite values along an axis in place with [`Tensor::transform`].
//! - Add an axis by duplication with [`Tensor::repeat_inner`] and [`Tensor::repeat_outer`].
//! - Combine with scalars or same-shape tensors using the usual operators. Tensor-tensor
//!   operators return a [`Result`] since the shapes have to match.
//!
//! ## What can you do with it?
//! ```
//! use axtensor_core::{BinaryOpType, Tensor};
//!
//! // dims [2, 3, 5] hold 0..30 in storage order
//! let t = Tensor::<f32>::arange(&[2, 3, 5], 0., 1.).unwrap();
//! assert_eq!(t.strides(), &[15, 5, 1]);
//! assert_eq!(t.location(&[1, 2, 4]).unwrap(), 29);
//!
//! // Sum the innermost axis
//! let sums = t.sum_along_axis(0).unwrap();
//! assert_eq!(sums.dims(), &[2, 3]);
//! assert_eq!(sums.get(&[1, 2]).unwrap(), 135.);
//!
//! // Scale each row of the outermost axis by its own weight
//! let mut scaled = t.clone();
//! scaled.transform_with(2, BinaryOpType::Mul, &[1., 10.]).unwrap();
//! assert_eq!(scaled.get(&[1, 0, 0]).unwrap(), 150.);
//!
//! let res = ((t + 1.) * 2.).repeat_outer(4).unwrap();
//! assert_eq!(res.dims(), &[4, 2, 3, 5]);
//! ```

mod dtype;
mod error;
mod shape;
mod tensor;

pub use dtype::{DType, DTypeOps, RandDispatch};
pub use error::{Context, Error, Result};
pub use shape::{strides_from, Layout};
pub use tensor::{BinaryOpType, Seed, Tensor};
