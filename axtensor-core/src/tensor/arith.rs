use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

#[cfg(feature = "bfloat")]
use half::bf16;
#[cfg(feature = "half")]
use half::f16;

use super::Tensor;
use crate::{DType, Error, Result};

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum BinaryOpType {
    Add,
    Div,
    Sub,
    Mul,
}

impl BinaryOpType {
    pub fn as_closure<T: DType>(&self) -> impl Fn(T, T) -> T {
        match self {
            Self::Add => |x, y| x + y,
            Self::Div => |x, y| x / y,
            Self::Sub => |x, y| x - y,
            Self::Mul => |x, y| x * y,
        }
    }
}

impl<T: DType> Tensor<T> {
    /// Combine with a same-shape tensor in place: `self[i] = op(self[i], rhs[i])`.
    pub fn zip_assign<F>(&mut self, rhs: &Tensor<T>, op: F) -> Result<&mut Self>
    where
        F: Fn(T, T) -> T,
    {
        if self.dims() != rhs.dims() {
            tracing::debug!(lhs = ?self.dims(), rhs = ?rhs.dims(), "elementwise shape mismatch");
            return Err(Error::shape("zip_assign", self.dims(), rhs.dims()));
        }
        for (x, &y) in self.data.iter_mut().zip(&rhs.data) {
            *x = op(*x, y);
        }
        Ok(self)
    }

    /// Combine with a scalar in place: `self[i] = op(self[i], s)`.
    pub fn map_assign<F>(&mut self, s: T, op: F) -> &mut Self
    where
        F: Fn(T, T) -> T,
    {
        self.data.iter_mut().for_each(|x| *x = op(*x, s));
        self
    }
}

macro_rules! compound_op {
    ($variant:ident, $tensor_fn:ident, $scalar_fn:ident) => {
        impl<T: DType> Tensor<T> {
            /// Elementwise compound assignment with a same-shape tensor.
            pub fn $tensor_fn(&mut self, rhs: &Tensor<T>) -> Result<&mut Self> {
                self.zip_assign(rhs, BinaryOpType::$variant.as_closure::<T>())
            }

            /// Compound assignment with a scalar.
            pub fn $scalar_fn(&mut self, s: T) -> &mut Self {
                self.map_assign(s, BinaryOpType::$variant.as_closure::<T>())
            }
        }
    };
}

compound_op!(Add, add_assign_tensor, add_assign_scalar);
compound_op!(Sub, sub_assign_tensor, sub_assign_scalar);
compound_op!(Mul, mul_assign_tensor, mul_assign_scalar);
compound_op!(Div, div_assign_tensor, div_assign_scalar);

macro_rules! tensor_binop {
    ($trait:ident, $fn_name:ident, $assign_trait:ident, $assign_fn:ident, $tensor_fn:ident, $scalar_fn:ident) => {
        impl<T: DType> $assign_trait<T> for Tensor<T> {
            fn $assign_fn(&mut self, rhs: T) {
                self.$scalar_fn(rhs);
            }
        }

        /// Fails with a shape error unless both operands have the same dims.
        impl<T: DType> $trait<&Tensor<T>> for Tensor<T> {
            type Output = Result<Tensor<T>>;
            fn $fn_name(mut self, rhs: &Tensor<T>) -> Self::Output {
                self.$tensor_fn(rhs)?;
                Ok(self)
            }
        }

        impl<T: DType> $trait<Tensor<T>> for Tensor<T> {
            type Output = Result<Tensor<T>>;
            fn $fn_name(self, rhs: Tensor<T>) -> Self::Output {
                <Tensor<T> as $trait<&Tensor<T>>>::$fn_name(self, &rhs)
            }
        }

        impl<T: DType> $trait<&Tensor<T>> for &Tensor<T> {
            type Output = Result<Tensor<T>>;
            fn $fn_name(self, rhs: &Tensor<T>) -> Self::Output {
                <Tensor<T> as $trait<&Tensor<T>>>::$fn_name(self.clone(), rhs)
            }
        }

        impl<T: DType> $trait<T> for Tensor<T> {
            type Output = Tensor<T>;
            fn $fn_name(mut self, rhs: T) -> Self::Output {
                self.$scalar_fn(rhs);
                self
            }
        }

        impl<T: DType> $trait<T> for &Tensor<T> {
            type Output = Tensor<T>;
            fn $fn_name(self, rhs: T) -> Self::Output {
                <Tensor<T> as $trait<T>>::$fn_name(self.clone(), rhs)
            }
        }
    };
}

tensor_binop!(Add, add, AddAssign, add_assign, add_assign_tensor, add_assign_scalar);
tensor_binop!(Sub, sub, SubAssign, sub_assign, sub_assign_tensor, sub_assign_scalar);
tensor_binop!(Mul, mul, MulAssign, mul_assign, mul_assign_tensor, mul_assign_scalar);
tensor_binop!(Div, div, DivAssign, div_assign, div_assign_tensor, div_assign_scalar);

// Scalar on the left. Note `s - t` evaluates as `t - s`, not `-(t - s)`.
macro_rules! scalar_lhs_binop {
    ($rt:ty) => {
        impl Add<Tensor<$rt>> for $rt {
            type Output = Tensor<$rt>;
            fn add(self, rhs: Tensor<$rt>) -> Self::Output {
                rhs + self
            }
        }

        impl Sub<Tensor<$rt>> for $rt {
            type Output = Tensor<$rt>;
            fn sub(self, rhs: Tensor<$rt>) -> Self::Output {
                rhs - self
            }
        }

        impl Mul<Tensor<$rt>> for $rt {
            type Output = Tensor<$rt>;
            fn mul(self, rhs: Tensor<$rt>) -> Self::Output {
                rhs * self
            }
        }
    };
}

scalar_lhs_binop!(u8);
scalar_lhs_binop!(u32);
scalar_lhs_binop!(i32);
scalar_lhs_binop!(i64);
scalar_lhs_binop!(f32);
scalar_lhs_binop!(f64);
#[cfg(feature = "half")]
scalar_lhs_binop!(f16);
#[cfg(feature = "bfloat")]
scalar_lhs_binop!(bf16);
