//! The tensor abstraction every expression operand implements.
//!
//! A tensor exposes its extents and evaluates to a scalar at a multi-index.
//! Implementations exist for:
//! - built-in numeric scalars and `half::{f16, bf16}` (rank 0)
//! - nested arrays, slices and `Vec`, which add one leading axis per level
//! - row-major views over flat storage ([`TensorSpan`], [`TensorSpanMut`])
//! - every expression node of [`crate::tree`]
//!
//! Which implementation applies is decided by the type, so dispatch is
//! resolved while compiling.

mod array;
mod scalar;
mod span;

pub use span::{TensorSpan, TensorSpanMut};

use num_traits::Zero;

use crate::index::{IndexString, IntoIndex};
use crate::shape::{Extents, Shape};
use crate::tree::{Bind, assign};

/// Scalars that can be accumulated by contractions.
pub trait Element: Copy + Zero {}

impl<T: Copy + Zero> Element for T {}

/// A value indexable by a fixed number of integer indices.
pub trait Tensor {
    /// The value produced by [`Tensor::evaluate`], also used to accumulate
    /// contractions.
    type Scalar: Copy;

    /// The static shape. Its rank is the number of indices `evaluate` takes.
    const SHAPE: Shape;

    const RANK: usize = Self::SHAPE.rank();

    /// The outer index string of an index-labelled expression.
    ///
    /// `None` for plain storage, which is indexed positionally.
    const LABEL: Option<IndexString> = None;

    /// The runtime size of every axis.
    fn extents(&self) -> Extents;

    /// Evaluates at `index`, which holds exactly [`Tensor::RANK`] entries.
    fn evaluate(&self, index: &[usize]) -> Self::Scalar;
}

/// A tensor whose elements can be written.
pub trait TensorMut: Tensor {
    fn evaluate_mut(&mut self, index: &[usize]) -> &mut Self::Scalar;
}

impl<T: Tensor + ?Sized> Tensor for &T {
    type Scalar = T::Scalar;
    const SHAPE: Shape = T::SHAPE;
    const LABEL: Option<IndexString> = T::LABEL;

    #[inline]
    fn extents(&self) -> Extents {
        (**self).extents()
    }

    #[inline]
    fn evaluate(&self, index: &[usize]) -> T::Scalar {
        (**self).evaluate(index)
    }
}

impl<T: Tensor + ?Sized> Tensor for &mut T {
    type Scalar = T::Scalar;
    const SHAPE: Shape = T::SHAPE;
    const LABEL: Option<IndexString> = T::LABEL;

    #[inline]
    fn extents(&self) -> Extents {
        (**self).extents()
    }

    #[inline]
    fn evaluate(&self, index: &[usize]) -> T::Scalar {
        (**self).evaluate(index)
    }
}

impl<T: TensorMut + ?Sized> TensorMut for &mut T {
    #[inline]
    fn evaluate_mut(&mut self, index: &[usize]) -> &mut T::Scalar {
        (**self).evaluate_mut(index)
    }
}

/// Convenience methods available on every tensor.
pub trait TensorExt: Tensor + Sized {
    /// Binds the tensor to an index label. See [`crate::tree::bind`].
    fn bind<I: IntoIndex>(self, indices: I) -> Bind<Self, I::Indices> {
        Bind::new(self, indices)
    }

    /// Evaluates a rank-0 tensor.
    fn value(&self) -> Self::Scalar {
        const { assert!(Self::RANK == 0, "value() requires a rank-0 tensor") };
        self.evaluate(&[])
    }
}

impl<T: Tensor> TensorExt for T {}

/// Convenience methods available on every writable tensor.
pub trait TensorMutExt: TensorMut {
    /// Writes a rank-0 tensor.
    fn set(&mut self, value: Self::Scalar) {
        const { assert!(Self::RANK == 0, "set() requires a rank-0 tensor") };
        *self.evaluate_mut(&[]) = value;
    }

    /// Assigns `src` element by element. See [`crate::tree::assign`].
    fn assign_from<B>(&mut self, src: &B)
    where
        B: Tensor + ?Sized,
        B::Scalar: Into<Self::Scalar>,
    {
        assign(self, src);
    }
}

impl<T: TensorMut + ?Sized> TensorMutExt for T {}
