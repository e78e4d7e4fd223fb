//! Row-major views over flat storage.

use core::marker::PhantomData;

use super::{Tensor, TensorMut};
use crate::error::{TensorError, TensorResult, check};
use crate::shape::{Dynamic, Extents, Shape, StaticShape};

fn check_size(dims: &[usize], len: usize) -> TensorResult<()> {
    // A zero axis empties the view whatever the other axes hold.
    let expected = if dims.contains(&0) {
        Some(0)
    } else {
        dims.iter().try_fold(1usize, |n, &d| n.checked_mul(d))
    };
    match expected {
        Some(expected) if expected == len => Ok(()),
        expected => Err(TensorError::SizeMismatch {
            expected: expected.unwrap_or(usize::MAX),
            got: len,
        }),
    }
}

fn check_layout(shape: Shape, dims: &[usize], len: usize) -> TensorResult<()> {
    Extents::try_new(shape, dims)?;
    check_size(dims, len)
}

#[inline]
fn linear_offset(dims: &[usize], index: &[usize]) -> usize {
    debug_assert_eq!(dims.len(), index.len(), "span indexed with wrong rank");
    dims.iter()
        .zip(index)
        .fold(0, |offset, (&extent, &i)| offset * extent + i)
}

/// A read-only `R`-dimensional row-major view.
///
/// Extents are dynamic unless `S` fixes some of them, e.g.
/// `(Fixed<2>, Dyn)`. Static extents take part in compile-time shape checks.
///
/// ```
/// use cubek_ttl::{Dyn, Fixed, Tensor, TensorSpan};
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let m = TensorSpan::new(&data, [2, 3]);
/// assert_eq!(m.evaluate(&[1, 0]), 4.0);
///
/// let rows = TensorSpan::<_, 2, (Fixed<2>, Dyn)>::with_shape(&data, [2, 3]);
/// assert_eq!(rows.evaluate(&[1, 2]), 6.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TensorSpan<'a, T, const R: usize, S = Dynamic<R>> {
    data: &'a [T],
    dims: [usize; R],
    _shape: PhantomData<S>,
}

impl<'a, T, const R: usize> TensorSpan<'a, T, R> {
    /// Creates a view. The storage must hold exactly the product of `dims`.
    pub fn new(data: &'a [T], dims: [usize; R]) -> Self {
        Self::with_shape(data, dims)
    }

    pub fn try_new(data: &'a [T], dims: [usize; R]) -> TensorResult<Self> {
        Self::try_with_shape(data, dims)
    }
}

impl<'a, T, const R: usize, S: StaticShape> TensorSpan<'a, T, R, S> {
    /// Creates a view with the static extents of `S`.
    ///
    /// `dims` must agree with every static axis and the storage must hold
    /// exactly the product of `dims`.
    pub fn with_shape(data: &'a [T], dims: [usize; R]) -> Self {
        const { assert!(S::SHAPE.rank() == R, "span shape must have R axes") };
        check!(check_layout(S::SHAPE, &dims, data.len()));
        Self {
            data,
            dims,
            _shape: PhantomData,
        }
    }

    pub fn try_with_shape(data: &'a [T], dims: [usize; R]) -> TensorResult<Self> {
        const { assert!(S::SHAPE.rank() == R, "span shape must have R axes") };
        check_layout(S::SHAPE, &dims, data.len())?;
        Ok(Self {
            data,
            dims,
            _shape: PhantomData,
        })
    }

    pub fn dims(&self) -> [usize; R] {
        self.dims
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }
}

impl<T: Copy, const R: usize, S: StaticShape> Tensor for TensorSpan<'_, T, R, S> {
    type Scalar = T;
    const SHAPE: Shape = S::SHAPE;

    fn extents(&self) -> Extents {
        Extents::new(S::SHAPE, &self.dims)
    }

    #[inline]
    fn evaluate(&self, index: &[usize]) -> T {
        self.data[linear_offset(&self.dims, index)]
    }
}

/// A writable `R`-dimensional row-major view.
///
/// Static extents from `S` reject mismatched assignments while compiling:
///
/// ```compile_fail
/// use cubek_ttl::{Fixed, TensorSpanMut};
///
/// let mut storage = [0; 6];
/// let mut span = TensorSpanMut::<_, 2, (Fixed<2>, Fixed<3>)>::with_shape(&mut storage, [2, 3]);
/// span <<= &[[1, 2], [3, 4], [5, 6]];
/// ```
#[derive(Debug)]
pub struct TensorSpanMut<'a, T, const R: usize, S = Dynamic<R>> {
    data: &'a mut [T],
    dims: [usize; R],
    _shape: PhantomData<S>,
}

impl<'a, T, const R: usize> TensorSpanMut<'a, T, R> {
    /// Creates a view. The storage must hold exactly the product of `dims`.
    pub fn new(data: &'a mut [T], dims: [usize; R]) -> Self {
        Self::with_shape(data, dims)
    }

    pub fn try_new(data: &'a mut [T], dims: [usize; R]) -> TensorResult<Self> {
        Self::try_with_shape(data, dims)
    }
}

impl<'a, T, const R: usize, S: StaticShape> TensorSpanMut<'a, T, R, S> {
    /// Creates a view with the static extents of `S`.
    pub fn with_shape(data: &'a mut [T], dims: [usize; R]) -> Self {
        const { assert!(S::SHAPE.rank() == R, "span shape must have R axes") };
        check!(check_layout(S::SHAPE, &dims, data.len()));
        Self {
            data,
            dims,
            _shape: PhantomData,
        }
    }

    pub fn try_with_shape(data: &'a mut [T], dims: [usize; R]) -> TensorResult<Self> {
        const { assert!(S::SHAPE.rank() == R, "span shape must have R axes") };
        check_layout(S::SHAPE, &dims, data.len())?;
        Ok(Self {
            data,
            dims,
            _shape: PhantomData,
        })
    }

    pub fn dims(&self) -> [usize; R] {
        self.dims
    }

    /// A read-only view of the same storage.
    pub fn as_span(&self) -> TensorSpan<'_, T, R, S> {
        TensorSpan {
            data: &*self.data,
            dims: self.dims,
            _shape: PhantomData,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }
}

impl<T: Copy, const R: usize, S: StaticShape> Tensor for TensorSpanMut<'_, T, R, S> {
    type Scalar = T;
    const SHAPE: Shape = S::SHAPE;

    fn extents(&self) -> Extents {
        Extents::new(S::SHAPE, &self.dims)
    }

    #[inline]
    fn evaluate(&self, index: &[usize]) -> T {
        self.data[linear_offset(&self.dims, index)]
    }
}

impl<T: Copy, const R: usize, S: StaticShape> TensorMut for TensorSpanMut<'_, T, R, S> {
    #[inline]
    fn evaluate_mut(&mut self, index: &[usize]) -> &mut T {
        &mut self.data[linear_offset(&self.dims, index)]
    }
}
