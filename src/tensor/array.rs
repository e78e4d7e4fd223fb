//! Nested sequences: each level adds a leading axis.

use alloc::vec::Vec;

use super::{Tensor, TensorMut};
use crate::error::{TensorError, TensorResult, check};
use crate::shape::{DYNAMIC, Extents, Shape};

#[inline]
fn split_index(index: &[usize]) -> (usize, &[usize]) {
    debug_assert!(!index.is_empty(), "sequence indexed with too few indices");
    (index[0], &index[1..])
}

// An empty sequence still has the rank of its element type.
fn element_extents<T: Tensor>(items: &[T]) -> Extents {
    match items.split_first() {
        Some((first, rest)) => {
            let extents = first.extents();
            check!(check_uniform(&extents, rest));
            extents
        }
        None => Extents::from_shape(T::SHAPE),
    }
}

/// Checks that every element has the extents of the first one.
#[cfg_attr(not(any(debug_assertions, feature = "checked")), allow(dead_code))]
fn check_uniform<T: Tensor>(first: &Extents, rest: &[T]) -> TensorResult<()> {
    for item in rest {
        first
            .check_compatible(&item.extents())
            .map_err(|err| match err {
                TensorError::ExtentMismatch {
                    axis,
                    expected,
                    got,
                } => TensorError::ExtentMismatch {
                    axis: axis + 1,
                    expected,
                    got,
                },
                other => other,
            })?;
    }
    Ok(())
}

impl<T: Tensor, const N: usize> Tensor for [T; N] {
    type Scalar = T::Scalar;
    const SHAPE: Shape = T::SHAPE.prepend(N);

    fn extents(&self) -> Extents {
        element_extents(self.as_slice()).prepend(N, N)
    }

    #[inline]
    fn evaluate(&self, index: &[usize]) -> T::Scalar {
        let (head, tail) = split_index(index);
        self[head].evaluate(tail)
    }
}

impl<T: TensorMut, const N: usize> TensorMut for [T; N] {
    #[inline]
    fn evaluate_mut(&mut self, index: &[usize]) -> &mut T::Scalar {
        let (head, tail) = split_index(index);
        self[head].evaluate_mut(tail)
    }
}

impl<T: Tensor> Tensor for [T] {
    type Scalar = T::Scalar;
    const SHAPE: Shape = T::SHAPE.prepend(DYNAMIC);

    fn extents(&self) -> Extents {
        element_extents(self).prepend(DYNAMIC, self.len())
    }

    #[inline]
    fn evaluate(&self, index: &[usize]) -> T::Scalar {
        let (head, tail) = split_index(index);
        self[head].evaluate(tail)
    }
}

impl<T: TensorMut> TensorMut for [T] {
    #[inline]
    fn evaluate_mut(&mut self, index: &[usize]) -> &mut T::Scalar {
        let (head, tail) = split_index(index);
        self[head].evaluate_mut(tail)
    }
}

impl<T: Tensor> Tensor for Vec<T> {
    type Scalar = T::Scalar;
    const SHAPE: Shape = <[T] as Tensor>::SHAPE;

    fn extents(&self) -> Extents {
        self.as_slice().extents()
    }

    #[inline]
    fn evaluate(&self, index: &[usize]) -> T::Scalar {
        self.as_slice().evaluate(index)
    }
}

impl<T: TensorMut> TensorMut for Vec<T> {
    #[inline]
    fn evaluate_mut(&mut self, index: &[usize]) -> &mut T::Scalar {
        self.as_mut_slice().evaluate_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_nested_array_shape() {
        type M = [[f32; 3]; 2];
        assert_eq!(M::SHAPE, Shape::new(&[2, 3]));
        assert_eq!(M::RANK, 2);
        let m: M = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert_eq!(m.evaluate(&[1, 2]), 6.0);
    }

    #[test]
    fn test_vec_is_dynamic() {
        let v = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert_eq!(<Vec<Vec<i32>>>::SHAPE, Shape::dynamic(2));
        assert_eq!(v.extents().as_slice(), &[2, 3]);
        assert_eq!(v.evaluate(&[0, 2]), 3);
    }

    #[test]
    fn test_mixed_nesting() {
        let v: Vec<[u8; 2]> = vec![[1, 2], [3, 4], [5, 6]];
        let e = v.extents();
        assert_eq!(e.as_slice(), &[3, 2]);
        assert_eq!(e.static_extent(0), DYNAMIC);
        assert_eq!(e.static_extent(1), 2);
    }

    #[test]
    fn test_ragged_rows_detected() {
        let v = vec![vec![1, 2], vec![3, 4], vec![5, 6, 7]];
        assert_eq!(
            check_uniform(&v[0].extents(), &v[1..]),
            Err(TensorError::ExtentMismatch {
                axis: 1,
                expected: 2,
                got: 3
            })
        );
        assert!(check_uniform(&v[0].extents(), &v[1..2]).is_ok());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "extent mismatch on axis 1: expected 2, got 3")]
    fn test_ragged_extents_panic() {
        let v = vec![vec![1, 2], vec![3, 4, 5]];
        v.extents();
    }

    #[test]
    fn test_empty_sequence_keeps_rank() {
        let v: Vec<[i32; 4]> = Vec::new();
        assert_eq!(v.extents().as_slice(), &[0, 4]);
    }

    #[test]
    fn test_slice_write() {
        let mut data = [[0; 2]; 2];
        let slice: &mut [[i32; 2]] = &mut data;
        *slice.evaluate_mut(&[1, 0]) = 9;
        assert_eq!(data, [[0, 0], [9, 0]]);
    }
}
