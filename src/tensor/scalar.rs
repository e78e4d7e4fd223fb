use half::{bf16, f16};

use super::{Tensor, TensorMut};
use crate::index::IndexString;
use crate::shape::{Extents, Shape};

// Scalars are labelled with the empty index string so they combine with
// other labelled expressions.
macro_rules! scalar_tensor {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Tensor for $ty {
                type Scalar = $ty;
                const SHAPE: Shape = Shape::SCALAR;
                const LABEL: Option<IndexString> = Some(IndexString::EMPTY);

                #[inline]
                fn extents(&self) -> Extents {
                    Extents::SCALAR
                }

                #[inline]
                fn evaluate(&self, index: &[usize]) -> $ty {
                    debug_assert!(index.is_empty(), "scalars take no indices");
                    *self
                }
            }

            impl TensorMut for $ty {
                #[inline]
                fn evaluate_mut(&mut self, index: &[usize]) -> &mut $ty {
                    debug_assert!(index.is_empty(), "scalars take no indices");
                    self
                }
            }
        )*
    };
}

scalar_tensor!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, f16, bf16,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_identity() {
        assert_eq!(7i64.evaluate(&[]), 7);
        assert_eq!(<u8 as Tensor>::RANK, 0);
        assert_eq!(2.0f64.extents(), Extents::SCALAR);
    }

    #[test]
    fn test_half_scalar() {
        let x = f16::from_f32(1.5);
        assert_eq!(x.evaluate(&[]), x);
        assert_eq!(<bf16 as Tensor>::LABEL, Some(IndexString::EMPTY));
    }

    #[test]
    fn test_scalar_write() {
        let mut x = 0i32;
        *x.evaluate_mut(&[]) = 4;
        assert_eq!(x, 4);
    }
}
