//! Operator overloads building expression trees.
//!
//! `+`, `-` and `*` between labelled expressions build [`Sum`] and
//! [`Product`] nodes; unary `-` builds a [`Unary`]. On writable expressions
//! `<<=` assigns, `+=` and `-=` update pointwise, and `*=` scales by a rank-0
//! tensor.

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, ShlAssign, Sub, SubAssign};

use half::{bf16, f16};

use super::assign::{assign, assign_with, update};
use super::op::{Minus, Negate, Plus};
use super::{Bind, Product, Sum, Unary};
use crate::shape::StaticShape;
use crate::tensor::{Tensor, TensorMut, TensorSpanMut};

macro_rules! impl_expression_ops {
    ([$($gen:tt)*] $node:ty) => {
        impl<$($gen)*, Rhs: Tensor> Add<Rhs> for $node
        where
            $node: Tensor,
        {
            type Output = Sum<Self, Rhs, Plus>;

            #[inline]
            fn add(self, rhs: Rhs) -> Self::Output {
                Sum::new(self, rhs)
            }
        }

        impl<$($gen)*, Rhs: Tensor> Sub<Rhs> for $node
        where
            $node: Tensor,
        {
            type Output = Sum<Self, Rhs, Minus>;

            #[inline]
            fn sub(self, rhs: Rhs) -> Self::Output {
                Sum::new(self, rhs)
            }
        }

        impl<$($gen)*, Rhs: Tensor> Mul<Rhs> for $node
        where
            $node: Tensor,
        {
            type Output = Product<Self, Rhs>;

            #[inline]
            fn mul(self, rhs: Rhs) -> Self::Output {
                Product::new(self, rhs)
            }
        }

        impl<$($gen)*> Neg for $node {
            type Output = Unary<Self, Negate>;

            #[inline]
            fn neg(self) -> Self::Output {
                Unary::new(self)
            }
        }
    };
}

impl_expression_ops!([A, S] Bind<A, S>);
impl_expression_ops!([A, B, Op] Sum<A, B, Op>);
impl_expression_ops!([A, B, Op, R] Product<A, B, Op, R>);
impl_expression_ops!([A, Op] Unary<A, Op>);

// `2.0 * expr`: the scalar is the left operand of the product.
macro_rules! impl_scalar_mul {
    (@node $scalar:ty, [$($gen:ident),*] $node:ty) => {
        impl<$($gen),*> Mul<$node> for $scalar
        where
            $node: Tensor,
        {
            type Output = Product<$scalar, $node>;

            #[inline]
            fn mul(self, rhs: $node) -> Self::Output {
                Product::new(self, rhs)
            }
        }
    };
    ($($scalar:ty),* $(,)?) => {
        $(
            impl_scalar_mul!(@node $scalar, [A, S] Bind<A, S>);
            impl_scalar_mul!(@node $scalar, [A, B, Op] Sum<A, B, Op>);
            impl_scalar_mul!(@node $scalar, [A, B, Op, R] Product<A, B, Op, R>);
            impl_scalar_mul!(@node $scalar, [A, Op] Unary<A, Op>);
        )*
    };
}

impl_scalar_mul!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, f16, bf16,
);

// Compound assignment is `lhs = lhs op rhs`, evaluated element by element.
macro_rules! impl_compound_assign {
    ([$($gen:tt)*] $node:ty) => {
        impl<$($gen)*, Rhs> ShlAssign<Rhs> for $node
        where
            $node: TensorMut,
            Rhs: Tensor,
            Rhs::Scalar: Into<<$node as Tensor>::Scalar>,
        {
            fn shl_assign(&mut self, rhs: Rhs) {
                assign(self, &rhs);
            }
        }

        impl<$($gen)*, Rhs> AddAssign<Rhs> for $node
        where
            $node: TensorMut,
            Rhs: Tensor,
            <$node as Tensor>::Scalar: Add<Rhs::Scalar, Output = <$node as Tensor>::Scalar>,
        {
            fn add_assign(&mut self, rhs: Rhs) {
                assign_with(self, &rhs, |dst, src| *dst = *dst + src);
            }
        }

        impl<$($gen)*, Rhs> SubAssign<Rhs> for $node
        where
            $node: TensorMut,
            Rhs: Tensor,
            <$node as Tensor>::Scalar: Sub<Rhs::Scalar, Output = <$node as Tensor>::Scalar>,
        {
            fn sub_assign(&mut self, rhs: Rhs) {
                assign_with(self, &rhs, |dst, src| *dst = *dst - src);
            }
        }

        impl<$($gen)*, Rhs> MulAssign<Rhs> for $node
        where
            $node: TensorMut,
            Rhs: Tensor,
            <$node as Tensor>::Scalar: Mul<Rhs::Scalar, Output = <$node as Tensor>::Scalar>,
        {
            fn mul_assign(&mut self, rhs: Rhs) {
                const { assert!(Rhs::RANK == 0, "scaling requires a rank-0 factor") };
                let factor = rhs.evaluate(&[]);
                update(self, |dst| *dst = *dst * factor);
            }
        }
    };
}

impl_compound_assign!([A, S] Bind<A, S>);
impl_compound_assign!(['a, T, const R: usize, S: StaticShape] TensorSpanMut<'a, T, R, S>);

#[cfg(test)]
mod tests {
    use crate::index::Idx;
    use crate::shape::Fixed;
    use crate::tensor::{Tensor, TensorExt, TensorSpanMut};
    use crate::tree::bind;

    const I: Idx<'i'> = Idx;
    const J: Idx<'j'> = Idx;
    const K: Idx<'k'> = Idx;

    #[test]
    fn test_operators_build_trees() {
        let a = [[1, 2], [4, 3]];
        let x = [1, 2];
        let y = bind(&a, (I, J)) * bind(&x, J);
        assert_eq!(y.evaluate(&[0]), 5);
        assert_eq!(y.evaluate(&[1]), 10);

        let z = bind(&x, I) + bind(&x, I) - bind(&x, I);
        assert_eq!(z.evaluate(&[1]), 2);

        let n = -bind(&x, I);
        assert_eq!(n.evaluate(&[0]), -1);
    }

    #[test]
    fn test_scalar_on_the_left() {
        let x = [1.0f64, 2.0];
        let y = 2.0f64 * bind(&x, I);
        assert_eq!(y.evaluate(&[1]), 4.0);
        let v = [1i64, 2];
        let w = 3i64 * -bind(&v, I);
        assert_eq!(w.evaluate(&[1]), -6);
    }

    #[test]
    fn test_nested_contraction() {
        // x(i) A(i,j) y(j)
        let a = [[1, 2], [3, 4]];
        let x = [1, 1];
        let y = [1, 2];
        let q = bind(&x, I) * bind(&a, (I, J)) * bind(&y, J);
        assert_eq!(q.value(), (1 + 3) + 2 * (2 + 4));
    }

    #[test]
    fn test_rebound_sum() {
        let a = [[1, 2], [3, 4]];
        let b = [[10, 20], [30, 40]];
        let t = bind(bind(&a, (I, J)) + bind(&b, (I, J)), (K, K));
        assert_eq!(t.value(), 11 + 44);
    }

    #[test]
    fn test_shl_assign() {
        let src = [[1, 2], [3, 4]];
        let mut dst = [[0; 2]; 2];
        {
            let mut d = bind(&mut dst, (I, J));
            d <<= bind(&src, (J, I));
        }
        assert_eq!(dst, [[1, 3], [2, 4]]);
    }

    #[test]
    fn test_compound_assign() {
        let x = [1, 2, 3];
        let mut y = [10, 20, 30];
        {
            let mut b = bind(&mut y, I);
            b += bind(&x, I);
            b -= 2i32 * bind(&x, I);
            b *= 3i32;
        }
        assert_eq!(y, [27, 54, 81]);
    }

    #[test]
    fn test_span_compound_assign() {
        let mut storage = [1.0f32, 2.0, 3.0, 4.0];
        let src = [[1.0f32, 1.0], [1.0, 1.0]];
        {
            let mut span = TensorSpanMut::new(&mut storage, [2, 2]);
            span += &src;
            span *= 0.5f32;
        }
        assert_eq!(storage, [1.0, 1.5, 2.0, 2.5]);
    }

    #[test]
    fn test_shaped_span_assign() {
        let mut storage = [0; 6];
        let src = [[1, 2, 3], [4, 5, 6]];
        {
            let mut span =
                TensorSpanMut::<_, 2, (Fixed<2>, Fixed<3>)>::with_shape(&mut storage, [2, 3]);
            span <<= &src;
        }
        assert_eq!(storage, [1, 2, 3, 4, 5, 6]);
    }
}
