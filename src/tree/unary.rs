use core::fmt;
use core::marker::PhantomData;

use super::op::{Identity, UnaryOp};
use crate::index::IndexString;
use crate::shape::{Extents, Shape};
use crate::tensor::Tensor;

/// An elementwise transformation of one expression.
///
/// Labels, shape and extents are those of the operand.
pub struct Unary<A, Op> {
    a: A,
    _op: PhantomData<Op>,
}

impl<A, Op> Unary<A, Op> {
    pub fn new(a: A) -> Self {
        Self {
            a,
            _op: PhantomData,
        }
    }

    pub fn operand(&self) -> &A {
        &self.a
    }
}

/// Wraps an expression without changing its values.
pub fn identity<A: Tensor>(a: A) -> Unary<A, Identity> {
    Unary::new(a)
}

impl<A, Op> Tensor for Unary<A, Op>
where
    A: Tensor,
    Op: UnaryOp<A::Scalar>,
{
    type Scalar = Op::Output;
    const SHAPE: Shape = A::SHAPE;
    const LABEL: Option<IndexString> = A::LABEL;

    #[inline]
    fn extents(&self) -> Extents {
        self.a.extents()
    }

    #[inline]
    fn evaluate(&self, index: &[usize]) -> Op::Output {
        Op::apply(self.a.evaluate(index))
    }
}

impl<A: Clone, Op> Clone for Unary<A, Op> {
    fn clone(&self) -> Self {
        Self::new(self.a.clone())
    }
}

impl<A: Copy, Op> Copy for Unary<A, Op> {}

impl<A: fmt::Debug, Op> fmt::Debug for Unary<A, Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unary")
            .field("op", &core::any::type_name::<Op>())
            .field("a", &self.a)
            .finish()
    }
}
