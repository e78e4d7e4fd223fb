//! Elementwise combination of two expressions over the same outer indices.

use core::fmt;
use core::marker::PhantomData;

use tracing::debug;

use super::node::label_of;
use super::op::BinaryOp;
use crate::error::{TensorResult, check};
use crate::index::{IndexMap, IndexString, MAX_INDICES, is_permutation};
use crate::shape::{Extents, Shape};
use crate::tensor::Tensor;

/// `A op B`, evaluated pointwise.
///
/// Both operands must carry the same outer indices, in any order. The result
/// is indexed in the order of `A`; `B` is evaluated at the permuted index.
///
/// ```
/// use cubek_ttl::{Idx, Tensor, bind};
///
/// const I: Idx<'i'> = Idx;
/// const J: Idx<'j'> = Idx;
///
/// let a = [[1, 2], [3, 4]];
/// let b = vec![vec![10, 20], vec![30, 40]];
/// let s = bind(&a, (I, J)) + bind(&b, (J, I));
/// assert_eq!(s.evaluate(&[0, 1]), 32);
/// ```
///
/// Operands over different indices do not compile:
///
/// ```compile_fail
/// use cubek_ttl::{Idx, bind};
///
/// const I: Idx<'i'> = Idx;
/// const J: Idx<'j'> = Idx;
///
/// let x = [1, 2];
/// let _ = bind(&x, I) + bind(&x, J);
/// ```
///
/// Neither do operands whose static extents disagree:
///
/// ```compile_fail
/// use cubek_ttl::{Idx, bind};
///
/// const I: Idx<'i'> = Idx;
/// const J: Idx<'j'> = Idx;
///
/// let a = [[1, 2], [3, 4]];
/// let b = [[0; 3]; 3];
/// let _ = bind(&a, (I, J)) + bind(&b, (I, J));
/// ```
pub struct Sum<A, B, Op> {
    a: A,
    b: B,
    _op: PhantomData<Op>,
}

impl<A: Tensor, B: Tensor, Op> Sum<A, B, Op> {
    pub const OUTER: IndexString = label_of(A::LABEL);
    const OUTER_B: IndexString = label_of(B::LABEL);

    // Index pack in A order to index pack in B order.
    const MAP_AB: IndexMap = IndexMap::new(&Self::OUTER, &Self::OUTER_B);
    // Axes of B in A order.
    const MAP_BA: IndexMap = IndexMap::new(&Self::OUTER_B, &Self::OUTER);

    const WELL_FORMED: () = {
        assert!(
            is_permutation(&Self::OUTER, &Self::OUTER_B),
            "summed expressions must have the same outer indices"
        );
        assert!(
            A::SHAPE.is_compatible(&B::SHAPE.select(&Self::MAP_BA)),
            "summed expressions have incompatible static extents"
        );
    };

    pub fn new(a: A, b: B) -> Self {
        let () = Self::WELL_FORMED;
        check!(Self::validate(&a, &b));
        Self {
            a,
            b,
            _op: PhantomData,
        }
    }

    /// Creates the node, always checking that the extents agree.
    pub fn try_new(a: A, b: B) -> TensorResult<Self> {
        let () = Self::WELL_FORMED;
        if let Err(err) = Self::validate(&a, &b) {
            debug!(outer = %Self::OUTER, %err, "rejected sum");
            return Err(err);
        }
        Ok(Self {
            a,
            b,
            _op: PhantomData,
        })
    }

    fn validate(a: &A, b: &B) -> TensorResult<()> {
        a.extents()
            .check_compatible(&b.extents().select(&Self::MAP_BA))
    }

    pub fn outer(&self) -> IndexString {
        Self::OUTER
    }

    pub fn operands(&self) -> (&A, &B) {
        (&self.a, &self.b)
    }
}

impl<A, B, Op> Tensor for Sum<A, B, Op>
where
    A: Tensor,
    B: Tensor,
    Op: BinaryOp<A::Scalar, B::Scalar>,
{
    type Scalar = Op::Output;
    const SHAPE: Shape = A::SHAPE.merge(&B::SHAPE.select(&Self::MAP_BA));
    const LABEL: Option<IndexString> = Some(Self::OUTER);

    fn extents(&self) -> Extents {
        self.a
            .extents()
            .merge(&self.b.extents().select(&Self::MAP_BA))
    }

    #[inline]
    fn evaluate(&self, index: &[usize]) -> Op::Output {
        let mut permuted = [0; MAX_INDICES];
        Self::MAP_AB.gather(index, &mut permuted);
        Op::apply(
            self.a.evaluate(index),
            self.b.evaluate(&permuted[..index.len()]),
        )
    }
}

impl<A: Clone, B: Clone, Op> Clone for Sum<A, B, Op> {
    fn clone(&self) -> Self {
        Self {
            a: self.a.clone(),
            b: self.b.clone(),
            _op: PhantomData,
        }
    }
}

impl<A: Copy, B: Copy, Op> Copy for Sum<A, B, Op> {}

impl<A: fmt::Debug, B: fmt::Debug, Op> fmt::Debug for Sum<A, B, Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sum")
            .field("op", &core::any::type_name::<Op>())
            .field("a", &self.a)
            .field("b", &self.b)
            .finish()
    }
}
