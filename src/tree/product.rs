//! Products of two expressions, contracting shared indices.

use core::fmt;
use core::marker::PhantomData;

use tracing::{debug, trace};

use super::node::{Pack, label_of, pack_from};
use super::op::{BinaryOp, Plus, ReduceOp, Times};
use crate::error::{TensorResult, check};
use crate::index::{IndexMap, IndexString, MAX_INDICES, PROJECTED};
use crate::shape::{Extents, Shape, check_contracted_extents, contracted_shape_compatible};
use crate::tensor::Tensor;

/// `A * B` with Einstein summation.
///
/// Indices appearing in both operands are summed over with `Reduce`; the
/// remaining indices, in the order `A` then `B`, label the result.
///
/// ```
/// use cubek_ttl::{Idx, Tensor, bind};
///
/// const I: Idx<'i'> = Idx;
/// const J: Idx<'j'> = Idx;
///
/// // y(i) = A(i, j) x(j)
/// let a = [[1, 2], [3, 4]];
/// let x = [1, 1];
/// let y = bind(&a, (I, J)) * bind(&x, J);
/// assert_eq!(y.evaluate(&[1]), 7);
///
/// // outer product C(i, j) = u(i) v(j)
/// let u = [1, 2];
/// let v = [3, 4, 5];
/// let c = bind(&u, I) * bind(&v, J);
/// assert_eq!(c.evaluate(&[1, 2]), 10);
/// ```
///
/// Contracted axes whose static extents disagree do not compile:
///
/// ```compile_fail
/// use cubek_ttl::{Idx, bind};
///
/// const I: Idx<'i'> = Idx;
///
/// let x = [1, 2];
/// let y = [1, 2, 3];
/// let _ = bind(&x, I) * bind(&y, I);
/// ```
///
/// Neither does an operand whose label still carries a projected axis:
///
/// ```compile_fail
/// use cubek_ttl::{Extents, Idx, IndexString, Product, Shape, Tensor, bind};
///
/// struct Pinned;
///
/// impl Tensor for Pinned {
///     type Scalar = i32;
///     const SHAPE: Shape = Shape::dynamic(1);
///     const LABEL: Option<IndexString> = Some(IndexString::new("*"));
///
///     fn extents(&self) -> Extents {
///         Extents::dynamic(&[2])
///     }
///
///     fn evaluate(&self, _index: &[usize]) -> i32 {
///         1
///     }
/// }
///
/// const I: Idx<'i'> = Idx;
///
/// let x = [1, 2];
/// let _ = Product::<_, _>::new(bind(&x, I), Pinned);
/// ```
pub struct Product<A, B, Op = Times, Reduce = Plus> {
    a: A,
    b: B,
    outer: Extents,
    inner: Extents,
    _op: PhantomData<(Op, Reduce)>,
}

impl<A: Tensor, B: Tensor, Op, Reduce> Product<A, B, Op, Reduce> {
    const OUTER_A: IndexString = label_of(A::LABEL);
    const OUTER_B: IndexString = label_of(B::LABEL);
    const OUTER_AB: IndexString = Self::OUTER_A.concat(&Self::OUTER_B);

    pub const OUTER: IndexString = Self::OUTER_AB.outer();
    /// Outer followed by contracted indices: the evaluation order.
    pub const INNER: IndexString = Self::OUTER_AB.inner();

    const MAP_A: IndexMap = IndexMap::new(&Self::INNER, &Self::OUTER_A);
    const MAP_B: IndexMap = IndexMap::new(&Self::INNER, &Self::OUTER_B);
    const TO_OUTER: IndexMap = IndexMap::new(&Self::OUTER_AB, &Self::OUTER);
    const TO_INNER: IndexMap = IndexMap::new(&Self::OUTER_AB, &Self::INNER);

    const WELL_FORMED: () = {
        assert!(
            Self::OUTER_AB.count(PROJECTED) == 0,
            "projected indices must be bound before multiplying"
        );
        assert!(
            Self::OUTER_AB.is_well_formed(),
            "an index symbol may appear at most twice"
        );
        assert!(
            contracted_shape_compatible(&Self::OUTER_AB, &A::SHAPE.concat(&B::SHAPE)),
            "contracted axes have incompatible static extents"
        );
    };

    pub fn new(a: A, b: B) -> Self {
        let () = Self::WELL_FORMED;
        let extents = a.extents().concat(&b.extents());
        check!(check_contracted_extents(&Self::OUTER_AB, &extents));
        Self::assemble(a, b, &extents)
    }

    /// Creates the node, always checking the extents of contracted axes.
    pub fn try_new(a: A, b: B) -> TensorResult<Self> {
        let () = Self::WELL_FORMED;
        let extents = a.extents().concat(&b.extents());
        if let Err(err) = check_contracted_extents(&Self::OUTER_AB, &extents) {
            debug!(index = %Self::OUTER_AB, %err, "rejected product");
            return Err(err);
        }
        Ok(Self::assemble(a, b, &extents))
    }

    fn assemble(a: A, b: B, extents: &Extents) -> Self {
        let product = Self {
            a,
            b,
            outer: extents.select(&Self::TO_OUTER),
            inner: extents.select(&Self::TO_INNER),
            _op: PhantomData,
        };
        if Self::INNER.len() > Self::OUTER.len() {
            trace!(
                index = %Self::OUTER_AB,
                extents = ?product.inner.dims(),
                "bound contraction"
            );
        }
        product
    }

    pub fn outer(&self) -> IndexString {
        Self::OUTER
    }

    pub fn operands(&self) -> (&A, &B) {
        (&self.a, &self.b)
    }
}

impl<A, B, Op, Reduce> Product<A, B, Op, Reduce>
where
    A: Tensor,
    B: Tensor,
    Op: BinaryOp<A::Scalar, B::Scalar>,
    Reduce: ReduceOp<Op::Output>,
{
    // `pack` holds `supplied` indices in `INNER` order.
    fn evaluate_from(&self, pack: &mut Pack, supplied: usize) -> Op::Output {
        if supplied == Self::INNER.len() {
            let mut index_a = [0; MAX_INDICES];
            let mut index_b = [0; MAX_INDICES];
            Self::MAP_A.gather(pack, &mut index_a);
            Self::MAP_B.gather(pack, &mut index_b);
            return Op::apply(
                self.a.evaluate(&index_a[..Self::OUTER_A.len()]),
                self.b.evaluate(&index_b[..Self::OUTER_B.len()]),
            );
        }

        let mut acc = Reduce::identity();
        for i in 0..self.inner.extent(supplied) {
            pack[supplied] = i;
            acc = Reduce::reduce(acc, self.evaluate_from(pack, supplied + 1));
        }
        acc
    }
}

impl<A, B, Op, Reduce> Tensor for Product<A, B, Op, Reduce>
where
    A: Tensor,
    B: Tensor,
    Op: BinaryOp<A::Scalar, B::Scalar>,
    Reduce: ReduceOp<Op::Output>,
{
    type Scalar = Op::Output;
    const SHAPE: Shape = A::SHAPE.concat(&B::SHAPE).select(&Self::TO_OUTER);
    const LABEL: Option<IndexString> = Some(Self::OUTER);

    fn extents(&self) -> Extents {
        self.outer
    }

    fn evaluate(&self, index: &[usize]) -> Op::Output {
        check!(self.outer.check_bounds(index));
        let mut pack = pack_from(index);
        self.evaluate_from(&mut pack, index.len())
    }
}

impl<A: Clone, B: Clone, Op, Reduce> Clone for Product<A, B, Op, Reduce> {
    fn clone(&self) -> Self {
        Self {
            a: self.a.clone(),
            b: self.b.clone(),
            outer: self.outer,
            inner: self.inner,
            _op: PhantomData,
        }
    }
}

impl<A: Copy, B: Copy, Op, Reduce> Copy for Product<A, B, Op, Reduce> {}

impl<A: fmt::Debug, B: fmt::Debug, Op, Reduce> fmt::Debug for Product<A, B, Op, Reduce> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Product")
            .field("extents", &self.outer)
            .field("a", &self.a)
            .field("b", &self.b)
            .finish()
    }
}
