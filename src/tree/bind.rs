//! The bind node: a tensor labelled with an index string.

use core::fmt;

use num_traits::Zero;
use tracing::{debug, trace};

use super::node::{Pack, Phase, pack_from};
use crate::error::{TensorResult, check};
use crate::index::{Index, IndexMap, IndexString, Indices, IntoIndex, MAX_INDICES};
use crate::shape::{
    Extents, Shape, check_contracted_extents, check_projected_offsets,
    contracted_shape_compatible,
};
use crate::tensor::{Element, Tensor, TensorMut};

/// Binds `tensor` to an index label.
///
/// Every axis of the tensor takes one entry of `indices`: a named index such
/// as `Idx<'i'>`, or an integer offset that pins the axis (a projection).
/// Named indices appearing twice are summed over.
///
/// ```
/// use cubek_ttl::{Idx, Tensor, TensorExt, bind};
///
/// const I: Idx<'i'> = Idx;
/// const J: Idx<'j'> = Idx;
///
/// let a = [[1, 2], [3, 4]];
/// let x = [1, 1];
///
/// assert_eq!(bind(&a, (I, I)).value(), 5);
/// let column = bind(&a, (I, 1usize));
/// assert_eq!(column.evaluate(&[1]), 4);
/// let y = bind(&a, (I, J)) * bind(&x, J);
/// assert_eq!(y.evaluate(&[0]), 3);
/// ```
///
/// The label needs one entry per axis:
///
/// ```compile_fail
/// use cubek_ttl::{Idx, bind};
///
/// const I: Idx<'i'> = Idx;
///
/// let a = [[1, 2], [3, 4]];
/// let _ = bind(&a, I);
/// ```
///
/// A symbol may appear at most twice:
///
/// ```compile_fail
/// use cubek_ttl::{Idx, bind};
///
/// const I: Idx<'i'> = Idx;
///
/// let a = [[[0; 2]; 2]; 2];
/// let _ = bind(&a, (I, I, I));
/// ```
///
/// Axes summed together must have compatible static extents:
///
/// ```compile_fail
/// use cubek_ttl::{Idx, bind};
///
/// const I: Idx<'i'> = Idx;
///
/// let a = [[0; 2]; 3];
/// let _ = bind(&a, (I, I));
/// ```
pub fn bind<A: Tensor, I: IntoIndex>(tensor: A, indices: I) -> Bind<A, I::Indices> {
    Bind::new(tensor, indices)
}

/// A tensor bound to the index label `S`.
///
/// The result is indexed by the outer indices of `S`, in order. Contracted
/// indices are summed and projected axes are fixed at their offsets.
pub struct Bind<A, S> {
    tensor: A,
    index: Index<S>,
    outer: Extents,
    inner: Extents,
}

impl<A: Tensor, S: Indices> Bind<A, S> {
    /// The full label, one symbol per tensor axis.
    pub const INDEX: IndexString = S::STRING;
    pub const OUTER: IndexString = S::STRING.outer();
    /// Outer followed by contracted indices.
    pub const INNER: IndexString = S::STRING.inner();
    /// Outer, contracted and projected indices: the evaluation order.
    pub const ALL: IndexString = S::STRING.all();

    const TO_TENSOR: IndexMap = IndexMap::new(&Self::ALL, &Self::INDEX);
    const TO_OUTER: IndexMap = IndexMap::new(&Self::INDEX, &Self::OUTER);
    const TO_INNER: IndexMap = IndexMap::new(&Self::INDEX, &Self::INNER);

    const WELL_FORMED: () = {
        assert!(
            Self::INDEX.is_well_formed(),
            "an index symbol may appear at most twice"
        );
        assert!(
            A::RANK == Self::INDEX.len(),
            "a bind needs exactly one index per tensor axis"
        );
        assert!(
            contracted_shape_compatible(&Self::INDEX, &A::SHAPE),
            "contracted axes have incompatible static extents"
        );
    };

    /// Creates the node.
    ///
    /// Contracted extents and projected offsets are checked when runtime
    /// checks are enabled.
    pub fn new<I: IntoIndex<Indices = S>>(tensor: A, indices: I) -> Self {
        let () = Self::WELL_FORMED;
        let index = indices.into_index();
        let extents = tensor.extents();
        check!(Self::validate(&index, &extents));
        Self::assemble(tensor, index, &extents)
    }

    /// Creates the node, always checking contracted extents and projected
    /// offsets.
    pub fn try_new<I: IntoIndex<Indices = S>>(tensor: A, indices: I) -> TensorResult<Self> {
        let () = Self::WELL_FORMED;
        let index = indices.into_index();
        let extents = tensor.extents();
        if let Err(err) = Self::validate(&index, &extents) {
            debug!(index = %Self::INDEX, %err, "rejected bind");
            return Err(err);
        }
        Ok(Self::assemble(tensor, index, &extents))
    }

    fn validate(index: &Index<S>, extents: &Extents) -> TensorResult<()> {
        check_contracted_extents(&Self::INDEX, extents)?;
        check_projected_offsets(&Self::INDEX, index.offsets(), extents)
    }

    fn assemble(tensor: A, index: Index<S>, extents: &Extents) -> Self {
        let bind = Self {
            tensor,
            index,
            outer: extents.select(&Self::TO_OUTER),
            inner: extents.select(&Self::TO_INNER),
        };
        if !Self::INDEX.contracted().is_empty() {
            trace!(
                index = %Self::INDEX,
                extents = ?bind.inner.dims(),
                "bound contraction"
            );
        }
        bind
    }

    /// The outer indices, which label the axes of the result.
    pub fn outer(&self) -> IndexString {
        Self::OUTER
    }

    pub fn index(&self) -> &Index<S> {
        &self.index
    }

    pub fn tensor(&self) -> &A {
        &self.tensor
    }

    pub fn into_inner(self) -> A {
        self.tensor
    }
}

impl<A, S> Bind<A, S>
where
    A: Tensor,
    A::Scalar: Element,
    S: Indices,
{
    // `pack` holds `supplied` indices in `ALL` order.
    fn evaluate_from(&self, pack: &mut Pack, supplied: usize) -> A::Scalar {
        match Phase::select(supplied, Self::INNER.len(), Self::ALL.len()) {
            Phase::Remap => {
                let mut native = [0; MAX_INDICES];
                Self::TO_TENSOR.gather(pack, &mut native);
                self.tensor.evaluate(&native[..Self::INDEX.len()])
            }
            Phase::Project => {
                pack[Self::INNER.len()..Self::ALL.len()].copy_from_slice(self.index.offsets());
                self.evaluate_from(pack, Self::ALL.len())
            }
            Phase::Accumulate => {
                let mut acc = A::Scalar::zero();
                for i in 0..self.inner.extent(supplied) {
                    pack[supplied] = i;
                    acc = acc + self.evaluate_from(pack, supplied + 1);
                }
                acc
            }
        }
    }
}

impl<A, S> Tensor for Bind<A, S>
where
    A: Tensor,
    A::Scalar: Element,
    S: Indices,
{
    type Scalar = A::Scalar;
    const SHAPE: Shape = A::SHAPE.select(&Self::TO_OUTER);
    const LABEL: Option<IndexString> = Some(Self::OUTER);

    fn extents(&self) -> Extents {
        self.outer
    }

    fn evaluate(&self, index: &[usize]) -> A::Scalar {
        check!(self.outer.check_bounds(index));
        let mut pack = pack_from(index);
        self.evaluate_from(&mut pack, index.len())
    }
}

impl<A, S> TensorMut for Bind<A, S>
where
    A: TensorMut,
    A::Scalar: Element,
    S: Indices,
{
    fn evaluate_mut(&mut self, index: &[usize]) -> &mut A::Scalar {
        const {
            assert!(
                S::STRING.contracted().is_empty(),
                "cannot write through a contracted index"
            )
        };
        check!(self.outer.check_bounds(index));
        let mut pack = pack_from(index);
        pack[Self::INNER.len()..Self::ALL.len()].copy_from_slice(self.index.offsets());
        let mut native = [0; MAX_INDICES];
        Self::TO_TENSOR.gather(&pack, &mut native);
        self.tensor.evaluate_mut(&native[..Self::INDEX.len()])
    }
}

impl<A: Clone, S> Clone for Bind<A, S> {
    fn clone(&self) -> Self {
        Self {
            tensor: self.tensor.clone(),
            index: self.index,
            outer: self.outer,
            inner: self.inner,
        }
    }
}

impl<A: Copy, S> Copy for Bind<A, S> {}

impl<A: Tensor + fmt::Debug, S: Indices> fmt::Debug for Bind<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bind")
            .field("index", &Self::INDEX)
            .field("offsets", &self.index.offsets())
            .field("extents", &self.outer)
            .field("tensor", &self.tensor)
            .finish()
    }
}
