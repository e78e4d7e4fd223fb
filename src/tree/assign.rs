//! Element-by-element assignment of one tensor into another.

use core::marker::PhantomData;

use tracing::{debug, trace};

use super::node::Pack;
use crate::error::{TensorResult, check};
use crate::index::{IndexMap, MAX_INDICES, is_permutation};
use crate::shape::Extents;
use crate::tensor::{Tensor, TensorMut};

/// Index translation between a destination `A` and a source `B`.
struct Plan<A: ?Sized, B: ?Sized>(PhantomData<A>, PhantomData<B>);

impl<A: Tensor + ?Sized, B: Tensor + ?Sized> Plan<A, B> {
    const SAME_RANK: () = assert!(
        A::RANK == B::RANK,
        "assignment requires operands of the same rank"
    );

    /// `(to_source, to_destination)` when both sides are labelled.
    ///
    /// `to_source` turns a destination index into a source index.
    /// `to_destination` lists the source axes in destination order.
    const PERMUTE: Option<(IndexMap, IndexMap)> = match (A::LABEL, B::LABEL) {
        (Some(a), Some(b)) => {
            assert!(
                is_permutation(&a, &b),
                "assigned expressions must have the same outer indices"
            );
            Some((IndexMap::new(&a, &b), IndexMap::new(&b, &a)))
        }
        _ => None,
    };

    const COMPATIBLE: () = {
        let () = Self::SAME_RANK;
        let source = match Self::PERMUTE {
            Some((_, to_destination)) => B::SHAPE.select(&to_destination),
            None => B::SHAPE,
        };
        assert!(
            A::SHAPE.is_compatible(&source),
            "assigned expressions have incompatible static extents"
        );
    };

    fn source_extents(src: &B) -> Extents {
        match Self::PERMUTE {
            Some((_, to_destination)) => src.extents().select(&to_destination),
            None => src.extents(),
        }
    }

    #[inline]
    fn source_value(src: &B, index: &[usize]) -> B::Scalar {
        match Self::PERMUTE {
            Some((to_source, _)) => {
                let mut permuted = [0; MAX_INDICES];
                to_source.gather(index, &mut permuted);
                src.evaluate(&permuted[..index.len()])
            }
            None => src.evaluate(index),
        }
    }
}

/// Calls `f` on every index of `extents`, last axis fastest.
pub(crate) fn visit<F: FnMut(&[usize])>(extents: &Extents, mut f: F) {
    let mut index: Pack = [0; MAX_INDICES];
    visit_axis(extents, &mut index, 0, &mut f);
}

fn visit_axis<F: FnMut(&[usize])>(extents: &Extents, index: &mut Pack, axis: usize, f: &mut F) {
    if axis == extents.rank() {
        f(&index[..axis]);
        return;
    }
    for i in 0..extents.extent(axis) {
        index[axis] = i;
        visit_axis(extents, index, axis + 1, f);
    }
}

/// Writes `src` into `dst`.
///
/// When both sides are bound to indices, elements are matched by index
/// symbol, so `bind(&mut c, (I, J)) <<= bind(&a, (J, I))` transposes.
/// Otherwise elements are matched by position.
///
/// Requires equal ranks and compatible static extents (checked while
/// compiling) and equal runtime extents (checked when runtime checks are
/// enabled).
///
/// ```
/// use cubek_ttl::{Idx, assign, bind};
///
/// const I: Idx<'i'> = Idx;
/// const J: Idx<'j'> = Idx;
///
/// let a = [[1, 2, 3], [4, 5, 6]];
/// let mut t = [[0; 2]; 3];
/// assign(&mut bind(&mut t, (J, I)), &bind(&a, (I, J)));
/// assert_eq!(t, [[1, 4], [2, 5], [3, 6]]);
/// ```
///
/// Ranks must match:
///
/// ```compile_fail
/// use cubek_ttl::assign;
///
/// let mut v = [0; 2];
/// assign(&mut v, &[[1, 2], [3, 4]]);
/// ```
///
/// Static extents must agree, by position for plain storage:
///
/// ```compile_fail
/// use cubek_ttl::assign;
///
/// let mut m = [[0; 3]; 3];
/// assign(&mut m, &[[1, 2], [3, 4]]);
/// ```
///
/// and by index symbol for labelled expressions:
///
/// ```compile_fail
/// use cubek_ttl::{Idx, bind};
///
/// const I: Idx<'i'> = Idx;
/// const J: Idx<'j'> = Idx;
///
/// let a = [[1, 2, 3], [4, 5, 6]];
/// let mut same_layout = [[0; 3]; 2];
/// let mut dst = bind(&mut same_layout, (J, I));
/// dst <<= bind(&a, (I, J));
/// ```
///
/// Both sides must carry the same outer indices:
///
/// ```compile_fail
/// use cubek_ttl::{Idx, bind};
///
/// const I: Idx<'i'> = Idx;
/// const J: Idx<'j'> = Idx;
///
/// let x = [1, 2];
/// let mut y = [0; 2];
/// let mut dst = bind(&mut y, I);
/// dst <<= bind(&x, J);
/// ```
pub fn assign<A, B>(dst: &mut A, src: &B)
where
    A: TensorMut + ?Sized,
    B: Tensor + ?Sized,
    B::Scalar: Into<A::Scalar>,
{
    assign_with(dst, src, |d, s| *d = s.into());
}

/// Like [`assign`], returning an error instead of panicking on mismatched
/// extents, in every build.
pub fn try_assign<A, B>(dst: &mut A, src: &B) -> TensorResult<()>
where
    A: TensorMut + ?Sized,
    B: Tensor + ?Sized,
    B::Scalar: Into<A::Scalar>,
{
    let () = Plan::<A, B>::COMPATIBLE;
    let extents = dst.extents();
    if let Err(err) = extents.check_compatible(&Plan::<A, B>::source_extents(src)) {
        debug!(%err, "rejected assignment");
        return Err(err);
    }
    run(dst, src, &extents, |d, s| *d = s.into());
    Ok(())
}

/// Combines every element of `src` into the matching element of `dst`.
///
/// `combine` receives the destination element and the source value. Element
/// matching follows [`assign`].
pub fn assign_with<A, B, F>(dst: &mut A, src: &B, combine: F)
where
    A: TensorMut + ?Sized,
    B: Tensor + ?Sized,
    F: FnMut(&mut A::Scalar, B::Scalar),
{
    let () = Plan::<A, B>::COMPATIBLE;
    let extents = dst.extents();
    check!(extents.check_compatible(&Plan::<A, B>::source_extents(src)));
    run(dst, src, &extents, combine);
}

fn run<A, B, F>(dst: &mut A, src: &B, extents: &Extents, mut combine: F)
where
    A: TensorMut + ?Sized,
    B: Tensor + ?Sized,
    F: FnMut(&mut A::Scalar, B::Scalar),
{
    trace!(
        extents = ?extents.dims(),
        permuted = Plan::<A, B>::PERMUTE.is_some(),
        "assign"
    );
    visit(extents, |index| {
        let value = Plan::<A, B>::source_value(src, index);
        combine(dst.evaluate_mut(index), value);
    });
}

/// Applies `f` to every element of `dst`.
pub fn update<A, F>(dst: &mut A, mut f: F)
where
    A: TensorMut + ?Sized,
    F: FnMut(&mut A::Scalar),
{
    let extents = dst.extents();
    visit(&extents, |index| f(dst.evaluate_mut(index)));
}
