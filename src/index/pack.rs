//! Index values: labels plus the offsets of their projected axes.

use core::fmt;
use core::marker::PhantomData;

use super::string::{MAX_INDICES, PROJECTED};
use super::symbol::{Cat, Empty, Idx, Indices, Projected};

/// A bound index label.
///
/// The label `S` is known at compile time. The only runtime data is one offset
/// per projected axis, in order of occurrence in `S::STRING`.
pub struct Index<S> {
    offsets: [usize; MAX_INDICES],
    _label: PhantomData<S>,
}

impl<S: Indices> Index<S> {
    /// Number of projected axes in the label.
    pub const PROJECTED_AXES: usize = S::STRING.count(PROJECTED);

    /// An index whose projected axes (if any) are all at offset zero.
    pub const fn new() -> Self {
        Self {
            offsets: [0; MAX_INDICES],
            _label: PhantomData,
        }
    }

    /// The projected offsets, in occurrence order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets[..Self::PROJECTED_AXES]
    }

    /// Concatenates two index values.
    pub fn concat<T: Indices>(self, other: Index<T>) -> Index<Cat<S, T>> {
        let mut out = Index::<Cat<S, T>>::new();
        let n = Self::PROJECTED_AXES;
        out.offsets[..n].copy_from_slice(self.offsets());
        out.offsets[n..n + Index::<T>::PROJECTED_AXES].copy_from_slice(other.offsets());
        out
    }
}

impl Index<Projected> {
    /// An index projecting a single axis onto `offset`.
    pub const fn projected(offset: usize) -> Self {
        let mut offsets = [0; MAX_INDICES];
        offsets[0] = offset;
        Self {
            offsets,
            _label: PhantomData,
        }
    }
}

impl<S: Indices> Default for Index<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for Index<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Index<S> {}

impl<S: Indices> PartialEq for Index<S> {
    fn eq(&self, other: &Self) -> bool {
        self.offsets() == other.offsets()
    }
}

impl<S: Indices> Eq for Index<S> {}

impl<S: Indices> fmt::Debug for Index<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("label", &S::STRING)
            .field("offsets", &self.offsets())
            .finish()
    }
}

/// Conversion into a bound index.
///
/// Implemented for named labels (`Idx<'i'>`), for `usize` (a projected axis at
/// that offset), for `()` (no axes) and for tuples, which concatenate their
/// elements left to right.
pub trait IntoIndex {
    type Indices: Indices;

    fn into_index(self) -> Index<Self::Indices>;
}

impl<S: Indices> IntoIndex for Index<S> {
    type Indices = S;

    fn into_index(self) -> Index<S> {
        self
    }
}

impl<const C: char> IntoIndex for Idx<C> {
    type Indices = Idx<C>;

    fn into_index(self) -> Index<Idx<C>> {
        Index::new()
    }
}

impl IntoIndex for usize {
    type Indices = Projected;

    fn into_index(self) -> Index<Projected> {
        Index::projected(self)
    }
}

impl IntoIndex for () {
    type Indices = Empty;

    fn into_index(self) -> Index<Empty> {
        Index::new()
    }
}

macro_rules! tuple_into_index {
    ($head:ident) => {
        impl<$head: IntoIndex> IntoIndex for ($head,) {
            type Indices = $head::Indices;

            fn into_index(self) -> Index<Self::Indices> {
                self.0.into_index()
            }
        }
    };
    ($head:ident, $($tail:ident),+) => {
        impl<$head: IntoIndex, $($tail: IntoIndex),+> IntoIndex for ($head, $($tail),+) {
            type Indices = Cat<$head::Indices, <($($tail,)+) as IntoIndex>::Indices>;

            #[allow(non_snake_case)]
            fn into_index(self) -> Index<Self::Indices> {
                let ($head, $($tail),+) = self;
                $head.into_index().concat(($($tail,)+).into_index())
            }
        }

        tuple_into_index!($($tail),+);
    };
}

tuple_into_index!(A, B, C, D, E, F, G, H);
