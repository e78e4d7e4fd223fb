//! Type-level index labels.
//!
//! Labels are zero-sized types carrying an [`IndexString`] as an associated
//! constant, so every expression node knows its index structure while the
//! crate is compiled.

use core::fmt;
use core::marker::PhantomData;

use super::string::IndexString;

/// A type-level index string.
pub trait Indices {
    /// The index string of the label.
    const STRING: IndexString;
}

/// A single named index, e.g. `Idx<'i'>`.
///
/// ```ignore
/// const I: Idx<'i'> = Idx;
/// const J: Idx<'j'> = Idx;
/// let c = bind(&a, (I, J));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Idx<const C: char>;

impl<const C: char> Indices for Idx<C> {
    const STRING: IndexString = IndexString::from_char(C);
}

impl<const C: char> fmt::Debug for Idx<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx<'{}'>", C)
    }
}

/// The label of a projected axis.
pub type Projected = Idx<'*'>;

/// The empty label, used to bind scalars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Empty;

impl Indices for Empty {
    const STRING: IndexString = IndexString::EMPTY;
}

/// Concatenation of two labels.
pub struct Cat<A, B>(PhantomData<(A, B)>);

impl<A: Indices, B: Indices> Indices for Cat<A, B> {
    const STRING: IndexString = A::STRING.concat(&B::STRING);
}
