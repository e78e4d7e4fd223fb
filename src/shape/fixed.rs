//! Static shapes spelled as types.
//!
//! `(Fixed<2>, Dyn)` is a matrix with two rows and a runtime number of
//! columns. Row-major spans take such a type to carry static extents.

use super::extents::{DYNAMIC, Shape};

/// One axis of a type-level shape.
pub trait Axis {
    const EXTENT: usize;
}

/// An axis of static size `N`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fixed<const N: usize>;

/// An axis sized at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dyn;

impl<const N: usize> Axis for Fixed<N> {
    const EXTENT: usize = N;
}

impl Axis for Dyn {
    const EXTENT: usize = DYNAMIC;
}

/// A shape known from a type.
pub trait StaticShape {
    const SHAPE: Shape;
}

/// `R` runtime-sized axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dynamic<const R: usize>;

impl<const R: usize> StaticShape for Dynamic<R> {
    const SHAPE: Shape = Shape::dynamic(R);
}

macro_rules! impl_static_shape {
    ($($axis:ident),+) => {
        impl<$($axis: Axis),+> StaticShape for ($($axis,)+) {
            const SHAPE: Shape = Shape::new(&[$($axis::EXTENT),+]);
        }
    };
}

impl_static_shape!(A);
impl_static_shape!(A, B);
impl_static_shape!(A, B, C);
impl_static_shape!(A, B, C, D);
impl_static_shape!(A, B, C, D, E);
impl_static_shape!(A, B, C, D, E, F);
impl_static_shape!(A, B, C, D, E, F, G);
impl_static_shape!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_shapes() {
        assert_eq!(<(Fixed<2>, Dyn)>::SHAPE, Shape::new(&[2, DYNAMIC]));
        assert_eq!(<(Dyn, Fixed<3>, Fixed<4>)>::SHAPE, Shape::new(&[DYNAMIC, 3, 4]));
        assert_eq!(<Dynamic<3>>::SHAPE, Shape::dynamic(3));
    }
}
