//! Elementwise and reduction operations used by expression nodes.

use core::ops::{Add, Mul, Neg, Sub};

use crate::tensor::Element;

/// Combines one element of each operand.
pub trait BinaryOp<L, R> {
    type Output: Copy;

    fn apply(lhs: L, rhs: R) -> Self::Output;
}

/// Folds products over a contracted axis.
pub trait ReduceOp<T> {
    /// The value an empty reduction yields.
    fn identity() -> T;

    fn reduce(acc: T, value: T) -> T;
}

/// Transforms one element.
pub trait UnaryOp<T> {
    type Output: Copy;

    fn apply(value: T) -> Self::Output;
}

/// Addition; also the default reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Plus;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Minus;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Times;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Negate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl<L, R> BinaryOp<L, R> for Plus
where
    L: Add<R>,
    L::Output: Copy,
{
    type Output = L::Output;

    #[inline]
    fn apply(lhs: L, rhs: R) -> Self::Output {
        lhs + rhs
    }
}

impl<L, R> BinaryOp<L, R> for Minus
where
    L: Sub<R>,
    L::Output: Copy,
{
    type Output = L::Output;

    #[inline]
    fn apply(lhs: L, rhs: R) -> Self::Output {
        lhs - rhs
    }
}

impl<L, R> BinaryOp<L, R> for Times
where
    L: Mul<R>,
    L::Output: Copy,
{
    type Output = L::Output;

    #[inline]
    fn apply(lhs: L, rhs: R) -> Self::Output {
        lhs * rhs
    }
}

impl<T: Element> ReduceOp<T> for Plus {
    #[inline]
    fn identity() -> T {
        T::zero()
    }

    #[inline]
    fn reduce(acc: T, value: T) -> T {
        acc + value
    }
}

impl<T> UnaryOp<T> for Negate
where
    T: Neg,
    T::Output: Copy,
{
    type Output = T::Output;

    #[inline]
    fn apply(value: T) -> Self::Output {
        -value
    }
}

impl<T: Copy> UnaryOp<T> for Identity {
    type Output = T;

    #[inline]
    fn apply(value: T) -> T {
        value
    }
}
