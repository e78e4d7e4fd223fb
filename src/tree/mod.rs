//! Expression trees over index-labelled tensors.
//!
//! A tree is built from [`Bind`] leaves combined by [`Sum`], [`Product`] and
//! [`Unary`] nodes, usually through the arithmetic operators. Every node is a
//! [`crate::tensor::Tensor`], so trees can be evaluated, rebound and assigned.
//! The index structure of a tree is part of its type and checked while
//! compiling.

mod assign;
mod bind;
mod node;
mod op;
mod ops;
mod product;
mod sum;
mod unary;

pub use assign::{assign, assign_with, try_assign, update};
pub use bind::{Bind, bind};
pub use op::{BinaryOp, Identity, Minus, Negate, Plus, ReduceOp, Times, UnaryOp};
pub use product::Product;
pub use sum::Sum;
pub use unary::{Unary, identity};
