//! # CubeK TTL
//!
//! Compile-time tensor index expressions with Einstein summation.
//!
//! ## Features
//!
//! - Index labels as types: outer, contracted and projected indices are
//!   classified while compiling
//! - Expression trees for sums, products and elementwise operations, with no
//!   heap allocation and no dynamic dispatch
//! - Structural errors (rank mismatch, non-matching sums, triple indices)
//!   rejected at compile time
//! - Shape and bounds checks in debug builds or with the `checked` feature
//! - Works over scalars, nested arrays, slices, `Vec` and row-major spans
//!
//! ## Example
//!
//! ```
//! use cubek_ttl::{Idx, TensorExt, bind};
//!
//! const I: Idx<'i'> = Idx;
//! const J: Idx<'j'> = Idx;
//!
//! let a = [[1, 2], [4, 3]];
//! let x = [1, 2];
//!
//! // y(i) = A(i, j) x(j)
//! let mut y = [0; 2];
//! let mut out = bind(&mut y, I);
//! out <<= bind(&a, (I, J)) * bind(&x, J);
//! assert_eq!(y, [5, 10]);
//!
//! // trace
//! assert_eq!(bind(&a, (I, I)).value(), 4);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod index;
pub mod shape;
pub mod tensor;
pub mod tree;

pub use error::{TensorError, TensorResult};
pub use index::{Idx, Index, IndexMap, IndexString, Indices, IntoIndex, Projected};
pub use shape::{DYNAMIC, Dyn, Extents, Fixed, Shape};
pub use tensor::{Element, Tensor, TensorExt, TensorMut, TensorMutExt, TensorSpan, TensorSpanMut};
pub use tree::{Bind, Product, Sum, Unary, assign, assign_with, bind, try_assign};
