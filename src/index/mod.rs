//! Index notation: symbols, index strings and position maps.
//!
//! An index string labels the axes of a tensor. Each symbol is classified as
//! - outer: appears once, a free axis of the result
//! - contracted: appears twice, summed over
//! - projected: the `'*'` wildcard, an axis pinned to an integer offset

mod map;
mod pack;
mod parser;
mod string;
mod symbol;

pub use map::IndexMap;
pub use pack::{Index, IntoIndex};
pub use parser::parse_index_string;
pub use string::{IndexString, MAX_INDICES, PROJECTED, is_permutation};
pub use symbol::{Cat, Empty, Idx, Indices, Projected};
