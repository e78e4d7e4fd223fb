//! Shape checks tied to index strings.

use super::extents::{DYNAMIC, Extents, Shape};
use crate::error::{TensorError, TensorResult};
use crate::index::{IndexString, PROJECTED};

/// True when every contracted symbol of `index` labels two statically
/// compatible axes of `shape`.
pub const fn contracted_shape_compatible(index: &IndexString, shape: &Shape) -> bool {
    let contracted = index.contracted();
    let mut k = 0;
    while k < contracted.len() {
        let [p, q] = index.find_offsets(contracted.get(k));
        let (a, b) = (shape.get(p), shape.get(q));
        if a != DYNAMIC && b != DYNAMIC && a != b {
            return false;
        }
        k += 1;
    }
    true
}

/// Checks that every contracted symbol of `index` labels two axes of the
/// same runtime extent.
pub fn check_contracted_extents(index: &IndexString, extents: &Extents) -> TensorResult<()> {
    for symbol in index.contracted().iter() {
        let [p, q] = index.find_offsets(symbol);
        let (left, right) = (extents.extent(p), extents.extent(q));
        if left != right {
            return Err(TensorError::ContractedExtentMismatch {
                symbol,
                left,
                right,
            });
        }
    }
    Ok(())
}

/// Checks that each projected offset lies within its axis.
pub fn check_projected_offsets(
    index: &IndexString,
    offsets: &[usize],
    extents: &Extents,
) -> TensorResult<()> {
    let mut cursor = 0;
    for &offset in offsets {
        let Some(axis) = index.index_of_with_cursor(PROJECTED, &mut cursor) else {
            return Err(TensorError::RankMismatch {
                expected: index.count(PROJECTED),
                got: offsets.len(),
            });
        };
        let extent = extents.extent(axis);
        if offset >= extent {
            return Err(TensorError::OutOfBounds {
                axis,
                index: offset,
                extent,
            });
        }
    }
    Ok(())
}
