//! Helpers shared by expression nodes.

use crate::index::{IndexString, MAX_INDICES};

/// A fixed-capacity index pack.
pub(crate) type Pack = [usize; MAX_INDICES];

/// Copies `index` into a fresh pack.
#[inline]
pub(crate) fn pack_from(index: &[usize]) -> Pack {
    let mut pack = [0; MAX_INDICES];
    pack[..index.len()].copy_from_slice(index);
    pack
}

/// Evaluation phase of a bound tensor, chosen by how many indices of the
/// canonical `outer ++ contracted ++ projected` order are already known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Some contracted axes are unbound: loop over the next one and sum.
    Accumulate,
    /// Outer and contracted axes are bound: append the projected offsets.
    Project,
    /// Every axis is bound: reorder into the tensor's own axis order.
    Remap,
}

impl Phase {
    #[inline]
    pub(crate) const fn select(supplied: usize, inner: usize, all: usize) -> Self {
        if supplied == all {
            Phase::Remap
        } else if supplied == inner {
            Phase::Project
        } else {
            Phase::Accumulate
        }
    }
}

/// The outer label of an operand.
///
/// # Panics
///
/// Panics (at compile time in const context) for unlabelled operands, which
/// must be bound before they can be combined.
pub(crate) const fn label_of(label: Option<IndexString>) -> IndexString {
    match label {
        Some(label) => label,
        None => panic!("expression operands must be bound to indices"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_thresholds() {
        // "ij*" bound with one outer, one contracted and one projected axis.
        assert_eq!(Phase::select(1, 2, 3), Phase::Accumulate);
        assert_eq!(Phase::select(2, 2, 3), Phase::Project);
        assert_eq!(Phase::select(3, 2, 3), Phase::Remap);
        // Without projections the inner and full orders coincide.
        assert_eq!(Phase::select(2, 2, 2), Phase::Remap);
    }

    #[test]
    fn test_label_of() {
        let ij = IndexString::new("ij");
        assert_eq!(label_of(Some(ij)), ij);
    }

    #[test]
    #[should_panic(expected = "must be bound")]
    fn test_label_of_unbound() {
        label_of(None);
    }
}
