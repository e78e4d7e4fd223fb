//! Position translation between index strings.

use core::fmt;

use super::string::{IndexString, MAX_INDICES};

/// Maps positions of one index string onto another.
///
/// For `from` and `to` with `to` a subset of `from`, entry `k` is the position
/// in `from` holding the `k`-th symbol of `to`. Projected symbols are matched
/// by occurrence: the n-th `'*'` of `to` maps to the n-th `'*'` of `from`.
///
/// The map is used both to select axes out of a shape and to reorder an index
/// pack before handing it to a wrapped tensor.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexMap {
    positions: [usize; MAX_INDICES],
    len: usize,
}

impl IndexMap {
    /// Computes the map from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const context) if `to` is not a subset of
    /// `from`, or names more projected axes than `from` has.
    pub const fn new(from: &IndexString, to: &IndexString) -> Self {
        assert!(
            to.is_subset_of(from),
            "index map target must be a subset of its source"
        );

        let mut positions = [0; MAX_INDICES];
        let mut cursor = 0;
        let mut k = 0;
        while k < to.len() {
            match from.index_of_with_cursor(to.get(k), &mut cursor) {
                Some(p) => positions[k] = p,
                None => panic!("index map target has more projected axes than its source"),
            }
            k += 1;
        }

        Self {
            positions,
            len: to.len(),
        }
    }

    /// The identity map on `len` positions.
    pub const fn identity(len: usize) -> Self {
        assert!(len <= MAX_INDICES, "index map is longer than MAX_INDICES");
        let mut positions = [0; MAX_INDICES];
        let mut k = 0;
        while k < len {
            positions[k] = k;
            k += 1;
        }
        Self { positions, len }
    }

    /// Number of entries (the length of the target string).
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Source position of the `k`-th target symbol.
    pub const fn get(&self, k: usize) -> usize {
        assert!(k < self.len, "index map position out of range");
        self.positions[k]
    }

    /// True if every entry maps to itself.
    pub const fn is_identity(&self) -> bool {
        let mut k = 0;
        while k < self.len {
            if self.positions[k] != k {
                return false;
            }
            k += 1;
        }
        true
    }

    /// The map entries.
    pub fn as_slice(&self) -> &[usize] {
        &self.positions[..self.len]
    }

    /// Reorders an index pack: `dst[k] = src[map[k]]`.
    #[inline]
    pub fn gather(&self, src: &[usize], dst: &mut [usize]) {
        for (slot, &p) in dst[..self.len].iter_mut().zip(self.as_slice()) {
            *slot = src[p];
        }
    }
}

impl fmt::Debug for IndexMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
