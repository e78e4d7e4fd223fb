//! Fixed-capacity index strings and their classification algebra.

use core::fmt;
use core::str::FromStr;

use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::error::{TensorError, TensorResult};

/// Symbol marking a projected index.
///
/// A projected index is an axis the user pinned to an integer. `A(i, 2)`
/// selects the third column of `A` and is labelled `"i*"`.
pub const PROJECTED: char = '*';

/// Maximum number of symbols in an index string, and so the maximum rank of
/// any tensor taking part in an expression.
pub const MAX_INDICES: usize = 16;

const PROJECTED_BYTE: u8 = PROJECTED as u8;

/// An immutable string of index symbols.
///
/// Every operation is a `const fn`, so index strings attached to types can be
/// classified and compared while compiling. Symbols are ASCII letters plus
/// the [`PROJECTED`] wildcard. Unused storage is always zero, which keeps the
/// derived equality position-exact.
///
/// Serialized as its text, e.g. `"ij*"`, and parsed again on the way in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndexString {
    symbols: [u8; MAX_INDICES],
    len: usize,
}

impl IndexString {
    /// The empty index string, used to label scalars.
    pub const EMPTY: Self = Self {
        symbols: [0; MAX_INDICES],
        len: 0,
    };

    /// Creates an index string from a literal.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const context) if `s` contains anything but
    /// ASCII letters and `'*'`, is longer than [`MAX_INDICES`], or repeats a
    /// symbol more than twice. Use [`IndexString::parse`] for untrusted input.
    pub const fn new(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(
            bytes.len() <= MAX_INDICES,
            "index string is longer than MAX_INDICES"
        );

        let mut out = Self::EMPTY;
        let mut i = 0;
        while i < bytes.len() {
            assert!(
                is_symbol(bytes[i]),
                "index symbols must be ASCII letters or '*'"
            );
            out = out.push(bytes[i]);
            i += 1;
        }

        assert!(
            out.is_well_formed(),
            "an index symbol may appear at most twice"
        );
        out
    }

    /// Creates a single-symbol index string.
    pub const fn from_char(c: char) -> Self {
        assert!(
            c.is_ascii() && is_symbol(c as u8),
            "index symbols must be ASCII letters or '*'"
        );
        Self::EMPTY.push(c as u8)
    }

    /// Parses an index string at runtime.
    ///
    /// Blanks are ignored. See [`crate::index::parse_index_string`].
    pub fn parse(s: &str) -> TensorResult<Self> {
        super::parser::parse_index_string(s)
    }

    /// Number of symbols.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there are no symbols.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the symbol at `i`.
    pub const fn get(&self, i: usize) -> char {
        assert!(i < self.len, "index string position out of range");
        self.symbols[i] as char
    }

    /// Iterates over the symbols.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols[..self.len].iter().map(|&b| b as char)
    }

    /// Position-exact comparison usable in const context.
    pub const fn equals(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut i = 0;
        while i < self.len {
            if self.symbols[i] != other.symbols[i] {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Counts the occurrences of `c`.
    pub const fn count(&self, c: char) -> usize {
        if !c.is_ascii() {
            return 0;
        }
        self.count_byte(c as u8)
    }

    /// The number of outer indices.
    pub const fn rank(&self) -> usize {
        self.outer().len
    }

    /// True when no symbol other than the wildcard appears more than twice.
    pub const fn is_well_formed(&self) -> bool {
        let mut i = 0;
        while i < self.len {
            let b = self.symbols[i];
            if b != PROJECTED_BYTE && self.count_byte(b) > 2 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Concatenates two index strings.
    pub const fn concat(&self, other: &Self) -> Self {
        assert!(
            self.len + other.len <= MAX_INDICES,
            "concatenated index string is longer than MAX_INDICES"
        );
        let mut out = *self;
        let mut i = 0;
        while i < other.len {
            out = out.push(other.symbols[i]);
            i += 1;
        }
        out
    }

    /// Indices that are not projected and appear exactly once, in order.
    pub const fn outer(&self) -> Self {
        self.append_outer(Self::EMPTY)
    }

    /// Indices that are not projected and appear twice, each listed once in
    /// order of first appearance.
    pub const fn contracted(&self) -> Self {
        self.append_contracted(Self::EMPTY)
    }

    /// Every projected index, in order.
    pub const fn projected(&self) -> Self {
        self.append_projected(Self::EMPTY)
    }

    /// `outer() + contracted()`.
    pub const fn inner(&self) -> Self {
        self.append_contracted(self.append_outer(Self::EMPTY))
    }

    /// `outer() + contracted() + projected()`, the canonical evaluation order.
    pub const fn all(&self) -> Self {
        self.append_projected(self.append_contracted(self.append_outer(Self::EMPTY)))
    }

    /// Position of the first occurrence of `c`.
    pub const fn index_of(&self, c: char) -> Option<usize> {
        if !c.is_ascii() {
            return None;
        }
        let b = c as u8;
        let mut i = 0;
        while i < self.len {
            if self.symbols[i] == b {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Position of `c`, tracking projected occurrences through `cursor`.
    ///
    /// For any symbol but [`PROJECTED`] this is [`IndexString::index_of`] and
    /// `cursor` is left alone. For the wildcard it finds the `cursor`-th
    /// occurrence and increments `cursor`, so successive calls walk the
    /// projected axes left to right.
    pub const fn index_of_with_cursor(&self, c: char, cursor: &mut usize) -> Option<usize> {
        if c != PROJECTED {
            return self.index_of(c);
        }

        let mut n = *cursor;
        *cursor += 1;
        let mut i = 0;
        while i < self.len {
            if self.symbols[i] == PROJECTED_BYTE {
                if n == 0 {
                    return Some(i);
                }
                n -= 1;
            }
            i += 1;
        }
        None
    }

    /// True if every symbol of `self` occurs in `other`.
    pub const fn is_subset_of(&self, other: &Self) -> bool {
        let mut i = 0;
        while i < self.len {
            if other.count_byte(self.symbols[i]) == 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// The two positions of a contracted symbol.
    ///
    /// # Panics
    ///
    /// Panics unless `c` is a non-projected symbol occurring exactly twice.
    pub const fn find_offsets(&self, c: char) -> [usize; 2] {
        assert!(c != PROJECTED, "projected indices have no contraction offsets");
        assert!(self.count(c) == 2, "find_offsets requires a contracted index");

        let b = c as u8;
        let mut out = [0; 2];
        let mut j = 0;
        let mut i = 0;
        while i < self.len {
            if self.symbols[i] == b {
                out[j] = i;
                j += 1;
            }
            i += 1;
        }
        out
    }

    const fn push(mut self, b: u8) -> Self {
        assert!(self.len < MAX_INDICES, "index string is longer than MAX_INDICES");
        self.symbols[self.len] = b;
        self.len += 1;
        self
    }

    const fn count_byte(&self, b: u8) -> usize {
        let mut n = 0;
        let mut i = 0;
        while i < self.len {
            if self.symbols[i] == b {
                n += 1;
            }
            i += 1;
        }
        n
    }

    const fn append_outer(&self, mut out: Self) -> Self {
        let mut i = 0;
        while i < self.len {
            let b = self.symbols[i];
            if b != PROJECTED_BYTE && self.count_byte(b) == 1 {
                out = out.push(b);
            }
            i += 1;
        }
        out
    }

    // `out` is searched to keep each contracted symbol once.
    const fn append_contracted(&self, mut out: Self) -> Self {
        let mut i = 0;
        while i < self.len {
            let b = self.symbols[i];
            if b != PROJECTED_BYTE && self.count_byte(b) == 2 && out.count_byte(b) == 0 {
                out = out.push(b);
            }
            i += 1;
        }
        out
    }

    const fn append_projected(&self, mut out: Self) -> Self {
        let mut i = 0;
        while i < self.len {
            if self.symbols[i] == PROJECTED_BYTE {
                out = out.push(PROJECTED_BYTE);
            }
            i += 1;
        }
        out
    }
}

/// Checks if `a` is a permutation of `b`.
pub const fn is_permutation(a: &IndexString, b: &IndexString) -> bool {
    a.is_subset_of(b) && b.is_subset_of(a)
}

pub(crate) const fn is_symbol(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == PROJECTED_BYTE
}

impl Default for IndexString {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for IndexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.iter() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for IndexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl FromStr for IndexString {
    type Err = TensorError;

    fn from_str(s: &str) -> TensorResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IndexString {
    type Error = TensorError;

    fn try_from(s: String) -> TensorResult<Self> {
        Self::parse(&s)
    }
}

impl From<IndexString> for String {
    fn from(s: IndexString) -> String {
        s.to_string()
    }
}
