//! Error types for index algebra, shape checks and assignment.

/// Errors that can occur while building or evaluating tensor expressions.
///
/// Most structural errors are rejected at compile time. The variants here are
/// the ones that can only be observed at runtime: parsed index strings, dynamic
/// extents and out-of-range indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TensorError {
    /// A character that is neither an ASCII letter nor the projection symbol.
    #[error("invalid index symbol '{symbol}'")]
    InvalidSymbol { symbol: char },

    /// An index string longer than the fixed capacity.
    #[error("index string has {len} symbols, maximum is {max}")]
    TooManyIndices { len: usize, max: usize },

    /// Index appears more than twice (not a valid contraction).
    #[error("index '{symbol}' appears {count} times, maximum is 2")]
    SymbolOccursTooOften { symbol: char, count: usize },

    /// Two operands have a different number of axes.
    #[error("rank mismatch: expected {expected} axes, got {got}")]
    RankMismatch { expected: usize, got: usize },

    /// Two static extents disagree.
    #[error("incompatible static extents on axis {axis}: {left} vs {right}")]
    IncompatibleExtents {
        axis: usize,
        left: usize,
        right: usize,
    },

    /// Two runtime extents disagree.
    #[error("extent mismatch on axis {axis}: expected {expected}, got {got}")]
    ExtentMismatch {
        axis: usize,
        expected: usize,
        got: usize,
    },

    /// The two axes labelled by a contracted index have different extents.
    #[error("contracted index '{symbol}' spans axes of extent {left} and {right}")]
    ContractedExtentMismatch {
        symbol: char,
        left: usize,
        right: usize,
    },

    /// An index outside `[0, extent)`.
    #[error("index {index} is out of bounds for axis {axis} with extent {extent}")]
    OutOfBounds {
        axis: usize,
        index: usize,
        extent: usize,
    },

    /// A view whose extents do not cover its storage exactly.
    ///
    /// `expected` saturates at `usize::MAX` when the extents overflow.
    #[error("extents describe {expected} elements but storage holds {got}")]
    SizeMismatch { expected: usize, got: usize },

    /// A shape with more axes than the fixed capacity.
    #[error("shape has {rank} axes, maximum is {max}")]
    TooManyAxes { rank: usize, max: usize },
}

/// Result type for fallible tensor operations.
pub type TensorResult<T> = core::result::Result<T, TensorError>;

/// Panics with the error message when runtime checks are enabled.
///
/// Checks are enabled in debug builds and with the `checked` feature. In
/// other builds the expression is not evaluated at all.
macro_rules! check {
    ($result:expr) => {
        #[cfg(any(debug_assertions, feature = "checked"))]
        {
            if let Err(err) = $result {
                panic!("{}", err);
            }
        }
    };
}

pub(crate) use check;
