//! Runtime parsing of index strings.
//!
//! Index strings attached to types are built in const context and checked by
//! the compiler. This parser is for labels that only exist at runtime, and
//! reports problems as errors instead of panicking.

use hashbrown::HashMap;

use super::string::{IndexString, MAX_INDICES, PROJECTED, is_symbol};
use crate::error::{TensorError, TensorResult};

/// Parses an index string.
///
/// # Grammar
///
/// ```text
/// index_string ::= symbol*
/// symbol       ::= [a-zA-Z] | '*'
/// ```
///
/// Spaces and tabs are ignored.
///
/// # Examples
///
/// ```ignore
/// let s = parse_index_string("ij")?;   // matrix
/// let s = parse_index_string("ii")?;   // trace
/// let s = parse_index_string("i*")?;   // column projection
/// ```
pub fn parse_index_string(s: &str) -> TensorResult<IndexString> {
    let mut symbols = [0u8; MAX_INDICES];
    let mut len = 0;

    for c in s.chars() {
        match c {
            ' ' | '\t' => continue,
            c if c.is_ascii() && is_symbol(c as u8) => {
                if len == MAX_INDICES {
                    return Err(TensorError::TooManyIndices {
                        len: s.chars().filter(|c| !matches!(c, ' ' | '\t')).count(),
                        max: MAX_INDICES,
                    });
                }
                symbols[len] = c as u8;
                len += 1;
            }
            _ => return Err(TensorError::InvalidSymbol { symbol: c }),
        }
    }

    validate_symbol_counts(&symbols[..len])?;

    // Every byte is a validated ASCII symbol.
    let parsed = core::str::from_utf8(&symbols[..len])
        .map_err(|_| TensorError::InvalidSymbol { symbol: char::REPLACEMENT_CHARACTER })?;
    Ok(IndexString::new(parsed))
}

/// Validates that no symbol other than the wildcard appears more than twice.
fn validate_symbol_counts(symbols: &[u8]) -> TensorResult<()> {
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for &b in symbols {
        *counts.entry(b).or_insert(0) += 1;
    }

    // Report the first offending symbol in string order, not hash order.
    for &b in symbols {
        let count = counts[&b];
        if b as char != PROJECTED && count > 2 {
            return Err(TensorError::SymbolOccursTooOften {
                symbol: b as char,
                count,
            });
        }
    }

    Ok(())
}
