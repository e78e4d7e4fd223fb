//! Parser tests for runtime index strings.

use cubek_ttl::index::{IndexMap, MAX_INDICES, parse_index_string};
use cubek_ttl::{IndexString, TensorError};

#[test]
fn test_parse_matrix() {
    let s = parse_index_string("ij").unwrap();
    assert_eq!(s.len(), 2);
    assert_eq!(s.rank(), 2);
    assert!(s.contracted().is_empty());
}

#[test]
fn test_parse_trace() {
    let s = parse_index_string("ii").unwrap();
    assert_eq!(s.rank(), 0);
    assert_eq!(s.contracted().to_string(), "i");
    assert_eq!(s.find_offsets('i'), [0, 1]);
}

#[test]
fn test_parse_matrix_vector() {
    let s = parse_index_string("ij j").unwrap();
    assert_eq!(s.outer().to_string(), "i");
    assert_eq!(s.contracted().to_string(), "j");
    assert_eq!(s.inner().to_string(), "ij");
}

#[test]
fn test_parse_projection() {
    let s = parse_index_string("i*").unwrap();
    assert_eq!(s.outer().to_string(), "i");
    assert_eq!(s.projected().len(), 1);
    assert_eq!(s.all().to_string(), "i*");
}

#[test]
fn test_parse_matches_const() {
    const LITERAL: IndexString = IndexString::new("abAB*");
    assert_eq!(parse_index_string("a b A B *").unwrap(), LITERAL);
}

#[test]
fn test_parse_uppercase_distinct() {
    let s = parse_index_string("iI").unwrap();
    assert_eq!(s.rank(), 2);
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        parse_index_string("i,j"),
        Err(TensorError::InvalidSymbol { symbol: ',' })
    );
    assert_eq!(
        parse_index_string("é"),
        Err(TensorError::InvalidSymbol { symbol: 'é' })
    );
    assert_eq!(
        parse_index_string("kjkk"),
        Err(TensorError::SymbolOccursTooOften {
            symbol: 'k',
            count: 3
        })
    );
}

#[test]
fn test_wildcards_may_repeat() {
    let s = parse_index_string("***").unwrap();
    assert_eq!(s.projected().len(), 3);
    assert_eq!(s.rank(), 0);
}

#[test]
fn test_capacity() {
    let full: String = ('a'..='p').collect();
    assert_eq!(full.len(), MAX_INDICES);
    assert!(parse_index_string(&full).is_ok());

    let over: String = ('a'..='q').collect();
    assert_eq!(
        parse_index_string(&over),
        Err(TensorError::TooManyIndices {
            len: 17,
            max: MAX_INDICES
        })
    );
}

#[test]
fn test_map_between_parsed_strings() {
    let from: IndexString = "ijk".parse().unwrap();
    let to: IndexString = "kji".parse().unwrap();
    assert_eq!(IndexMap::new(&from, &to).as_slice(), &[2, 1, 0]);
}
