//! Algebraic laws of index strings, index maps and extents.

use cubek_ttl::index::{IndexMap, IndexString, PROJECTED, is_permutation};
use cubek_ttl::shape::{DYNAMIC, Extents, Shape};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Well-formed index strings: each of a few letters at most twice, plus
/// wildcards.
fn index_string() -> impl Strategy<Value = IndexString> {
    proptest::collection::vec(
        prop_oneof![
            Just('i'),
            Just('j'),
            Just('k'),
            Just('l'),
            Just('m'),
            Just(PROJECTED)
        ],
        0..10,
    )
    .prop_map(|symbols| {
        let mut kept = String::new();
        for c in symbols {
            if c == PROJECTED || kept.matches(c).count() < 2 {
                kept.push(c);
            }
        }
        IndexString::parse(&kept).unwrap()
    })
}

fn shape_axis() -> impl Strategy<Value = usize> {
    prop_oneof![Just(DYNAMIC), 1usize..5]
}

proptest! {
    #[test]
    fn classification_reassembles_all(s in index_string()) {
        let joined = s.outer().concat(&s.contracted()).concat(&s.projected());
        assert_eq!(joined, s.all());
        assert_eq!(s.rank(), s.outer().len());
        assert_eq!(s.inner(), s.outer().concat(&s.contracted()));
        assert_eq!(s.all().len(), s.len() - s.contracted().len());
    }

    #[test]
    fn outer_of_disjoint_concat(a in index_string(), b in index_string()) {
        // Rename b's letters to upper case so the operands share no symbol.
        let upper: String = b.iter().map(|c| c.to_ascii_uppercase()).collect();
        let b = IndexString::parse(&upper).unwrap();
        prop_assume!(a.len() + b.len() <= 16);

        let outer = a.concat(&b).outer();
        let expected = a.outer().concat(&b.outer());
        assert!(is_permutation(&outer, &expected));
        assert_eq!(outer.len(), expected.len());
    }

    #[test]
    fn find_offsets_locates_both_occurrences(s in index_string()) {
        for c in s.contracted().iter() {
            let [p, q] = s.find_offsets(c);
            assert!(p < q);
            assert_eq!(s.get(p), c);
            assert_eq!(s.get(q), c);
        }
    }

    #[test]
    fn permutation_is_reflexive_and_symmetric(a in index_string(), b in index_string()) {
        assert!(is_permutation(&a, &a));
        assert_eq!(is_permutation(&a, &b), is_permutation(&b, &a));
        let reversed: String = a.iter().collect::<Vec<_>>().into_iter().rev().collect();
        assert!(is_permutation(&a, &IndexString::parse(&reversed).unwrap()));
    }

    #[test]
    fn index_map_points_at_matching_symbols(s in index_string()) {
        for to in [s.outer(), s.inner(), s.all()] {
            let map = IndexMap::new(&s, &to);
            assert_eq!(map.len(), to.len());
            for k in 0..to.len() {
                assert_eq!(s.get(map.get(k)), to.get(k));
            }
        }
    }

    #[test]
    fn wildcards_map_in_occurrence_order(s in index_string()) {
        let map = IndexMap::new(&s, &s.all());
        let wildcard_positions: Vec<usize> = (0..s.len()).filter(|&p| s.get(p) == PROJECTED).collect();
        let mapped: Vec<usize> = (s.inner().len()..s.all().len()).map(|k| map.get(k)).collect();
        assert_eq!(mapped, wildcard_positions);
    }

    #[test]
    fn shape_compatibility_is_symmetric(
        a in proptest::collection::vec(shape_axis(), 0..4),
        b in proptest::collection::vec(shape_axis(), 0..4),
    ) {
        let (a, b) = (Shape::new(&a), Shape::new(&b));
        assert_eq!(a.is_compatible(&b), b.is_compatible(&a));
    }

    #[test]
    fn merge_agrees_with_static_side(
        axes in proptest::collection::vec((shape_axis(), shape_axis(), 1usize..5), 0..4),
    ) {
        // Build two compatible extents sharing the runtime size of each axis.
        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut values = Vec::new();
        for (l, r, runtime) in axes {
            let size = if l != DYNAMIC { l } else if r != DYNAMIC { r } else { runtime };
            left.push(if l == DYNAMIC || l == size { l } else { DYNAMIC });
            right.push(if r == DYNAMIC || r == size { r } else { DYNAMIC });
            values.push(size);
        }
        let a = Extents::new(Shape::new(&left), &values);
        let b = Extents::new(Shape::new(&right), &values);
        assert!(a.compatible(&b));
        assert_eq!(a.compatible(&b), b.compatible(&a));

        let merged = a.merge(&b);
        for axis in 0..merged.rank() {
            assert_eq!(merged.extent(axis), values[axis]);
            let expected = if left[axis] != DYNAMIC { left[axis] } else { right[axis] };
            assert_eq!(merged.static_extent(axis), expected);
        }
    }
}
