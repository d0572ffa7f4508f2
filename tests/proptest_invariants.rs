//! Property-based invariants, checked with the very crate this library
//! grew out of.

use globmatch::{build_set, compile, Range};
use proptest::prelude::*;

fn valid_range() -> impl Strategy<Value = Range> {
    (any::<char>(), any::<char>()).prop_map(|(a, b)| {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Range { lo, hi }
    })
}

proptest! {
    /// `not()` applied twice always reconstructs an equivalent matcher:
    /// every code point agrees on membership with the original.
    #[test]
    fn not_is_an_involution(ranges in prop::collection::vec(valid_range(), 0..8), probe in any::<char>()) {
        let m = build_set(ranges);
        let restored = m.not().not();
        prop_assert_eq!(m.match_rune(probe), restored.match_rune(probe));
    }

    /// A matcher built from ranges accepts exactly the code points covered
    /// by at least one input range.
    #[test]
    fn built_set_matches_union_of_input_ranges(
        ranges in prop::collection::vec(valid_range(), 1..8),
        probe in any::<char>(),
    ) {
        let expected = ranges.iter().any(|r| probe >= r.lo && probe <= r.hi);
        let m = build_set(ranges);
        prop_assert_eq!(m.match_rune(probe), expected);
    }

    /// A `Set`'s negation rejects exactly what the `Set` accepts, for
    /// every probed code point.
    #[test]
    fn negated_set_is_the_complement(ranges in prop::collection::vec(valid_range(), 0..8), probe in any::<char>()) {
        let m = build_set(ranges);
        let not_m = m.not();
        prop_assert_eq!(not_m.match_rune(probe), !m.match_rune(probe));
    }

    /// Any string built only of lowercase ASCII letters and digits
    /// compiles without escaping (it contains no glob metacharacters) and
    /// matches itself exactly.
    #[test]
    fn alphanumeric_literal_matches_itself(s in "[a-z0-9]{0,24}") {
        let pattern = compile(&s).unwrap();
        prop_assert!(pattern.matcher(&s).matches());
    }

    /// Appending any non-empty alphanumeric suffix to a compiled literal
    /// pattern's own text makes it stop matching (literals match exactly,
    /// no implicit prefix semantics).
    #[test]
    fn alphanumeric_literal_rejects_proper_extension(
        s in "[a-z0-9]{1,16}",
        suffix in "[a-z0-9]{1,8}",
    ) {
        let pattern = compile(&s).unwrap();
        let extended = format!("{s}{suffix}");
        prop_assert!(!pattern.matcher(&extended).matches());
    }

    /// A compiled pattern's exposed `min_len`/`max_len` always equal its
    /// first segment's suffix bounds (the whole-pattern bounds are defined
    /// as the backward-pass total, which is exactly `segments[0]`'s).
    #[test]
    fn whole_pattern_bounds_match_first_segment(s in "[a-z]{0,12}") {
        let pattern = compile(&s).unwrap();
        match pattern.segments().first() {
            Some(seg) => {
                prop_assert_eq!(pattern.min_len(), seg.min_len);
                prop_assert_eq!(pattern.max_len(), seg.max_len);
            }
            None => {
                prop_assert_eq!(pattern.min_len(), 0);
                prop_assert_eq!(pattern.max_len(), 0);
            }
        }
    }
}
