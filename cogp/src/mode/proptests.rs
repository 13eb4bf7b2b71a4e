//! Property-based tests for permission parsing.

use super::{Mode, ModeChange};
use proptest::prelude::*;

fn octal_digit() -> impl Strategy<Value = u32> {
    0u32..8
}

/// Symbolic form of a plain rwx triplet, written out by hand.
fn triplet(bits: u32) -> String {
    format!(
        "{}{}{}",
        if bits & 4 != 0 { 'r' } else { '-' },
        if bits & 2 != 0 { 'w' } else { '-' },
        if bits & 1 != 0 { 'x' } else { '-' },
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Each octal digit lands in its own 3-bit field
    #[test]
    fn three_digit_octal_fields(owner in octal_digit(), group in octal_digit(), other in octal_digit()) {
        let spec = format!("{owner}{group}{other}");
        let mode = ModeChange::parse(&spec).unwrap().mode().unwrap();
        prop_assert_eq!((mode.bits() >> 6) & 0o7, owner);
        prop_assert_eq!((mode.bits() >> 3) & 0o7, group);
        prop_assert_eq!(mode.bits() & 0o7, other);
        prop_assert_eq!(mode.special(), 0);
    }

    // Plain symbolic strings agree with the equivalent octal string
    #[test]
    fn symbolic_matches_octal(owner in octal_digit(), group in octal_digit(), other in octal_digit()) {
        let symbolic = format!("{}{}{}", triplet(owner), triplet(group), triplet(other));
        let octal = format!("{owner}{group}{other}");
        prop_assert_eq!(ModeChange::parse(&symbolic).unwrap(), ModeChange::parse(&octal).unwrap());
    }

    // Rendering any mode symbolically parses back to the same mode
    #[test]
    fn symbolic_round_trip(bits in 0u32..=Mode::MAX) {
        let mode = Mode::from_bits(bits).unwrap();
        prop_assert_eq!(ModeChange::parse(&mode.symbolic()).unwrap(), ModeChange::Set(mode));
    }

    // Four digit octal rendering parses back to the same mode
    #[test]
    fn display_round_trip(bits in 0u32..=Mode::MAX) {
        let mode = Mode::from_bits(bits).unwrap();
        prop_assert_eq!(ModeChange::parse(&mode.to_string()).unwrap(), ModeChange::Set(mode));
    }

    // Lengths other than 3, 4 and 9 are always rejected
    #[test]
    fn wrong_lengths_rejected(spec in "[0-7rwxstST-]{0,12}") {
        let len = spec.len();
        prop_assume!(len != 3 && len != 4 && len != 9);
        prop_assert!(ModeChange::parse(&spec).is_err());
    }
}
