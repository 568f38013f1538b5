// this_file: crates/sigil-pinyin/src/proptests.rs

use super::*;
use proptest::prelude::*;

// Property: one annotation per character, whatever the input
proptest! {
    #[test]
    fn prop_normalize_length_matches_char_count(
        raw in proptest::option::of("[a-zü:, ;/|0-9]{0,40}"),
        count in 0usize..12,
    ) {
        let tokens = normalize(raw.as_deref(), count);
        prop_assert_eq!(tokens.len(), count);
    }
}

// Property: tokens never contain a delimiter
proptest! {
    #[test]
    fn prop_tokens_have_no_delimiters(raw in "[a-z0-5, ;/|]{1,40}", count in 1usize..8) {
        for token in normalize(Some(&raw), count) {
            prop_assert!(!token.chars().any(is_delimiter));
        }
    }
}

// Property: conversion never changes the number of characters, except the
// tone digit and the u: spelling
proptest! {
    #[test]
    fn prop_marked_syllable_drops_only_the_digit(base in "[bcdfghjklmnpqrstwxyz]{0,2}[aeiou]{1,3}[ng]{0,2}", tone in 1u32..5) {
        let token = format!("{base}{tone}");
        let marked = to_tone_marks(&token);
        prop_assert_eq!(marked.chars().count(), base.chars().count());
        prop_assert_ne!(marked, base);
    }
}
