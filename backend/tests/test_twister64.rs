//! Tests for the MT19937-64 generator
//!
//! Reference values come from the published `mt19937-64.c` seeded with
//! `init_genrand64`, which C++'s `std::mt19937_64` reproduces exactly.

use prng_core_rs::rng::TWISTER64_WORDS;
use prng_core_rs::{
    ErrorKind, GeneratorState, RandomGenerator, RngError, Twister64Generator, Twister64State,
};
use proptest::prelude::*;

fn draw(state: Twister64State, n: usize) -> (Vec<u64>, Twister64State) {
    let mut buf = vec![0u8; n * 8];
    let state = Twister64Generator.fill_all(state, &mut buf).unwrap();
    let words = buf
        .chunks_exact(8)
        .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
        .collect();
    (words, state)
}

#[test]
fn test_default_seed_first_outputs() {
    let (words, _) = draw(Twister64State::new(5489), 5);
    assert_eq!(
        words,
        vec![
            14514284786278117030,
            4620546740167642908,
            13109570281517897720,
            17462938647148434322,
            355488278567739596,
        ]
    );
}

#[test]
fn test_ten_thousandth_output() {
    // The value the C++ standard requires of mt19937_64
    let (words, _) = draw(Twister64State::new(5489), 10_000);
    assert_eq!(words[9_999], 9981545732273789042);
}

#[test]
fn test_seed_19650218_first_outputs() {
    let (words, _) = draw(Twister64State::new(19650218), 5);
    assert_eq!(
        words,
        vec![
            13735441942630277712,
            10468394322237346228,
            5051557175812687784,
            8252857936377966838,
            4330799099585512958,
        ]
    );
}

#[test]
fn test_output_across_twist_boundary() {
    let (words, state) = draw(Twister64State::new(19650218), 313);
    assert_eq!(words[311], 885676544443828534);
    assert_eq!(words[312], 3084267648584019405);
    assert_eq!(state.cursor(), 1);
}

#[test]
fn test_little_endian_output() {
    let mut buf = [0u8; 8];
    Twister64Generator
        .fill_all(Twister64State::new(19650218), &mut buf)
        .unwrap();
    assert_eq!(buf, [80, 162, 122, 95, 172, 23, 158, 190]);
}

#[test]
fn test_split_fills_match_single_fill() {
    let mut whole = vec![0u8; 4000];
    Twister64Generator
        .fill_all(Twister64State::new(77), &mut whole)
        .unwrap();

    let mut pieces = vec![0u8; 4000];
    let mut state = Twister64State::new(77);
    for (offset, count) in [(0, 8), (8, 2496), (2504, 1496)] {
        state = Twister64Generator
            .fill(state, &mut pieces, offset, count)
            .unwrap();
    }

    assert_eq!(whole, pieces);
}

#[test]
fn test_fill_leaves_input_state_untouched() {
    let original = Twister64State::new(1234);
    let mut buf = [0u8; 64];
    let next = Twister64Generator
        .fill_all(original.clone(), &mut buf)
        .unwrap();

    assert_eq!(original, Twister64State::new(1234));
    assert_ne!(original, next);
}

#[test]
fn test_zero_count_returns_same_state() {
    let mut buf = [0u8; 16];
    let state = Twister64Generator
        .fill(Twister64State::new(3), &mut buf, 16, 0)
        .unwrap();
    assert_eq!(state, Twister64State::new(3));
}

#[test]
fn test_equal_seeds_equal_states() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let a = Twister64State::new(99);
    let b = Twister64State::new(99);
    assert_eq!(a, b);

    let hash = |s: &Twister64State| {
        let mut h = DefaultHasher::new();
        s.hash(&mut h);
        h.finish()
    };
    assert_eq!(hash(&a), hash(&b));
    assert_ne!(a, Twister64State::new(100));
}

#[test]
fn test_all_zero_words_invalid() {
    let state = Twister64State::from_words(Box::new([0u64; TWISTER64_WORDS]), 0);
    assert!(!state.is_valid());

    let mut buf = [0u8; 8];
    let err = Twister64Generator.fill_all(state, &mut buf).unwrap_err();
    assert_eq!(err, RngError::InvalidState);
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn test_cursor_out_of_bounds_invalid() {
    let words = Box::new(*Twister64State::new(1).words().unwrap());
    let state = Twister64State::from_words(words, TWISTER64_WORDS + 1);
    assert!(!state.is_valid());

    let mut buf = [0u8; 8];
    assert_eq!(
        Twister64Generator.fill_all(state, &mut buf).unwrap_err(),
        RngError::InvalidState
    );
}

#[test]
fn test_default_state_rejected() {
    let mut buf = [0u8; 8];
    assert_eq!(
        Twister64Generator
            .fill_all(Twister64State::default(), &mut buf)
            .unwrap_err(),
        RngError::InvalidState
    );
}

#[test]
fn test_argument_errors_take_precedence_over_state() {
    let mut buf = [0u8; 16];
    let err = Twister64Generator
        .fill(Twister64State::default(), &mut buf, 0, 7)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_not_enough_room() {
    let mut buf = [0u8; 16];
    let err = Twister64Generator
        .fill(Twister64State::new(1), &mut buf, 8, 16)
        .unwrap_err();
    assert!(matches!(err, RngError::InsufficientRoom { .. }));
}

#[test]
fn test_serde_round_trip_preserves_stream() {
    let (_, state) = draw(Twister64State::new(8), 100);
    let json = serde_json::to_string(&state).unwrap();
    let restored: Twister64State = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
    assert_eq!(draw(restored, 10).0, draw(state, 10).0);
}

#[test]
fn test_serde_rejects_wrong_word_count() {
    let result: Result<Twister64State, _> =
        serde_json::from_str(r#"{"words":[1,2,3],"cursor":0}"#);
    assert!(result.is_err());
}

proptest! {
    #[test]
    fn prop_misaligned_count_rejected(count in 0usize..256) {
        prop_assume!(count % 8 != 0);
        let mut buf = vec![0u8; 256];
        let err = Twister64Generator
            .fill(Twister64State::new(1), &mut buf, 0, count)
            .unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let is_count_misaligned = matches!(err, RngError::Misaligned { parameter: "count", .. });
        prop_assert!(is_count_misaligned);
    }

    #[test]
    fn prop_misaligned_offset_rejected(offset in 0usize..128) {
        prop_assume!(offset % 8 != 0);
        let mut buf = vec![0u8; 256];
        let err = Twister64Generator
            .fill(Twister64State::new(1), &mut buf, offset, 64)
            .unwrap_err();
        let is_offset_misaligned = matches!(err, RngError::Misaligned { parameter: "offset", .. });
        prop_assert!(is_offset_misaligned);
    }
}
