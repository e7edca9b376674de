//! Identifier generator tests
//!
//! Verifies the generator's contract: fixed length, alphanumeric alphabet
//! only, practical uniqueness, and a statistically uniform character
//! distribution over a large sample.

use std::collections::{HashMap, HashSet};

use shortbot::id::{generate_id, ID_LENGTH};

const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

#[test]
fn test_ids_have_fixed_length_and_alphabet() {
    for _ in 0..1000 {
        let id = generate_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.chars().all(|c| ALPHABET.contains(c)), "unexpected char in {}", id);
    }
}

#[test]
fn test_ids_are_practically_unique() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(generate_id()), "duplicate id generated");
    }
}

#[test]
fn test_character_distribution_is_uniform() {
    // Chi-square goodness-of-fit over all characters of a large sample.
    // 61 degrees of freedom; the 99.9% critical value is about 106, so a
    // bound of 150 keeps the test far from both bias and flakiness.
    let samples = 50_000;
    let mut counts: HashMap<char, u64> = HashMap::new();

    for _ in 0..samples {
        for c in generate_id().chars() {
            *counts.entry(c).or_insert(0) += 1;
        }
    }

    // Every alphabet character should appear in a sample this large
    assert_eq!(counts.len(), ALPHABET.len());

    let total = (samples * ID_LENGTH) as f64;
    let expected = total / ALPHABET.len() as f64;

    let chi_square: f64 = ALPHABET
        .chars()
        .map(|c| {
            let observed = *counts.get(&c).unwrap_or(&0) as f64;
            let diff = observed - expected;
            diff * diff / expected
        })
        .sum();

    assert!(
        chi_square < 150.0,
        "character distribution looks biased: chi-square = {:.2}",
        chi_square
    );
}
