//! Testing helpers.

use tinyrand::Rand;

use crate::matching::Threshold;
use crate::record::{Round, Variant};

pub fn round(numbers: &[u64]) -> Round {
    Round::new(numbers.to_vec()).unwrap()
}

pub fn variant(id: &str, numbers: &[u64]) -> Variant {
    Variant::new(id, numbers.to_vec()).unwrap()
}

pub fn threshold(value: usize) -> Threshold {
    Threshold::new(value).unwrap()
}

/// Picks `picks` numbers from `1..=pool`, possibly repeating.
pub fn random_numbers(rand: &mut impl Rand, pool: u64, picks: usize) -> Vec<u64> {
    (0..picks)
        .map(|_| rand.next_u64() % pool + 1)
        .collect()
}

pub fn random_rounds(rand: &mut impl Rand, count: usize, pool: u64, picks: usize) -> Vec<Round> {
    (0..count)
        .map(|_| Round::new(random_numbers(rand, pool, picks)).unwrap())
        .collect()
}

/// Identifiers are drawn from `0..ids`, so a small `ids` forces entries to share identifiers.
pub fn random_variants(
    rand: &mut impl Rand,
    count: usize,
    ids: u64,
    pool: u64,
    picks: usize,
) -> Vec<Variant> {
    (0..count)
        .map(|_| {
            let id = format!("v{}", rand.next_u64() % ids);
            Variant::new(id, random_numbers(rand, pool, picks)).unwrap()
        })
        .collect()
}
