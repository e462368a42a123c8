//! Best-effort parsing of pasted text into records.
//!
//! Rounds are comma-separated numbers, one round per line: `1,6,7,9,44,77`. Variants are an
//! identifier, a comma, then space-separated numbers: `A1, 6 7 5 77`. Tokens that are not plain
//! decimal numbers are discarded, as are numbers beyond `u64`, and a line left without numbers is
//! dropped.

use tracing::debug;

use crate::record::{Round, Variant};

pub fn parse_rounds(text: &str) -> Vec<Round> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let round = parse_round(line);
            if round.is_none() && !line.trim().is_empty() {
                debug!("dropped round line {}: '{line}'", index + 1);
            }
            round
        })
        .collect()
}

pub fn parse_round(line: &str) -> Option<Round> {
    let numbers = parse_numbers(line.split(','));
    Round::new(numbers).ok()
}

pub fn parse_variants(text: &str) -> Vec<Variant> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let variant = parse_variant(line);
            if variant.is_none() && !line.trim().is_empty() {
                debug!("dropped variant line {}: '{line}'", index + 1);
            }
            variant
        })
        .collect()
}

pub fn parse_variant(line: &str) -> Option<Variant> {
    let (id, rest) = line.split_once(',')?;
    let numbers = parse_numbers(rest.split_whitespace());
    Variant::new(id.trim(), numbers).ok()
}

fn parse_numbers<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<u64> {
    tokens
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| match token.parse() {
            Ok(number) => Some(number),
            Err(err) => {
                debug!("dropped number '{token}': {err}");
                None
            }
        })
        .collect()
}
