//! Checks player selections (variants) against draw results (rounds). A variant wins a round when
//! the two share at least a threshold number of distinct numbers. The outcomes of every pairing
//! are evaluated once, and all counts and winner/loser listings are derived from them.

pub mod cache;
pub mod display;
pub mod engine;
pub mod export;
pub mod file;
pub mod matching;
pub mod parse;
pub mod print;
pub mod record;
pub mod store;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
