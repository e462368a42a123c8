//! Typed representations of a draw result ([Round]) and a player selection ([Variant]).
//!
//! Both records keep the numbers in the order they were supplied, for rendering, alongside a
//! sorted, deduplicated copy that is used for matching. No range checks are applied; a number
//! is any `u64` and repeats are permitted.

use std::fmt::{Display, Formatter};

use bincode::Encode;
use serde::Serialize;
use thiserror::Error;

use crate::display::DisplayNumbers;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("a record must contain at least one number")]
    EmptyNumbers,

    #[error("a variant identifier must not be blank")]
    EmptyIdentifier,
}

/// One historical draw.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Encode, Serialize)]
pub struct Round {
    numbers: Vec<u64>,
    #[serde(skip)]
    distinct: Vec<u64>,
}
impl Round {
    pub fn new(numbers: Vec<u64>) -> Result<Self, InvalidInput> {
        let distinct = to_distinct(&numbers)?;
        Ok(Self { numbers, distinct })
    }

    /// The numbers as drawn.
    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    /// The drawn numbers as a sorted set.
    #[inline(always)]
    pub fn distinct(&self) -> &[u64] {
        &self.distinct
    }
}

impl Display for Round {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", DisplayNumbers::comma_separated(&self.numbers))
    }
}

/// One player selection. Identifiers are labels only; two variants may share one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Encode, Serialize)]
pub struct Variant {
    id: String,
    numbers: Vec<u64>,
    #[serde(skip)]
    distinct: Vec<u64>,
}
impl Variant {
    pub fn new(id: impl Into<String>, numbers: Vec<u64>) -> Result<Self, InvalidInput> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(InvalidInput::EmptyIdentifier);
        }
        let distinct = to_distinct(&numbers)?;
        Ok(Self {
            id,
            numbers,
            distinct,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The numbers as selected.
    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    /// The selected numbers as a sorted set.
    #[inline(always)]
    pub fn distinct(&self) -> &[u64] {
        &self.distinct
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}",
            self.id,
            DisplayNumbers::space_separated(&self.numbers)
        )
    }
}

fn to_distinct(numbers: &[u64]) -> Result<Vec<u64>, InvalidInput> {
    if numbers.is_empty() {
        return Err(InvalidInput::EmptyNumbers);
    }
    let mut distinct = numbers.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    Ok(distinct)
}
