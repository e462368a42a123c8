//! The matching rule: a [Variant] wins a [Round] when the two share at least [Threshold] distinct
//! numbers.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::record::{Round, Variant};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("threshold must be in 1..={}, got {value}", Threshold::MAX)]
pub struct InvalidThreshold {
    pub value: i64,
}

/// Minimum number of distinct numbers a variant must share with a round to win it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Threshold(usize);

impl Threshold {
    pub const MIN: usize = 1;

    /// Largest practical selection size.
    pub const MAX: usize = u8::MAX as usize;

    pub fn new(value: usize) -> Result<Self, InvalidThreshold> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidThreshold {
                value: i64::try_from(value).unwrap_or(i64::MAX),
            })
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for Threshold {
    type Error = InvalidThreshold;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < Self::MIN as i64 {
            return Err(InvalidThreshold { value });
        }
        Self::new(value as usize).map_err(|_| InvalidThreshold { value })
    }
}

impl FromStr for Threshold {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse()?;
        Ok(Self::try_from(value)?)
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counts the elements common to two sorted, deduplicated slices.
#[inline]
pub fn common_count(a: &[u64], b: &[u64]) -> usize {
    debug_assert!(a.windows(2).all(|w| w[0] < w[1]), "not a sorted set: {a:?}");
    debug_assert!(b.windows(2).all(|w| w[0] < w[1]), "not a sorted set: {b:?}");
    let (mut i, mut j, mut common) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                common += 1;
                i += 1;
                j += 1;
            }
        }
    }
    common
}

#[inline(always)]
pub fn matches(round: &Round, variant: &Variant, threshold: Threshold) -> bool {
    common_count(round.distinct(), variant.distinct()) >= threshold.get()
}
