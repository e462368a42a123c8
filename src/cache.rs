//! Memoization of evaluations. Entries are kept for the most recently evaluated dataset only, one
//! per threshold, so a repeated evaluation over unchanged inputs is a lookup. A change to the
//! rounds or variants evicts every entry.

use std::collections::hash_map::Entry;
use std::ops::{Add, AddAssign};

use bincode::error::EncodeError;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace};

use crate::engine;
use crate::engine::Evaluation;
use crate::matching::Threshold;
use crate::record::{Round, Variant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl Add<bool> for CacheStats {
    type Output = CacheStats;

    fn add(self, cache_hit: bool) -> Self::Output {
        if cache_hit {
            Self {
                hits: self.hits + 1,
                ..self
            }
        } else {
            Self {
                misses: self.misses + 1,
                ..self
            }
        }
    }
}

impl AddAssign<bool> for CacheStats {
    fn add_assign(&mut self, cache_hit: bool) {
        *self = *self + cache_hit;
    }
}

#[derive(Debug, Error)]
#[error("cannot encode cache key: {0}")]
pub struct CacheKeyError(#[from] EncodeError);

type Bytes = Vec<u8>;

#[derive(Debug, Default)]
pub struct CachingEvaluator {
    dataset: Bytes,
    cache: FxHashMap<Threshold, Evaluation>,
    stats: CacheStats,
}
impl CachingEvaluator {
    pub fn evaluate(
        &mut self,
        rounds: &[Round],
        variants: &[Variant],
        threshold: Threshold,
    ) -> Result<&Evaluation, CacheKeyError> {
        let dataset = bincode::encode_to_vec((rounds, variants), bincode::config::standard())?;
        if dataset != self.dataset {
            if !self.cache.is_empty() {
                debug!("dataset changed, evicting {} evaluations", self.cache.len());
            }
            self.cache.clear();
            self.dataset = dataset;
        }
        let (evaluation, cache_hit) = match self.cache.entry(threshold) {
            Entry::Occupied(entry) => (entry.into_mut(), true),
            Entry::Vacant(entry) => {
                let evaluation = engine::evaluate(rounds, variants, threshold);
                (entry.insert(evaluation), false)
            }
        };
        self.stats += cache_hit;
        trace!("threshold {threshold}: cache hit: {cache_hit}, {:?}", self.stats);
        Ok(evaluation)
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.dataset.clear();
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{round, threshold, variant};

    #[test]
    fn add_bool() {
        assert_eq!(CacheStats { hits: 1, misses: 0 }, CacheStats::default() + true);
        assert_eq!(CacheStats { hits: 0, misses: 1 }, CacheStats::default() + false);
    }

    #[test]
    fn add_assign_bool() {
        let mut cs = CacheStats { hits: 1, misses: 0 };
        cs += false;
        assert_eq!(CacheStats { hits: 1, misses: 1 }, cs);
        cs += true;
        assert_eq!(CacheStats { hits: 2, misses: 1 }, cs);
    }

    #[test]
    fn repeated_evaluation_hits() {
        let rounds = vec![round(&[1, 6, 7, 9, 44, 77])];
        let variants = vec![variant("1", &[6, 7, 9, 44])];
        let mut evaluator = CachingEvaluator::default();

        let first = evaluator.evaluate(&rounds, &variants, threshold(4)).unwrap().clone();
        assert_eq!(engine::evaluate(&rounds, &variants, threshold(4)), first);
        assert_eq!(CacheStats { hits: 0, misses: 1 }, evaluator.stats());

        let second = evaluator.evaluate(&rounds, &variants, threshold(4)).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(CacheStats { hits: 1, misses: 1 }, evaluator.stats());
        assert_eq!(1, evaluator.len());
    }

    #[test]
    fn changed_inputs_miss() {
        let mut rounds = vec![round(&[1, 2, 3, 4])];
        let variants = vec![variant("a", &[1, 2, 3, 4])];
        let mut evaluator = CachingEvaluator::default();
        evaluator.evaluate(&rounds, &variants, threshold(4)).unwrap();
        evaluator.evaluate(&rounds, &variants, threshold(3)).unwrap();

        rounds.push(round(&[1, 2, 3, 5]));
        let evaluation = evaluator.evaluate(&rounds, &variants, threshold(3)).unwrap();
        assert_eq!(
            Some(2),
            evaluation.computed().map(|result| result.total_wins())
        );
        assert_eq!(CacheStats { hits: 0, misses: 3 }, evaluator.stats());
        assert_eq!(1, evaluator.len());

        evaluator.clear();
        assert!(evaluator.is_empty());
    }

    #[test]
    fn only_the_latest_dataset_is_kept() {
        let variants = vec![variant("a", &[1, 2, 3, 4])];
        let mut evaluator = CachingEvaluator::default();
        let mut rounds = vec![];
        for number in 5..105 {
            rounds.push(round(&[1, 2, 3, number]));
            for t in 2..=4 {
                evaluator.evaluate(&rounds, &variants, threshold(t)).unwrap();
            }
            assert_eq!(3, evaluator.len());
        }

        evaluator.evaluate(&rounds, &variants, threshold(3)).unwrap();
        assert_eq!(CacheStats { hits: 1, misses: 300 }, evaluator.stats());

        rounds.pop();
        evaluator.evaluate(&rounds, &variants, threshold(3)).unwrap();
        assert_eq!(1, evaluator.len());
        assert_eq!(301, evaluator.stats().misses);
    }

    #[test]
    fn identifiers_are_part_of_the_key() {
        let rounds = vec![round(&[1, 2])];
        let mut evaluator = CachingEvaluator::default();
        evaluator
            .evaluate(&rounds, &[variant("a", &[1, 2])], threshold(2))
            .unwrap();
        let evaluation = evaluator
            .evaluate(&rounds, &[variant("b", &[1, 2])], threshold(2))
            .unwrap();
        assert_eq!(
            Some(&["b".to_string()][..]),
            evaluation.computed().map(|result| result.winning_identifiers())
        );
        assert_eq!(2, evaluator.stats().misses);
    }
}
