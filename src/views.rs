//! Read-only projections of an [AggregationResult] into rendered line sequences.
//!
//! All views derive from the result's single win relation, so counts shown side by side never
//! disagree. Variants render as `id, n1 n2 n3`, rounds as `n1,n2,n3`.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::engine::AggregationResult;
use crate::record::{Round, Variant};
use crate::store::Snapshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MismatchedResult {
    #[error("result covers {result_rounds}x{result_variants} but the dataset has {rounds}x{variants}")]
    Shape {
        result_rounds: usize,
        result_variants: usize,
        rounds: usize,
        variants: usize,
    },

    #[error("result was evaluated over a different dataset")]
    Dataset,
}

#[derive(Debug, Clone, Copy)]
pub struct Views<'a> {
    rounds: &'a [Round],
    variants: &'a [Variant],
    result: &'a AggregationResult,
}
impl<'a> Views<'a> {
    pub fn new(
        rounds: &'a [Round],
        variants: &'a [Variant],
        result: &'a AggregationResult,
    ) -> Result<Self, MismatchedResult> {
        let relation = result.relation();
        if relation.rounds() != rounds.len() || relation.variants() != variants.len() {
            return Err(MismatchedResult::Shape {
                result_rounds: relation.rounds(),
                result_variants: relation.variants(),
                rounds: rounds.len(),
                variants: variants.len(),
            });
        }
        if !result.evaluated_over(rounds, variants) {
            return Err(MismatchedResult::Dataset);
        }
        Ok(Self {
            rounds,
            variants,
            result,
        })
    }

    pub fn of(snapshot: &'a Snapshot, result: &'a AggregationResult) -> Result<Self, MismatchedResult> {
        Self::new(&snapshot.rounds, &snapshot.variants, result)
    }

    pub fn result(&self) -> &'a AggregationResult {
        self.result
    }

    pub fn round_lines(&self) -> Vec<String> {
        render(self.rounds.iter())
    }

    pub fn variant_lines(&self) -> Vec<String> {
        render(self.variants.iter())
    }

    /// `Round i - n winning variants`, for every round.
    pub fn round_summary_lines(&self) -> Vec<String> {
        self.result
            .per_round_wins()
            .iter()
            .enumerate()
            .map(|(index, wins)| format!("Round {} - {wins} winning variants", index + 1))
            .collect()
    }

    /// One line per winning (round, variant) pair, round-major; a variant repeats for every round
    /// it wins.
    pub fn total_win_lines(&self) -> Vec<String> {
        render(
            self.result
                .relation()
                .wins()
                .map(|(_, variant)| &self.variants[variant]),
        )
    }

    /// One line per winning identifier, ordered by the identifier's first win in the round-major
    /// scan. Where entries share an identifier, the last winning entry scanned is rendered.
    pub fn unique_win_lines(&self) -> Vec<String> {
        let mut order: Vec<&str> = vec![];
        let mut latest: FxHashMap<&str, &Variant> = FxHashMap::default();
        for (_, variant) in self.result.relation().wins() {
            let variant = &self.variants[variant];
            if latest.insert(variant.id(), variant).is_none() {
                order.push(variant.id());
            }
        }
        render(order.into_iter().map(|id| latest[id]))
    }

    /// Winning lines deduplicated on the rendered line rather than the identifier, in sorted
    /// order.
    pub fn distinct_win_lines(&self) -> Vec<String> {
        let mut lines = self.total_win_lines();
        lines.sort();
        lines.dedup();
        lines
    }

    /// Variant entries that won exactly one round.
    pub fn single_win_lines(&self) -> Vec<String> {
        render(
            self.result
                .single_win_entries()
                .iter()
                .map(|&index| &self.variants[index]),
        )
    }

    /// Variant entries whose identifier did not win anywhere.
    pub fn losing_variant_lines(&self) -> Vec<String> {
        let losing: FxHashSet<&str> = self
            .result
            .losing_identifiers()
            .iter()
            .map(String::as_str)
            .collect();
        render(
            self.variants
                .iter()
                .filter(|variant| losing.contains(variant.id())),
        )
    }

    pub fn winning_round_lines(&self) -> Vec<String> {
        render(self.result.winning_rounds().iter())
    }

    pub fn losing_round_lines(&self) -> Vec<String> {
        render(self.result.losing_rounds().iter())
    }
}

fn render<T: ToString>(items: impl Iterator<Item = T>) -> Vec<String> {
    items.map(|item| item.to_string()).collect()
}
