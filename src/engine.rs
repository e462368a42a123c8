//! The aggregation engine. Evaluates the matching rule once for every (round, variant) pair,
//! capturing the outcomes in a dense [WinRelation], and derives all counts and winner/loser
//! sets from that single relation.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet, FxHasher};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::matching::{matches, Threshold};
use crate::record::{Round, Variant};

/// Round-major Boolean matrix of match outcomes. Cell `(round, variant)` is `true` iff the
/// variant wins the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinRelation {
    rounds: usize,
    variants: usize,
    cells: Vec<bool>,
}
impl WinRelation {
    fn allocate(rounds: usize, variants: usize) -> Self {
        Self {
            rounds,
            variants,
            cells: vec![false; rounds * variants],
        }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn variants(&self) -> usize {
        self.variants
    }

    /// Indexes are zero-based.
    #[inline]
    pub fn get(&self, round: usize, variant: usize) -> bool {
        assert!(variant < self.variants, "no variant at index {variant}");
        self.cells[round * self.variants + variant]
    }

    /// All outcomes for the round at the given zero-based index.
    pub fn row(&self, round: usize) -> &[bool] {
        let start = round * self.variants;
        &self.cells[start..start + self.variants]
    }

    /// Iterates over the `(round, variant)` index pairs of all winning cells, round-major.
    pub fn wins(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let variants = self.variants;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, won)| **won)
            .map(move |(index, _)| (index / variants, index % variants))
    }
}

/// The counts and winner/loser sets derived from a [WinRelation].
///
/// Rounds are reported by their 1-based number. Variants are reported either as zero-based
/// entry indexes (distinguishing entries that share an identifier) or as identifiers
/// (collapsing such entries). Identifier sets are ordered by first appearance in the variant
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    #[serde(skip)]
    dataset: u64,
    threshold: Threshold,
    relation: WinRelation,
    per_round_wins: Vec<usize>,
    per_variant_wins: Vec<usize>,
    total_wins: usize,
    winning_identifiers: Vec<String>,
    losing_identifiers: Vec<String>,
    single_win_entries: Vec<usize>,
    single_win_identifiers: Vec<String>,
    winning_rounds: Vec<usize>,
    losing_rounds: Vec<usize>,
}
impl AggregationResult {
    /// Whether this result was evaluated over the given rounds and variants.
    pub fn evaluated_over(&self, rounds: &[Round], variants: &[Variant]) -> bool {
        self.dataset == fingerprint(rounds, variants)
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn relation(&self) -> &WinRelation {
        &self.relation
    }

    /// Winning variant count for every round, in round order.
    pub fn per_round_wins(&self) -> &[usize] {
        &self.per_round_wins
    }

    /// Winning round count for every variant entry, in input order.
    pub fn per_variant_wins(&self) -> &[usize] {
        &self.per_variant_wins
    }

    /// Number of winning (round, variant) pairs. A variant winning three rounds contributes 3.
    pub fn total_wins(&self) -> usize {
        self.total_wins
    }

    /// Distinct identifiers with at least one winning entry.
    pub fn winning_identifiers(&self) -> &[String] {
        &self.winning_identifiers
    }

    /// Distinct identifiers none of whose entries won.
    pub fn losing_identifiers(&self) -> &[String] {
        &self.losing_identifiers
    }

    /// Zero-based indexes of the variant entries that won exactly one round.
    pub fn single_win_entries(&self) -> &[usize] {
        &self.single_win_entries
    }

    /// Distinct identifiers of the entries that won exactly one round.
    pub fn single_win_identifiers(&self) -> &[String] {
        &self.single_win_identifiers
    }

    /// 1-based numbers of the rounds with at least one winner.
    pub fn winning_rounds(&self) -> &[usize] {
        &self.winning_rounds
    }

    /// 1-based numbers of the rounds without a winner.
    pub fn losing_rounds(&self) -> &[usize] {
        &self.losing_rounds
    }

    pub fn distinct_winning_rounds(&self) -> BTreeSet<usize> {
        self.winning_rounds.iter().copied().collect()
    }

    pub fn distinct_losing_rounds(&self) -> BTreeSet<usize> {
        self.losing_rounds.iter().copied().collect()
    }

    /// One `(round number, variant index)` pair per winning cell, round-major. Unlike
    /// [winning_identifiers](Self::winning_identifiers), a variant appears once per round won.
    pub fn winning_entries(&self) -> Vec<(usize, usize)> {
        self.relation
            .wins()
            .map(|(round, variant)| (round + 1, variant))
            .collect()
    }
}

/// Reported in place of a result when there is nothing to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyDataset {
    pub rounds: usize,
    pub variants: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Evaluation {
    Empty(EmptyDataset),
    Computed(AggregationResult),
}
impl Evaluation {
    pub fn is_empty(&self) -> bool {
        matches!(self, Evaluation::Empty(_))
    }

    pub fn computed(&self) -> Option<&AggregationResult> {
        match self {
            Evaluation::Empty(_) => None,
            Evaluation::Computed(result) => Some(result),
        }
    }
}

/// A cancellation flag, shared between the caller and a running evaluation.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);
impl Interrupt {
    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("evaluation interrupted after {completed} of {total} rounds")]
pub struct Interrupted {
    pub completed: usize,
    pub total: usize,
}

pub fn evaluate(rounds: &[Round], variants: &[Variant], threshold: Threshold) -> Evaluation {
    aggregate(rounds, variants, threshold, || false)
        .unwrap_or_else(|err| unreachable!("{err}"))
}

/// As [evaluate], checking the `interrupt` before each round.
pub fn evaluate_interruptible(
    rounds: &[Round],
    variants: &[Variant],
    threshold: Threshold,
    interrupt: &Interrupt,
) -> Result<Evaluation, Interrupted> {
    aggregate(rounds, variants, threshold, || interrupt.is_raised())
}

fn aggregate(
    rounds: &[Round],
    variants: &[Variant],
    threshold: Threshold,
    mut interrupted: impl FnMut() -> bool,
) -> Result<Evaluation, Interrupted> {
    if rounds.is_empty() || variants.is_empty() {
        debug!(
            "nothing to evaluate: {} rounds, {} variants",
            rounds.len(),
            variants.len()
        );
        return Ok(Evaluation::Empty(EmptyDataset {
            rounds: rounds.len(),
            variants: variants.len(),
        }));
    }

    let mut relation = WinRelation::allocate(rounds.len(), variants.len());
    let mut per_round_wins = vec![0; rounds.len()];
    let mut per_variant_wins = vec![0; variants.len()];
    for (round_index, round) in rounds.iter().enumerate() {
        if interrupted() {
            return Err(Interrupted {
                completed: round_index,
                total: rounds.len(),
            });
        }
        let row_start = round_index * variants.len();
        for (variant_index, variant) in variants.iter().enumerate() {
            if matches(round, variant, threshold) {
                relation.cells[row_start + variant_index] = true;
                per_round_wins[round_index] += 1;
                per_variant_wins[variant_index] += 1;
            }
        }
        trace!(
            "round {}: {} winning variants",
            round_index + 1,
            per_round_wins[round_index]
        );
    }
    let total_wins = per_round_wins.iter().sum();

    let identifiers = IdentifierTally::tally(variants, &per_variant_wins);
    let single_win_entries: Vec<_> = per_variant_wins
        .iter()
        .enumerate()
        .filter(|(_, wins)| **wins == 1)
        .map(|(index, _)| index)
        .collect();
    let single_win_identifiers =
        distinct_identifiers(single_win_entries.iter().map(|&index| variants[index].id()));

    let (winning_rounds, losing_rounds): (Vec<_>, Vec<_>) =
        (1..=rounds.len()).partition(|&number| per_round_wins[number - 1] > 0);

    debug!(
        "evaluated {} rounds x {} variants at threshold {threshold}: {total_wins} wins, {} winning identifiers, {} winning rounds",
        rounds.len(),
        variants.len(),
        identifiers.winning.len(),
        winning_rounds.len()
    );

    Ok(Evaluation::Computed(AggregationResult {
        dataset: fingerprint(rounds, variants),
        threshold,
        relation,
        per_round_wins,
        per_variant_wins,
        total_wins,
        winning_identifiers: identifiers.winning,
        losing_identifiers: identifiers.losing,
        single_win_entries,
        single_win_identifiers,
        winning_rounds,
        losing_rounds,
    }))
}

struct IdentifierTally {
    winning: Vec<String>,
    losing: Vec<String>,
}
impl IdentifierTally {
    fn tally(variants: &[Variant], per_variant_wins: &[usize]) -> Self {
        let mut order: Vec<&str> = Vec::with_capacity(variants.len());
        let mut won: FxHashMap<&str, bool> =
            FxHashMap::with_capacity_and_hasher(variants.len(), Default::default());
        for (variant, &wins) in variants.iter().zip(per_variant_wins) {
            let entry = won.entry(variant.id()).or_insert_with(|| {
                order.push(variant.id());
                false
            });
            *entry |= wins > 0;
        }
        let (winning, losing): (Vec<_>, Vec<_>) = order
            .into_iter()
            .map(ToString::to_string)
            .partition(|id| won[id.as_str()]);
        Self { winning, losing }
    }
}

fn distinct_identifiers<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    ids.filter(|id| seen.insert(*id))
        .map(ToString::to_string)
        .collect()
}

fn fingerprint(rounds: &[Round], variants: &[Variant]) -> u64 {
    let mut hasher = FxHasher::default();
    rounds.hash(&mut hasher);
    variants.hash(&mut hasher);
    hasher.finish()
}
