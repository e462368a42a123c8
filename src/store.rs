//! Session-scoped accumulation of rounds and variants. Both collections are append-only, save for
//! an explicit full clear.

use serde::Serialize;
use tracing::debug;

use crate::engine;
use crate::engine::Evaluation;
use crate::matching::Threshold;
use crate::record::{Round, Variant};

/// A consistent, owned copy of the store's contents, taken for evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub rounds: Vec<Round>,
    pub variants: Vec<Variant>,
}
impl Snapshot {
    pub fn evaluate(&self, threshold: Threshold) -> Evaluation {
        engine::evaluate(&self.rounds, &self.variants, threshold)
    }
}

#[derive(Debug, Default)]
pub struct Store {
    rounds: Vec<Round>,
    variants: Vec<Variant>,
}
impl Store {
    pub fn add_rounds(&mut self, rounds: impl IntoIterator<Item = Round>) {
        let before = self.rounds.len();
        self.rounds.extend(rounds);
        debug!(
            "added {} rounds, {} total",
            self.rounds.len() - before,
            self.rounds.len()
        );
    }

    pub fn clear_rounds(&mut self) {
        debug!("clearing {} rounds", self.rounds.len());
        self.rounds.clear();
    }

    pub fn add_variants(&mut self, variants: impl IntoIterator<Item = Variant>) {
        let before = self.variants.len();
        self.variants.extend(variants);
        debug!(
            "added {} variants, {} total",
            self.variants.len() - before,
            self.variants.len()
        );
    }

    pub fn clear_variants(&mut self) {
        debug!("clearing {} variants", self.variants.len());
        self.variants.clear();
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rounds: self.rounds.clone(),
            variants: self.variants.clone(),
        }
    }

    pub fn evaluate(&self, threshold: Threshold) -> Evaluation {
        engine::evaluate(&self.rounds, &self.variants, threshold)
    }
}
