use std::env;
use std::error::Error;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use drawcheck::cache::CachingEvaluator;
use drawcheck::engine::{AggregationResult, Evaluation};
use drawcheck::export::{export_all, Artifact};
use drawcheck::file::{read_text, WriteJsonFile};
use drawcheck::matching::Threshold;
use drawcheck::parse::{parse_rounds, parse_variants};
use drawcheck::print::{tabulate_rounds, tabulate_summary, tabulate_sweep};
use drawcheck::store::Store;
use drawcheck::views::Views;

const THRESHOLD_RANGE: RangeInclusive<u8> = 2..=10;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file of rounds, one per line: 1,6,7,9,44,77
    #[clap(short = 'r', long)]
    rounds: Option<PathBuf>,

    /// file of variants, one per line: <id>, 6 7 5 77
    #[clap(short = 'v', long)]
    variants: Option<PathBuf>,

    /// minimum count of common numbers for a win
    #[clap(short = 't', long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=10))]
    threshold: u8,

    /// directory to export the result listings into
    #[clap(short = 'o', long)]
    out: Option<PathBuf>,

    /// file to write the full evaluation to, as JSON
    #[clap(short = 'j', long)]
    json: Option<PathBuf>,

    /// also tabulate the totals for every threshold in 2..=10
    #[clap(short = 's', long)]
    sweep: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        self.rounds
            .as_ref()
            .ok_or(anyhow!("rounds file must be specified"))?;
        self.variants
            .as_ref()
            .ok_or(anyhow!("variants file must be specified"))?;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let mut store = Store::default();
    let rounds_file = args.rounds.unwrap();
    let rounds_text = read_text(&rounds_file)
        .with_context(|| format!("cannot read rounds from {rounds_file:?}"))?;
    store.add_rounds(parse_rounds(&rounds_text));
    let variants_file = args.variants.unwrap();
    let variants_text = read_text(&variants_file)
        .with_context(|| format!("cannot read variants from {variants_file:?}"))?;
    store.add_variants(parse_variants(&variants_text));
    info!(
        "loaded {} rounds and {} variants",
        store.rounds().len(),
        store.variants().len()
    );

    let snapshot = store.snapshot();
    let threshold = Threshold::new(args.threshold as usize)?;
    let mut evaluator = CachingEvaluator::default();

    if args.sweep {
        let start_time = Instant::now();
        let mut sweep = Vec::with_capacity(THRESHOLD_RANGE.len());
        for t in THRESHOLD_RANGE {
            let evaluation =
                evaluator.evaluate(&snapshot.rounds, &snapshot.variants, Threshold::new(t as usize)?)?;
            if let Some(result) = evaluation.computed() {
                sweep.push(result.clone());
            }
        }
        debug!("swept {} thresholds in {:?}", sweep.len(), start_time.elapsed());
        if !sweep.is_empty() {
            let sweep: Vec<&AggregationResult> = sweep.iter().collect();
            info!("sweep:\n{}", Console::default().render(&tabulate_sweep(&sweep)));
        }
    }

    let start_time = Instant::now();
    let evaluation = evaluator
        .evaluate(&snapshot.rounds, &snapshot.variants, threshold)?
        .clone();
    debug!(
        "evaluated in {:?}, cache: {:?}",
        start_time.elapsed(),
        evaluator.stats()
    );

    if let Some(path) = &args.json {
        evaluation.write_json_file(path)?;
        info!("wrote evaluation to {path:?}");
    }

    let result = match evaluation {
        Evaluation::Empty(empty) => {
            info!(
                "nothing to check: {} rounds, {} variants; add rounds and variants first",
                empty.rounds, empty.variants
            );
            return Ok(());
        }
        Evaluation::Computed(result) => result,
    };

    let views = Views::of(&snapshot, &result)?;
    info!("rounds:\n{}", Console::default().render(&tabulate_rounds(&views)));
    info!("summary:\n{}", Console::default().render(&tabulate_summary(&views)));

    if let Some(dir) = &args.out {
        let paths = export_all(dir, Artifact::iter(), &views)?;
        info!("exported {} listings to {dir:?}", paths.len());
    }

    Ok(())
}
