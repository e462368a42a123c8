use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Cell, Col, Row, Table};

use crate::engine::AggregationResult;
use crate::views::Views;

pub fn tabulate_rounds(views: &Views) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(6))),
            Col::new(Styles::default().with(MinWidth(24))),
            Col::new(Styles::default().with(MinWidth(10))),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Round".into(), "Numbers".into(), "Winners".into()],
        ));
    let per_round_wins = views.result().per_round_wins();
    table.push_rows(
        views
            .round_lines()
            .into_iter()
            .zip(per_round_wins)
            .enumerate()
            .map(|(index, (numbers, wins))| {
                Row::new(
                    Styles::default(),
                    vec![
                        Cell::new(
                            Styles::default().with(HAlign::Right),
                            format!("{}", index + 1).into(),
                        ),
                        Cell::new(Styles::default(), numbers.into()),
                        Cell::new(
                            Styles::default().with(HAlign::Right),
                            format!("{wins}").into(),
                        ),
                    ],
                )
            }),
    );
    table
}

pub fn tabulate_summary(views: &Views) -> Table {
    let result = views.result();
    let relation = result.relation();
    let metrics = [
        ("Rounds", relation.rounds()),
        ("Variants", relation.variants()),
        ("Wins", result.total_wins()),
        ("Unique winning variants", result.winning_identifiers().len()),
        ("Distinct winning lines", views.distinct_win_lines().len()),
        ("Single-win variants", result.single_win_entries().len()),
        ("Losing variants", result.losing_identifiers().len()),
        ("Winning rounds", result.winning_rounds().len()),
        ("Losing rounds", result.losing_rounds().len()),
    ];
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(26))),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![format!("Threshold {}", result.threshold()).into(), "".into()],
        ));
    table.push_rows(metrics.into_iter().map(|(metric, value)| {
        Row::new(
            Styles::default(),
            vec![metric.into(), format!("{value}").into()],
        )
    }));
    table
}

/// Totals for each threshold in a sweep, one row per threshold.
pub fn tabulate_sweep(results: &[&AggregationResult]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(16)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(16)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Threshold".into(),
                "Wins".into(),
                "Winning variants".into(),
                "Winning rounds".into(),
            ],
        ));
    table.push_rows(results.iter().map(|result| {
        Row::new(
            Styles::default(),
            vec![
                format!("{}", result.threshold()).into(),
                format!("{}", result.total_wins()).into(),
                format!("{}", result.winning_identifiers().len()).into(),
                format!("{}", result.winning_rounds().len()).into(),
            ],
        )
    }));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Evaluation;
    use crate::store::Snapshot;
    use crate::testing::{round, threshold, variant};

    fn snapshot() -> Snapshot {
        Snapshot {
            rounds: vec![round(&[1, 6, 7, 9, 44, 77]), round(&[2, 5, 3, 77, 6, 56])],
            variants: vec![variant("1", &[6, 7, 9, 44]), variant("2", &[6, 7, 5, 77])],
        }
    }

    fn result_at(snapshot: &Snapshot, t: usize) -> AggregationResult {
        match snapshot.evaluate(threshold(t)) {
            Evaluation::Computed(result) => result,
            Evaluation::Empty(_) => unreachable!(),
        }
    }

    #[test]
    fn rounds_table_has_a_row_per_round() {
        let snapshot = snapshot();
        let result = result_at(&snapshot, 3);
        let views = Views::of(&snapshot, &result).unwrap();
        let table = tabulate_rounds(&views);
        assert_eq!(3, table.num_rows());
        assert_eq!(3, table.num_cols());
    }

    #[test]
    fn summary_table_has_a_row_per_metric() {
        let snapshot = snapshot();
        let result = result_at(&snapshot, 4);
        let views = Views::of(&snapshot, &result).unwrap();
        let table = tabulate_summary(&views);
        assert_eq!(10, table.num_rows());
        assert_eq!(2, table.num_cols());
    }

    #[test]
    fn sweep_table_has_a_row_per_threshold() {
        let snapshot = snapshot();
        let results: Vec<_> = (2..=6).map(|t| result_at(&snapshot, t)).collect();
        let table = tabulate_sweep(&results.iter().collect::<Vec<_>>());
        assert_eq!(6, table.num_rows());
    }
}
