//! Export of the rendered views as line-delimited text files, one file per [Artifact].

use std::fs;
use std::io::Error;
use std::path::{Path, PathBuf};

use strum_macros::{EnumIter, IntoStaticStr};
use tracing::debug;

use crate::file::write_lines;
use crate::views::Views;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Artifact {
    Rounds,
    Variants,
    RoundSummary,
    TotalWins,
    UniqueWins,
    DistinctWins,
    SingleWins,
    LosingVariants,
    WinningRounds,
    LosingRounds,
}
impl Artifact {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn file_name(&self) -> String {
        format!("{}.txt", self.name())
    }

    pub fn lines(&self, views: &Views) -> Vec<String> {
        match self {
            Artifact::Rounds => views.round_lines(),
            Artifact::Variants => views.variant_lines(),
            Artifact::RoundSummary => views.round_summary_lines(),
            Artifact::TotalWins => views.total_win_lines(),
            Artifact::UniqueWins => {
                let mut lines = views.unique_win_lines();
                let total = lines.len();
                lines.push(String::new());
                lines.push(format!("Total unique winning variants: {total}"));
                lines
            }
            Artifact::DistinctWins => views.distinct_win_lines(),
            Artifact::SingleWins => views.single_win_lines(),
            Artifact::LosingVariants => views.losing_variant_lines(),
            Artifact::WinningRounds => views.winning_round_lines(),
            Artifact::LosingRounds => views.losing_round_lines(),
        }
    }

    pub fn export(&self, dir: impl AsRef<Path>, views: &Views) -> Result<PathBuf, Error> {
        let path = dir.as_ref().join(self.file_name());
        let lines = self.lines(views);
        write_lines(&path, &lines)?;
        debug!("exported {} lines to {path:?}", lines.len());
        Ok(path)
    }
}

/// Writes every artifact into `dir`, creating it if needed. Returns the written paths.
pub fn export_all(
    dir: impl AsRef<Path>,
    artifacts: impl IntoIterator<Item = Artifact>,
    views: &Views,
) -> Result<Vec<PathBuf>, Error> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    artifacts
        .into_iter()
        .map(|artifact| artifact.export(dir, views))
        .collect()
}
