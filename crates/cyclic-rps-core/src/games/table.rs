//! Pairwise outcome table shown as the in-game help.

use super::rules::RoundOutcome;
use serde::Serialize;
use std::fmt;

/// Label in the top-left corner: rows are the computer's move, columns the user's.
pub const CORNER_LABEL: &str = "v PC\\User >";

/// N x N outcome grid.
///
/// `cells[computer][user]` holds the outcome for the user when the
/// computer plays row `computer` and the user plays column `user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HelpTable {
    labels: Vec<String>,
    cells: Vec<Vec<RoundOutcome>>,
}

impl HelpTable {
    pub(crate) fn new(labels: Vec<String>, cells: Vec<Vec<RoundOutcome>>) -> Self {
        Self { labels, cells }
    }

    /// Move names labelling both axes
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Outcome for the user at (computer row, user column)
    pub fn cell(&self, computer: usize, user: usize) -> Option<RoundOutcome> {
        self.cells.get(computer)?.get(user).copied()
    }

    /// Each computer move with its row of outcomes for the user
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[RoundOutcome])> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter().map(Vec::as_slice))
    }

    fn column_widths(&self) -> Vec<usize> {
        let first = self
            .labels
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(CORNER_LABEL.len()))
            .max()
            .unwrap_or(0);
        let outcome_width = RoundOutcome::Lose.as_str().len();
        std::iter::once(first)
            .chain(
                self.labels
                    .iter()
                    .map(|l| l.chars().count().max(outcome_width)),
            )
            .collect()
    }
}

fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize], fill: char) -> fmt::Result {
    for width in widths {
        write!(f, "+{}", fill.to_string().repeat(width + 2))?;
    }
    writeln!(f, "+")
}

fn write_row<'a>(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize],
    cells: impl Iterator<Item = &'a str>,
) -> fmt::Result {
    for (cell, &width) in cells.zip(widths) {
        write!(f, "| {cell:<width$} ")?;
    }
    writeln!(f, "|")
}

impl fmt::Display for HelpTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();

        write_rule(f, &widths, '-')?;
        write_row(
            f,
            &widths,
            std::iter::once(CORNER_LABEL).chain(self.labels.iter().map(String::as_str)),
        )?;
        write_rule(f, &widths, '=')?;
        for (label, outcomes) in self.rows() {
            write_row(
                f,
                &widths,
                std::iter::once(label).chain(outcomes.iter().map(|o| o.as_str())),
            )?;
            write_rule(f, &widths, '-')?;
        }
        Ok(())
    }
}
