use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use ndarray::Array2;
use rust_xlsxwriter::{Color, Format, Workbook};

use super::filter::sorted_by_rating;
use crate::rating::Competitor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOutcome {
    SelfPair,
    Winning,
    Losing,
    Tied,
    Unplayed,
}

impl CellOutcome {
    /// Spreadsheet fill; pairs that never met stay unfilled.
    pub fn fill(self) -> Option<Color> {
        match self {
            CellOutcome::SelfPair => Some(Color::Gray),
            CellOutcome::Winning => Some(Color::Green),
            CellOutcome::Losing => Some(Color::Red),
            CellOutcome::Tied => Some(Color::Yellow),
            CellOutcome::Unplayed => None,
        }
    }
}

/// Row competitor's record against the column competitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchupCell {
    pub wins: usize,
    pub losses: usize,
    pub outcome: CellOutcome,
}

impl MatchupCell {
    fn self_pair() -> Self {
        Self {
            wins: 0,
            losses: 0,
            outcome: CellOutcome::SelfPair,
        }
    }

    fn from_record(wins: usize, losses: usize) -> Self {
        let outcome = match (wins, losses) {
            (0, 0) => CellOutcome::Unplayed,
            (w, l) if w > l => CellOutcome::Winning,
            (w, l) if w < l => CellOutcome::Losing,
            _ => CellOutcome::Tied,
        };
        Self {
            wins,
            losses,
            outcome,
        }
    }

    /// Spreadsheet text: blank on the diagonal and for pairs that never met.
    pub fn label(&self) -> String {
        match self.outcome {
            CellOutcome::SelfPair | CellOutcome::Unplayed => String::new(),
            _ => format!("{}-{}", self.wins, self.losses),
        }
    }
}

/// N×N win-loss tallies for a ranked subset of competitors.
#[derive(Debug, Clone)]
pub struct MatchupMatrix {
    names: Vec<String>,
    cells: Array2<MatchupCell>,
}

impl MatchupMatrix {
    /// Build the matrix over `list` in rating order.
    pub fn build(list: &[&Competitor]) -> Self {
        let ranked = sorted_by_rating(list.to_vec());
        let n = ranked.len();
        let cells = Array2::from_shape_fn((n, n), |(i, j)| {
            if i == j {
                MatchupCell::self_pair()
            } else {
                let (wins, losses) = ranked[i].record_against(ranked[j].id);
                MatchupCell::from_record(wins, losses)
            }
        });

        Self {
            names: ranked.iter().map(|c| c.name.clone()).collect(),
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn cell(&self, row: usize, col: usize) -> MatchupCell {
        self.cells[[row, col]]
    }

    /// Coloured terminal table.
    pub fn render(&self) -> String {
        let width = self.names.iter().map(String::len).max().unwrap_or(0).max(4);
        let mut out = String::new();

        let _ = write!(out, "{:width$}", "", width = width);
        for idx in 0..self.len() {
            let _ = write!(out, " {:>5}", (idx + 1).to_string().bold());
        }
        out.push('\n');

        for (i, name) in self.names.iter().enumerate() {
            let _ = write!(out, "{:width$}", name, width = width);
            for j in 0..self.len() {
                let cell = self.cell(i, j);
                let text = format!("{:>5}", cell.label());
                let painted = match cell.outcome {
                    CellOutcome::SelfPair => text.on_bright_black(),
                    CellOutcome::Winning => text.black().on_green(),
                    CellOutcome::Losing => text.black().on_red(),
                    CellOutcome::Tied => text.black().on_yellow(),
                    CellOutcome::Unplayed => text.normal(),
                };
                let _ = write!(out, " {}", painted);
            }
            out.push('\n');
        }
        out
    }

    /// Spreadsheet form: header row of names, then one row per competitor.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        let mut header = vec![String::new()];
        header.extend(self.names.iter().cloned());
        writer.write_record(&header)?;

        for (i, name) in self.names.iter().enumerate() {
            let mut row = vec![name.clone()];
            row.extend((0..self.len()).map(|j| self.cell(i, j).label()));
            writer.write_record(&row)?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Workbook form of the CSV layout, with cells filled by outcome.
    pub fn write_xlsx(&self, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let header = Format::new().set_bold();

        for (idx, name) in self.names.iter().enumerate() {
            let pos = idx + 1;
            sheet.write_string_with_format(0, pos as u16, name, &header)?;
            sheet.write_string_with_format(pos as u32, 0, name, &header)?;
        }

        for i in 0..self.len() {
            for j in 0..self.len() {
                let cell = self.cell(i, j);
                let Some(color) = cell.outcome.fill() else {
                    continue;
                };
                let format = Format::new().set_background_color(color);
                let (row, col) = ((i + 1) as u32, (j + 1) as u16);
                match cell.outcome {
                    CellOutcome::SelfPair => sheet.write_blank(row, col, &format)?,
                    _ => sheet.write_string_with_format(row, col, cell.label(), &format)?,
                };
            }
        }

        workbook
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
