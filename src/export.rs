//! Spreadsheet-style rendering of reports.
//!
//! A [`Workbook`] holds one [`Sheet`] per report. Each sheet renders as a
//! title row, a blank row, a header row and the data rows, with money shown
//! as `$#,##0.00` and undefined values left blank.

use crate::error::Result;
use crate::report::Report;
use crate::variance::VarianceReport;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MAX_COLUMN_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Text(String),
    Currency(f64),
    Percent(f64),
    Blank,
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Currency(value) => format_currency(*value),
            Cell::Percent(value) => format_percent(*value),
            Cell::Blank => String::new(),
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Cell::Currency(_) | Cell::Percent(_))
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Blank, Cell::Currency)
    }
}

/// Formats as `$#,##0.00`, with a leading minus for negatives.
///
/// Non-finite values are rendered as-is.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (digits, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = digits.chars().chain(fraction.chars()).all(|c| c == '0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, fraction)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn from_report(name: impl Into<String>, title: impl Into<String>, report: &Report) -> Self {
        let rows = report
            .lines
            .iter()
            .map(|line| vec![Cell::Text(line.label.clone()), Cell::from(line.amount)])
            .collect();

        Self {
            name: name.into(),
            title: title.into(),
            header: vec!["Line Item".to_string(), "Amount".to_string()],
            rows,
        }
    }

    pub fn from_variance(
        name: impl Into<String>,
        title: impl Into<String>,
        report: &VarianceReport,
    ) -> Self {
        let rows = report
            .rows
            .iter()
            .map(|row| {
                vec![
                    Cell::Text(row.label.clone()),
                    Cell::Currency(row.prior),
                    Cell::Currency(row.current),
                    Cell::Currency(row.delta),
                    row.delta_percent.map_or(Cell::Blank, Cell::Percent),
                ]
            })
            .collect();

        Self {
            name: name.into(),
            title: title.into(),
            header: [
                "Line Item",
                "Prior Period",
                "Current Period",
                "Variance $",
                "Variance %",
            ]
            .iter()
            .map(|h| h.to_string())
            .collect(),
            rows,
        }
    }

    /// Width per column: longest rendered cell plus two, capped at 50.
    ///
    /// The title sits in the first column and counts toward its width.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        if let Some(first) = widths.first_mut() {
            *first = (*first).max(self.title.chars().count());
        }

        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                let len = cell.render().chars().count();
                match widths.get_mut(idx) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
        }

        widths
            .into_iter()
            .map(|w| (w + 2).min(MAX_COLUMN_WIDTH))
            .collect()
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        wtr.write_record([self.title.as_str()])?;
        wtr.write_record(vec![""; self.header.len()])?;
        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(Cell::render))?;
        }

        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Fixed-width text table; text left-aligned, numbers right-aligned.
    pub fn to_text(&self) -> String {
        let widths = self.column_widths();
        let mut output = String::new();

        output.push_str(&self.title);
        output.push_str("\n\n");

        let header: Vec<String> = self
            .header
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:^width$}", h, width = *w))
            .collect();
        output.push_str(header.join(" ").trim_end());
        output.push('\n');

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        output.push_str(&rule.join(" "));
        output.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| {
                    let text = cell.render();
                    if cell.is_numeric() {
                        format!("{:>width$}", text, width = *w)
                    } else {
                        format!("{:<width$}", text, width = *w)
                    }
                })
                .collect();
            output.push_str(cells.join(" ").trim_end());
            output.push('\n');
        }

        output
    }

    pub fn file_name(&self) -> String {
        let stem: String = self
            .name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        format!("{}.csv", stem)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn to_text(&self) -> String {
        self.sheets
            .iter()
            .map(Sheet::to_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Writes one CSV file per sheet into `dir`, creating it if needed.
    pub fn write_csv_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.sheets.len());
        for sheet in &self.sheets {
            let path = dir.join(sheet.file_name());
            std::fs::write(&path, sheet.to_csv_string()?)?;
            written.push(path);
        }

        info!("Financial statements exported to {}", dir.display());
        Ok(written)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
