//! Two-column lookup tables with linear interpolation.
//!
//! Engine layout curves and propeller open-water curves arrive as
//! whitespace-separated text, one `<x> <y>` sample per line. Malformed rows
//! are skipped with a warning so a stray comment or header never aborts a
//! simulation setup.

use crate::ConfigError;

use log::warn;
use serde::{Serialize, Deserialize};

use std::io::BufRead;

// Table {{{1
/// A piecewise-linear lookup table over monotonically increasing x samples.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Table {
    points: Vec<(f64, f64)>,
}

impl Table {
    // from_points {{{2
    /// Build a table from raw samples; sorts by x.
    ///
    pub fn from_points(mut points: Vec<(f64, f64)>) -> Table {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Table { points }
    }

    // parse {{{2
    /// Read `<x> <y>` rows from a reader, skipping malformed lines.
    ///
    pub fn parse<R: BufRead>(reader: R) -> Result<Table, std::io::Error> {
        let mut points = Vec::new();

        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() { continue; }

            let mut fields = trimmed.split_whitespace();
            let parsed = match (fields.next(), fields.next()) {
                (Some(x), Some(y)) => match (x.parse::<f64>(), y.parse::<f64>()) {
                    (Ok(x), Ok(y)) => Some((x, y)),
                    _              => None,
                },
                _ => None,
            };

            match parsed {
                Some(p) => points.push(p),
                None    => warn!("table: skipping malformed row {}: {trimmed:?}", n + 1),
            }
        }

        Ok(Table::from_points(points))
    }

    // interpolate {{{2
    /// Linear interpolation at `x`, clamped to the first/last sample outside
    /// the table range.
    ///
    pub fn interpolate(&self, x: f64) -> Result<f64, ConfigError> {
        let first = self.points.first().ok_or(ConfigError::EmptyTable)?;
        let last = self.points.last().ok_or(ConfigError::EmptyTable)?;

        if x <= first.0 { return Ok(first.1); }
        if x >= last.0 { return Ok(last.1); }

        for pair in self.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x <= x1 {
                if x1 == x0 { return Ok(y0); } // catch divide by zero
                return Ok(y0 + (y1 - y0) * (x - x0) / (x1 - x0));
            }
        }

        Ok(last.1)
    }

    // min_x / max_x {{{2
    pub fn min_x(&self) -> Result<f64, ConfigError> {
        Ok(self.points.first().ok_or(ConfigError::EmptyTable)?.0)
    }

    pub fn max_x(&self) -> Result<f64, ConfigError> {
        Ok(self.points.last().ok_or(ConfigError::EmptyTable)?.0)
    }
}
