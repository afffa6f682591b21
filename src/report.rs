// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Fixed-width text tables for results.

use crate::scoring::ScoreRow;
use crate::state::ContributionTable;
use std::fmt;

/// A table of centred, fixed-width columns separated by `|`, with a dashed
/// rule under the header.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<&'static str>,
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &[(&'static str, usize)]) -> Self {
        Self {
            headers: columns.iter().map(|&(h, _)| h).collect(),
            widths: columns.iter().map(|&(_, w)| w).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render empty, surplus cells are ignored.
    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn write_line<S: AsRef<str>>(&self, f: &mut fmt::Formatter<'_>, cells: &[S]) -> fmt::Result {
        for (i, &width) in self.widths.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            let text = cells.get(i).map_or("", |c| c.as_ref());
            write!(f, "{:^width$}", text, width = width)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_line(f, self.headers.as_slice())?;
        let rule: usize = self.widths.iter().map(|w| w + 1).sum();
        writeln!(f, "{}", "-".repeat(rule))?;
        for row in &self.rows {
            self.write_line(f, row.as_slice())?;
        }
        Ok(())
    }
}

/// Format like C's `%.{significant}g`: fixed or scientific, whichever is
/// shorter for the magnitude, without trailing zeros.
pub fn format_general(value: f64, significant: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let significant = significant.max(1);
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= significant as i32 {
        let formatted = format!("{:.*e}", significant - 1, value);
        match formatted.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{}", trim_zeros(mantissa), exp),
            None => formatted,
        }
    } else {
        let decimals = (significant as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// The per-`d` result table.
pub fn score_table(rows: &[ScoreRow]) -> Table {
    let mut table = Table::new(&[
        ("d", 5),
        ("weight", 20),
        ("F(d)", 20),
        ("weighted F(d)", 20),
        ("acc. weighted F(d)", 20),
        ("lethal CS", 20),
        ("possible CS", 20),
    ]);
    for row in rows {
        table.push_row(vec![
            row.d.to_string(),
            format_general(row.weight, 10),
            format_general(row.score, 10),
            format_general(row.weighted, 10),
            format_general(row.accumulated, 10),
            format_general(row.lethal, 10),
            format_general(row.possible, 10),
        ]);
    }
    table
}

/// Non-zero cells of a contribution table.
pub fn contribution_table(contributions: &ContributionTable) -> Table {
    let mut table = Table::new(&[("|Mj|", 8), ("a", 8), ("#", 20)]);
    for (mj, a, count) in contributions.nonzero() {
        table.push_row(vec![mj.to_string(), a.to_string(), count.to_string()]);
    }
    table
}
