// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Readers for the two input files.
//!
//! - MCS file: one cut set per line as a string of `0`/`1`, one character per
//!   reaction. Blank lines are skipped.
//! - Compression file: only the first line is read. It holds either one
//!   positive integer per compressed reaction, or (with a delimiter) one name
//!   per compressed reaction where the original reactions merged into it are
//!   joined by the delimiter, e.g. `R1%R2%R3 R4`.

use crate::errors::{PofError, Result};
use crate::sets::ReactionSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// How the compression file encodes multiplicities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiplicityFormat {
    /// Whitespace-separated positive integers.
    #[default]
    Counts,
    /// Whitespace-separated names; multiplicity is `delimiters + 1`.
    Names { delimiter: char },
}

/// Parse binary-encoded cut sets, one per line.
pub fn parse_mcs<R: BufRead>(reader: R) -> Result<Vec<ReactionSet>> {
    let mut sets = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let bits = line.trim();
        if bits.is_empty() {
            continue;
        }
        let set = ReactionSet::from_bit_str(bits).map_err(|column| PofError::Parse {
            line: number + 1,
            message: format!(
                "expected '0' or '1' at column {}, found {:?}",
                column + 1,
                bits[column..].chars().next().unwrap_or(' ')
            ),
        })?;
        sets.push(set);
    }
    Ok(sets)
}

pub fn read_mcs_file(path: &Path) -> Result<Vec<ReactionSet>> {
    info!("Reading MCS file {}", path.display());
    let sets = parse_mcs(BufReader::new(File::open(path)?))?;
    info!(
        "Read {} MCSs over {} reactions",
        sets.len(),
        sets.first().map_or(0, ReactionSet::universe)
    );
    Ok(sets)
}

/// Parse the multiplicities from the first line of `reader`.
pub fn parse_multiplicities<R: BufRead>(
    mut reader: R,
    format: MultiplicityFormat,
) -> Result<Vec<u32>> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let parse_error = |message: String| PofError::Parse { line: 1, message };

    let multiplicities: Vec<u32> = match format {
        MultiplicityFormat::Counts => line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u32>()
                    .map_err(|e| parse_error(format!("invalid multiplicity {:?}: {}", token, e)))
            })
            .collect::<Result<_>>()?,
        MultiplicityFormat::Names { delimiter } => line
            .split_whitespace()
            .map(|name| name.matches(delimiter).count() as u32 + 1)
            .collect(),
    };

    if multiplicities.is_empty() {
        return Err(parse_error("no multiplicities found".to_string()));
    }
    Ok(multiplicities)
}

pub fn read_multiplicity_file(path: &Path, format: MultiplicityFormat) -> Result<Vec<u32>> {
    info!("Reading compression file {}", path.display());
    parse_multiplicities(BufReader::new(File::open(path)?), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_mcs() {
        let sets = parse_mcs(Cursor::new("0100\n\n1010\r\n")).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].indices(), &[1]);
        assert_eq!(sets[1].indices(), &[0, 2]);
        assert_eq!(sets[1].universe(), 4);
    }

    #[test]
    fn test_parse_mcs_reports_line_and_column() {
        let err = parse_mcs(Cursor::new("0100\n01x0\n")).unwrap_err();
        match err {
            PofError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("column 3"), "{}", message);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_counts() {
        let m = parse_multiplicities(Cursor::new("1 1 3 1 2\nignored"), MultiplicityFormat::Counts)
            .unwrap();
        assert_eq!(m, vec![1, 1, 3, 1, 2]);
    }

    #[test]
    fn test_parse_names() {
        let m = parse_multiplicities(
            Cursor::new("R1 R2%R3%R4 R5%R6\n"),
            MultiplicityFormat::Names { delimiter: '%' },
        )
        .unwrap();
        assert_eq!(m, vec![1, 3, 2]);
    }

    #[test]
    fn test_parse_counts_rejects_garbage() {
        assert!(matches!(
            parse_multiplicities(Cursor::new("1 two 3"), MultiplicityFormat::Counts),
            Err(PofError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_multiplicities(Cursor::new(""), MultiplicityFormat::Counts),
            Err(PofError::Parse { .. })
        ));
    }
}
