//! Column designation parsing.
//!
//! A designation such as `"1-4,6,8"` names columns 1-indexed, the way
//! command-line tools present them; parsing yields 0-indexed specs.

use crate::error::RelsetError;
use std::ops::Range;

/// One entry of a parsed column designation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnSpec {
    /// A single 0-indexed column.
    Index(usize),
    /// A half-open range of 0-indexed columns.
    Range(Range<usize>),
}

/// Parses a 1-indexed column designation into 0-indexed specs.
///
/// `"1-4,6,8"` becomes `[Range(0..4), Index(5), Index(7)]`. Empty
/// segments, non-numeric parts, a column number of 0, and descending
/// ranges are rejected.
pub fn parse_column_spec(text: &str) -> Result<Vec<ColumnSpec>, RelsetError> {
    let mut specs = Vec::new();
    for part in text.split(',') {
        let part = part.trim();
        if let Some((start, stop)) = part.split_once('-') {
            let start = parse_column_number(start)?;
            let stop = parse_column_number(stop)?;
            if stop < start {
                return Err(RelsetError::InvalidColumnSpec(format!(
                    "descending range `{part}`"
                )));
            }
            specs.push(ColumnSpec::Range(start - 1..stop));
        } else {
            specs.push(ColumnSpec::Index(parse_column_number(part)? - 1));
        }
    }
    Ok(specs)
}

fn parse_column_number(text: &str) -> Result<usize, RelsetError> {
    let number: usize = text.trim().parse().map_err(|_| {
        RelsetError::InvalidColumnSpec(format!("`{text}` is not a column number"))
    })?;
    if number == 0 {
        return Err(RelsetError::InvalidColumnSpec(
            "column numbers are 1-indexed".into(),
        ));
    }
    Ok(number)
}

/// Applies parsed specs to a record, in spec order.
///
/// References past the end of the record are skipped.
pub fn select_columns<'a, T>(specs: &[ColumnSpec], record: &'a [T]) -> Vec<&'a T> {
    let mut selected = Vec::new();
    for spec in specs {
        match spec {
            ColumnSpec::Index(index) => {
                if let Some(value) = record.get(*index) {
                    selected.push(value);
                }
            }
            ColumnSpec::Range(range) => {
                if let Some(values) = record.get(range.start..range.end.min(record.len())) {
                    selected.extend(values.iter());
                }
            }
        }
    }
    selected
}

#[cfg(test)]
mod column_tests {
    use super::{parse_column_spec, select_columns, ColumnSpec};
    use crate::error::RelsetError;

    #[test]
    fn mixed_designation_parses_to_zero_indexed_specs() {
        assert_eq!(
            parse_column_spec("1-4,6,8").unwrap(),
            vec![
                ColumnSpec::Range(0..4),
                ColumnSpec::Index(5),
                ColumnSpec::Index(7),
            ]
        );
    }

    #[test]
    fn whitespace_around_segments_is_tolerated() {
        assert_eq!(
            parse_column_spec(" 2 , 4-5 ").unwrap(),
            vec![ColumnSpec::Index(1), ColumnSpec::Range(3..5)]
        );
    }

    #[test]
    fn bad_designations_are_rejected() {
        for bad in ["", "a", "1,,2", "0", "3-1", "1-2-3"] {
            assert!(
                matches!(
                    parse_column_spec(bad),
                    Err(RelsetError::InvalidColumnSpec(_))
                ),
                "`{bad}` should not parse"
            );
        }
    }

    #[test]
    fn selection_follows_spec_order_and_skips_out_of_bounds() {
        let record = ["a", "b", "c", "d", "e"];
        let specs = parse_column_spec("4,1-2,9").unwrap();
        assert_eq!(select_columns(&specs, &record), vec![&"d", &"a", &"b"]);
    }

    #[test]
    fn ranges_clamp_to_the_record_length() {
        let record = [10, 20, 30];
        let specs = parse_column_spec("2-8").unwrap();
        assert_eq!(select_columns(&specs, &record), vec![&20, &30]);
    }
}
