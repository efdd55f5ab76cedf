//! CSV dialect configuration and reader/writer factories.
//!
//! A [`Dialect`] bundles the field delimiter, line terminator, and quoting
//! policy. The default is spreadsheet-style tab separation with `\n` line
//! termination. When no dialect is supplied, [`open_reader`] sniffs the
//! delimiter from a bounded sample of the input and falls back to the
//! default when the sample defeats detection.

use crate::error::RelsetError;
use csv::{QuoteStyle, Reader, ReaderBuilder, Terminator, Writer, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Candidate field delimiters tried by [`Dialect::sniff`].
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b';', b'|'];
/// Bytes read from the start of the input for sniffing.
const SNIFF_SAMPLE_LEN: usize = 4096;
/// Leading lines scored per candidate delimiter.
const SNIFF_MAX_LINES: usize = 10;

/// Quoting policy applied when writing records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quoting {
    /// Quote a field only when it contains the delimiter, a quote, or a
    /// line break.
    Minimal,
    /// Quote every field.
    All,
    /// Never quote; fields containing special characters are an error.
    Never,
}

impl From<Quoting> for QuoteStyle {
    fn from(quoting: Quoting) -> Self {
        match quoting {
            Quoting::Minimal => QuoteStyle::Necessary,
            Quoting::All => QuoteStyle::Always,
            Quoting::Never => QuoteStyle::Never,
        }
    }
}

/// A CSV dialect: field delimiter, line terminator, and quoting policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Byte separating fields within a record.
    pub delimiter: u8,
    /// Byte terminating written records.
    pub terminator: u8,
    /// Quoting policy for written fields.
    pub quoting: Quoting,
}

impl Dialect {
    /// Tab-separated fields with `\n` termination and minimal quoting.
    pub fn excel_tab() -> Self {
        Self {
            delimiter: b'\t',
            terminator: b'\n',
            quoting: Quoting::Minimal,
        }
    }

    /// Comma-separated fields with `\n` termination and minimal quoting.
    pub fn excel() -> Self {
        Self {
            delimiter: b',',
            ..Self::excel_tab()
        }
    }

    /// Replaces the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replaces the quoting policy.
    pub fn with_quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    /// Guesses the field delimiter from a text sample.
    ///
    /// Each candidate delimiter is scored over the sample's leading lines
    /// by its mean per-line occurrence, discounted by how much the count
    /// varies between lines. Returns `None` when no candidate appears in
    /// the sample at all; callers usually fall back to
    /// [`Dialect::excel_tab`].
    pub fn sniff(sample: &str) -> Option<Self> {
        let lines: Vec<&str> = sample.lines().take(SNIFF_MAX_LINES).collect();
        if lines.is_empty() {
            return None;
        }
        let mut best: Option<(f64, u8)> = None;
        for &delimiter in &DELIMITER_CANDIDATES {
            let counts: Vec<usize> = lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            if mean == 0.0 {
                continue;
            }
            let variance = counts
                .iter()
                .map(|&c| (c as f64 - mean).powi(2))
                .sum::<f64>()
                / counts.len() as f64;
            let score = mean / (1.0 + variance.sqrt());
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, delimiter));
            }
        }
        best.map(|(_, delimiter)| Self::excel_tab().with_delimiter(delimiter))
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::excel_tab()
    }
}

/// Opens a CSV reader over the file at `path`.
///
/// When `dialect` is `None`, the delimiter is sniffed from the first bytes
/// of the file; a sample that defeats detection falls back to
/// [`Dialect::excel_tab`].
pub fn open_reader<P: AsRef<Path>>(
    path: P,
    has_headers: bool,
    dialect: Option<Dialect>,
) -> Result<Reader<File>, RelsetError> {
    let file = File::open(path)?;
    reader_from(file, has_headers, dialect)
}

/// Builds a CSV reader over any rewindable source.
///
/// Sniffing (when `dialect` is `None`) reads a bounded sample and rewinds
/// the source before handing it to the reader.
pub fn reader_from<R: Read + Seek>(
    mut source: R,
    has_headers: bool,
    dialect: Option<Dialect>,
) -> Result<Reader<R>, RelsetError> {
    let dialect = match dialect {
        Some(dialect) => dialect,
        None => {
            let mut buf = vec![0u8; SNIFF_SAMPLE_LEN];
            let n = source.read(&mut buf)?;
            source.seek(SeekFrom::Start(0))?;
            let sample = String::from_utf8_lossy(&buf[..n]);
            Dialect::sniff(&sample).unwrap_or_else(Dialect::excel_tab)
        }
    };
    Ok(ReaderBuilder::new()
        .delimiter(dialect.delimiter)
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(source))
}

/// Creates a CSV writer at `path` and writes the header record.
pub fn open_writer<P: AsRef<Path>>(
    path: P,
    field_names: &[&str],
    dialect: Dialect,
) -> Result<Writer<File>, RelsetError> {
    let file = File::create(path)?;
    writer_from(file, field_names, dialect)
}

/// Builds a CSV writer over any sink and writes the header record.
pub fn writer_from<W: Write>(
    sink: W,
    field_names: &[&str],
    dialect: Dialect,
) -> Result<Writer<W>, RelsetError> {
    let mut writer = WriterBuilder::new()
        .delimiter(dialect.delimiter)
        .terminator(Terminator::Any(dialect.terminator))
        .quote_style(dialect.quoting.into())
        .from_writer(sink);
    writer.write_record(field_names)?;
    Ok(writer)
}

#[cfg(test)]
mod dialect_tests {
    use super::{reader_from, writer_from, Dialect, Quoting};
    use std::io::Cursor;

    #[test]
    fn sniff_detects_common_delimiters() {
        assert_eq!(
            Dialect::sniff("a,b,c\nd,e,f").map(|d| d.delimiter),
            Some(b',')
        );
        assert_eq!(
            Dialect::sniff("a;b;c\nd;e;f").map(|d| d.delimiter),
            Some(b';')
        );
        assert_eq!(
            Dialect::sniff("a\tb\tc\nd\te\tf").map(|d| d.delimiter),
            Some(b'\t')
        );
    }

    #[test]
    fn sniff_prefers_the_consistent_delimiter() {
        // Commas appear, but unevenly; semicolons separate every line alike.
        let sample = "x;y,;z\na;b;c\nd;e;f\ng;h;i";
        assert_eq!(Dialect::sniff(sample).map(|d| d.delimiter), Some(b';'));
    }

    #[test]
    fn sniff_gives_up_on_delimiterless_input() {
        assert_eq!(Dialect::sniff(""), None);
        assert_eq!(Dialect::sniff("single\ncolumn\nfile"), None);
    }

    #[test]
    fn sniffing_reader_rewinds_before_parsing() {
        let data = "name;age\nalice;30\nbob;25\n";
        let mut reader = reader_from(Cursor::new(data), true, None).unwrap();
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["name", "age"]
        );
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(rows, vec![vec!["alice", "30"], vec!["bob", "25"]]);
    }

    #[test]
    fn undetectable_input_falls_back_to_tab() {
        let data = "only\nwords\nhere\n";
        let mut reader = reader_from(Cursor::new(data), false, None).unwrap();
        let first = reader.records().next().unwrap().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(&first[0], "only");
    }

    #[test]
    fn writer_emits_header_then_records() {
        let mut out = Vec::new();
        {
            let mut writer =
                writer_from(&mut out, &["id", "name"], Dialect::excel_tab()).unwrap();
            writer.write_record(["1", "ann"]).unwrap();
            writer.write_record(["2", "ben"]).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "id\tname\n1\tann\n2\tben\n");
    }

    #[test]
    fn quoting_policy_is_honored() {
        let mut out = Vec::new();
        {
            let dialect = Dialect::excel().with_quoting(Quoting::All);
            let mut writer = writer_from(&mut out, &["a", "b"], dialect).unwrap();
            writer.write_record(["1", "2"]).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "\"a\",\"b\"\n\"1\",\"2\"\n");
    }
}
