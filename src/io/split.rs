//! Line counting and file splitting.
//!
//! Splitting a file produces sibling files named `<stem>-<n><.ext>`, where
//! `n` is the 1-based part number (optionally zero-padded). The original
//! header line can be replicated at the top of every part.

use crate::error::RelsetError;
use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Options controlling how a file is split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitOptions {
    /// Treat the first input line as a header and replicate it at the top
    /// of every part.
    pub has_header: bool,
    /// Zero-pad part numbers to this width in output file names.
    pub pad_width: Option<usize>,
}

/// Counts the lines in a text stream.
///
/// A final line without a trailing newline still counts.
pub fn count_lines<R: BufRead>(mut reader: R) -> std::io::Result<u64> {
    let mut count = 0u64;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        count += 1;
    }
    Ok(count)
}

/// Extends a file's stem with `addition`, keeping the extension.
///
/// `/foo/bar/spam.txt` with an addition of `-eggs` becomes
/// `/foo/bar/spam-eggs.txt`. The path does not have to exist.
pub fn append_to_file_stem(path: &Path, addition: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();
    let mut name = format!("{stem}{addition}");
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    path.with_file_name(name)
}

fn part_path(path: &Path, number: usize, pad_width: Option<usize>) -> PathBuf {
    let addition = match pad_width {
        Some(width) => format!("-{number:0width$}"),
        None => format!("-{number}"),
    };
    append_to_file_stem(path, &addition)
}

/// Splits the file at `path` into parts of `lines_per_part` data lines.
///
/// Parts are written next to the input as `<stem>-<n><.ext>`; the final
/// part may run short. With [`SplitOptions::has_header`], the first input
/// line is replicated at the top of every part and does not count toward
/// `lines_per_part`. Returns the created paths in order. An input with no
/// data lines produces no parts.
pub fn split_by_num_lines<P: AsRef<Path>>(
    path: P,
    lines_per_part: u64,
    opts: SplitOptions,
) -> Result<Vec<PathBuf>, RelsetError> {
    if lines_per_part == 0 {
        return Err(RelsetError::ZeroSplitSize("lines per part"));
    }
    let path = path.as_ref();
    let mut lines = BufReader::new(File::open(path)?).lines();
    let header = if opts.has_header {
        match lines.next() {
            Some(line) => Some(line?),
            None => None,
        }
    } else {
        None
    };

    let mut created = Vec::new();
    let chunks = lines.chunks(lines_per_part as usize);
    for (index, chunk) in (&chunks).into_iter().enumerate() {
        let out_path = part_path(path, index + 1, opts.pad_width);
        let mut out = BufWriter::new(File::create(&out_path)?);
        if let Some(header) = &header {
            writeln!(out, "{header}")?;
        }
        for line in chunk {
            writeln!(out, "{}", line?)?;
        }
        out.flush()?;
        created.push(out_path);
    }
    log::debug!(
        "split {} into {} part(s) of up to {} line(s)",
        path.display(),
        created.len(),
        lines_per_part
    );
    Ok(created)
}

/// Splits the file at `path` into `num_parts` parts of roughly equal size.
///
/// When the data lines do not divide evenly, the first parts are filled
/// evenly and the final part runs short, which can produce fewer parts
/// than requested (10 lines split into 6 parts yields 5 files of 2 lines).
pub fn split_by_parts<P: AsRef<Path>>(
    path: P,
    num_parts: u64,
    opts: SplitOptions,
) -> Result<Vec<PathBuf>, RelsetError> {
    if num_parts == 0 {
        return Err(RelsetError::ZeroSplitSize("number of parts"));
    }
    let path = path.as_ref();
    let mut total_lines = count_lines(BufReader::new(File::open(path)?))?;
    if opts.has_header {
        total_lines = total_lines.saturating_sub(1);
    }

    let mut lines_per_part = total_lines / num_parts;
    if lines_per_part < 1 {
        lines_per_part = 1;
    }
    // Uneven division: fill the first n-1 parts evenly and let the final
    // part run short.
    if total_lines % num_parts != 0 {
        lines_per_part += 1;
    }
    split_by_num_lines(path, lines_per_part, opts)
}

#[cfg(test)]
mod stem_tests {
    use super::append_to_file_stem;
    use std::path::Path;

    #[test]
    fn addition_lands_before_the_extension() {
        assert_eq!(
            append_to_file_stem(Path::new("/foo/bar/spam.txt"), "-eggs"),
            Path::new("/foo/bar/spam-eggs.txt")
        );
    }

    #[test]
    fn extensionless_paths_gain_no_dot() {
        assert_eq!(
            append_to_file_stem(Path::new("data/notes"), "-1"),
            Path::new("data/notes-1")
        );
    }

    #[test]
    fn only_the_final_extension_moves() {
        assert_eq!(
            append_to_file_stem(Path::new("a/b.tar.gz"), "-2"),
            Path::new("a/b.tar-2.gz")
        );
    }
}

#[cfg(test)]
mod count_tests {
    use super::count_lines;
    use std::io::Cursor;

    #[test]
    fn empty_input_has_no_lines() {
        assert_eq!(count_lines(Cursor::new("")).unwrap(), 0);
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        assert_eq!(count_lines(Cursor::new("a\nb\nc\n")).unwrap(), 3);
    }

    #[test]
    fn unterminated_final_line_counts() {
        assert_eq!(count_lines(Cursor::new("a\nb\nc")).unwrap(), 3);
    }
}
