//! Delimited-text and file helpers.
//!
//! This module provides CSV reader/writer factories driven by a
//! configurable [`Dialect`](dialect::Dialect), line counting and file
//! splitting, and column-designation parsing.

pub mod columns;
pub mod dialect;
pub mod split;

pub use columns::{parse_column_spec, select_columns, ColumnSpec};
pub use dialect::{open_reader, open_writer, reader_from, writer_from, Dialect, Quoting};
pub use split::{
    append_to_file_stem, count_lines, split_by_num_lines, split_by_parts, SplitOptions,
};
