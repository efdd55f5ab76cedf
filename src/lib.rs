//! # relset
//!
//! relset is a small utility library of augmented mapping data structures and
//! delimited-text helpers.
//!
//! ## Features
//! - [`SetRelation`]: a mapping from keys to sets of items with an
//!   automatically maintained reverse index from each item back to the keys
//!   whose sets contain it
//! - [`CanonicalKeyMap`]: a mapping whose composite keys are treated as
//!   order-independent, canonicalized by sorting
//! - CSV dialect sniffing and reader/writer factories, line counting,
//!   file splitting, and column-designation parsing ([`io`])
//! - Uniform without-replacement sampling over grouped values ([`sample`])
//!
//! ## Determinism
//!
//! All randomized decisions take a caller-supplied `Rng`, so runs are
//! reproducible with seeded generators. Unit tests fix seeds explicitly to
//! ensure deterministic behavior.
//!
//! ## Usage
//! Add `relset` as a dependency in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! relset = "0.3"
//! ```
//!
//! The containers are single-threaded: they provide no internal
//! synchronization and need external locking for concurrent mutation.

// Re-export our major subsystems:
pub mod debug_invariants;
pub mod error;
pub mod io;
pub mod relation;
pub mod sample;

pub use debug_invariants::DebugInvariants;
pub use error::RelsetError;
pub use relation::{CanonicalKeyMap, SetRelation};

/// A convenient prelude to import the most-used types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::error::RelsetError;
    pub use crate::io::columns::{parse_column_spec, select_columns, ColumnSpec};
    pub use crate::io::dialect::{
        open_reader, open_writer, reader_from, writer_from, Dialect, Quoting,
    };
    pub use crate::io::split::{
        append_to_file_stem, count_lines, split_by_num_lines, split_by_parts, SplitOptions,
    };
    pub use crate::relation::{CanonicalKeyMap, SetRelation};
    pub use crate::sample::{sample_grouped, sample_grouped_low_mem};
}
