//! Longest-common-subsequence diffing of arbitrary sequences.
//!
//! A [`Comparison`] runs the LCS engine once over two slices and derives
//! every other output from the resulting [`MatchVector`]: the common
//! subsequence itself, coalesced [`Hunk`]s, side-by-side [`Row`]s, the
//! [`CompactDiff`] boundary encoding, callback traversals through
//! [`Visitor`], and a bidirectional [`Cursor`] over the hunks.
//!
//! ```
//! use lcsdiff::{Comparison, HunkKind};
//!
//! let old = vec!["a", "b", "c"];
//! let new = vec!["a", "b", "d"];
//! let cmp = Comparison::new(&old, &new);
//! assert_eq!(cmp.lcs(), vec![&"a", &"b"]);
//!
//! let mut cursor = cmp.cursor();
//! cursor.next_hunk();
//! assert_eq!(cursor.same().unwrap(), &["a", "b"]);
//! cursor.next_hunk();
//! assert_eq!(cursor.kind().unwrap(), HunkKind::Change);
//! assert_eq!(cursor.next_hunk(), None);
//! ```

pub mod cursor;
pub mod diff;
pub mod error;
pub mod lcs;
pub mod traverse;

pub use cursor::{Cursor, Position, Side, Value};
pub use diff::{
    apply, compact_diff, diff, diff_lines, sdiff, CompactDiff, Edit, Hunk, HunkKind, Row, Span,
};
pub use error::{DiffError, Result};
pub use lcs::{
    lcs, lcs_indices, lcs_length, Comparison, Engine, Equality, HuntSzymanski, MatchVector,
    Options,
};
pub use traverse::{traverse_balanced, traverse_sequences, Visitor};
