use crate::diff::HunkKind;
use crate::error::DiffError;
use std::ops::RangeInclusive;

/// Where a cursor stands in its hunk sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Before the first hunk.
    Start,
    Hunk(usize),
    /// After the last hunk.
    End,
}

/// Selects one of the two compared sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl TryFrom<u8> for Side {
    type Error = DiffError;

    /// Sequences are numbered 1 (old) and 2 (new).
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Side::Old),
            2 => Ok(Side::New),
            n => Err(DiffError::invalid(format!("no sequence numbered {n}"))),
        }
    }
}

/// A property of the current hunk, as returned by `Cursor::get`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a, T> {
    Index(isize),
    Range(RangeInclusive<isize>),
    Items(&'a [T]),
    Diff(&'a [T], &'a [T]),
    Kind(HunkKind),
    Base(usize),
}
