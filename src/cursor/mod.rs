pub mod types;
pub use types::*;

use crate::diff::{HunkKind, Span};
use crate::error::{DiffError, Result};
use crate::lcs::{Comparison, Options};
use std::collections::BTreeMap;
use std::hash::Hash;
use std::ops::{Range, RangeInclusive};
use std::sync::Arc;

/// A movable view over the hunks of a comparison.
///
/// The hunks are computed once and shared between a cursor and all of its
/// copies; each cursor only owns its position and base offset. A fresh
/// cursor stands before the first hunk.
///
/// # Examples
///
/// ```
/// use lcsdiff::Cursor;
///
/// let old = vec!["a", "b", "c"];
/// let new = vec!["a", "b", "d"];
/// let mut cursor = Cursor::new(&old, &new);
/// while cursor.next_hunk().is_some() {
///     let (removed, added) = cursor.diff().unwrap();
///     if !removed.is_empty() || !added.is_empty() {
///         assert_eq!((removed, added), (&["c"][..], &["d"][..]));
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Cursor<'a, T> {
    old: &'a [T],
    new: &'a [T],
    spans: Arc<[Span]>,
    pos: isize,
    base: usize,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Cursor {
            old: self.old,
            new: self.new,
            spans: Arc::clone(&self.spans),
            pos: self.pos,
            base: self.base,
        }
    }
}

impl<'a, T> Comparison<'a, T> {
    pub fn cursor(&self) -> Cursor<'a, T> {
        Cursor {
            old: self.old,
            new: self.new,
            spans: self.compact_diff().spans().into(),
            pos: -1,
            base: 0,
        }
    }
}

impl<'a, T> Cursor<'a, T> {
    pub fn new(old: &'a [T], new: &'a [T]) -> Self
    where
        T: Hash + Eq,
    {
        Comparison::new(old, new).cursor()
    }

    pub fn with_options<K: Hash + Eq>(
        old: &'a [T],
        new: &'a [T],
        options: &Options<'_, T, K>,
    ) -> Self {
        Comparison::with_options(old, new, options).cursor()
    }

    /// Number of hunks.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Whether both cursors walk the same computed hunks.
    pub fn shares_hunks_with(&self, other: &Cursor<'_, T>) -> bool {
        Arc::ptr_eq(&self.spans, &other.spans)
    }

    pub fn position(&self) -> Position {
        match self.current() {
            Some(i) => Position::Hunk(i),
            None if self.pos < 0 => Position::Start,
            None => Position::End,
        }
    }

    fn current(&self) -> Option<usize> {
        usize::try_from(self.pos)
            .ok()
            .filter(|&i| i < self.spans.len())
    }

    /// Moves `count` hunks forward, stopping after the last one. Returns the
    /// index of the hunk now current, if any.
    ///
    /// Movement does not wrap: once at [`Position::End`] the cursor stays
    /// there, so walk again with `reset(Position::Start)`.
    pub fn advance(&mut self, count: usize) -> Option<usize> {
        let count = isize::try_from(count).unwrap_or(isize::MAX);
        self.pos = self.pos.saturating_add(count).min(self.end());
        tracing::trace!(position = ?self.position(), "cursor advanced");
        self.current()
    }

    /// Moves `count` hunks backward, stopping at [`Position::Start`] without
    /// wrapping.
    pub fn retreat(&mut self, count: usize) -> Option<usize> {
        let count = isize::try_from(count).unwrap_or(isize::MAX);
        self.pos = self.pos.saturating_sub(count).max(-1);
        tracing::trace!(position = ?self.position(), "cursor retreated");
        self.current()
    }

    pub fn next_hunk(&mut self) -> Option<usize> {
        self.advance(1)
    }

    pub fn prev_hunk(&mut self) -> Option<usize> {
        self.retreat(1)
    }

    /// Moves to `position`; a hunk index past the last hunk becomes
    /// [`Position::End`].
    pub fn reset(&mut self, position: Position) -> &mut Self {
        self.pos = match position {
            Position::Start => -1,
            Position::Hunk(i) => isize::try_from(i).unwrap_or(isize::MAX).min(self.end()),
            Position::End => self.end(),
        };
        self
    }

    /// An independent cursor over the same hunks, optionally repositioned
    /// and rebased.
    pub fn copy(&self, position: Option<Position>, base: Option<usize>) -> Self {
        let mut copy = self.clone();
        if let Some(position) = position {
            copy.reset(position);
        }
        if let Some(base) = base {
            copy.set_base(base);
        }
        copy
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// Sets the offset added to every index reported afterwards.
    pub fn set_base(&mut self, base: usize) -> &mut Self {
        self.base = base;
        self
    }

    fn end(&self) -> isize {
        isize::try_from(self.spans.len()).unwrap_or(isize::MAX)
    }

    fn span(&self) -> Result<&Span> {
        self.current()
            .map(|i| &self.spans[i])
            .ok_or_else(|| DiffError::invalid("cursor is not on a hunk"))
    }

    fn indices(&self, side: Side) -> Result<Range<usize>> {
        let span = self.span()?;
        Ok(match side {
            Side::Old => span.old.clone(),
            Side::New => span.new.clone(),
        })
    }

    pub fn kind(&self) -> Result<HunkKind> {
        Ok(self.span()?.kind)
    }

    /// The matched elements of the current hunk; empty for a difference.
    pub fn same(&self) -> Result<&'a [T]> {
        let span = self.span()?;
        Ok(match span.kind {
            HunkKind::Same => &self.old[span.old.clone()],
            _ => &[][..],
        })
    }

    /// The removed and added elements of the current hunk; both empty when
    /// the hunk is a matched run.
    pub fn diff(&self) -> Result<(&'a [T], &'a [T])> {
        let span = self.span()?;
        Ok(match span.kind {
            HunkKind::Same => (&[][..], &[][..]),
            _ => (&self.old[span.old.clone()], &self.new[span.new.clone()]),
        })
    }

    pub fn items(&self, side: Side) -> Result<&'a [T]> {
        let indices = self.indices(side)?;
        Ok(match side {
            Side::Old => &self.old[indices],
            Side::New => &self.new[indices],
        })
    }

    /// Inclusive index range of the current hunk in `side`, offset by `base`
    /// or the cursor's base. Empty when the hunk has no elements there.
    pub fn range(&self, side: Side, base: Option<usize>) -> Result<RangeInclusive<isize>> {
        Ok(self.min(side, base)?..=self.max(side, base)?)
    }

    pub fn min(&self, side: Side, base: Option<usize>) -> Result<isize> {
        let indices = self.indices(side)?;
        Ok(indices.start as isize + self.offset(base))
    }

    /// One less than [`Cursor::min`] when the hunk is empty in `side`.
    pub fn max(&self, side: Side, base: Option<usize>) -> Result<isize> {
        let indices = self.indices(side)?;
        Ok(indices.end as isize - 1 + self.offset(base))
    }

    fn offset(&self, base: Option<usize>) -> isize {
        base.unwrap_or(self.base) as isize
    }

    /// Queries several properties of the current hunk at once.
    ///
    /// Each name has the form `[base]property[1|2]`, case-insensitive, and
    /// names may also be separated by whitespace within one string.
    /// `min`, `max` and `range` take a sequence number and an optional
    /// base; `items` takes a sequence number; `same`, `diff`, `kind` and
    /// `base` take neither.
    pub fn get(&self, names: &[&str]) -> Result<BTreeMap<String, Value<'a, T>>> {
        self.span()?;
        names
            .iter()
            .flat_map(|n| n.split_whitespace())
            .map(|word| self.query(word).map(|value| (word.to_string(), value)))
            .collect()
    }

    fn query(&self, word: &str) -> Result<Value<'a, T>> {
        let invalid = || DiffError::invalid(format!("unknown property `{word}`"));
        let lower = word.to_ascii_lowercase();
        let digits = lower.bytes().take_while(u8::is_ascii_digit).count();
        let (prefix, rest) = lower.split_at(digits);
        let base = match prefix {
            "" => None,
            p => Some(p.parse::<usize>().map_err(|_| invalid())?),
        };
        let (name, side) = match rest.as_bytes().last() {
            Some(b'1') => (&rest[..rest.len() - 1], Some(Side::Old)),
            Some(b'2') => (&rest[..rest.len() - 1], Some(Side::New)),
            _ => (rest, None),
        };

        match (name, side, base) {
            ("min", Some(side), base) => Ok(Value::Index(self.min(side, base)?)),
            ("max", Some(side), base) => Ok(Value::Index(self.max(side, base)?)),
            ("range", Some(side), base) => Ok(Value::Range(self.range(side, base)?)),
            ("items", Some(side), None) => Ok(Value::Items(self.items(side)?)),
            ("same", None, None) => Ok(Value::Items(self.same()?)),
            ("diff", None, None) => {
                let (removed, added) = self.diff()?;
                Ok(Value::Diff(removed, added))
            }
            ("kind", None, None) => Ok(Value::Kind(self.kind()?)),
            ("base", None, None) => Ok(Value::Base(self.base)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario() -> (Vec<&'static str>, Vec<&'static str>) {
        (vec!["a", "b", "c"], vec!["a", "b", "d"])
    }

    proptest! {
        #[test]
        fn test_walk_matches_diff(
            old in prop::collection::vec(0u8..4, 0..20),
            new in prop::collection::vec(0u8..4, 0..20),
        ) {
            let hunks = crate::diff(&old, &new);
            let mut cursor = Cursor::new(&old, &new);
            prop_assert_eq!(cursor.len(), hunks.len());
            for hunk in &hunks {
                prop_assert!(cursor.next_hunk().is_some());
                prop_assert_eq!(cursor.kind(), Ok(hunk.kind));
                prop_assert_eq!(cursor.items(Side::Old), Ok(&old[hunk.old.clone()]));
                prop_assert_eq!(cursor.items(Side::New), Ok(&new[hunk.new.clone()]));
            }
            prop_assert_eq!(cursor.next_hunk(), None);
        }
    }

    #[test]
    fn test_forward_walk() {
        let (old, new) = scenario();
        let mut cursor = Cursor::new(&old, &new);
        assert_eq!(cursor.position(), Position::Start);

        assert_eq!(cursor.next_hunk(), Some(0));
        assert_eq!(cursor.same(), Ok(&["a", "b"][..]));
        assert_eq!(cursor.diff(), Ok((&[][..], &[][..])));

        assert_eq!(cursor.next_hunk(), Some(1));
        assert_eq!(cursor.kind(), Ok(HunkKind::Change));
        assert_eq!(cursor.diff(), Ok((&["c"][..], &["d"][..])));
        assert_eq!(cursor.same(), Ok(&[][..]));

        assert_eq!(cursor.next_hunk(), None);
        assert_eq!(cursor.position(), Position::End);
        assert_eq!(cursor.next_hunk(), None);
    }

    #[test]
    fn test_walk_stays_at_end_until_reset() {
        let (old, new) = scenario();
        let mut cursor = Cursor::new(&old, &new);
        while cursor.next_hunk().is_some() {}
        assert_eq!(cursor.next_hunk(), None);
        assert_eq!(cursor.advance(3), None);
        assert_eq!(cursor.position(), Position::End);

        cursor.reset(Position::Start);
        assert_eq!(cursor.next_hunk(), Some(0));
    }

    #[test]
    fn test_backward_walk() {
        let (old, new) = scenario();
        let mut cursor = Cursor::new(&old, &new);
        cursor.reset(Position::End);
        assert_eq!(cursor.prev_hunk(), Some(1));
        assert_eq!(cursor.prev_hunk(), Some(0));
        assert_eq!(cursor.prev_hunk(), None);
        assert_eq!(cursor.position(), Position::Start);
    }

    #[test]
    fn test_multi_step() {
        let old = vec![1, 2, 3, 4, 5];
        let new = vec![1, 9, 3, 9, 5];
        let mut cursor = Cursor::new(&old, &new);
        assert_eq!(cursor.len(), 5);
        assert_eq!(cursor.advance(3), Some(2));
        assert_eq!(cursor.retreat(2), Some(0));
        assert_eq!(cursor.advance(0), Some(0));
        assert_eq!(cursor.advance(100), None);
        assert_eq!(cursor.retreat(1), Some(4));
    }

    #[test]
    fn test_reset_chains() {
        let (old, new) = scenario();
        let mut cursor = Cursor::new(&old, &new);
        let kind = cursor.reset(Position::Hunk(1)).set_base(1).kind();
        assert_eq!(kind, Ok(HunkKind::Change));
        assert_eq!(cursor.reset(Position::Hunk(7)).position(), Position::End);
        assert_eq!(cursor.reset(Position::Start).next_hunk(), Some(0));
    }

    #[test]
    fn test_copy_is_independent() {
        let (old, new) = scenario();
        let cursor = Cursor::new(&old, &new);
        let mut copy = cursor.copy(None, None);
        assert_eq!(copy.next_hunk(), Some(0));
        assert_eq!(cursor.position(), Position::Start);
        assert!(copy.shares_hunks_with(&cursor));

        let rebased = copy.copy(Some(Position::Hunk(1)), Some(1));
        assert_eq!(rebased.position(), Position::Hunk(1));
        assert_eq!(rebased.base(), 1);
        assert_eq!(copy.base(), 0);
        assert_eq!(copy.position(), Position::Hunk(0));
    }

    #[test]
    fn test_ranges_and_base() {
        let old = vec!["a", "c"];
        let new = vec!["a", "b", "c"];
        let mut cursor = Cursor::new(&old, &new);
        cursor.next_hunk();
        assert_eq!(cursor.range(Side::Old, None), Ok(0..=0));

        cursor.next_hunk();
        assert_eq!(cursor.kind(), Ok(HunkKind::Insert));
        assert_eq!(cursor.range(Side::New, None), Ok(1..=1));
        assert!(cursor.range(Side::Old, None).unwrap().is_empty());
        assert_eq!(cursor.min(Side::Old, None), Ok(1));
        assert_eq!(cursor.max(Side::Old, None), Ok(0));

        cursor.set_base(1);
        assert_eq!(cursor.range(Side::New, None), Ok(2..=2));
        assert_eq!(cursor.range(Side::New, Some(0)), Ok(1..=1));

        cursor.next_hunk();
        assert_eq!(cursor.range(Side::Old, None), Ok(2..=2));
        assert_eq!(cursor.range(Side::New, None), Ok(3..=3));
    }

    #[test]
    fn test_get() {
        let (old, new) = scenario();
        let mut cursor = Cursor::new(&old, &new);
        cursor.next_hunk();
        let values = cursor
            .get(&["min1", "MAX2", "same", "1range2 kind", "items2", "base"])
            .unwrap();
        assert_eq!(values["min1"], Value::Index(0));
        assert_eq!(values["MAX2"], Value::Index(1));
        assert_eq!(values["same"], Value::Items(&["a", "b"][..]));
        assert_eq!(values["1range2"], Value::Range(1..=2));
        assert_eq!(values["kind"], Value::Kind(HunkKind::Same));
        assert_eq!(values["items2"], Value::Items(&["a", "b"][..]));
        assert_eq!(values["base"], Value::Base(0));

        cursor.next_hunk();
        let values = cursor.get(&["diff"]).unwrap();
        assert_eq!(values["diff"], Value::Diff(&["c"][..], &["d"][..]));
    }

    #[test]
    fn test_get_rejects_unknown_names() {
        let (old, new) = scenario();
        let mut cursor = Cursor::new(&old, &new);
        cursor.next_hunk();
        for name in ["bogus", "items", "same1", "min3", "2items1", "1"] {
            assert!(
                matches!(cursor.get(&[name]), Err(DiffError::InvalidArgument(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn test_queries_require_a_hunk() {
        let (old, new) = scenario();
        let mut cursor = Cursor::new(&old, &new);
        assert!(matches!(cursor.kind(), Err(DiffError::InvalidArgument(_))));
        assert!(cursor.get(&["base"]).is_err());
        cursor.reset(Position::End);
        assert!(cursor.items(Side::Old).is_err());
    }

    #[test]
    fn test_side_numbers() {
        assert_eq!(Side::try_from(1), Ok(Side::Old));
        assert_eq!(Side::try_from(2), Ok(Side::New));
        assert!(matches!(
            Side::try_from(0),
            Err(DiffError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_leading_difference() {
        let old = vec!["x", "a"];
        let new = vec!["a"];
        let mut cursor = Cursor::new(&old, &new);
        assert_eq!(cursor.len(), 2);
        cursor.next_hunk();
        assert_eq!(cursor.kind(), Ok(HunkKind::Delete));
        assert_eq!(cursor.items(Side::Old), Ok(&["x"][..]));
    }

    #[test]
    fn test_empty_sequences() {
        let empty: Vec<char> = vec![];
        let mut cursor = Cursor::new(&empty, &empty);
        assert!(cursor.is_empty());
        assert_eq!(cursor.next_hunk(), None);
        assert_eq!(cursor.position(), Position::End);
    }
}
