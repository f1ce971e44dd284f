mod engine;
pub mod types;

pub use engine::{Engine, HuntSzymanski};
pub use types::*;

use std::collections::HashMap;
use std::hash::Hash;

/// The immutable result of comparing two sequences.
///
/// Holds both sequences by reference together with their match vector;
/// every other output of the crate is derived from it without re-running
/// the engine.
#[derive(Debug, Clone)]
pub struct Comparison<'a, T> {
    pub(crate) old: &'a [T],
    pub(crate) new: &'a [T],
    pub(crate) matches: MatchVector,
}

impl<'a, T> Comparison<'a, T> {
    /// Compares `old` and `new` element by element.
    pub fn new(old: &'a [T], new: &'a [T]) -> Self
    where
        T: Hash + Eq,
    {
        Self::with_engine(old, new, &HuntSzymanski)
    }

    /// Compares `old` and `new` element by element using `engine`.
    pub fn with_engine(old: &'a [T], new: &'a [T], engine: &dyn Engine) -> Self
    where
        T: Hash + Eq,
    {
        let (old_ids, new_ids) = intern(old, new, None);
        Self::solve(old, new, &old_ids, &new_ids, engine)
    }

    /// Compares `old` and `new` through the keys and equality of `options`.
    pub fn with_options<K: Hash + Eq>(
        old: &'a [T],
        new: &'a [T],
        options: &Options<'_, T, K>,
    ) -> Self {
        let old_keys: Vec<K> = old.iter().map(|e| (options.key)(e)).collect();
        let new_keys: Vec<K> = new.iter().map(|e| (options.key)(e)).collect();
        let (old_ids, new_ids) = intern(&old_keys, &new_keys, options.eq.as_deref());
        Self::solve(old, new, &old_ids, &new_ids, options.engine)
    }

    fn solve(
        old: &'a [T],
        new: &'a [T],
        old_ids: &[usize],
        new_ids: &[usize],
        engine: &dyn Engine,
    ) -> Self {
        let _span = tracing::debug_span!("lcs", old = old.len(), new = new.len()).entered();
        let matches = engine.match_vector(old_ids, new_ids);
        debug_assert_eq!(matches.len(), old.len());
        tracing::debug!(matched = matches.matched(), "match vector computed");
        Comparison { old, new, matches }
    }

    pub fn sequences(&self) -> (&'a [T], &'a [T]) {
        (self.old, self.new)
    }

    pub fn matches(&self) -> &MatchVector {
        &self.matches
    }

    /// The common subsequence itself, as elements of the old sequence.
    pub fn lcs(&self) -> Vec<&'a T> {
        self.matches.pairs().map(|(i, _)| &self.old[i]).collect()
    }

    pub fn lcs_indices(&self) -> Vec<(usize, usize)> {
        self.matches.pairs().collect()
    }

    pub fn lcs_length(&self) -> usize {
        self.matches.matched()
    }
}

/// Returns the longest common subsequence of `old` and `new`.
///
/// # Examples
///
/// ```
/// let old = vec!["a", "b", "c"];
/// let new = vec!["a", "b", "d"];
/// assert_eq!(lcsdiff::lcs(&old, &new), vec![&"a", &"b"]);
/// ```
pub fn lcs<'a, T: Hash + Eq>(old: &'a [T], new: &'a [T]) -> Vec<&'a T> {
    Comparison::new(old, new).lcs()
}

/// Returns the `(old, new)` index pairs of the longest common subsequence.
pub fn lcs_indices<T: Hash + Eq>(old: &[T], new: &[T]) -> Vec<(usize, usize)> {
    Comparison::new(old, new).lcs_indices()
}

/// Returns the length of the longest common subsequence without building it.
pub fn lcs_length<T: Hash + Eq>(old: &[T], new: &[T]) -> usize {
    let (old_ids, new_ids) = intern(old, new, None);
    HuntSzymanski.lcs_length(&old_ids, &new_ids)
}

/// Maps the keys of both sequences to dense ids, equal keys sharing one id.
/// Ids of `new` are assigned first so the engine can index them directly.
fn intern<'k, K: Hash + Eq>(
    old: &'k [K],
    new: &'k [K],
    eq: Option<&Equality<'_, K>>,
) -> (Vec<usize>, Vec<usize>) {
    match eq {
        None => {
            let mut ids: HashMap<&'k K, usize> = HashMap::with_capacity(new.len());
            let mut id_of = |key: &'k K| {
                let next = ids.len();
                *ids.entry(key).or_insert(next)
            };
            let new_ids = new.iter().map(&mut id_of).collect();
            let old_ids = old.iter().map(&mut id_of).collect();
            (old_ids, new_ids)
        }
        Some(eq) => {
            let mut representatives: Vec<&'k K> = Vec::new();
            let mut id_of = |key: &'k K| match representatives.iter().position(|r| eq(*r, key)) {
                Some(id) => id,
                None => {
                    representatives.push(key);
                    representatives.len() - 1
                }
            };
            let new_ids = new.iter().map(&mut id_of).collect();
            let old_ids = old.iter().map(&mut id_of).collect();
            (old_ids, new_ids)
        }
    }
}
