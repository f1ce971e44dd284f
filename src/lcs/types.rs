use super::engine::{Engine, HuntSzymanski};

/// For each index of the old sequence, the index of the new sequence it is
/// aligned with, if any.
///
/// Matched new indices strictly increase with the old index, so the pairs
/// form a common subsequence of both inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchVector(Vec<Option<usize>>);

impl MatchVector {
    /// Length of the old sequence this vector was computed for.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, old: usize) -> Option<usize> {
        self.0.get(old).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.0.iter().copied()
    }

    /// Matched `(old, new)` pairs in ascending order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.map(|j| (i, j)))
    }

    /// Number of matched pairs, i.e. the LCS length.
    pub fn matched(&self) -> usize {
        self.0.iter().filter(|m| m.is_some()).count()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.0
    }
}

impl From<Vec<Option<usize>>> for MatchVector {
    fn from(v: Vec<Option<usize>>) -> Self {
        MatchVector(v)
    }
}

/// Equality predicate over comparison keys.
pub type Equality<'f, K> = dyn Fn(&K, &K) -> bool + 'f;

/// Comparison configuration applied uniformly to both sequences.
///
/// # Examples
///
/// ```
/// use lcsdiff::{Comparison, Options};
///
/// let old = vec!["Alpha", "beta"];
/// let new = vec!["alpha", "BETA", "gamma"];
/// let options = Options::new(|s: &&str| s.to_lowercase());
/// let cmp = Comparison::with_options(&old, &new, &options);
/// assert_eq!(cmp.lcs_length(), 2);
/// ```
pub struct Options<'f, T, K> {
    pub(crate) key: Box<dyn Fn(&T) -> K + 'f>,
    pub(crate) eq: Option<Box<Equality<'f, K>>>,
    pub(crate) engine: &'f dyn Engine,
}

impl<'f, T, K> Options<'f, T, K> {
    /// Compares elements by the key `key` extracts from them.
    pub fn new(key: impl Fn(&T) -> K + 'f) -> Self {
        Options {
            key: Box::new(key),
            eq: None,
            engine: &HuntSzymanski,
        }
    }

    /// Replaces structural key equality with `eq`.
    ///
    /// Keys are grouped by the first previously seen key `eq` accepts, so
    /// the predicate should behave like an equivalence relation.
    pub fn equality(mut self, eq: impl Fn(&K, &K) -> bool + 'f) -> Self {
        self.eq = Some(Box::new(eq));
        self
    }

    pub fn engine(mut self, engine: &'f dyn Engine) -> Self {
        self.engine = engine;
        self
    }
}

impl<T, K> std::fmt::Debug for Options<'_, T, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("custom_equality", &self.eq.is_some())
            .finish_non_exhaustive()
    }
}
