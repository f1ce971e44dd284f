use super::types::MatchVector;
use std::ops::Range;
use std::rc::Rc;

/// Strategy computing the match vector of two sequences.
///
/// Engines see both sequences as interned key ids: two positions hold equal
/// ids exactly when their elements compare equal. Every implementation must
/// find a longest common subsequence of the ids; which one is picked among
/// several of equal length is up to the engine.
pub trait Engine: Send + Sync {
    fn match_vector(&self, old: &[usize], new: &[usize]) -> MatchVector;

    fn lcs_length(&self, old: &[usize], new: &[usize]) -> usize {
        self.match_vector(old, new).matched()
    }
}

/// Hunt–Szymanski longest common subsequence.
///
/// Runs in O((r + n) log n) where r is the number of matching position
/// pairs, degrading to O(n·m log n) when most elements are equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuntSzymanski;

impl Engine for HuntSzymanski {
    fn match_vector(&self, old: &[usize], new: &[usize]) -> MatchVector {
        let window = Window::trim(old, new);
        let mut matches = vec![None; old.len()];
        for (i, j) in window.prefix().chain(window.suffix(old.len(), new.len())) {
            matches[i] = Some(j);
        }

        let candidates = Candidates::search(old, new, &window, true);
        let mut next = candidates.heads.last().map(|head| &**head);
        while let Some(link) = next {
            matches[link.old] = Some(link.new);
            next = link.prev.as_deref();
        }
        MatchVector::from(matches)
    }

    fn lcs_length(&self, old: &[usize], new: &[usize]) -> usize {
        let window = Window::trim(old, new);
        let trimmed = old.len() - window.old.len();
        trimmed + Candidates::search(old, new, &window, false).thresh.len()
    }
}

/// The part of both sequences left after stripping the common prefix and
/// suffix.
struct Window {
    old: Range<usize>,
    new: Range<usize>,
}

impl Window {
    fn trim(old: &[usize], new: &[usize]) -> Self {
        let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
        let suffix = old[prefix..]
            .iter()
            .rev()
            .zip(new[prefix..].iter().rev())
            .take_while(|(a, b)| a == b)
            .count();
        tracing::trace!(prefix, suffix, "trimmed common ends");
        Window {
            old: prefix..old.len() - suffix,
            new: prefix..new.len() - suffix,
        }
    }

    fn prefix(&self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.old.start).map(|i| (i, i))
    }

    fn suffix(&self, old_len: usize, new_len: usize) -> impl Iterator<Item = (usize, usize)> {
        let shift = new_len as isize - old_len as isize;
        (self.old.end..old_len).map(move |i| (i, (i as isize + shift) as usize))
    }
}

/// Chain node. A node stays alive only while some head still reaches it.
struct Link {
    prev: Option<Rc<Link>>,
    old: usize,
    new: usize,
}

impl Drop for Link {
    // Unlinks iteratively so dropping a long chain does not recurse.
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(rc) = prev {
            match Rc::try_unwrap(rc) {
                Ok(mut link) => prev = link.prev.take(),
                Err(_) => break,
            }
        }
    }
}

/// Threshold array of the candidate chains: `thresh[k]` is the smallest new
/// index ending a common subsequence of length `k + 1` seen so far.
struct Candidates {
    thresh: Vec<usize>,
    heads: Vec<Rc<Link>>,
    track: bool,
}

impl Candidates {
    fn search(old: &[usize], new: &[usize], window: &Window, track: bool) -> Self {
        let mut positions: Vec<Vec<usize>> = Vec::new();
        for j in window.new.clone() {
            let id = new[j];
            if positions.len() <= id {
                positions.resize_with(id + 1, Vec::new);
            }
            positions[id].push(j);
        }

        let mut candidates = Candidates {
            thresh: Vec::new(),
            heads: Vec::new(),
            track,
        };
        for i in window.old.clone() {
            if let Some(js) = positions.get(old[i]) {
                candidates.extend(i, js);
            }
        }
        tracing::trace!(chain = candidates.thresh.len(), "candidate search finished");
        candidates
    }

    /// Offers every position of `new` matching old index `i`, highest first,
    /// so a single old index never extends its own chain.
    fn extend(&mut self, i: usize, js: &[usize]) {
        let mut k: Option<usize> = None;
        for &j in js.iter().rev() {
            match k {
                Some(kk) if kk > 0 && self.thresh[kk] > j && self.thresh[kk - 1] < j => {
                    self.thresh[kk] = j;
                }
                _ => k = self.replace_next_larger(j, k),
            }
            if let Some(kk) = k {
                if self.track {
                    self.link(kk, i, j);
                }
            }
        }
    }

    /// Overwrites the first threshold larger than `value`, searching no
    /// higher than `high`. Returns `None` when `value` is already present.
    fn replace_next_larger(&mut self, value: usize, high: Option<usize>) -> Option<usize> {
        match self.thresh.last() {
            Some(&last) if value <= last => {}
            _ => {
                self.thresh.push(value);
                return Some(self.thresh.len() - 1);
            }
        }
        let high = high.filter(|&h| h > 0).unwrap_or(self.thresh.len() - 1);
        match self.thresh[..=high].binary_search(&value) {
            Ok(_) => None,
            Err(slot) => {
                self.thresh[slot] = value;
                Some(slot)
            }
        }
    }

    fn link(&mut self, k: usize, old: usize, new: usize) {
        let prev = k.checked_sub(1).map(|p| Rc::clone(&self.heads[p]));
        let link = Rc::new(Link { prev, old, new });
        if k < self.heads.len() {
            self.heads[k] = link;
        } else {
            self.heads.push(link);
        }
    }
}
