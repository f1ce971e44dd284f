use crate::lcs::Comparison;
use std::hash::Hash;
use std::iter;

/// Handlers invoked while walking two sequences in alignment order.
///
/// Every call receives the current position in both sequences. Handlers
/// are invoked synchronously and exactly once per event.
pub trait Visitor {
    /// `old[old]` and `new[new]` are aligned.
    fn matched(&mut self, _old: usize, _new: usize) {}

    /// `old[old]` has no counterpart; `new` is the next unvisited new index.
    fn discard_old(&mut self, _old: usize, _new: usize) {}

    /// `new[new]` has no counterpart; `old` is the next unvisited old index.
    fn discard_new(&mut self, _old: usize, _new: usize) {}

    /// `old[old]` is replaced by `new[new]`. Only the balanced traversal
    /// reports this; by default it is split into the two discards.
    fn changed(&mut self, old: usize, new: usize) {
        self.discard_old(old, new);
        self.discard_new(old + 1, new);
    }
}

impl<'a, T> Comparison<'a, T> {
    /// Walks both sequences, reporting every unmatched old element of a gap
    /// before the unmatched new elements of the same gap.
    pub fn traverse_sequences<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        let mut bi = 0;
        for (ai, m) in self.matches.iter().enumerate() {
            match m {
                Some(bj) => {
                    while bi < bj {
                        visitor.discard_new(ai, bi);
                        bi += 1;
                    }
                    visitor.matched(ai, bi);
                    bi += 1;
                }
                None => visitor.discard_old(ai, bi),
            }
        }
        let ai = self.old.len();
        while bi < self.new.len() {
            visitor.discard_new(ai, bi);
            bi += 1;
        }
    }

    /// Walks both sequences, pairing the unmatched elements of each gap
    /// one-to-one through [`Visitor::changed`] and reporting the leftover
    /// run of the longer side afterwards.
    pub fn traverse_balanced<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        let (mut ai, mut bi) = (0, 0);
        let anchors = self.matches.pairs().map(Some).chain(iter::once(None));
        for anchor in anchors {
            let (ma, mb) = anchor.unwrap_or((self.old.len(), self.new.len()));
            while ai < ma || bi < mb {
                if ai < ma && bi < mb {
                    visitor.changed(ai, bi);
                    ai += 1;
                    bi += 1;
                } else if ai < ma {
                    visitor.discard_old(ai, bi);
                    ai += 1;
                } else {
                    visitor.discard_new(ai, bi);
                    bi += 1;
                }
            }
            if anchor.is_some() {
                visitor.matched(ai, bi);
                ai += 1;
                bi += 1;
            }
        }
    }
}

pub fn traverse_sequences<T, V>(old: &[T], new: &[T], visitor: &mut V)
where
    T: Hash + Eq,
    V: Visitor + ?Sized,
{
    Comparison::new(old, new).traverse_sequences(visitor);
}

pub fn traverse_balanced<T, V>(old: &[T], new: &[T], visitor: &mut V)
where
    T: Hash + Eq,
    V: Visitor + ?Sized,
{
    Comparison::new(old, new).traverse_balanced(visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Visitor for Recorder {
        fn matched(&mut self, old: usize, new: usize) {
            self.events.push(format!("={old},{new}"));
        }

        fn discard_old(&mut self, old: usize, new: usize) {
            self.events.push(format!("-{old},{new}"));
        }

        fn discard_new(&mut self, old: usize, new: usize) {
            self.events.push(format!("+{old},{new}"));
        }
    }

    struct Pairing(Recorder);

    impl Visitor for Pairing {
        fn matched(&mut self, old: usize, new: usize) {
            self.0.matched(old, new);
        }

        fn discard_old(&mut self, old: usize, new: usize) {
            self.0.discard_old(old, new);
        }

        fn discard_new(&mut self, old: usize, new: usize) {
            self.0.discard_new(old, new);
        }

        fn changed(&mut self, old: usize, new: usize) {
            self.0.events.push(format!("c{old},{new}"));
        }
    }

    #[derive(Default)]
    struct Coverage {
        old: Vec<usize>,
        new: Vec<usize>,
    }

    impl Visitor for Coverage {
        fn matched(&mut self, old: usize, new: usize) {
            self.old.push(old);
            self.new.push(new);
        }

        fn discard_old(&mut self, old: usize, _new: usize) {
            self.old.push(old);
        }

        fn discard_new(&mut self, _old: usize, new: usize) {
            self.new.push(new);
        }
    }

    proptest! {
        #[test]
        fn test_sequences_visit_every_index_once(
            old in prop::collection::vec(0u8..4, 0..25),
            new in prop::collection::vec(0u8..4, 0..25),
        ) {
            let mut coverage = Coverage::default();
            traverse_sequences(&old, &new, &mut coverage);
            prop_assert_eq!(coverage.old, (0..old.len()).collect::<Vec<_>>());
            prop_assert_eq!(coverage.new, (0..new.len()).collect::<Vec<_>>());
        }

        #[test]
        fn test_balanced_visits_every_index_once(
            old in prop::collection::vec(0u8..4, 0..25),
            new in prop::collection::vec(0u8..4, 0..25),
        ) {
            let mut coverage = Coverage::default();
            traverse_balanced(&old, &new, &mut coverage);
            prop_assert_eq!(coverage.old, (0..old.len()).collect::<Vec<_>>());
            prop_assert_eq!(coverage.new, (0..new.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_traverse_sequences_order() {
        let old = vec!["a", "b", "c", "e"];
        let new = vec!["a", "x", "y", "c", "e", "z"];
        let mut recorder = Recorder::default();
        traverse_sequences(&old, &new, &mut recorder);
        assert_eq!(
            recorder.events,
            vec!["=0,0", "-1,1", "+2,1", "+2,2", "=2,3", "=3,4", "+4,5"]
        );
    }

    #[test]
    fn test_traverse_balanced_pairs_changes() {
        let old = vec!["a", "b", "c", "e"];
        let new = vec!["a", "x", "y", "c", "e", "z"];
        let mut pairing = Pairing(Recorder::default());
        traverse_balanced(&old, &new, &mut pairing);
        assert_eq!(
            pairing.0.events,
            vec!["=0,0", "c1,1", "+2,2", "=2,3", "=3,4", "+4,5"]
        );
    }

    #[test]
    fn test_traverse_balanced_default_change() {
        let old = vec!["a", "b"];
        let new = vec!["a", "x"];
        let mut recorder = Recorder::default();
        traverse_balanced(&old, &new, &mut recorder);
        assert_eq!(recorder.events, vec!["=0,0", "-1,1", "+2,1"]);
    }

    #[test]
    fn test_empty_sides() {
        let empty: Vec<&str> = vec![];
        let mut recorder = Recorder::default();
        traverse_sequences(&empty, &["p", "q"], &mut recorder);
        assert_eq!(recorder.events, vec!["+0,0", "+0,1"]);

        let mut recorder = Recorder::default();
        traverse_balanced(&["p"], &empty, &mut recorder);
        assert_eq!(recorder.events, vec!["-0,0"]);
    }
}
