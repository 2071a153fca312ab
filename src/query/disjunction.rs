use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::query::Scorer;
use crate::{DocId, DocSet, Score, TERMINATED};

/// Union of scorers.
///
/// The score and the frequency of a document are the sums of those of the
/// scorers matching it.
pub struct DisjunctionScorer<TScorer> {
    chains: MinHeap<TScorer>,
    doc: DocId,
    score: Score,
    freq: u32,
}

type MinHeap<T> = BinaryHeap<Reverse<ScorerWrapper<T>>>;

#[repr(transparent)]
struct ScorerWrapper<T>(T);

impl<T: Scorer> PartialEq for ScorerWrapper<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.doc() == other.0.doc()
    }
}

impl<T: Scorer> Eq for ScorerWrapper<T> {}

impl<T: Scorer> PartialOrd for ScorerWrapper<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Scorer> Ord for ScorerWrapper<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.doc().cmp(&other.0.doc())
    }
}

impl<TScorer: Scorer> DisjunctionScorer<TScorer> {
    pub fn new<T: IntoIterator<Item = TScorer>>(docsets: T) -> Self {
        let chains: MinHeap<_> = docsets
            .into_iter()
            .map(|doc| Reverse(ScorerWrapper(doc)))
            .collect();
        let mut disjunction = Self {
            chains,
            doc: TERMINATED,
            score: 0.0,
            freq: 0,
        };
        disjunction.advance();
        disjunction
    }
}

impl<TScorer: Scorer> DocSet for DisjunctionScorer<TScorer> {
    fn advance(&mut self) -> DocId {
        // Every chain sits strictly after `self.doc`.
        self.score = 0.0;
        self.freq = 0;
        let mut doc = TERMINATED;
        while let Some(mut candidate) = self.chains.pop() {
            let next = candidate.0 .0.doc();
            if next == TERMINATED {
                // The smallest chain is exhausted, so are all the others.
                continue;
            }
            if doc != TERMINATED && next != doc {
                self.chains.push(candidate);
                break;
            }
            doc = next;
            self.score += candidate.0 .0.score();
            self.freq += candidate.0 .0.freq();
            candidate.0 .0.advance();
            self.chains.push(candidate);
        }
        self.doc = doc;
        doc
    }

    fn seek(&mut self, target: DocId) -> DocId {
        if self.doc >= target {
            return self.doc;
        }
        let mut scorers = std::mem::take(&mut self.chains).into_vec();
        for scorer in &mut scorers {
            if scorer.0 .0.doc() < target {
                scorer.0 .0.seek(target);
            }
        }
        self.chains = scorers.into_iter().collect();
        self.advance()
    }

    fn doc(&self) -> DocId {
        self.doc
    }

    fn size_hint(&self) -> u32 {
        self.chains
            .iter()
            .map(|docset| docset.0 .0.size_hint())
            .max()
            .unwrap_or(0u32)
    }

    fn cost(&self) -> u64 {
        self.chains.iter().map(|docset| docset.0 .0.cost()).sum()
    }
}

impl<TScorer: Scorer> Scorer for DisjunctionScorer<TScorer> {
    fn score(&mut self) -> Score {
        self.score
    }

    fn freq(&self) -> u32 {
        self.freq
    }
}
