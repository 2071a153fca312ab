use common::HasLen;

use crate::docset::{DocSet, TERMINATED};
use crate::query::Scorer;
use crate::{DocId, Score};

/// In-memory `Scorer` over a sorted list of `(doc, score, freq)` matches.
///
/// It can stand for any child query whose matches are known in advance,
/// which is handy to drive a block join directly.
#[derive(Clone, Debug)]
pub struct VecScorer {
    matches: Vec<(DocId, Score, u32)>,
    cursor: usize,
}

impl From<Vec<(DocId, Score, u32)>> for VecScorer {
    fn from(matches: Vec<(DocId, Score, u32)>) -> VecScorer {
        assert!(
            matches.windows(2).all(|pair| pair[0].0 < pair[1].0),
            "matches must be sorted by strictly increasing doc id"
        );
        VecScorer { matches, cursor: 0 }
    }
}

impl DocSet for VecScorer {
    fn advance(&mut self) -> DocId {
        if self.cursor < self.matches.len() {
            self.cursor += 1;
        }
        self.doc()
    }

    fn seek(&mut self, target: DocId) -> DocId {
        if self.doc() >= target {
            return self.doc();
        }
        self.cursor += self.matches[self.cursor..].partition_point(|&(doc, _, _)| doc < target);
        self.doc()
    }

    fn doc(&self) -> DocId {
        self.matches
            .get(self.cursor)
            .map(|&(doc, _, _)| doc)
            .unwrap_or(TERMINATED)
    }

    fn size_hint(&self) -> u32 {
        self.len() as u32
    }
}

impl Scorer for VecScorer {
    fn score(&mut self) -> Score {
        self.matches
            .get(self.cursor)
            .map(|&(_, score, _)| score)
            .unwrap_or(0.0)
    }

    fn freq(&self) -> u32 {
        self.matches
            .get(self.cursor)
            .map(|&(_, _, freq)| freq)
            .unwrap_or(0)
    }
}

impl HasLen for VecScorer {
    fn len(&self) -> usize {
        self.matches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::VecScorer;
    use crate::docset::{DocSet, TERMINATED};
    use crate::query::Scorer;

    #[test]
    fn test_vec_scorer() {
        let matches = (0u32..100u32).map(|doc| (doc * 3, doc as f32, 1)).collect::<Vec<_>>();
        let mut scorer = VecScorer::from(matches);
        assert_eq!(scorer.doc(), 0);
        assert_eq!(scorer.advance(), 3);
        assert_eq!(scorer.score(), 1.0);
        assert_eq!(scorer.seek(14), 15);
        assert_eq!(scorer.seek(15), 15);
        assert_eq!(scorer.score(), 5.0);
        assert_eq!(scorer.seek(300), TERMINATED);
        assert_eq!(scorer.advance(), TERMINATED);
        assert_eq!(scorer.freq(), 0);
    }

    #[test]
    #[should_panic]
    fn test_vec_scorer_unsorted() {
        VecScorer::from(vec![(3, 1.0, 1), (2, 1.0, 1)]);
    }
}
