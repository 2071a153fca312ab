use crate::docset::{DocSet, TERMINATED};
use crate::index::SegmentReader;
use crate::query::disjunction::DisjunctionScorer;
use crate::query::explanation::does_not_match;
use crate::query::{EmptyScorer, Explanation, Scorer, Visibility, Weight};
use crate::{DocId, Score};

pub struct BooleanWeight {
    weights: Vec<Box<dyn Weight>>,
    boost: Score,
}

impl BooleanWeight {
    pub fn new(weights: Vec<Box<dyn Weight>>, boost: Score) -> BooleanWeight {
        BooleanWeight { weights, boost }
    }
}

impl Weight for BooleanWeight {
    fn scorer(
        &self,
        reader: &SegmentReader,
        visibility: &Visibility,
        boost: Score,
    ) -> crate::Result<Box<dyn Scorer>> {
        let mut sub_scorers: Vec<Box<dyn Scorer>> = Vec::with_capacity(self.weights.len());
        for weight in &self.weights {
            let scorer = weight.scorer(reader, visibility, boost)?;
            if scorer.doc() != TERMINATED {
                sub_scorers.push(scorer);
            }
        }
        match sub_scorers.len() {
            0 => Ok(Box::new(EmptyScorer)),
            1 => Ok(sub_scorers.pop().unwrap_or_else(|| Box::new(EmptyScorer))),
            _ => Ok(Box::new(DisjunctionScorer::new(sub_scorers))),
        }
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        let visibility = Visibility::for_segment(reader);
        let mut scorer = self.scorer(reader, &visibility, 1.0)?;
        if scorer.seek(doc) != doc {
            return Err(does_not_match(doc));
        }
        let mut explanation = Explanation::new("sum of:", scorer.score());
        for weight in &self.weights {
            if let Ok(child_explanation) = weight.explain(reader, doc) {
                explanation.add_detail(child_explanation);
            }
        }
        Ok(explanation)
    }

    fn value_for_normalization(&self) -> Score {
        let sum: Score = self
            .weights
            .iter()
            .map(|weight| weight.value_for_normalization())
            .sum();
        sum * self.boost * self.boost
    }

    fn normalize(&mut self, query_norm: Score, top_level_boost: Score) {
        let top_level_boost = top_level_boost * self.boost;
        for weight in &mut self.weights {
            weight.normalize(query_norm, top_level_boost);
        }
    }
}
