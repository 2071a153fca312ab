use crate::docset::{DocSet, TERMINATED};
use crate::postings::{Postings, SegmentPostings};
use crate::query::tfidf::TfIdfWeight;
use crate::query::{Explanation, Scorer, Visibility};
use crate::{DocId, Score};

pub struct TermScorer {
    postings: SegmentPostings,
    visibility: Visibility,
    similarity_weight: TfIdfWeight,
    boost: Score,
}

impl TermScorer {
    pub fn new(
        postings: SegmentPostings,
        visibility: Visibility,
        similarity_weight: TfIdfWeight,
        boost: Score,
    ) -> TermScorer {
        let mut term_scorer = TermScorer {
            postings,
            visibility,
            similarity_weight,
            boost,
        };
        term_scorer.skip_invisible();
        term_scorer
    }

    pub fn term_freq(&self) -> u32 {
        self.postings.term_freq()
    }

    pub fn explain(&self) -> Explanation {
        let explanation = self.similarity_weight.explain(self.term_freq());
        if self.boost == 1.0 {
            return explanation;
        }
        let mut boosted = Explanation::new(
            format!("Boost x{} of ...", self.boost),
            explanation.value() * self.boost,
        );
        boosted.add_const("boost", self.boost);
        boosted.add_detail(explanation);
        boosted
    }

    fn skip_invisible(&mut self) -> DocId {
        let mut doc = self.postings.doc();
        while doc != TERMINATED && !self.visibility.is_visible(doc) {
            doc = self.postings.advance();
        }
        doc
    }
}

impl DocSet for TermScorer {
    #[inline]
    fn advance(&mut self) -> DocId {
        self.postings.advance();
        self.skip_invisible()
    }

    #[inline]
    fn seek(&mut self, target: DocId) -> DocId {
        self.postings.seek(target);
        self.skip_invisible()
    }

    #[inline]
    fn doc(&self) -> DocId {
        self.postings.doc()
    }

    fn size_hint(&self) -> u32 {
        self.postings.size_hint()
    }
}

impl Scorer for TermScorer {
    #[inline]
    fn score(&mut self) -> Score {
        self.similarity_weight.score(self.term_freq()) * self.boost
    }

    fn freq(&self) -> u32 {
        self.term_freq()
    }
}
