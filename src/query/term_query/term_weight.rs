use super::term_scorer::TermScorer;
use crate::docset::DocSet;
use crate::index::SegmentReader;
use crate::postings::SegmentPostings;
use crate::query::explanation::does_not_match;
use crate::query::tfidf::TfIdfWeight;
use crate::query::{Explanation, Scorer, Visibility, Weight};
use crate::schema::Term;
use crate::{DocId, Score};

pub struct TermWeight {
    term: Term,
    similarity_weight: TfIdfWeight,
    scoring_enabled: bool,
}

impl Weight for TermWeight {
    fn scorer(
        &self,
        reader: &SegmentReader,
        visibility: &Visibility,
        boost: Score,
    ) -> crate::Result<Box<dyn Scorer>> {
        let term_scorer = self.specialized_scorer(reader, visibility, boost)?;
        Ok(Box::new(term_scorer))
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        let visibility = Visibility::for_segment(reader);
        let mut scorer = self.specialized_scorer(reader, &visibility, 1.0)?;
        if scorer.seek(doc) != doc {
            return Err(does_not_match(doc));
        }
        Ok(scorer.explain())
    }

    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        if let Some(alive_bitset) = reader.alive_bitset() {
            Ok(self.postings(reader).doc_freq_given_deletes(alive_bitset))
        } else {
            Ok(reader.inverted_index().doc_freq(&self.term))
        }
    }

    fn value_for_normalization(&self) -> Score {
        self.similarity_weight.value_for_normalization()
    }

    fn normalize(&mut self, query_norm: Score, top_level_boost: Score) {
        self.similarity_weight.normalize(query_norm, top_level_boost);
    }
}

impl TermWeight {
    pub fn new(term: Term, similarity_weight: TfIdfWeight, scoring_enabled: bool) -> TermWeight {
        TermWeight {
            term,
            similarity_weight,
            scoring_enabled,
        }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn scoring_enabled(&self) -> bool {
        self.scoring_enabled
    }

    fn postings(&self, reader: &SegmentReader) -> SegmentPostings {
        reader
            .inverted_index()
            .read_postings(&self.term)
            .unwrap_or_else(SegmentPostings::empty)
    }

    pub(crate) fn specialized_scorer(
        &self,
        reader: &SegmentReader,
        visibility: &Visibility,
        boost: Score,
    ) -> crate::Result<TermScorer> {
        Ok(TermScorer::new(
            self.postings(reader),
            visibility.clone(),
            self.similarity_weight.clone(),
            boost,
        ))
    }
}
