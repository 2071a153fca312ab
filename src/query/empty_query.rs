use std::any::TypeId;
use std::hash::{Hash, Hasher};

use super::Scorer;
use crate::core::Searcher;
use crate::docset::{DocSet, TERMINATED};
use crate::index::SegmentReader;
use crate::query::explanation::does_not_match;
use crate::query::{Explanation, Query, Visibility, Weight};
use crate::{DocId, Score};

/// `EmptyQuery` is a dummy `Query` in which no document matches.
///
/// It is useful for tests and handling edge cases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyQuery;

impl Query for EmptyQuery {
    fn weight(&self, _searcher: &Searcher, _scoring_enabled: bool) -> crate::Result<Box<dyn Weight>> {
        Ok(Box::new(EmptyWeight))
    }

    fn count(&self, _searcher: &Searcher) -> crate::Result<usize> {
        Ok(0)
    }

    fn query_eq(&self, other: &dyn Query) -> bool {
        other.downcast_ref::<EmptyQuery>().is_some()
    }

    fn query_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<EmptyQuery>().hash(&mut state);
    }
}

/// `EmptyWeight` is a dummy `Weight` in which no document matches.
///
/// It is useful for tests and handling edge cases.
pub struct EmptyWeight;

impl Weight for EmptyWeight {
    fn scorer(
        &self,
        _reader: &SegmentReader,
        _visibility: &Visibility,
        _boost: Score,
    ) -> crate::Result<Box<dyn Scorer>> {
        Ok(Box::new(EmptyScorer))
    }

    fn explain(&self, _reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        Err(does_not_match(doc))
    }

    fn value_for_normalization(&self) -> Score {
        0.0
    }

    fn normalize(&mut self, _query_norm: Score, _top_level_boost: Score) {}
}

/// `EmptyScorer` is a dummy `Scorer` in which no document matches.
///
/// It is useful for tests and handling edge cases.
pub struct EmptyScorer;

impl DocSet for EmptyScorer {
    fn advance(&mut self) -> DocId {
        TERMINATED
    }

    fn doc(&self) -> DocId {
        TERMINATED
    }

    fn size_hint(&self) -> u32 {
        0
    }
}

impl Scorer for EmptyScorer {
    fn score(&mut self) -> Score {
        0.0
    }

    fn freq(&self) -> u32 {
        0
    }
}
