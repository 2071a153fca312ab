use super::Scorer;
use crate::docset::{DocSet, TERMINATED};
use crate::index::SegmentReader;
use crate::query::{Explanation, Visibility};
use crate::{DocId, Score};

/// Iterates through all of the documents and scores matched by the scorer
/// and calls the `callback` argument for each of them.
pub(crate) fn for_each_scorer<TScorer: Scorer + ?Sized>(
    scorer: &mut TScorer,
    callback: &mut dyn FnMut(DocId, Score),
) {
    let mut doc = scorer.doc();
    while doc != TERMINATED {
        callback(doc, scorer.score());
        doc = scorer.advance();
    }
}

/// A Weight is the specialization of a Query
/// for a given set of segments.
///
/// Scoring weights take part in the query normalization: the searcher sums up
/// [`Weight::value_for_normalization`] over the whole weight tree, turns it into
/// a query norm, and pushes it back down with [`Weight::normalize`].
///
/// See [`Query`](crate::query::Query).
pub trait Weight: Send + Sync + 'static {
    /// Returns the scorer for the given segment.
    ///
    /// `boost` is a multiplier to apply to the score.
    /// Documents rejected by `visibility` are never emitted.
    ///
    /// See [`Query`](crate::query::Query).
    fn scorer(
        &self,
        reader: &SegmentReader,
        visibility: &Visibility,
        boost: Score,
    ) -> crate::Result<Box<dyn Scorer>>;

    /// Returns an `Explanation` for the given document.
    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation>;

    /// Returns the number documents within the given `SegmentReader`.
    fn count(&self, reader: &SegmentReader) -> crate::Result<u32> {
        let visibility = Visibility::for_segment(reader);
        let mut scorer = self.scorer(reader, &visibility, 1.0)?;
        Ok(scorer.count_including_deleted())
    }

    /// Iterates through all of the visible documents and scores matched by the
    /// weight and calls the `callback` argument for each of them.
    fn for_each(
        &self,
        reader: &SegmentReader,
        visibility: &Visibility,
        callback: &mut dyn FnMut(DocId, Score),
    ) -> crate::Result<()> {
        let mut scorer = self.scorer(reader, visibility, 1.0)?;
        for_each_scorer(scorer.as_mut(), callback);
        Ok(())
    }

    /// Returns the sum of squared weights of the subtree.
    fn value_for_normalization(&self) -> Score;

    /// Applies the query norm computed by the searcher, multiplied by the
    /// boosts accumulated from the enclosing queries.
    fn normalize(&mut self, query_norm: Score, top_level_boost: Score);
}
