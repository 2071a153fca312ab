use std::fmt;
use std::sync::Arc;

use common::BitSet;

use crate::collector::Collector;
use crate::core::Executor;
use crate::docset::{DocSet, TERMINATED};
use crate::index::SegmentReader;
use crate::query::{query_norm, Explanation, Query, Visibility, Weight};
use crate::schema::Term;
use crate::{BlockJoinError, DocAddress, SegmentOrdinal};

/// Holds a list of `SegmentReader`s ready for search.
///
/// It guarantees that the `Segment` will not be removed before
/// the destruction of the `Searcher`.
#[derive(Clone)]
pub struct Searcher {
    segment_readers: Vec<SegmentReader>,
    executor: Arc<Executor>,
}

impl Searcher {
    /// Creates a searcher over the given segments, running on the caller thread.
    pub fn new(segment_readers: Vec<SegmentReader>) -> Searcher {
        Searcher {
            segment_readers,
            executor: Arc::new(Executor::single_thread()),
        }
    }

    /// Sets the executor used to search the segments.
    pub fn with_executor(mut self, executor: Executor) -> Searcher {
        self.executor = Arc::new(executor);
        self
    }

    /// Return the overall number of documents containing
    /// the given term.
    pub fn doc_freq(&self, term: &Term) -> u64 {
        self.segment_readers
            .iter()
            .map(|segment_reader| u64::from(segment_reader.inverted_index().doc_freq(term)))
            .sum()
    }

    /// Returns the overall number of documents in the index.
    pub fn num_docs(&self) -> u64 {
        self.segment_readers
            .iter()
            .map(|segment_reader| u64::from(segment_reader.num_docs()))
            .sum()
    }

    /// Return the list of segment readers
    pub fn segment_readers(&self) -> &[SegmentReader] {
        &self.segment_readers
    }

    /// Returns the segment_reader associated with the given segment_ord
    pub fn segment_reader(&self, segment_ord: SegmentOrdinal) -> &SegmentReader {
        &self.segment_readers[segment_ord as usize]
    }

    /// Rewrites the query until it cannot be simplified anymore.
    pub fn rewrite(&self, query: &dyn Query) -> crate::Result<Box<dyn Query>> {
        let mut rewritten = query.box_clone();
        while let Some(simpler) = rewritten.rewrite(self)? {
            rewritten = simpler;
        }
        Ok(rewritten)
    }

    /// Rewrites the query and builds its weight.
    ///
    /// If scoring is enabled, the weight is normalized.
    pub fn create_weight(
        &self,
        query: &dyn Query,
        scoring_enabled: bool,
    ) -> crate::Result<Box<dyn Weight>> {
        let rewritten = self.rewrite(query)?;
        let mut weight = rewritten.weight(self, scoring_enabled)?;
        if scoring_enabled {
            let norm = query_norm(weight.value_for_normalization());
            weight.normalize(norm, 1.0);
        }
        Ok(weight)
    }

    /// Runs a query on the segment readers wrapped by the searcher.
    ///
    /// Search works as follows :
    ///
    ///  First the weight object associated to the query is created.
    ///
    ///  Then, the query loops over the segments and for each segment :
    ///  - setup the collector and informs it that the segment being processed has changed.
    ///  - creates a SegmentCollector for collecting documents associated to the segment
    ///  - creates a `Scorer` object associated for this segment
    ///  - iterate through the matched documents and push them to the segment collector.
    ///
    ///  Finally, the Collector merges each of the child collectors into itself for result
    ///  usability by the caller.
    pub fn search<C: Collector>(&self, query: &dyn Query, collector: &C) -> crate::Result<C::Fruit> {
        self.search_internal(query, None, collector)
    }

    /// Same as [`Searcher::search`], only the documents matched by
    /// `filter_query` are visible.
    ///
    /// Visibility applies to the children and to the parents of block joins
    /// alike.
    pub fn search_with_filter<C: Collector>(
        &self,
        query: &dyn Query,
        filter_query: &dyn Query,
        collector: &C,
    ) -> crate::Result<C::Fruit> {
        let filter_weight = self.create_weight(filter_query, false)?;
        self.search_internal(query, Some(filter_weight.as_ref()), collector)
    }

    /// Returns an `Explanation` for the score of the document.
    pub fn explain(&self, query: &dyn Query, doc_address: DocAddress) -> crate::Result<Explanation> {
        let segment_reader = self
            .segment_readers
            .get(doc_address.segment_ord as usize)
            .ok_or_else(|| {
                BlockJoinError::InvalidArgument(format!(
                    "Segment ordinal {} out of bounds",
                    doc_address.segment_ord
                ))
            })?;
        let weight = self.create_weight(query, true)?;
        weight.explain(segment_reader, doc_address.doc_id)
    }

    fn search_internal<C: Collector>(
        &self,
        query: &dyn Query,
        filter_weight: Option<&dyn Weight>,
        collector: &C,
    ) -> crate::Result<C::Fruit> {
        let scoring_enabled = collector.requires_scoring();
        let weight = self.create_weight(query, scoring_enabled)?;
        let segment_readers = self.segment_readers.iter().enumerate();
        let fruits = self.executor.map(
            |(segment_ord, segment_reader)| {
                let visibility = segment_visibility(segment_reader, filter_weight)?;
                collector.collect_segment(
                    weight.as_ref(),
                    segment_ord as SegmentOrdinal,
                    segment_reader,
                    &visibility,
                )
            },
            segment_readers,
        )?;
        collector.merge_fruits(fruits)
    }
}

fn segment_visibility(
    segment_reader: &SegmentReader,
    filter_weight: Option<&dyn Weight>,
) -> crate::Result<Visibility> {
    let visibility = Visibility::for_segment(segment_reader);
    let Some(filter_weight) = filter_weight else {
        return Ok(visibility);
    };
    let mut filter = BitSet::with_max_value(segment_reader.max_doc());
    let mut scorer = filter_weight.scorer(segment_reader, &visibility, 1.0)?;
    let mut doc = scorer.doc();
    while doc != TERMINATED {
        filter.insert(doc);
        doc = scorer.advance();
    }
    Ok(visibility.with_filter(Arc::new(filter)))
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segment_ids = self
            .segment_readers
            .iter()
            .map(SegmentReader::segment_id)
            .collect::<Vec<_>>();
        write!(f, "Searcher({segment_ids:?})")
    }
}
