//! # Collectors
//!
//! Collectors define the information you want to extract from the documents matching the queries.
//! We call this information your search "fruit".
//!
//! Your fruit could for instance be :
//! - [the count of matching documents](crate::collector::Count)
//! - [the top 10 documents, by relevancy](crate::collector::TopDocs)
//!
//! A collector is split in two parts: the [`Collector`] lives for the whole
//! search and builds one [`SegmentCollector`] per segment. Segments may be
//! collected concurrently; their fruits are then merged by the collector.

use crate::index::SegmentReader;
use crate::query::{Visibility, Weight};
use crate::{DocId, Score, SegmentOrdinal};

mod count_collector;
pub use self::count_collector::Count;

mod top_score_collector;
pub use self::top_score_collector::TopDocs;

/// Collectors are in charge of collecting and retaining relevant
/// information from the document found and scored by the query.
///
/// For instance,
///
/// - keeping track of the top 10 best documents
/// - counting the number of documents
///
/// The `Collector` trait is implemented by the user-facing half; the
/// per-segment work happens in its [`SegmentCollector`] child.
pub trait Collector: Sync + Send {
    /// `Fruit` is the type for the result of our collection.
    /// e.g. `usize` for the `Count` collector.
    type Fruit: Send;

    /// Type of the `SegmentCollector` associated with this collector.
    type Child: SegmentCollector;

    /// `set_segment` is called before beginning to enumerate
    /// on this segment.
    fn for_segment(
        &self,
        segment_local_id: SegmentOrdinal,
        segment: &SegmentReader,
    ) -> crate::Result<Self::Child>;

    /// Returns true iff the collector requires to compute scores for documents.
    fn requires_scoring(&self) -> bool;

    /// Combines the fruit associated with the collection of each segments
    /// into one fruit.
    fn merge_fruits(
        &self,
        segment_fruits: Vec<<Self::Child as SegmentCollector>::Fruit>,
    ) -> crate::Result<Self::Fruit>;

    /// Creates the segment collector, pushes it the documents matched by
    /// `weight` and harvests it.
    fn collect_segment(
        &self,
        weight: &dyn Weight,
        segment_ord: SegmentOrdinal,
        reader: &SegmentReader,
        visibility: &Visibility,
    ) -> crate::Result<<Self::Child as SegmentCollector>::Fruit> {
        let mut segment_collector = self.for_segment(segment_ord, reader)?;
        weight.for_each(reader, visibility, &mut |doc, score| {
            segment_collector.collect(doc, score);
        })?;
        Ok(segment_collector.harvest())
    }
}

/// The `SegmentCollector` is the trait in charge of defining the
/// collect operation at the scale of the segment.
///
/// `.collect(doc, score)` will be called for every documents
/// matching the query.
pub trait SegmentCollector: 'static {
    /// `Fruit` is the type for the result of our collection.
    /// e.g. `usize` for the `Count` collector.
    type Fruit: Send;

    /// The query pushes the scored document to the collector via this method.
    fn collect(&mut self, doc: DocId, score: Score);

    /// Extract the fruit of the collection from the `SegmentCollector`.
    fn harvest(self) -> Self::Fruit;
}
