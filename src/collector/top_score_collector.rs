use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use super::{Collector, SegmentCollector};
use crate::index::SegmentReader;
use crate::{BlockJoinError, DocAddress, DocId, Score, SegmentOrdinal};

/// A document and its score. The greater, the better: higher score first,
/// lower address on ties.
#[derive(Clone, Copy)]
struct ComparableDoc {
    score: Score,
    doc_address: DocAddress,
}

impl PartialOrd for ComparableDoc {
    fn partial_cmp(&self, other: &ComparableDoc) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComparableDoc {
    #[inline]
    fn cmp(&self, other: &ComparableDoc) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.doc_address.cmp(&self.doc_address))
    }
}

impl PartialEq for ComparableDoc {
    fn eq(&self, other: &ComparableDoc) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparableDoc {}

/// The `TopDocs` collector keeps track of the top `K` documents
/// sorted by their score.
///
/// The implementation is based on a `BinaryHeap`.
/// The theoretical complexity for collecting the top `K` out of `n` documents
/// is `O(n log K)`.
///
/// Documents with the same score are ordered by their `DocAddress`.
pub struct TopDocs {
    limit: usize,
}

impl fmt::Debug for TopDocs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopDocs(limit={})", self.limit)
    }
}

impl TopDocs {
    /// Creates a top score collector, with a number of documents equal to "limit".
    ///
    /// # Panics
    /// The method panics if limit is 0
    pub fn with_limit(limit: usize) -> TopDocs {
        assert!(limit >= 1, "Limit must be strictly greater than 0.");
        TopDocs { limit }
    }
}

impl Collector for TopDocs {
    type Fruit = Vec<(Score, DocAddress)>;

    type Child = TopScoreSegmentCollector;

    fn for_segment(
        &self,
        segment_local_id: SegmentOrdinal,
        _reader: &SegmentReader,
    ) -> crate::Result<TopScoreSegmentCollector> {
        Ok(TopScoreSegmentCollector {
            limit: self.limit,
            segment_ord: segment_local_id,
            heap: BinaryHeap::with_capacity(self.limit),
        })
    }

    fn requires_scoring(&self) -> bool {
        true
    }

    fn merge_fruits(
        &self,
        child_fruits: Vec<Vec<(Score, DocAddress)>>,
    ) -> crate::Result<Vec<(Score, DocAddress)>> {
        let mut top_docs: Vec<ComparableDoc> = child_fruits
            .into_iter()
            .flatten()
            .map(|(score, doc_address)| ComparableDoc { score, doc_address })
            .collect();
        if top_docs.iter().any(|doc| doc.score.is_nan()) {
            return Err(BlockJoinError::InternalError(
                "A document was scored NaN".to_string(),
            ));
        }
        top_docs.sort_unstable_by(|left, right| right.cmp(left));
        top_docs.truncate(self.limit);
        Ok(top_docs
            .into_iter()
            .map(|doc| (doc.score, doc.doc_address))
            .collect())
    }
}

/// Segment Collector associated with `TopDocs`.
pub struct TopScoreSegmentCollector {
    limit: usize,
    segment_ord: SegmentOrdinal,
    heap: BinaryHeap<Reverse<ComparableDoc>>,
}

impl SegmentCollector for TopScoreSegmentCollector {
    type Fruit = Vec<(Score, DocAddress)>;

    fn collect(&mut self, doc: DocId, score: Score) {
        let candidate = ComparableDoc {
            score,
            doc_address: DocAddress::new(self.segment_ord, doc),
        };
        if self.heap.len() < self.limit {
            self.heap.push(Reverse(candidate));
        } else if let Some(mut worst) = self.heap.peek_mut() {
            if candidate > worst.0 {
                *worst = Reverse(candidate);
            }
        }
    }

    fn harvest(self) -> Vec<(Score, DocAddress)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(doc)| (doc.score, doc.doc_address))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TopDocs;
    use crate::collector::{Collector, SegmentCollector};
    use crate::index::SegmentWriter;
    use crate::DocAddress;

    #[test]
    fn test_top_collector_not_at_capacity() {
        let reader = SegmentWriter::new().finalize();
        let mut top_collector = TopDocs::with_limit(4).for_segment(0, &reader).unwrap();
        top_collector.collect(1, 0.8);
        top_collector.collect(3, 0.2);
        top_collector.collect(5, 0.3);
        assert_eq!(
            top_collector.harvest(),
            vec![
                (0.8, DocAddress::new(0, 1)),
                (0.3, DocAddress::new(0, 5)),
                (0.2, DocAddress::new(0, 3))
            ]
        );
    }

    #[test]
    fn test_top_collector_at_capacity() {
        let reader = SegmentWriter::new().finalize();
        let mut top_collector = TopDocs::with_limit(4).for_segment(0, &reader).unwrap();
        top_collector.collect(1, 0.8);
        top_collector.collect(3, 0.2);
        top_collector.collect(5, 0.3);
        top_collector.collect(7, 0.9);
        top_collector.collect(9, -0.2);
        assert_eq!(
            top_collector.harvest(),
            vec![
                (0.9, DocAddress::new(0, 7)),
                (0.8, DocAddress::new(0, 1)),
                (0.3, DocAddress::new(0, 5)),
                (0.2, DocAddress::new(0, 3))
            ]
        );
    }

    #[test]
    fn test_top_collector_ties_and_merge() {
        let top_docs = TopDocs::with_limit(3);
        let merged = top_docs
            .merge_fruits(vec![
                vec![(0.5, DocAddress::new(1, 2)), (0.1, DocAddress::new(1, 0))],
                vec![(0.5, DocAddress::new(0, 4)), (0.7, DocAddress::new(0, 9))],
            ])
            .unwrap();
        assert_eq!(
            merged,
            vec![
                (0.7, DocAddress::new(0, 9)),
                (0.5, DocAddress::new(0, 4)),
                (0.5, DocAddress::new(1, 2)),
            ]
        );
    }

    #[test]
    #[should_panic]
    fn test_top_0() {
        TopDocs::with_limit(0);
    }
}
