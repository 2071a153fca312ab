use std::fmt;
use std::sync::Arc;

use crate::index::{AliveBitSet, InvertedIndexReader, SegmentId};
use crate::DocId;

/// Entry point to access all of the datastructures of a segment.
///
/// All documents of a segment, parents and children alike, live in a single
/// id space `[0, max_doc)`. Cloning a `SegmentReader` is cheap.
#[derive(Clone)]
pub struct SegmentReader {
    segment_id: SegmentId,
    max_doc: DocId,
    num_docs: DocId,
    inverted_index: Arc<InvertedIndexReader>,
    alive_bitset_opt: Option<AliveBitSet>,
}

impl SegmentReader {
    pub(crate) fn new(
        max_doc: DocId,
        inverted_index: InvertedIndexReader,
        alive_bitset_opt: Option<AliveBitSet>,
    ) -> SegmentReader {
        let num_deleted = alive_bitset_opt
            .as_ref()
            .map(|alive_bitset| alive_bitset.num_deleted() as u32)
            .unwrap_or(0u32);
        SegmentReader {
            segment_id: SegmentId::generate(),
            max_doc,
            num_docs: max_doc - num_deleted,
            inverted_index: Arc::new(inverted_index),
            alive_bitset_opt,
        }
    }

    /// Returns the highest document id ever attributed in
    /// this segment + 1.
    pub fn max_doc(&self) -> DocId {
        self.max_doc
    }

    /// Returns the number of alive documents.
    /// Deleted documents are not counted.
    pub fn num_docs(&self) -> DocId {
        self.num_docs
    }

    /// Returns the number of deleted documents.
    pub fn num_deleted_docs(&self) -> DocId {
        self.max_doc - self.num_docs
    }

    /// Returns true iff some of the documents of the segment have been deleted.
    pub fn has_deletes(&self) -> bool {
        self.num_deleted_docs() > 0
    }

    /// Returns the segment id
    pub fn segment_id(&self) -> SegmentId {
        self.segment_id
    }

    /// Returns the inverted index of the segment.
    pub fn inverted_index(&self) -> &InvertedIndexReader {
        &self.inverted_index
    }

    /// Returns the bitset representing the alive `DocId`s.
    pub fn alive_bitset(&self) -> Option<&AliveBitSet> {
        self.alive_bitset_opt.as_ref()
    }

    /// Returns true iff the `doc` is marked
    /// as deleted.
    pub fn is_deleted(&self, doc: DocId) -> bool {
        self.alive_bitset()
            .map(|alive_bitset| alive_bitset.is_deleted(doc))
            .unwrap_or(false)
    }

    /// Returns an iterator that will iterate over the alive document ids
    pub fn doc_ids_alive(&self) -> Box<dyn Iterator<Item = DocId> + Send + '_> {
        if let Some(alive_bitset) = &self.alive_bitset_opt {
            Box::new(alive_bitset.iter_alive())
        } else {
            Box::new(0u32..self.max_doc)
        }
    }
}

impl fmt::Debug for SegmentReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentReader({:?})", self.segment_id)
    }
}
