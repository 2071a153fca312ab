use std::sync::Arc;

use common::BitSet;
use rustc_hash::FxHashMap;

use crate::index::{AliveBitSet, InvertedIndexReader, SegmentReader};
use crate::postings::Posting;
use crate::schema::Term;
use crate::{BlockJoinError, DocId};

/// A `SegmentWriter` is in charge of creating a segment in RAM.
///
/// Documents get consecutive doc ids in insertion order. Block-join
/// queries rely on that order: the children of a parent must be added
/// right before the parent itself, see [`SegmentWriter::add_block`].
#[derive(Default)]
pub struct SegmentWriter {
    max_doc: DocId,
    postings: FxHashMap<Term, Vec<Posting>>,
    deleted: Vec<DocId>,
}

impl SegmentWriter {
    /// Creates an empty segment writer.
    pub fn new() -> SegmentWriter {
        SegmentWriter::default()
    }

    /// Indexes a document given as the list of its terms, and
    /// returns its doc id.
    ///
    /// A term appearing several times gets a term frequency greater than 1.
    pub fn add_document<I: IntoIterator<Item = Term>>(&mut self, terms: I) -> DocId {
        let doc = self.max_doc;
        let mut term_freqs: FxHashMap<Term, u32> = FxHashMap::default();
        for term in terms {
            *term_freqs.entry(term).or_insert(0u32) += 1u32;
        }
        for (term, term_freq) in term_freqs {
            self.postings
                .entry(term)
                .or_default()
                .push(Posting { doc, term_freq });
        }
        self.max_doc += 1;
        doc
    }

    /// Indexes a block of documents: the children first, then their parent.
    ///
    /// Returns the doc id of the parent.
    pub fn add_block<C, I, P>(&mut self, children: C, parent: P) -> DocId
    where
        C: IntoIterator<Item = I>,
        I: IntoIterator<Item = Term>,
        P: IntoIterator<Item = Term>,
    {
        for child in children {
            self.add_document(child);
        }
        self.add_document(parent)
    }

    /// Marks a document as deleted.
    pub fn delete_document(&mut self, doc: DocId) -> crate::Result<()> {
        if doc >= self.max_doc {
            return Err(BlockJoinError::InvalidArgument(format!(
                "Cannot delete doc {doc}: the segment only has {} documents",
                self.max_doc
            )));
        }
        self.deleted.push(doc);
        Ok(())
    }

    /// Returns the number of documents added so far.
    pub fn max_doc(&self) -> DocId {
        self.max_doc
    }

    /// Closes the writer and opens a reader over the segment.
    pub fn finalize(self) -> SegmentReader {
        let alive_bitset_opt = if self.deleted.is_empty() {
            None
        } else {
            let mut bitset = BitSet::with_max_value_and_full(self.max_doc);
            for doc in self.deleted {
                bitset.remove(doc);
            }
            Some(AliveBitSet::from_bitset(bitset))
        };
        let termdict = self
            .postings
            .into_iter()
            .map(|(term, postings)| (term, Arc::from(postings)))
            .collect();
        SegmentReader::new(
            self.max_doc,
            InvertedIndexReader::new(termdict),
            alive_bitset_opt,
        )
    }
}
