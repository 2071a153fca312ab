use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::postings::{Posting, SegmentPostings};
use crate::schema::Term;

/// The inverted index reader is in charge of accessing
/// the posting lists of a segment.
///
/// `InvertedIndexReader` are created by the
/// [`SegmentWriter`](crate::index::SegmentWriter) and accessed by calling
/// [`SegmentReader::inverted_index()`](crate::SegmentReader::inverted_index).
#[derive(Default)]
pub struct InvertedIndexReader {
    termdict: FxHashMap<Term, Arc<[Posting]>>,
    total_num_tokens: u64,
}

impl InvertedIndexReader {
    pub(crate) fn new(termdict: FxHashMap<Term, Arc<[Posting]>>) -> InvertedIndexReader {
        let total_num_tokens = termdict
            .values()
            .flat_map(|postings| postings.iter())
            .map(|posting| u64::from(posting.term_freq))
            .sum();
        InvertedIndexReader {
            termdict,
            total_num_tokens,
        }
    }

    /// Creates an empty `InvertedIndexReader` object, which
    /// contains no terms at all.
    pub fn empty() -> InvertedIndexReader {
        InvertedIndexReader::default()
    }

    /// Returns the number of documents containing the term,
    /// deleted documents included.
    pub fn doc_freq(&self, term: &Term) -> u32 {
        self.termdict
            .get(term)
            .map(|postings| postings.len() as u32)
            .unwrap_or(0u32)
    }

    /// Returns the segment postings associated with the term, and with the given option,
    /// or `None` if the term has never been encountered and indexed.
    pub fn read_postings(&self, term: &Term) -> Option<SegmentPostings> {
        self.termdict
            .get(term)
            .map(|postings| SegmentPostings::open(Arc::clone(postings)))
    }

    /// Returns the number of tokens indexed in the segment.
    pub fn total_num_tokens(&self) -> u64 {
        self.total_num_tokens
    }

    /// Returns the number of distinct terms.
    pub fn num_terms(&self) -> usize {
        self.termdict.len()
    }
}
