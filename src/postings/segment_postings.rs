use std::sync::Arc;

use common::HasLen;

use crate::docset::DocSet;
use crate::index::AliveBitSet;
use crate::postings::Postings;
use crate::{DocId, TERMINATED};

/// One entry of a posting list: a document and the number of occurrences of
/// the term in that document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Posting {
    /// Document containing the term.
    pub doc: DocId,
    /// Number of occurrences of the term in the document.
    pub term_freq: u32,
}

/// `SegmentPostings` represents the inverted list or postings associated to
/// a term in a segment.
///
/// The posting list itself is shared, the cursor is owned.
#[derive(Clone)]
pub struct SegmentPostings {
    postings: Arc<[Posting]>,
    cur: usize,
}

impl SegmentPostings {
    /// Returns an empty segment postings object
    pub fn empty() -> Self {
        SegmentPostings {
            postings: Arc::from(Vec::new()),
            cur: 0,
        }
    }

    /// Creates a cursor positioned on the first posting.
    ///
    /// Postings are expected to be sorted by doc id, without duplicates.
    pub fn open(postings: Arc<[Posting]>) -> SegmentPostings {
        debug_assert!(postings.windows(2).all(|pair| pair[0].doc < pair[1].doc));
        SegmentPostings { postings, cur: 0 }
    }

    /// Helper function to create `SegmentPostings` for tests.
    ///
    /// All term frequencies are set to 1.
    pub fn create_from_docs(docs: &[u32]) -> SegmentPostings {
        let postings: Vec<Posting> = docs
            .iter()
            .map(|&doc| Posting { doc, term_freq: 1 })
            .collect();
        SegmentPostings::open(Arc::from(postings))
    }

    /// Compute the number of non-deleted documents.
    ///
    /// This method will scan through the posting list.
    pub fn doc_freq_given_deletes(&self, alive_bitset: &AliveBitSet) -> u32 {
        self.postings
            .iter()
            .filter(|posting| alive_bitset.is_alive(posting.doc))
            .count() as u32
    }

    /// Returns the overall number of documents in the postings,
    /// deleted or not.
    pub fn doc_freq(&self) -> u32 {
        self.postings.len() as u32
    }
}

impl DocSet for SegmentPostings {
    #[inline]
    fn advance(&mut self) -> DocId {
        if self.cur < self.postings.len() {
            self.cur += 1;
        }
        self.doc()
    }

    fn seek(&mut self, target: DocId) -> DocId {
        if self.doc() >= target {
            return self.doc();
        }
        let remaining = &self.postings[self.cur..];
        self.cur += remaining.partition_point(|posting| posting.doc < target);
        self.doc()
    }

    #[inline(always)]
    fn doc(&self) -> DocId {
        self.postings
            .get(self.cur)
            .map(|posting| posting.doc)
            .unwrap_or(TERMINATED)
    }

    fn size_hint(&self) -> u32 {
        self.len() as u32
    }
}

impl HasLen for SegmentPostings {
    fn len(&self) -> usize {
        self.postings.len()
    }
}

impl Postings for SegmentPostings {
    /// Returns the frequency associated to the current document.
    ///
    /// Returns 0 once the postings are exhausted.
    fn term_freq(&self) -> u32 {
        self.postings
            .get(self.cur)
            .map(|posting| posting.term_freq)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{Posting, SegmentPostings};
    use crate::docset::{DocSet, TERMINATED};
    use crate::index::AliveBitSet;
    use crate::postings::Postings;

    #[test]
    fn test_empty_segment_postings() {
        let mut postings = SegmentPostings::empty();
        assert_eq!(postings.doc(), TERMINATED);
        assert_eq!(postings.advance(), TERMINATED);
        assert_eq!(postings.advance(), TERMINATED);
        assert_eq!(postings.doc_freq(), 0);
        assert_eq!(postings.term_freq(), 0);
    }

    #[test]
    fn test_segment_postings_seek() {
        let docs: Vec<u32> = (0u32..1024u32).map(|e| e * 3).collect();
        let mut postings = SegmentPostings::create_from_docs(&docs);
        assert_eq!(postings.doc(), 0u32);
        assert_eq!(postings.advance(), 3u32);
        assert_eq!(postings.seek(14u32), 15u32);
        assert_eq!(postings.seek(300u32), 300u32);
        assert_eq!(postings.seek(200u32), 300u32);
        assert_eq!(postings.seek(6000u32), TERMINATED);
        assert_eq!(postings.seek(TERMINATED), TERMINATED);
    }

    #[test]
    fn test_segment_postings_term_freq() {
        let postings: Vec<Posting> = vec![
            Posting { doc: 1, term_freq: 3 },
            Posting { doc: 4, term_freq: 1 },
        ];
        let mut postings = SegmentPostings::open(Arc::from(postings));
        assert_eq!(postings.term_freq(), 3);
        postings.advance();
        assert_eq!(postings.term_freq(), 1);
        let alive_bitset = AliveBitSet::for_test(&[4], 5);
        assert_eq!(postings.doc_freq_given_deletes(&alive_bitset), 1);
    }
}
