use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use common::BitSet;
use downcast_rs::impl_downcast;
use rustc_hash::FxHashMap;

use crate::docset::{DocSet, TERMINATED};
use crate::index::{SegmentId, SegmentReader};
use crate::schema::Term;
use crate::DocId;

/// Tells, within a segment, which documents are parents.
///
/// A block join groups every child with the first parent that follows it,
/// so it only needs to locate the parents around a given doc.
pub trait ParentMembership: Send + Sync + 'static {
    /// Returns the smallest parent `>= doc`, if any.
    fn next_parent(&self, doc: DocId) -> Option<DocId>;

    /// Returns the largest parent `<= doc`, if any.
    fn prev_parent(&self, doc: DocId) -> Option<DocId>;
}

impl ParentMembership for BitSet {
    #[inline]
    fn next_parent(&self, doc: DocId) -> Option<DocId> {
        self.next_set_bit(doc)
    }

    #[inline]
    fn prev_parent(&self, doc: DocId) -> Option<DocId> {
        self.prev_set_bit(doc)
    }
}

impl<T: ParentMembership + ?Sized> ParentMembership for Arc<T> {
    #[inline]
    fn next_parent(&self, doc: DocId) -> Option<DocId> {
        self.as_ref().next_parent(doc)
    }

    #[inline]
    fn prev_parent(&self, doc: DocId) -> Option<DocId> {
        self.as_ref().prev_parent(doc)
    }
}

/// Parent documents of a segment, as produced by a [`ParentsFilter`].
#[derive(Clone, Debug)]
pub enum ParentDocIdSet {
    /// Random access bitset. This is the only form a block join can run on.
    Dense(Arc<BitSet>),
    /// Ascending doc ids. Wrap the filter in a [`CachingParentsFilter`] to densify it.
    Sorted(Arc<[DocId]>),
}

impl ParentDocIdSet {
    /// Converts the set into a bitset over `[0, max_doc)`.
    pub fn into_dense(self, max_doc: DocId) -> Arc<BitSet> {
        match self {
            ParentDocIdSet::Dense(bitset) => bitset,
            ParentDocIdSet::Sorted(docs) => {
                let mut bitset = BitSet::with_max_value(max_doc);
                for &doc in docs.iter() {
                    bitset.insert(doc);
                }
                Arc::new(bitset)
            }
        }
    }
}

/// Produces the parent documents of each segment.
///
/// Deletions are not applied here: deleted parents are hidden at scoring time,
/// but they still delimit the groups.
pub trait ParentsFilter: downcast_rs::Downcast + fmt::Debug + Send + Sync {
    /// Returns the parents of the segment, or `None` if the segment has none.
    fn parents(&self, reader: &SegmentReader) -> crate::Result<Option<ParentDocIdSet>>;

    /// Structural equality with another, possibly differently typed, filter.
    fn filter_eq(&self, other: &dyn ParentsFilter) -> bool;

    /// Feeds the filter into the hasher.
    fn filter_hash(&self, state: &mut dyn Hasher);
}

impl_downcast!(ParentsFilter);

impl PartialEq for dyn ParentsFilter {
    fn eq(&self, other: &dyn ParentsFilter) -> bool {
        self.filter_eq(other)
    }
}

impl Eq for dyn ParentsFilter {}

impl Hash for dyn ParentsFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filter_hash(state)
    }
}

/// Parents are the documents containing a given term.
///
/// The parents come out as a [`ParentDocIdSet::Sorted`] list, straight from
/// the postings. Use [`TermParentsFilter::cached`] to get a filter a block
/// join can run on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TermParentsFilter {
    term: Term,
}

impl TermParentsFilter {
    pub fn new(term: Term) -> TermParentsFilter {
        TermParentsFilter { term }
    }

    /// Wraps the filter in a [`CachingParentsFilter`].
    pub fn cached(term: Term) -> CachingParentsFilter<TermParentsFilter> {
        CachingParentsFilter::new(TermParentsFilter::new(term))
    }

    pub fn term(&self) -> &Term {
        &self.term
    }
}

impl ParentsFilter for TermParentsFilter {
    fn parents(&self, reader: &SegmentReader) -> crate::Result<Option<ParentDocIdSet>> {
        let Some(mut postings) = reader.inverted_index().read_postings(&self.term) else {
            return Ok(None);
        };
        let mut docs = Vec::with_capacity(postings.doc_freq() as usize);
        let mut doc = postings.doc();
        while doc != TERMINATED {
            docs.push(doc);
            doc = postings.advance();
        }
        Ok(Some(ParentDocIdSet::Sorted(Arc::from(docs))))
    }

    fn filter_eq(&self, other: &dyn ParentsFilter) -> bool {
        other
            .downcast_ref::<TermParentsFilter>()
            .map_or(false, |other| self == other)
    }

    fn filter_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<TermParentsFilter>().hash(&mut state);
        self.term.hash(&mut state);
    }
}

/// Densifies the parents produced by the underlying filter and caches them
/// per segment.
pub struct CachingParentsFilter<F> {
    inner: F,
    cache: RwLock<FxHashMap<SegmentId, Option<Arc<BitSet>>>>,
}

impl<F: ParentsFilter> CachingParentsFilter<F> {
    pub fn new(inner: F) -> CachingParentsFilter<F> {
        CachingParentsFilter {
            inner,
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Number of segments whose parents are cached.
    pub fn num_cached_segments(&self) -> crate::Result<usize> {
        Ok(self.cache.read()?.len())
    }
}

impl<F: fmt::Debug> fmt::Debug for CachingParentsFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CachingParentsFilter({:?})", self.inner)
    }
}

impl<F: ParentsFilter> ParentsFilter for CachingParentsFilter<F> {
    fn parents(&self, reader: &SegmentReader) -> crate::Result<Option<ParentDocIdSet>> {
        let segment_id = reader.segment_id();
        if let Some(cached) = self.cache.read()?.get(&segment_id) {
            return Ok(cached.clone().map(ParentDocIdSet::Dense));
        }
        let parents_opt = self
            .inner
            .parents(reader)?
            .map(|parents| parents.into_dense(reader.max_doc()));
        debug!(
            "caching parents of segment {}: {} parents",
            segment_id.short_id_string(),
            parents_opt.as_ref().map_or(0, |parents| parents.len())
        );
        self.cache
            .write()?
            .insert(segment_id, parents_opt.clone());
        Ok(parents_opt.map(ParentDocIdSet::Dense))
    }

    fn filter_eq(&self, other: &dyn ParentsFilter) -> bool {
        other
            .downcast_ref::<CachingParentsFilter<F>>()
            .map_or(false, |other| self.inner.filter_eq(&other.inner))
    }

    fn filter_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<CachingParentsFilter<F>>().hash(&mut state);
        self.inner.filter_hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use common::BitSet;

    use super::{ParentDocIdSet, ParentMembership, ParentsFilter, TermParentsFilter};
    use crate::index::SegmentWriter;
    use crate::schema::{Field, Term};

    fn term(text: &str) -> Term {
        Term::from_field_text(Field::from_field_id(0), text)
    }

    #[test]
    fn test_bitset_membership() {
        let mut bitset = BitSet::with_max_value(20);
        for doc in [0, 5, 10] {
            bitset.insert(doc);
        }
        let parents = Arc::new(bitset);
        assert_eq!(parents.next_parent(1), Some(5));
        assert_eq!(parents.next_parent(5), Some(5));
        assert_eq!(parents.next_parent(11), None);
        assert_eq!(parents.prev_parent(4), Some(0));
        assert_eq!(parents.prev_parent(10), Some(10));
        assert_eq!(parents.prev_parent(19), Some(10));
    }

    #[test]
    fn test_term_parents_filter_is_sorted() {
        let mut segment_writer = SegmentWriter::new();
        segment_writer.add_block(vec![vec![term("skill")]], vec![term("resume")]);
        segment_writer.add_block(vec![vec![term("skill")], vec![term("skill")]], vec![term("resume")]);
        let reader = segment_writer.finalize();
        let filter = TermParentsFilter::new(term("resume"));
        match filter.parents(&reader).unwrap() {
            Some(ParentDocIdSet::Sorted(docs)) => assert_eq!(&docs[..], &[1, 4]),
            other => panic!("unexpected parents {other:?}"),
        }
        let missing = TermParentsFilter::new(term("missing"));
        assert!(missing.parents(&reader).unwrap().is_none());
    }

    #[test]
    fn test_caching_parents_filter_densifies_and_caches() {
        let mut segment_writer = SegmentWriter::new();
        segment_writer.add_block(vec![vec![term("skill")]], vec![term("resume")]);
        let reader = segment_writer.finalize();
        let filter = TermParentsFilter::cached(term("resume"));
        assert_eq!(filter.num_cached_segments().unwrap(), 0);
        for _ in 0..2 {
            match filter.parents(&reader).unwrap() {
                Some(ParentDocIdSet::Dense(bitset)) => {
                    assert_eq!(bitset.iter().collect::<Vec<_>>(), vec![1]);
                    assert_eq!(bitset.max_value(), reader.max_doc());
                }
                other => panic!("unexpected parents {other:?}"),
            }
        }
        assert_eq!(filter.num_cached_segments().unwrap(), 1);
        let missing = TermParentsFilter::cached(term("missing"));
        assert!(missing.parents(&reader).unwrap().is_none());
        assert_eq!(missing.num_cached_segments().unwrap(), 1);
    }

    #[test]
    fn test_parents_filter_equality() {
        let cached: Arc<dyn ParentsFilter> = Arc::new(TermParentsFilter::cached(term("resume")));
        let same: Arc<dyn ParentsFilter> = Arc::new(TermParentsFilter::cached(term("resume")));
        let other: Arc<dyn ParentsFilter> = Arc::new(TermParentsFilter::cached(term("job")));
        let uncached: Arc<dyn ParentsFilter> = Arc::new(TermParentsFilter::new(term("resume")));
        assert!(cached.as_ref() == same.as_ref());
        assert!(cached.as_ref() != other.as_ref());
        assert!(cached.as_ref() != uncached.as_ref());
    }
}
