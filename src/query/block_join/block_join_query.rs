use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{BlockJoinWeight, ParentsFilter};
use crate::core::Searcher;
use crate::query::{Query, Weight};
use crate::schema::Term;
use crate::Score;

/// Matches the children of a block join and reports, for each block, its
/// best scoring child.
///
/// Documents must be indexed in blocks, the children followed by their
/// parent, and `parents_filter` must identify the parents. See
/// [`BlockJoinScorer`](super::BlockJoinScorer) for the scoring rules.
///
/// ```rust
/// use std::sync::Arc;
///
/// use block_join::collector::TopDocs;
/// use block_join::index::SegmentWriter;
/// use block_join::query::{BlockJoinQuery, TermParentsFilter, TermQuery};
/// use block_join::schema::{Field, Term};
/// use block_join::{DocAddress, Searcher};
///
/// # fn main() -> block_join::Result<()> {
/// let field = Field::from_field_id(0);
/// let term = |text: &str| Term::from_field_text(field, text);
/// let mut segment_writer = SegmentWriter::new();
/// segment_writer.add_block(
///     vec![vec![term("java")], vec![term("rust"), term("rust")]],
///     vec![term("resume")],
/// );
/// let searcher = Searcher::new(vec![segment_writer.finalize()]);
///
/// let query = BlockJoinQuery::new(
///     Box::new(TermQuery::new(term("rust"))),
///     Arc::new(TermParentsFilter::cached(term("resume"))),
/// );
/// let top_docs = searcher.search(&query, &TopDocs::with_limit(10))?;
/// assert_eq!(top_docs.len(), 1);
/// assert_eq!(top_docs[0].1, DocAddress::new(0, 1));
/// # Ok(())
/// # }
/// ```
pub struct BlockJoinQuery {
    identity_child_query: Box<dyn Query>,
    child_query: Box<dyn Query>,
    parents_filter: Arc<dyn ParentsFilter>,
    boost: Score,
}

impl Clone for BlockJoinQuery {
    fn clone(&self) -> Self {
        BlockJoinQuery {
            identity_child_query: self.identity_child_query.box_clone(),
            child_query: self.child_query.box_clone(),
            parents_filter: Arc::clone(&self.parents_filter),
            boost: self.boost,
        }
    }
}

impl fmt::Debug for BlockJoinQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ToParentBlockJoinQuery({:?})", self.child_query)
    }
}

impl PartialEq for BlockJoinQuery {
    fn eq(&self, other: &BlockJoinQuery) -> bool {
        self.identity_child_query.as_ref() == other.identity_child_query.as_ref()
            && self.parents_filter.as_ref() == other.parents_filter.as_ref()
            && self.boost.to_bits() == other.boost.to_bits()
    }
}

impl BlockJoinQuery {
    pub fn new(child_query: Box<dyn Query>, parents_filter: Arc<dyn ParentsFilter>) -> BlockJoinQuery {
        BlockJoinQuery {
            identity_child_query: child_query.box_clone(),
            child_query,
            parents_filter,
            boost: 1.0,
        }
    }

    /// Sets the boost of the query.
    pub fn with_boost(mut self, boost: Score) -> BlockJoinQuery {
        self.boost = boost;
        self
    }

    /// The child query as given at construction. Equality and hashing rely on it.
    pub fn identity_child_query(&self) -> &dyn Query {
        self.identity_child_query.as_ref()
    }

    /// The child query actually executed, possibly rewritten.
    pub fn child_query(&self) -> &dyn Query {
        self.child_query.as_ref()
    }

    pub fn parents_filter(&self) -> &Arc<dyn ParentsFilter> {
        &self.parents_filter
    }

    pub fn boost(&self) -> Score {
        self.boost
    }

    pub fn specialized_weight(
        &self,
        searcher: &Searcher,
        scoring_enabled: bool,
    ) -> crate::Result<BlockJoinWeight> {
        let child_weight = self.child_query.weight(searcher, scoring_enabled)?;
        Ok(BlockJoinWeight::new(
            child_weight,
            Arc::clone(&self.parents_filter),
            self.boost,
        ))
    }
}

impl Query for BlockJoinQuery {
    fn weight(&self, searcher: &Searcher, scoring_enabled: bool) -> crate::Result<Box<dyn Weight>> {
        Ok(Box::new(self.specialized_weight(searcher, scoring_enabled)?))
    }

    fn rewrite(&self, searcher: &Searcher) -> crate::Result<Option<Box<dyn Query>>> {
        let Some(rewritten_child) = self.child_query.rewrite(searcher)? else {
            return Ok(None);
        };
        Ok(Some(Box::new(BlockJoinQuery {
            identity_child_query: self.identity_child_query.box_clone(),
            child_query: rewritten_child,
            parents_filter: Arc::clone(&self.parents_filter),
            boost: self.boost,
        })))
    }

    fn query_terms<'a>(&'a self, visitor: &mut dyn FnMut(&'a Term)) {
        self.child_query.query_terms(visitor);
    }

    fn query_eq(&self, other: &dyn Query) -> bool {
        other
            .downcast_ref::<BlockJoinQuery>()
            .map_or(false, |other| self == other)
    }

    fn query_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<BlockJoinQuery>().hash(&mut state);
        self.identity_child_query.hash(&mut state);
        self.parents_filter.hash(&mut state);
        self.boost.to_bits().hash(&mut state);
    }
}
