use std::fmt;
use std::hash::{Hash, Hasher};

use downcast_rs::impl_downcast;

use super::Weight;
use crate::core::Searcher;
use crate::schema::Term;

/// The `Query` trait defines a set of documents and a scoring method
/// for those documents.
///
/// The `Query` trait is in charge of defining :
///
/// - a set of documents
/// - a way to score these documents
///
/// When performing a [search](Searcher::search), these documents will then
/// be pushed to a [`Collector`](crate::collector::Collector),
/// which will in turn be in charge of deciding what to do with them.
///
/// Because our index is actually split into segments, the
/// query does not actually directly creates [`DocSet`](crate::DocSet) object.
/// Instead, the query creates a [`Weight`] object for a given searcher.
///
/// The weight object, in turn, makes it possible to create
/// a scorer for a specific [`SegmentReader`](crate::SegmentReader).
///
/// So to sum it up :
/// - a `Query` is a recipe to define a set of documents as well the way to score them.
/// - a [`Weight`] is this recipe tied to a specific [`Searcher`]. It may for instance
/// hold statistics about the different term of the query. It is created by the query.
/// - a [`Scorer`](crate::query::Scorer) is a cursor over the set of matching documents,
/// for a specific segment. It is created by the [`Weight`].
///
/// Queries are values: two queries describing the same set of documents scored
/// the same way compare equal and hash identically, which makes them usable as
/// cache keys. A query may be rewritten into a cheaper execution plan before its
/// weight is built, see [`Query::rewrite`].
pub trait Query: QueryClone + Send + Sync + downcast_rs::Downcast + fmt::Debug {
    /// Create the weight associated with a query.
    ///
    /// If scoring is not required, setting `scoring_enabled` to `false`
    /// can increase performances.
    ///
    /// The returned weight is not normalized yet. The [`Searcher`] takes care
    /// of normalizing it when scoring is enabled.
    fn weight(&self, searcher: &Searcher, scoring_enabled: bool) -> crate::Result<Box<dyn Weight>>;

    /// Rewrites the query into a possibly simpler query.
    ///
    /// Returns `None` if the query is already in its simplest form.
    /// The searcher calls this repeatedly until it reaches a fix point.
    fn rewrite(&self, _searcher: &Searcher) -> crate::Result<Option<Box<dyn Query>>> {
        Ok(None)
    }

    /// Returns the number of documents matching the query.
    fn count(&self, searcher: &Searcher) -> crate::Result<usize> {
        let weight = self.weight(searcher, false)?;
        let mut result = 0;
        for reader in searcher.segment_readers() {
            result += weight.count(reader)? as usize;
        }
        Ok(result)
    }

    /// Extract all of the terms associated with the query and pass them to the
    /// given closure.
    ///
    /// Note that there can be multiple instances of any given term
    /// in a query and deduplication must be handled by the visitor.
    fn query_terms<'a>(&'a self, _visitor: &mut dyn FnMut(&'a Term)) {}

    /// Structural equality with another, possibly differently typed, query.
    fn query_eq(&self, other: &dyn Query) -> bool;

    /// Feeds the query into the hasher.
    ///
    /// Must be consistent with [`Query::query_eq`].
    fn query_hash(&self, state: &mut dyn Hasher);
}

/// Implements `box_clone`.
pub trait QueryClone {
    /// Returns a boxed clone of `self`.
    fn box_clone(&self) -> Box<dyn Query>;
}

impl<T> QueryClone for T
where T: 'static + Query + Clone
{
    fn box_clone(&self) -> Box<dyn Query> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Query> {
    fn clone(&self) -> Self {
        self.as_ref().box_clone()
    }
}

impl PartialEq for dyn Query {
    fn eq(&self, other: &dyn Query) -> bool {
        self.query_eq(other)
    }
}

impl Eq for dyn Query {}

impl Hash for dyn Query {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.query_hash(state)
    }
}

impl_downcast!(Query);
