use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::term_weight::TermWeight;
use crate::core::Searcher;
use crate::query::tfidf::TfIdfWeight;
use crate::query::{Query, Weight};
use crate::schema::Term;
use crate::Score;

/// A Term query matches all of the documents
/// containing a specific term.
///
/// The score associated is defined as
/// `sqrt(term_freq)` * `idf`² * `boost` * `query_norm`
/// in which :
/// * `idf`        - inverse document frequency, `1 + ln(N / (n + 1))`.
/// * `term_freq`  - number of occurrences of the term in the document.
/// * `query_norm` - normalization factor computed by the searcher over the whole query.
#[derive(Clone, PartialEq)]
pub struct TermQuery {
    term: Term,
    boost: Score,
}

impl fmt::Debug for TermQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TermQuery({:?})", self.term)?;
        if self.boost != 1.0 {
            write!(f, "^{}", self.boost)?;
        }
        Ok(())
    }
}

impl TermQuery {
    /// Creates a new term query.
    pub fn new(term: Term) -> TermQuery {
        TermQuery { term, boost: 1.0 }
    }

    /// Sets the boost of the query.
    pub fn with_boost(mut self, boost: Score) -> TermQuery {
        self.boost = boost;
        self
    }

    /// The `Term` this query is built out of.
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Returns a weight object.
    ///
    /// While `.weight(...)` returns a boxed trait object,
    /// this method return a specific implementation.
    /// This is useful for optimization purpose.
    pub fn specialized_weight(&self, searcher: &Searcher, scoring_enabled: bool) -> TermWeight {
        let similarity_weight =
            TfIdfWeight::for_one_term(searcher.doc_freq(&self.term), searcher.num_docs(), self.boost);
        TermWeight::new(self.term.clone(), similarity_weight, scoring_enabled)
    }
}

impl Query for TermQuery {
    fn weight(&self, searcher: &Searcher, scoring_enabled: bool) -> crate::Result<Box<dyn Weight>> {
        Ok(Box::new(self.specialized_weight(searcher, scoring_enabled)))
    }

    fn query_terms<'a>(&'a self, visitor: &mut dyn FnMut(&'a Term)) {
        visitor(&self.term);
    }

    fn query_eq(&self, other: &dyn Query) -> bool {
        other
            .downcast_ref::<TermQuery>()
            .map_or(false, |other| self == other)
    }

    fn query_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<TermQuery>().hash(&mut state);
        self.term.hash(&mut state);
        self.boost.to_bits().hash(&mut state);
    }
}
