use std::any::TypeId;
use std::hash::{Hash, Hasher};

use super::boolean_weight::BooleanWeight;
use crate::core::Searcher;
use crate::query::{Query, TermQuery, Weight};
use crate::schema::Term;
use crate::Score;

/// The boolean query combines a set of queries
///
/// The documents matched by the boolean query are
/// those which match at least one of its sub queries.
/// Their score is the sum of the scores of the matching sub queries.
#[derive(Clone, Debug, PartialEq)]
pub struct BooleanQuery {
    subqueries: Vec<Box<dyn Query>>,
    boost: Score,
}

impl From<Vec<Box<dyn Query>>> for BooleanQuery {
    fn from(subqueries: Vec<Box<dyn Query>>) -> BooleanQuery {
        BooleanQuery::new(subqueries)
    }
}

impl Query for BooleanQuery {
    fn weight(&self, searcher: &Searcher, scoring_enabled: bool) -> crate::Result<Box<dyn Weight>> {
        let sub_weights = self
            .subqueries
            .iter()
            .map(|subquery| subquery.weight(searcher, scoring_enabled))
            .collect::<crate::Result<_>>()?;
        Ok(Box::new(BooleanWeight::new(sub_weights, self.boost)))
    }

    fn rewrite(&self, searcher: &Searcher) -> crate::Result<Option<Box<dyn Query>>> {
        if self.subqueries.len() == 1 && self.boost == 1.0 {
            return Ok(Some(self.subqueries[0].box_clone()));
        }
        let mut changed = false;
        let mut rewritten_subqueries = Vec::with_capacity(self.subqueries.len());
        for subquery in &self.subqueries {
            match subquery.rewrite(searcher)? {
                Some(rewritten) => {
                    changed = true;
                    rewritten_subqueries.push(rewritten);
                }
                None => rewritten_subqueries.push(subquery.box_clone()),
            }
        }
        if !changed {
            return Ok(None);
        }
        Ok(Some(Box::new(BooleanQuery {
            subqueries: rewritten_subqueries,
            boost: self.boost,
        })))
    }

    fn query_terms<'a>(&'a self, visitor: &mut dyn FnMut(&'a Term)) {
        for subquery in &self.subqueries {
            subquery.query_terms(visitor);
        }
    }

    fn query_eq(&self, other: &dyn Query) -> bool {
        other
            .downcast_ref::<BooleanQuery>()
            .map_or(false, |other| self == other)
    }

    fn query_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<BooleanQuery>().hash(&mut state);
        self.subqueries.hash(&mut state);
        self.boost.to_bits().hash(&mut state);
    }
}

impl BooleanQuery {
    /// Creates a new boolean query.
    pub fn new(subqueries: Vec<Box<dyn Query>>) -> BooleanQuery {
        BooleanQuery {
            subqueries,
            boost: 1.0,
        }
    }

    /// Sets the boost of the query.
    pub fn with_boost(mut self, boost: Score) -> BooleanQuery {
        self.boost = boost;
        self
    }

    /// Helper method to create a boolean query matching a given list of terms.
    /// The resulting query is a disjunction of the terms.
    pub fn new_multiterms_query(terms: Vec<Term>) -> BooleanQuery {
        let term_queries: Vec<Box<dyn Query>> = terms
            .into_iter()
            .map(|term| -> Box<dyn Query> { Box::new(TermQuery::new(term)) })
            .collect();
        BooleanQuery::new(term_queries)
    }

    /// Deconstructed view of the clauses making up this query.
    pub fn clauses(&self) -> &[Box<dyn Query>] {
        &self.subqueries[..]
    }

    pub fn boost(&self) -> Score {
        self.boost
    }
}
