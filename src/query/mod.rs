//! Query module
//!
//! The query module regroups the query objects: a [`Query`] builds a
//! [`Weight`] for a searcher, which builds a [`Scorer`] for each segment.

mod block_join;
mod boolean_query;
mod disjunction;
mod empty_query;
mod explanation;
mod query;
mod scorer;
mod term_query;
mod tfidf;
mod vec_scorer;
mod visibility;
mod weight;

pub use self::block_join::{
    BlockJoinQuery, BlockJoinScorer, BlockJoinWeight, CachingParentsFilter, ParentDocIdSet,
    ParentMembership, ParentsFilter, TermParentsFilter,
};
pub use self::boolean_query::{BooleanQuery, BooleanWeight};
pub use self::disjunction::DisjunctionScorer;
pub use self::empty_query::{EmptyQuery, EmptyScorer, EmptyWeight};
pub use self::explanation::Explanation;
pub use self::query::{Query, QueryClone};
pub use self::scorer::Scorer;
pub use self::term_query::{TermQuery, TermScorer, TermWeight};
pub use self::tfidf::{query_norm, TfIdfWeight};
pub use self::vec_scorer::VecScorer;
pub use self::visibility::Visibility;
pub use self::weight::Weight;
