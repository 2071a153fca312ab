//! Block join: scoring parent documents through their children.
//!
//! A block is a run of child documents immediately followed by their parent
//! document, all in the same segment. [`BlockJoinQuery`] runs a child query
//! and emits one document per block: the best scoring child.

mod block_join_query;
mod block_join_scorer;
mod block_join_weight;
mod parents_filter;

pub use self::block_join_query::BlockJoinQuery;
pub use self::block_join_scorer::BlockJoinScorer;
pub use self::block_join_weight::BlockJoinWeight;
pub use self::parents_filter::{
    CachingParentsFilter, ParentDocIdSet, ParentMembership, ParentsFilter, TermParentsFilter,
};
