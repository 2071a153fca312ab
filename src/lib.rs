#![doc(test(attr(allow(unused_variables), deny(warnings))))]
#![allow(clippy::len_without_is_empty)]

//! # `block_join`
//!
//! Block join scoring over an in-memory inverted index.
//!
//! Documents are indexed in blocks: a run of child documents immediately
//! followed by their parent. A [`BlockJoinQuery`](query::BlockJoinQuery)
//! runs a query on the children and, for each block holding at least one
//! visible match, emits the best scoring child along with the aggregated
//! frequency of the block.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use block_join::collector::TopDocs;
//! use block_join::index::SegmentWriter;
//! use block_join::query::{BlockJoinQuery, TermParentsFilter, TermQuery};
//! use block_join::schema::{Field, Term};
//! use block_join::Searcher;
//!
//! # fn main() -> block_join::Result<()> {
//! let skill = Field::from_field_id(0);
//! let term = |text: &str| Term::from_field_text(skill, text);
//!
//! let mut segment_writer = SegmentWriter::new();
//! segment_writer.add_block(vec![vec![term("rust")], vec![term("go")]], vec![term("resume")]);
//! segment_writer.add_block(vec![vec![term("java")]], vec![term("resume")]);
//! let searcher = Searcher::new(vec![segment_writer.finalize()]);
//!
//! let query = BlockJoinQuery::new(
//!     Box::new(TermQuery::new(term("rust"))),
//!     Arc::new(TermParentsFilter::cached(term("resume"))),
//! );
//! let top_docs = searcher.search(&query, &TopDocs::with_limit(10))?;
//! assert_eq!(top_docs.len(), 1);
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

pub mod collector;
mod core;
mod docset;
mod error;
pub mod index;
pub mod postings;
pub mod query;
pub mod schema;

use serde::{Deserialize, Serialize};

pub use crate::core::{Executor, Searcher};
pub use crate::docset::{DocSet, TERMINATED};
pub use crate::error::BlockJoinError;
pub use crate::index::SegmentReader;
pub use crate::schema::Term;

/// Alias for the `Result` type of this crate.
pub type Result<T> = std::result::Result<T, BlockJoinError>;

/// A `u32` identifying a document within a segment.
/// Documents have their `DocId` assigned incrementally,
/// as they are added in the segment.
pub type DocId = u32;

/// A u32 identifying a segment within a searcher.
pub type SegmentOrdinal = u32;

/// A f32 that represents the relevance of the document to the query
pub type Score = f32;

/// `DocAddress` contains all the necessary information
/// to identify a document given a `Searcher` object.
///
/// It consists of an id identifying its segment, and
/// a segment-local `DocId`.
///
/// The id used for the segment is actually an ordinal
/// in the list of `Segment`s held by a `Searcher`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocAddress {
    /// The segment ordinal id that identifies the segment
    /// hosting the document in the `Searcher` it is called from.
    pub segment_ord: SegmentOrdinal,
    /// The segment-local `DocId`.
    pub doc_id: DocId,
}

impl DocAddress {
    /// Creates a new DocAddress from the segment/docId pair.
    pub fn new(segment_ord: SegmentOrdinal, doc_id: DocId) -> DocAddress {
        DocAddress {
            segment_ord,
            doc_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DocAddress;

    #[test]
    fn test_doc_address_order() {
        assert!(DocAddress::new(0, 9) < DocAddress::new(1, 0));
        assert!(DocAddress::new(1, 2) < DocAddress::new(1, 3));
        let json = serde_json::to_string(&DocAddress::new(1, 3)).unwrap();
        assert_eq!(json, r#"{"segment_ord":1,"doc_id":3}"#);
    }
}
