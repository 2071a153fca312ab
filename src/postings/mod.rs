//! Postings module (also called inverted index)

mod postings;
mod segment_postings;

pub use self::postings::Postings;
pub use self::segment_postings::{Posting, SegmentPostings};
