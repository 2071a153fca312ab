//! The `index` module contains the in-memory segment the queries run over.
//!
//! A segment is written once with a [`SegmentWriter`] and read through a
//! [`SegmentReader`].

mod alive_bitset;
mod inverted_index_reader;
mod segment_id;
mod segment_reader;
mod segment_writer;

pub use self::alive_bitset::AliveBitSet;
pub use self::inverted_index_reader::InvertedIndexReader;
pub use self::segment_id::SegmentId;
pub use self::segment_reader::SegmentReader;
pub use self::segment_writer::SegmentWriter;
