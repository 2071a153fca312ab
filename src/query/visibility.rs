use std::sync::Arc;

use common::BitSet;

use crate::index::{AliveBitSet, SegmentReader};
use crate::DocId;

/// Per-segment predicate telling which documents a scorer may emit.
///
/// A document is visible iff it is alive and accepted by every attached
/// filter. Scorers consult it for every document they consider, so the
/// same rule applies to the children and to the parents of a block join.
#[derive(Clone, Default)]
pub struct Visibility {
    alive_bitset_opt: Option<AliveBitSet>,
    filters: Vec<Arc<BitSet>>,
}

impl Visibility {
    /// Every document is visible, deleted ones included.
    pub fn all() -> Visibility {
        Visibility::default()
    }

    /// Visibility of the alive documents of the segment.
    pub fn for_segment(reader: &SegmentReader) -> Visibility {
        Visibility {
            alive_bitset_opt: reader.alive_bitset().cloned(),
            filters: Vec::new(),
        }
    }

    /// Restricts the visible documents to the elements of `filter`.
    pub fn with_filter(mut self, filter: Arc<BitSet>) -> Visibility {
        self.filters.push(filter);
        self
    }

    /// Returns true if no document is ever rejected.
    pub fn accepts_all(&self) -> bool {
        self.alive_bitset_opt.is_none() && self.filters.is_empty()
    }

    #[inline]
    pub fn is_visible(&self, doc: DocId) -> bool {
        if let Some(alive_bitset) = &self.alive_bitset_opt {
            if !alive_bitset.is_alive(doc) {
                return false;
            }
        }
        self.filters.iter().all(|filter| filter.contains(doc))
    }
}
