use std::sync::Arc;

use common::BitSet;

use crate::DocId;

/// Set of alive `DocId`s.
///
/// Deleted documents stay in the id space of their segment, they are just
/// not alive anymore.
#[derive(Clone)]
pub struct AliveBitSet {
    num_deleted: usize,
    bitset: Arc<BitSet>,
}

impl AliveBitSet {
    #[cfg(test)]
    pub(crate) fn for_test(deleted_docs: &[DocId], max_doc: u32) -> AliveBitSet {
        assert!(deleted_docs.iter().all(|&doc| doc < max_doc));
        let mut bitset = BitSet::with_max_value_and_full(max_doc);
        for &doc in deleted_docs {
            bitset.remove(doc);
        }
        AliveBitSet::from_bitset(bitset)
    }

    /// Wraps a bitset in which the set elements are the alive documents.
    pub fn from_bitset(bitset: BitSet) -> AliveBitSet {
        let num_deleted = bitset.max_value() as usize - bitset.len();
        AliveBitSet {
            num_deleted,
            bitset: Arc::new(bitset),
        }
    }

    /// Returns true iff the document is still "alive". In other words, if it has not been deleted.
    #[inline]
    pub fn is_alive(&self, doc: DocId) -> bool {
        self.bitset.contains(doc)
    }

    /// Returns true iff the document has been marked as deleted.
    #[inline]
    pub fn is_deleted(&self, doc: DocId) -> bool {
        !self.is_alive(doc)
    }

    /// Iterate over the alive docids.
    #[inline]
    pub fn iter_alive(&self) -> impl Iterator<Item = DocId> + '_ {
        self.bitset.iter()
    }

    /// Get underlying bitset
    #[inline]
    pub fn bitset(&self) -> &BitSet {
        &self.bitset
    }

    /// The number of deleted docs
    pub fn num_deleted(&self) -> usize {
        self.num_deleted
    }
}

#[cfg(test)]
mod tests {

    use super::AliveBitSet;

    #[test]
    fn test_alive_bitset_empty() {
        let alive_bitset = AliveBitSet::for_test(&[], 10);
        for doc in 0..10 {
            assert_eq!(alive_bitset.is_deleted(doc), !alive_bitset.is_alive(doc));
        }
        assert_eq!(alive_bitset.num_deleted(), 0);
    }

    #[test]
    fn test_alive_bitset() {
        let alive_bitset = AliveBitSet::for_test(&[1, 9], 10);
        assert!(alive_bitset.is_alive(0));
        assert!(alive_bitset.is_deleted(1));
        assert!(alive_bitset.is_alive(2));
        assert!(alive_bitset.is_alive(8));
        assert!(alive_bitset.is_deleted(9));
        for doc in 0..10 {
            assert_eq!(alive_bitset.is_deleted(doc), !alive_bitset.is_alive(doc));
        }
        assert_eq!(alive_bitset.num_deleted(), 2);
    }

    #[test]
    fn test_alive_bitset_iter() {
        let alive_bitset = AliveBitSet::for_test(&[0, 2, 3], 5);
        assert_eq!(alive_bitset.iter_alive().collect::<Vec<_>>(), vec![1, 4]);
    }
}
