use std::fmt;

#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct TinySet(u64);

impl fmt::Debug for TinySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.into_iter().collect::<Vec<u32>>().fmt(f)
    }
}

pub struct TinySetIterator(TinySet);
impl Iterator for TinySetIterator {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lowest()
    }
}

impl IntoIterator for TinySet {
    type Item = u32;
    type IntoIter = TinySetIterator;
    fn into_iter(self) -> Self::IntoIter {
        TinySetIterator(self)
    }
}

impl TinySet {
    /// Returns an empty `TinySet`.
    #[inline]
    pub fn empty() -> TinySet {
        TinySet(0u64)
    }

    /// Returns a full `TinySet`.
    #[inline]
    pub fn full() -> TinySet {
        TinySet::empty().complement()
    }

    pub fn clear(&mut self) {
        self.0 = 0u64;
    }

    /// Returns the complement of the set in `[0, 64[`.
    ///
    /// Careful on making this function public, as it will break the padding handling in the last
    /// bucket.
    #[inline]
    fn complement(self) -> TinySet {
        TinySet(!self.0)
    }

    /// Returns true iff the `TinySet` contains the element `el`.
    #[inline]
    pub fn contains(self, el: u32) -> bool {
        !self.intersect(TinySet::singleton(el)).is_empty()
    }

    /// Returns the number of elements in the TinySet.
    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns the intersection of `self` and `other`
    #[inline]
    #[must_use]
    pub fn intersect(self, other: TinySet) -> TinySet {
        TinySet(self.0 & other.0)
    }

    /// Creates a new `TinySet` containing only one element
    /// within `[0; 64[`
    #[inline]
    pub fn singleton(el: u32) -> TinySet {
        TinySet(1u64 << u64::from(el))
    }

    /// Insert a new element within [0..64)
    #[inline]
    #[must_use]
    pub fn insert(self, el: u32) -> TinySet {
        self.union(TinySet::singleton(el))
    }

    /// Removes an element within [0..64)
    #[inline]
    #[must_use]
    pub fn remove(self, el: u32) -> TinySet {
        self.intersect(TinySet::singleton(el).complement())
    }

    /// Insert a new element within [0..64)
    ///
    /// returns true if the set changed
    #[inline]
    pub fn insert_mut(&mut self, el: u32) -> bool {
        let old = *self;
        *self = old.insert(el);
        old != *self
    }

    /// Remove a element within [0..64)
    ///
    /// returns true if the set changed
    #[inline]
    pub fn remove_mut(&mut self, el: u32) -> bool {
        let old = *self;
        *self = old.remove(el);
        old != *self
    }

    /// Returns the union of two tinysets
    #[inline]
    #[must_use]
    pub fn union(self, other: TinySet) -> TinySet {
        TinySet(self.0 | other.0)
    }

    /// Returns true iff the `TinySet` is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0u64
    }

    /// Returns the lowest element in the `TinySet`
    /// and removes it.
    #[inline]
    pub fn pop_lowest(&mut self) -> Option<u32> {
        let lowest = self.lowest()?;
        self.0 ^= TinySet::singleton(lowest).0;
        Some(lowest)
    }

    /// Returns the lowest element of the `TinySet`, if any.
    #[inline]
    pub fn lowest(self) -> Option<u32> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.trailing_zeros())
        }
    }

    /// Returns the highest element of the `TinySet`, if any.
    #[inline]
    pub fn highest(self) -> Option<u32> {
        if self.is_empty() {
            None
        } else {
            Some(63u32 - self.0.leading_zeros())
        }
    }

    /// Returns a `TinySet` than contains all values up
    /// to limit excluded.
    ///
    /// The limit is assumed to be strictly lower than 64.
    pub fn range_lower(upper_bound: u32) -> TinySet {
        TinySet((1u64 << u64::from(upper_bound % 64u32)) - 1u64)
    }

    /// Returns a `TinySet` that contains all values lower
    /// or equal to the given limit, included.
    ///
    /// The limit is assumed to be strictly lower than 64.
    pub fn range_lower_or_equal(upper_included: u32) -> TinySet {
        TinySet(u64::MAX >> (63u32 - upper_included % 64u32))
    }

    /// Returns a `TinySet` that contains all values greater
    /// or equal to the given limit, included. (and up to 63)
    ///
    /// The limit is assumed to be strictly lower than 64.
    pub fn range_greater_or_equal(from_included: u32) -> TinySet {
        TinySet::range_lower(from_included).complement()
    }
}

/// Dense, fixed capacity set of `u32` within `[0, max_value)`.
///
/// Besides membership, it answers "next element at or after `x`" and
/// "previous element at or before `x`" by scanning 64-bit buckets, which
/// is what block joins need to find group boundaries.
#[derive(Clone, PartialEq, Eq)]
pub struct BitSet {
    tinysets: Box<[TinySet]>,
    len: u64,
    max_value: u32,
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitSet")
            .field("max_value", &self.max_value)
            .field("len", &self.len)
            .finish()
    }
}

fn num_buckets(max_val: u32) -> u32 {
    max_val.div_ceil(64u32)
}

impl BitSet {
    /// Create a new `BitSet` that may contain elements
    /// within `[0, max_val)`.
    pub fn with_max_value(max_value: u32) -> BitSet {
        let num_buckets = num_buckets(max_value);
        let tinybitsets = vec![TinySet::empty(); num_buckets as usize].into_boxed_slice();
        BitSet {
            tinysets: tinybitsets,
            len: 0,
            max_value,
        }
    }

    /// Create a new `BitSet` that may contain elements. Initially all values will be set.
    /// within `[0, max_val)`.
    pub fn with_max_value_and_full(max_value: u32) -> BitSet {
        let num_buckets = num_buckets(max_value);
        let mut tinybitsets = vec![TinySet::full(); num_buckets as usize].into_boxed_slice();

        // Fix padding
        let lower = max_value % 64u32;
        if lower != 0 {
            tinybitsets[tinybitsets.len() - 1] = TinySet::range_lower(lower);
        }
        BitSet {
            tinysets: tinybitsets,
            len: max_value as u64,
            max_value,
        }
    }

    /// Removes all elements from the `BitSet`.
    pub fn clear(&mut self) {
        for tinyset in self.tinysets.iter_mut() {
            *tinyset = TinySet::empty();
        }
        self.len = 0;
    }

    /// Returns the number of elements in the `BitSet`.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true iff the `BitSet` holds no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts an element in the `BitSet`
    #[inline]
    pub fn insert(&mut self, el: u32) {
        // we do not check saturated els.
        let higher = el / 64u32;
        let lower = el % 64u32;
        self.len += u64::from(self.tinysets[higher as usize].insert_mut(lower));
    }

    /// Removes an element from the `BitSet`
    #[inline]
    pub fn remove(&mut self, el: u32) {
        // we do not check saturated els.
        let higher = el / 64u32;
        let lower = el % 64u32;
        self.len -= u64::from(self.tinysets[higher as usize].remove_mut(lower));
    }

    /// Returns true iff the elements is in the `BitSet`.
    ///
    /// Elements outside of `[0, max_value)` are never contained.
    #[inline]
    pub fn contains(&self, el: u32) -> bool {
        if el >= self.max_value {
            return false;
        }
        self.tinyset(el / 64u32).contains(el % 64)
    }

    /// Returns the first non-empty `TinySet` associated with a bucket lower
    /// or greater than bucket.
    ///
    /// Reminder: the tiny set with the bucket `bucket`, represents the
    /// elements from `bucket * 64` to `(bucket+1) * 64`.
    pub fn first_non_empty_bucket(&self, bucket: u32) -> Option<u32> {
        self.tinysets
            .get(bucket as usize..)?
            .iter()
            .cloned()
            .position(|tinyset| !tinyset.is_empty())
            .map(|delta_bucket| bucket + delta_bucket as u32)
    }

    /// Returns the smallest element greater or equal to `from`.
    pub fn next_set_bit(&self, from: u32) -> Option<u32> {
        if from >= self.max_value {
            return None;
        }
        let bucket = from / 64u32;
        let in_bucket = self
            .tinyset(bucket)
            .intersect(TinySet::range_greater_or_equal(from));
        if let Some(lower) = in_bucket.lowest() {
            return Some(bucket * 64u32 + lower);
        }
        let non_empty_bucket = self.first_non_empty_bucket(bucket + 1)?;
        self.tinyset(non_empty_bucket)
            .lowest()
            .map(|lower| non_empty_bucket * 64u32 + lower)
    }

    /// Returns the largest element lower or equal to `at`.
    pub fn prev_set_bit(&self, at: u32) -> Option<u32> {
        if self.max_value == 0 {
            return None;
        }
        let at = at.min(self.max_value - 1);
        let bucket = at / 64u32;
        let in_bucket = self
            .tinyset(bucket)
            .intersect(TinySet::range_lower_or_equal(at));
        if let Some(lower) = in_bucket.highest() {
            return Some(bucket * 64u32 + lower);
        }
        (0..bucket).rev().find_map(|bucket| {
            self.tinyset(bucket)
                .highest()
                .map(|lower| bucket * 64u32 + lower)
        })
    }

    /// Iterates over the elements in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.tinysets
            .iter()
            .enumerate()
            .flat_map(|(bucket, tinyset)| {
                let bucket_base = bucket as u32 * 64u32;
                tinyset.into_iter().map(move |lower| bucket_base + lower)
            })
    }

    #[inline]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Returns the tiny bitset representing the
    /// the set restricted to the number range from
    /// `bucket * 64` to `(bucket + 1) * 64`.
    pub fn tinyset(&self, bucket: u32) -> TinySet {
        self.tinysets[bucket as usize]
    }
}

#[cfg(test)]
mod tests {

    use std::collections::{BTreeSet, HashSet};

    use proptest::prelude::*;
    use rand::distributions::Bernoulli;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{BitSet, TinySet};

    #[test]
    fn test_tiny_set_remove() {
        {
            let mut u = TinySet::empty().insert(63u32).insert(5).remove(63u32);
            assert_eq!(u.pop_lowest(), Some(5u32));
            assert!(u.pop_lowest().is_none());
        }
        {
            let mut u = TinySet::empty()
                .insert(63u32)
                .insert(1)
                .insert(5)
                .remove(63u32);
            assert_eq!(u.pop_lowest(), Some(1u32));
            assert_eq!(u.pop_lowest(), Some(5u32));
            assert!(u.pop_lowest().is_none());
        }
        {
            let mut u = TinySet::empty().insert(1).remove(1u32);
            assert!(u.pop_lowest().is_none());
        }
    }

    #[test]
    fn test_tiny_set() {
        assert!(TinySet::empty().is_empty());
        {
            let mut u = TinySet::empty().insert(1u32).insert(1u32);
            assert_eq!(u.pop_lowest(), Some(1u32));
            assert!(u.pop_lowest().is_none())
        }
        {
            let mut u = TinySet::empty().insert(2u32);
            assert_eq!(u.pop_lowest(), Some(2u32));
            u.insert_mut(1u32);
            assert_eq!(u.pop_lowest(), Some(1u32));
            assert!(u.pop_lowest().is_none());
        }
        {
            let mut u = TinySet::empty().insert(63u32).insert(5);
            assert_eq!(u.pop_lowest(), Some(5u32));
            assert_eq!(u.pop_lowest(), Some(63u32));
            assert!(u.pop_lowest().is_none());
        }
    }

    #[test]
    fn test_tiny_set_lowest_highest() {
        assert_eq!(TinySet::empty().lowest(), None);
        assert_eq!(TinySet::empty().highest(), None);
        let tinyset = TinySet::empty().insert(3).insert(17).insert(63);
        assert_eq!(tinyset.lowest(), Some(3));
        assert_eq!(tinyset.highest(), Some(63));
        assert_eq!(TinySet::singleton(0).highest(), Some(0));
    }

    #[test]
    fn test_bitset() {
        let test_against_hashset = |els: &[u32], max_value: u32| {
            let mut hashset: HashSet<u32> = HashSet::new();
            let mut bitset = BitSet::with_max_value(max_value);
            for &el in els {
                assert!(el < max_value);
                hashset.insert(el);
                bitset.insert(el);
            }
            for el in 0..max_value {
                assert_eq!(hashset.contains(&el), bitset.contains(el));
            }
            assert_eq!(bitset.max_value(), max_value);
            assert_eq!(bitset.len(), hashset.len());
        };

        test_against_hashset(&[], 0);
        test_against_hashset(&[], 1);
        test_against_hashset(&[0u32], 1);
        test_against_hashset(&[0u32], 100);
        test_against_hashset(&[1u32, 2u32], 4);
        test_against_hashset(&[99u32], 100);
        test_against_hashset(&[63u32], 64);
        test_against_hashset(&[62u32, 63u32], 64);
    }

    #[test]
    fn test_bitset_num_buckets() {
        use super::num_buckets;
        assert_eq!(num_buckets(0u32), 0);
        assert_eq!(num_buckets(1u32), 1);
        assert_eq!(num_buckets(64u32), 1);
        assert_eq!(num_buckets(65u32), 2);
        assert_eq!(num_buckets(128u32), 2);
        assert_eq!(num_buckets(129u32), 3);
    }

    #[test]
    fn test_tinyset_range() {
        assert_eq!(
            TinySet::range_lower(3).into_iter().collect::<Vec<u32>>(),
            [0, 1, 2]
        );
        assert!(TinySet::range_lower(0).is_empty());
        assert_eq!(
            TinySet::range_lower(63).into_iter().collect::<Vec<u32>>(),
            (0u32..63u32).collect::<Vec<_>>()
        );
        assert_eq!(
            TinySet::range_greater_or_equal(3)
                .into_iter()
                .collect::<Vec<u32>>(),
            (3u32..64u32).collect::<Vec<_>>()
        );
        assert_eq!(
            TinySet::range_lower_or_equal(0)
                .into_iter()
                .collect::<Vec<u32>>(),
            [0]
        );
        assert_eq!(TinySet::range_lower_or_equal(63), TinySet::full());
    }

    #[test]
    fn test_bitset_len() {
        let mut bitset = BitSet::with_max_value(1_000);
        assert_eq!(bitset.len(), 0);
        bitset.insert(3u32);
        assert_eq!(bitset.len(), 1);
        bitset.insert(103u32);
        assert_eq!(bitset.len(), 2);
        bitset.insert(3u32);
        assert_eq!(bitset.len(), 2);
        bitset.remove(105u32);
        assert_eq!(bitset.len(), 2);
        bitset.remove(3u32);
        assert_eq!(bitset.len(), 1);
        bitset.remove(103u32);
        assert!(bitset.is_empty());
    }

    #[test]
    fn test_bitset_full_padding() {
        let bitset = BitSet::with_max_value_and_full(70);
        assert_eq!(bitset.len(), 70);
        assert!(bitset.contains(69));
        assert!(!bitset.contains(70));
        assert_eq!(bitset.next_set_bit(69), Some(69));
        assert_eq!(bitset.next_set_bit(70), None);
        assert_eq!(bitset.prev_set_bit(1_000), Some(69));
    }

    #[test]
    fn test_next_prev_set_bit() {
        let mut bitset = BitSet::with_max_value(300);
        for el in [0u32, 5, 63, 64, 200, 299] {
            bitset.insert(el);
        }
        assert_eq!(bitset.next_set_bit(0), Some(0));
        assert_eq!(bitset.next_set_bit(1), Some(5));
        assert_eq!(bitset.next_set_bit(6), Some(63));
        assert_eq!(bitset.next_set_bit(64), Some(64));
        assert_eq!(bitset.next_set_bit(65), Some(200));
        assert_eq!(bitset.next_set_bit(201), Some(299));
        assert_eq!(bitset.next_set_bit(300), None);

        assert_eq!(bitset.prev_set_bit(0), Some(0));
        assert_eq!(bitset.prev_set_bit(4), Some(0));
        assert_eq!(bitset.prev_set_bit(63), Some(63));
        assert_eq!(bitset.prev_set_bit(199), Some(64));
        assert_eq!(bitset.prev_set_bit(298), Some(200));
        assert_eq!(bitset.prev_set_bit(u32::MAX), Some(299));
    }

    #[test]
    fn test_next_prev_set_bit_empty() {
        let bitset = BitSet::with_max_value(0);
        assert_eq!(bitset.next_set_bit(0), None);
        assert_eq!(bitset.prev_set_bit(0), None);
        let bitset = BitSet::with_max_value(130);
        assert_eq!(bitset.next_set_bit(0), None);
        assert_eq!(bitset.prev_set_bit(129), None);
        let mut bitset = BitSet::with_max_value(130);
        bitset.insert(100);
        assert_eq!(bitset.prev_set_bit(99), None);
        assert_eq!(bitset.next_set_bit(101), None);
    }

    pub fn sample_with_seed(n: u32, ratio: f64, seed_val: u8) -> Vec<u32> {
        StdRng::from_seed([seed_val; 32])
            .sample_iter(&Bernoulli::new(ratio).unwrap())
            .take(n as usize)
            .enumerate()
            .filter_map(|(val, keep)| if keep { Some(val as u32) } else { None })
            .collect()
    }

    pub fn sample(n: u32, ratio: f64) -> Vec<u32> {
        sample_with_seed(n, ratio, 4)
    }

    #[test]
    fn test_bitset_clear() {
        let mut bitset = BitSet::with_max_value(1_000);
        let els = sample(1_000, 0.01f64);
        for &el in &els {
            bitset.insert(el);
        }
        assert!(els.iter().all(|el| bitset.contains(*el)));
        assert_eq!(bitset.iter().collect::<Vec<u32>>(), els);
        bitset.clear();
        assert!(bitset.is_empty());
        for el in 0u32..1000u32 {
            assert!(!bitset.contains(el));
        }
    }

    proptest! {
        #[test]
        fn test_next_prev_set_bit_against_btreeset(
            els in prop::collection::btree_set(0u32..500, 0..40),
            probes in prop::collection::vec(0u32..520, 1..20),
        ) {
            let mut bitset = BitSet::with_max_value(500);
            for &el in &els {
                bitset.insert(el);
            }
            let expected: BTreeSet<u32> = els;
            for probe in probes {
                prop_assert_eq!(bitset.next_set_bit(probe), expected.range(probe..).next().copied());
                prop_assert_eq!(bitset.prev_set_bit(probe), expected.range(..=probe).next_back().copied());
            }
        }
    }
}
