use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static SEGMENT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifier of a segment, unique within the process.
///
/// Caches keyed by segment (for instance the parent bitsets of a
/// [`CachingParentsFilter`](crate::query::CachingParentsFilter)) rely on it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(u64);

impl SegmentId {
    #[doc(hidden)]
    pub fn generate() -> SegmentId {
        SegmentId(SEGMENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns a short string identifying the segment, for display messages.
    pub fn short_id_string(&self) -> String {
        format!("{:08x}", self.0)
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seg({:?})", self.short_id_string())
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_id_string())
    }
}

#[cfg(test)]
mod tests {
    use super::SegmentId;

    #[test]
    fn test_segment_id_unique() {
        let left = SegmentId::generate();
        let right = SegmentId::generate();
        assert_ne!(left, right);
        assert_eq!(left.short_id_string().len(), 8);
    }
}
