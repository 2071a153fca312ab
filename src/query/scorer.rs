use std::ops::DerefMut;

use crate::docset::DocSet;
use crate::Score;

/// Scored set of documents matching a query within a specific segment.
///
/// See [`Query`](crate::query::Query).
///
/// Besides the score, a scorer exposes the frequency of the match, the
/// number of occurrences of the query terms in the current document.
/// Block joins aggregate both over the children of a group.
pub trait Scorer: DocSet + 'static {
    /// Returns the score.
    ///
    /// This method will perform a bit of computation and is not cached.
    fn score(&mut self) -> Score;

    /// Returns the frequency of the match on the current document.
    fn freq(&self) -> u32;
}

impl Scorer for Box<dyn Scorer> {
    #[inline]
    fn score(&mut self) -> Score {
        self.deref_mut().score()
    }

    #[inline]
    fn freq(&self) -> u32 {
        self.as_ref().freq()
    }
}
