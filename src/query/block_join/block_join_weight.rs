use std::sync::Arc;

use common::BitSet;

use super::{BlockJoinScorer, ParentDocIdSet, ParentsFilter};
use crate::docset::{DocSet, TERMINATED};
use crate::index::SegmentReader;
use crate::query::{EmptyScorer, Explanation, Scorer, Visibility, Weight};
use crate::{BlockJoinError, DocId, Score};

/// Weight of a [`BlockJoinQuery`](super::BlockJoinQuery).
pub struct BlockJoinWeight {
    child_weight: Box<dyn Weight>,
    parents_filter: Arc<dyn ParentsFilter>,
    boost: Score,
}

impl BlockJoinWeight {
    pub fn new(
        child_weight: Box<dyn Weight>,
        parents_filter: Arc<dyn ParentsFilter>,
        boost: Score,
    ) -> BlockJoinWeight {
        BlockJoinWeight {
            child_weight,
            parents_filter,
            boost,
        }
    }

    /// Returns `None` if the segment cannot match.
    pub fn specialized_scorer(
        &self,
        reader: &SegmentReader,
        visibility: &Visibility,
        boost: Score,
    ) -> crate::Result<Option<BlockJoinScorer<Box<dyn Scorer>, Arc<BitSet>>>> {
        let child_scorer = self.child_weight.scorer(reader, visibility, boost)?;
        if child_scorer.doc() == TERMINATED {
            debug!(
                "no child match in segment {}",
                reader.segment_id().short_id_string()
            );
            return Ok(None);
        }
        let parents = match self.parents_filter.parents(reader)? {
            None => return Ok(None),
            Some(ParentDocIdSet::Dense(parents)) => parents,
            Some(ParentDocIdSet::Sorted(_)) => {
                warn!(
                    "{:?} does not produce a dense bitset of parents",
                    self.parents_filter
                );
                return Err(BlockJoinError::InvalidArgument(format!(
                    "The parents filter must produce a dense bitset, got a sorted doc list from \
                     {:?}. Wrap it in a CachingParentsFilter.",
                    self.parents_filter
                )));
            }
        };
        Ok(Some(BlockJoinScorer::new(
            child_scorer,
            parents,
            visibility.clone(),
        )))
    }
}

impl Weight for BlockJoinWeight {
    fn scorer(
        &self,
        reader: &SegmentReader,
        visibility: &Visibility,
        boost: Score,
    ) -> crate::Result<Box<dyn Scorer>> {
        match self.specialized_scorer(reader, visibility, boost)? {
            Some(block_join_scorer) => Ok(Box::new(block_join_scorer)),
            None => Ok(Box::new(EmptyScorer)),
        }
    }

    fn explain(&self, reader: &SegmentReader, doc: DocId) -> crate::Result<Explanation> {
        let visibility = Visibility::for_segment(reader);
        let Some(mut block_join_scorer) = self.specialized_scorer(reader, &visibility, 1.0)? else {
            return Ok(Explanation::not_a_match());
        };
        if block_join_scorer.seek(doc) != doc {
            return Ok(Explanation::not_a_match());
        }
        Ok(block_join_scorer.explain())
    }

    fn value_for_normalization(&self) -> Score {
        self.child_weight.value_for_normalization() * self.boost * self.boost
    }

    fn normalize(&mut self, query_norm: Score, top_level_boost: Score) {
        self.child_weight
            .normalize(query_norm, top_level_boost * self.boost);
    }
}
