use std::sync::Arc;

use common::BitSet;

use super::ParentMembership;
use crate::docset::{DocSet, TERMINATED};
use crate::query::{Explanation, Scorer, Visibility};
use crate::{DocId, Score};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GroupState {
    Positioned {
        parent: DocId,
        representative: DocId,
    },
    Exhausted,
}

/// Scorer joining child matches onto their parents.
///
/// Documents are indexed in blocks: the children first, then their parent.
/// Each child therefore belongs to the first parent that follows it, and a
/// group is the set of child matches between two consecutive parents, the
/// closing parent included.
///
/// The scorer emits one document per group having at least one visible child
/// match: the child with the highest score, the lowest one on ties. The score
/// of the group is that maximum, its frequency is the sum of the frequencies
/// of its visible children. A group whose parent is not visible is skipped
/// altogether.
///
/// `seek(target)` works in parent space: it positions the scorer on the
/// first group whose parent is `>= target`. The returned representative may
/// therefore be lower than `target`.
pub struct BlockJoinScorer<TScorer, TParents = Arc<BitSet>> {
    child_scorer: TScorer,
    parents: TParents,
    visibility: Visibility,
    state: GroupState,
    max_score: Score,
    total_freq: u32,
    num_orphan_children: u64,
}

impl<TScorer: Scorer, TParents: ParentMembership> BlockJoinScorer<TScorer, TParents> {
    /// Creates a scorer positioned on the first group.
    pub fn new(
        child_scorer: TScorer,
        parents: TParents,
        visibility: Visibility,
    ) -> BlockJoinScorer<TScorer, TParents> {
        let mut block_join_scorer = BlockJoinScorer {
            child_scorer,
            parents,
            visibility,
            state: GroupState::Exhausted,
            max_score: 0.0,
            total_freq: 0,
            num_orphan_children: 0,
        };
        block_join_scorer.advance();
        block_join_scorer
    }

    /// Parent of the current group, or `TERMINATED`.
    pub fn parent_doc(&self) -> DocId {
        match self.state {
            GroupState::Positioned { parent, .. } => parent,
            GroupState::Exhausted => TERMINATED,
        }
    }

    /// Number of child matches skipped because no parent follows them.
    pub fn num_orphan_children(&self) -> u64 {
        self.num_orphan_children
    }

    /// Explains the score of the current group.
    pub fn explain(&self) -> Explanation {
        let GroupState::Positioned { parent, representative } = self.state else {
            return Explanation::not_a_match();
        };
        let start = parent
            .checked_sub(1)
            .and_then(|before| self.parents.prev_parent(before))
            .map_or(0, |prev_parent| prev_parent + 1);
        let mut explanation = Explanation::new(
            format!("Score based on child doc range from {start} to {parent}"),
            self.max_score,
        );
        explanation.add_const(format!("max score, reached by doc {representative}"), self.max_score);
        explanation.add_const("sum of the child frequencies", self.total_freq as Score);
        explanation
    }

    fn skip_orphan(&mut self, child_doc: DocId) {
        self.num_orphan_children += 1;
        if self.num_orphan_children == 1 {
            warn!(
                "Child doc {child_doc} is not followed by any parent. The index is probably \
                 inconsistent, skipping it."
            );
        } else {
            debug!("Skipping orphan child doc {child_doc}");
        }
        self.child_scorer.advance();
    }

    /// Aggregates the visible children up to `parent` included.
    ///
    /// Returns the representative, if any child was visible.
    fn collect_group(&mut self, parent: DocId) -> Option<DocId> {
        let mut representative = None;
        self.max_score = Score::NEG_INFINITY;
        self.total_freq = 0;
        let mut doc = self.child_scorer.doc();
        while doc <= parent {
            if self.visibility.is_visible(doc) {
                let score = self.child_scorer.score();
                if representative.is_none() || score > self.max_score {
                    self.max_score = score;
                    representative = Some(doc);
                }
                self.total_freq += self.child_scorer.freq();
            }
            doc = self.child_scorer.advance();
        }
        representative
    }
}

impl<TScorer: Scorer, TParents: ParentMembership> DocSet for BlockJoinScorer<TScorer, TParents> {
    fn advance(&mut self) -> DocId {
        loop {
            let child_doc = self.child_scorer.doc();
            if child_doc == TERMINATED {
                self.state = GroupState::Exhausted;
                return TERMINATED;
            }
            let Some(parent) = self.parents.next_parent(child_doc) else {
                self.skip_orphan(child_doc);
                continue;
            };
            if !self.visibility.is_visible(parent) {
                self.child_scorer.seek(parent + 1);
                continue;
            }
            if let Some(representative) = self.collect_group(parent) {
                self.state = GroupState::Positioned {
                    parent,
                    representative,
                };
                return representative;
            }
        }
    }

    fn seek(&mut self, target: DocId) -> DocId {
        if target == TERMINATED {
            self.child_scorer.seek(TERMINATED);
            self.state = GroupState::Exhausted;
            return TERMINATED;
        }
        match self.state {
            GroupState::Exhausted => return TERMINATED,
            GroupState::Positioned {
                parent,
                representative,
            } if target <= parent => return representative,
            GroupState::Positioned { .. } => {}
        }
        let prev_parent_opt = target
            .checked_sub(1)
            .and_then(|before| self.parents.prev_parent(before));
        if let Some(prev_parent) = prev_parent_opt {
            // Landing right after the previous parent keeps a parent that
            // matched as its own child out of the next group.
            if prev_parent >= self.child_scorer.doc() {
                self.child_scorer.seek(prev_parent + 1);
            }
        }
        self.advance()
    }

    fn doc(&self) -> DocId {
        match self.state {
            GroupState::Positioned { representative, .. } => representative,
            GroupState::Exhausted => TERMINATED,
        }
    }

    fn size_hint(&self) -> u32 {
        self.child_scorer.size_hint()
    }

    fn cost(&self) -> u64 {
        self.child_scorer.cost()
    }
}

impl<TScorer: Scorer, TParents: ParentMembership> Scorer for BlockJoinScorer<TScorer, TParents> {
    fn score(&mut self) -> Score {
        self.max_score
    }

    fn freq(&self) -> u32 {
        self.total_freq
    }
}
