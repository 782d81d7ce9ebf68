//! Final witness selection — picks the canonical checkpoint event for a
//! decided frame.
//!
//! The chosen root serves as a checkpoint within the DAG: it is final and
//! consistent unless more than 1/3 of stake is Byzantine. Other members reach
//! the same witness no later than the current highest frame + 2.

use lattice_types::{EventHash, FrameIndex, Stake};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The single output of a completed election. Immutable once produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionOutcome {
    pub decided_frame: FrameIndex,
    pub decided_witness: EventHash,
}

/// A decided-"yes" root together with the stake of the member whose slot it
/// occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WitnessCandidate {
    pub root: EventHash,
    pub stake: Stake,
}

impl WitnessCandidate {
    /// Selection priority: stake descending, then event id ascending.
    /// `EventHash` orders as an unsigned big-endian integer, so this total
    /// order is identical on every node. Reordering it would break global
    /// agreement on the witness.
    fn priority(&self, other: &Self) -> Ordering {
        other
            .stake
            .cmp(&self.stake)
            .then_with(|| self.root.cmp(&other.root))
    }
}

/// Select the canonical witness among the decided-"yes" roots of `frame`.
///
/// Returns `None` on an empty candidate set; the election reports that as a
/// protocol fault.
pub fn select_witness(
    frame: FrameIndex,
    mut candidates: Vec<WitnessCandidate>,
) -> Option<ElectionOutcome> {
    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by(WitnessCandidate::priority);
    Some(ElectionOutcome {
        decided_frame: frame,
        decided_witness: candidates[0].root,
    })
}
