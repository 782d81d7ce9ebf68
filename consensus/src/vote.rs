//! Vote ledger entries — one root's opinion about one member slot.

use lattice_types::{EventHash, PeerId};
use serde::{Deserialize, Serialize};

/// The unit of voting: identifies the opinion of `from_root` about the slot
/// of `for_member` in the target frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteId {
    pub from_root: EventHash,
    pub for_member: PeerId,
}

impl VoteId {
    pub fn new(from_root: EventHash, for_member: PeerId) -> Self {
        Self {
            from_root,
            for_member,
        }
    }
}

/// A recorded vote.
///
/// `seen_root` names the candidate event the vote endorses. It is carried
/// even by provisional (undecided) votes so that later rounds can recover an
/// actual event, not merely a yes/no bit. A "no" vote endorses nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteValue {
    /// Whether this vote is final for its subject member.
    pub decided: bool,
    pub yes: bool,
    pub seen_root: Option<EventHash>,
}

impl VoteValue {
    /// A round-1 vote from direct observation of the target frame.
    pub fn observed(seen_root: Option<EventHash>) -> Self {
        Self {
            decided: false,
            yes: seen_root.is_some(),
            seen_root,
        }
    }

    /// A final "yes" for the endorsed root.
    pub fn decided_yes(seen_root: EventHash) -> Self {
        Self {
            decided: true,
            yes: true,
            seen_root: Some(seen_root),
        }
    }

    /// A final "no": the member has no canonical root in the target frame.
    pub fn decided_no() -> Self {
        Self {
            decided: true,
            yes: false,
            seen_root: None,
        }
    }
}
