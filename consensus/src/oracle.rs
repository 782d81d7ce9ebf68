//! External DAG queries the election depends on.
//!
//! The election never walks the DAG itself. It consumes two injected
//! capabilities: the "strongly sees" relation and root enumeration. Both
//! must be pure functions of the caller's current DAG snapshot; the
//! election assumes repeated queries return the same answers.

use lattice_types::{EventHash, FrameIndex, PeerId};
use serde::{Deserialize, Serialize};

/// A (frame, member) coordinate.
///
/// Normally exactly one root occupies a slot. Under a fork, several roots by
/// the same member may share it; the strongly-sees relation guarantees any
/// single observer strongly sees at most one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RootSlot {
    pub frame: FrameIndex,
    pub address: PeerId,
}

impl RootSlot {
    pub fn new(frame: FrameIndex, address: PeerId) -> Self {
        Self { frame, address }
    }
}

/// The "strongly sees" oracle.
///
/// Implementations may cache internally, but the query must behave as a pure
/// function: same source and slot, same answer, for the lifetime of one
/// election.
pub trait StronglySeen {
    /// The unique root at `slot` that `source` strongly sees, if any.
    fn strongly_seen(&self, source: EventHash, slot: RootSlot) -> Option<EventHash>;
}

impl<F> StronglySeen for F
where
    F: Fn(EventHash, RootSlot) -> Option<EventHash>,
{
    fn strongly_seen(&self, source: EventHash, slot: RootSlot) -> Option<EventHash> {
        self(source, slot)
    }
}

/// Root enumeration for replay.
pub trait RootProvider {
    /// All roots occupying `slot`: empty, one, or several under a fork.
    fn roots_at(&self, slot: RootSlot) -> Vec<EventHash>;
}

impl<F> RootProvider for F
where
    F: Fn(RootSlot) -> Vec<EventHash>,
{
    fn roots_at(&self, slot: RootSlot) -> Vec<EventHash> {
        self(slot)
    }
}
