//! Election core — virtual voting over a gossip-replicated DAG of roots.
//!
//! Given one root per member per frame (several under a fork), the election
//! decides a single canonical root per member slot for a target frame using
//! only local DAG topology, then picks one final witness event for the frame.
//! Every honest node arrives at the same witness as long as Byzantine stake
//! stays below one third of the total.
//!
//! ## Module overview
//!
//! - [`election`] — The election state machine (per-round vote propagation,
//!   decided/pending bookkeeping).
//! - [`member`] — Member identity, stake, and the ordered member registry.
//! - [`vote`] — Vote ledger entries: one root's opinion about one member slot.
//! - [`oracle`] — The injected "strongly sees" oracle and root enumeration.
//! - [`witness`] — Final witness selection for a fully decided frame.
//! - [`error`] — Election error types.

pub mod election;
pub mod error;
pub mod member;
pub mod oracle;
pub mod vote;
pub mod witness;

pub use election::Election;
pub use error::ElectionError;
pub use member::{Member, MemberSet};
pub use oracle::{RootProvider, RootSlot, StronglySeen};
pub use vote::{VoteId, VoteValue};
pub use witness::{select_witness, ElectionOutcome, WitnessCandidate};
