//! Member identity and the ordered stake registry.

use lattice_types::{PeerId, Stake};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A consensus member.
///
/// Voting weight is proportional to stake; one member may still author at
/// most one root per frame (more than one is a fork).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub address: PeerId,
    pub stake: Stake,
}

impl Member {
    pub fn new(address: PeerId, stake: Stake) -> Self {
        Self { address, stake }
    }
}

/// An ordered, duplicate-free registry of members with cached total stake.
///
/// Iteration order is insertion order and is part of the consensus contract:
/// replay iterates members in this order, so it must be identical on every
/// node. The registry is rebuilt by the caller from its own member records,
/// so it carries no serialized form of its own.
#[derive(Clone, Debug, Default)]
pub struct MemberSet {
    members: Vec<Member>,
    stakes: HashMap<PeerId, Stake>,
    total_stake: Stake,
}

impl MemberSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member. Returns false (and changes nothing) if the address is
    /// already registered.
    pub fn insert(&mut self, member: Member) -> bool {
        if self.stakes.contains_key(&member.address) {
            return false;
        }
        self.stakes.insert(member.address, member.stake);
        self.total_stake = self.total_stake.saturating_add(member.stake);
        self.members.push(member);
        true
    }

    pub fn contains(&self, address: &PeerId) -> bool {
        self.stakes.contains_key(address)
    }

    pub fn stake_of(&self, address: &PeerId) -> Option<Stake> {
        self.stakes.get(address).copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Sum of all member stakes.
    pub fn total_stake(&self) -> Stake {
        self.total_stake
    }

    /// The conventional quorum: ⌊2/3 · total⌋ + 1.
    ///
    /// Elections take the quorum as a constructor argument; this is the value
    /// callers are expected to pass unless the protocol parameters say
    /// otherwise.
    pub fn super_majority(&self) -> Stake {
        let two_thirds = (2 * u128::from(self.total_stake.raw())) / 3;
        Stake::new(two_thirds as u64 + 1)
    }
}

impl FromIterator<Member> for MemberSet {
    /// Collect members in iteration order; duplicate addresses are dropped.
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        let mut set = Self::new();
        for member in iter {
            set.insert(member);
        }
        set
    }
}
