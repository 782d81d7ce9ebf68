//! Election state machine — decides one canonical root per member slot for a
//! target frame, by virtual voting over the frames above it.
//!
//! Roots at `target_frame + 1` vote by direct observation: they vote "yes"
//! for a member iff they strongly see that member's root in the target frame.
//! Roots at higher frames aggregate the votes of the prior-frame roots they
//! strongly see, weighted by the voters' stake. A side that gathers a
//! supermajority of stake becomes final for that member. Once every member
//! slot is final, one witness event is selected for the frame.
//!
//! Elections that never gather a supermajority for some member simply never
//! produce an outcome. The classic remedy, a pseudorandom coin round every
//! N rounds, is not implemented; liveness under adversarial stake is the
//! surrounding system's problem.

use crate::error::ElectionError;
use crate::member::MemberSet;
use crate::oracle::{RootProvider, RootSlot, StronglySeen};
use crate::vote::{VoteId, VoteValue};
use crate::witness::{select_witness, ElectionOutcome, WitnessCandidate};
use lattice_types::{EventHash, FrameIndex, PeerId, Stake};
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// A strongly-seen prior-frame root, tagged with the stake of the member
/// whose slot it occupies.
#[derive(Clone, Copy, Debug)]
struct WeightedRoot {
    root: EventHash,
    stake: Stake,
}

/// A single election, fixed to one target frame.
///
/// Owns its vote ledger and decided-set exclusively; both are rebuilt from
/// empty on [`Election::reset`]. The engine is a pure single-threaded state
/// machine: all inputs arrive synchronously through [`Election::process_root`]
/// and the injected oracle.
pub struct Election<O> {
    target_frame: FrameIndex,

    members: MemberSet,
    /// The quorum, conventionally ⌊2/3 · total stake⌋ + 1.
    super_majority: Stake,

    /// Final verdicts per member for `target_frame`.
    decided: HashMap<PeerId, VoteValue>,
    /// Every vote cast so far, final or provisional. Append-only between
    /// resets.
    votes: HashMap<VoteId, VoteValue>,

    oracle: O,
}

impl<O: StronglySeen> Election<O> {
    pub fn new(
        members: MemberSet,
        super_majority: Stake,
        target_frame: FrameIndex,
        oracle: O,
    ) -> Self {
        Self {
            target_frame,
            members,
            super_majority,
            decided: HashMap::new(),
            votes: HashMap::new(),
            oracle,
        }
    }

    /// Erase all election state and prepare for a new target frame.
    pub fn reset(&mut self, target_frame: FrameIndex) {
        self.target_frame = target_frame;
        self.votes = HashMap::new();
        self.decided = HashMap::new();
    }

    pub fn target_frame(&self) -> FrameIndex {
        self.target_frame
    }

    /// The final verdict for a member, if one has been reached.
    pub fn decided_vote(&self, member: &PeerId) -> Option<VoteValue> {
        self.decided.get(member).copied()
    }

    pub fn is_decided(&self, member: &PeerId) -> bool {
        self.decided.contains_key(member)
    }

    /// The recorded vote of `from_root` about `for_member`, if any.
    pub fn vote(&self, from_root: EventHash, for_member: PeerId) -> Option<VoteValue> {
        self.votes.get(&VoteId::new(from_root, for_member)).copied()
    }

    /// Members with no final verdict yet, in registry order.
    ///
    /// Errors fatally if the decided-set and the registry disagree on the
    /// member count: that means a caller bug (duplicate or missing member)
    /// and the election can no longer be trusted.
    pub fn undecided_members(&self) -> Result<Vec<PeerId>, ElectionError> {
        let undecided: Vec<PeerId> = self
            .members
            .iter()
            .map(|m| m.address)
            .filter(|addr| !self.decided.contains_key(addr))
            .collect();

        if undecided.len() + self.decided.len() != self.members.len() {
            error!(
                undecided = undecided.len(),
                decided = self.decided.len(),
                members = self.members.len(),
                "mismatch of decided roots"
            );
            return Err(ElectionError::InvariantViolation(format!(
                "decided ({}) + undecided ({}) != members ({})",
                self.decided.len(),
                undecided.len(),
                self.members.len()
            )));
        }
        Ok(undecided)
    }

    /// Process one root's votes for the target frame.
    ///
    /// `slot` is the (frame, author) coordinate of `root` and must lie above
    /// the target frame. The root casts one vote per still-undecided member:
    /// by direct observation in round 1 (`slot.frame == target_frame + 1`),
    /// by stake-weighted aggregation of strongly-seen prior-frame votes in
    /// later rounds. Members already decided are left untouched.
    ///
    /// Returns `Ok(Some(outcome))` once every member slot is decided,
    /// `Ok(None)` while the election still needs more roots. Reprocessing the
    /// same `(root, slot)` pair is a no-op.
    pub fn process_root(
        &mut self,
        root: EventHash,
        slot: RootSlot,
    ) -> Result<Option<ElectionOutcome>, ElectionError> {
        if !self.members.contains(&slot.address) {
            return Err(ElectionError::UnknownMember(slot.address));
        }
        if slot.frame <= self.target_frame {
            return Err(ElectionError::FrameNotAfterTarget {
                frame: slot.frame,
                target: self.target_frame,
            });
        }

        let undecided = self.undecided_members()?;
        if undecided.is_empty() {
            // Already complete; re-selection is deterministic.
            return self.choose_sf_witness().map(Some);
        }

        let first_round = slot.frame == self.target_frame.next();
        for subject in undecided {
            let vote = if first_round {
                let seen = self
                    .oracle
                    .strongly_seen(root, RootSlot::new(self.target_frame, subject));
                VoteValue::observed(seen)
            } else {
                self.aggregate_vote(root, slot.frame, subject)?
            };

            self.votes.insert(VoteId::new(root, subject), vote);
            if vote.decided {
                debug!(
                    member = %subject,
                    yes = vote.yes,
                    frame = %self.target_frame,
                    "member slot decided"
                );
                self.decided.insert(subject, vote);
            }
        }

        if self.undecided_members()?.is_empty() {
            return self.choose_sf_witness().map(Some);
        }
        Ok(None)
    }

    /// Full re-processing of the current voting: frames from just above the
    /// target up to `max_known_frame`, members in registry order, every root
    /// occupying each slot. Call after node startup and after each decided
    /// frame.
    ///
    /// Ascending frame order is mandatory: aggregation reads the prior
    /// frame's votes and errors fatally if they are missing.
    pub fn process_known_roots<P: RootProvider>(
        &mut self,
        max_known_frame: FrameIndex,
        roots: &P,
    ) -> Result<Option<ElectionOutcome>, ElectionError> {
        let addresses: Vec<PeerId> = self.members.iter().map(|m| m.address).collect();

        let mut frame = self.target_frame.next();
        while frame <= max_known_frame {
            for &address in &addresses {
                let slot = RootSlot::new(frame, address);
                // More than one root at a slot means all of them are forks;
                // each is voted on independently.
                for root in roots.roots_at(slot) {
                    if let Some(outcome) = self.process_root(root, slot)? {
                        return Ok(Some(outcome));
                    }
                }
            }
            frame = frame.next();
        }
        Ok(None)
    }

    /// Aggregate the prior-frame votes about `subject` that `root` strongly
    /// sees, and derive this root's vote.
    fn aggregate_vote(
        &self,
        root: EventHash,
        frame: FrameIndex,
        subject: PeerId,
    ) -> Result<VoteValue, ElectionError> {
        let prior = self.strongly_seen_roots(root, frame.prev());

        let mut yes_stake = Stake::ZERO;
        let mut no_stake = Stake::ZERO;
        // Supporting stake per endorsed candidate event.
        let mut candidates: HashMap<EventHash, Stake> = HashMap::new();

        for voter in &prior {
            let prior_vote = self
                .votes
                .get(&VoteId::new(voter.root, subject))
                .ok_or_else(|| {
                    ElectionError::InvariantViolation(format!(
                        "root {} at frame {} has no vote about member {}; \
                         frames must be processed in ascending order",
                        voter.root,
                        frame.prev(),
                        subject
                    ))
                })?;

            if prior_vote.yes {
                yes_stake = yes_stake.saturating_add(voter.stake);
                if let Some(endorsed) = prior_vote.seen_root {
                    let support = candidates.entry(endorsed).or_insert(Stake::ZERO);
                    *support = support.saturating_add(voter.stake);
                }
            } else {
                no_stake = no_stake.saturating_add(voter.stake);
            }
        }

        // The candidate with the greatest supporting stake; equal support
        // breaks ties by ascending event id, so the carried endorsement is
        // the same on every node.
        let best_candidate = candidates
            .into_iter()
            .min_by(|(root_a, stake_a), (root_b, stake_b)| {
                stake_b.cmp(stake_a).then_with(|| root_a.cmp(root_b))
            })
            .map(|(endorsed, _)| endorsed);

        if yes_stake >= self.super_majority {
            let endorsed = best_candidate.ok_or_else(|| {
                ElectionError::InvariantViolation(format!(
                    "supermajority of 'yes' votes about member {} with no endorsed root",
                    subject
                ))
            })?;
            Ok(VoteValue::decided_yes(endorsed))
        } else if no_stake >= self.super_majority {
            Ok(VoteValue::decided_no())
        } else {
            // No quorum yet: carry the simple majority forward, ties to "no",
            // keeping the best-supported endorsement for later rounds.
            Ok(VoteValue {
                decided: false,
                yes: yes_stake > no_stake,
                seen_root: best_candidate,
            })
        }
    }

    /// All prior-frame roots strongly seen by `root` at `frame`, one per
    /// member at most, each tagged with that member's stake. Pure with
    /// respect to election state; this is the only place aggregation
    /// consults the oracle.
    fn strongly_seen_roots(&self, root: EventHash, frame: FrameIndex) -> Vec<WeightedRoot> {
        let mut seen = Vec::with_capacity(self.members.len());
        for member in self.members.iter() {
            let slot = RootSlot::new(frame, member.address);
            if let Some(seen_root) = self.oracle.strongly_seen(root, slot) {
                seen.push(WeightedRoot {
                    root: seen_root,
                    stake: member.stake,
                });
            }
        }
        seen
    }

    /// Choose the decided-"yes" root with the greatest stake as the final
    /// witness for the target frame.
    fn choose_sf_witness(&self) -> Result<ElectionOutcome, ElectionError> {
        let mut candidates = Vec::with_capacity(self.members.len());
        for member in self.members.iter() {
            let vote = self.decided.get(&member.address).ok_or_else(|| {
                ElectionError::InvariantViolation(format!(
                    "witness selection before member {} is decided",
                    member.address
                ))
            })?;
            if vote.yes {
                let endorsed = vote.seen_root.ok_or_else(|| {
                    ElectionError::InvariantViolation(format!(
                        "decided 'yes' verdict for member {} endorses no root",
                        member.address
                    ))
                })?;
                candidates.push(WitnessCandidate {
                    root: endorsed,
                    stake: member.stake,
                });
            }
        }

        match select_witness(self.target_frame, candidates) {
            Some(outcome) => {
                debug!(
                    frame = %outcome.decided_frame,
                    witness = %outcome.decided_witness,
                    "frame decided"
                );
                Ok(outcome)
            }
            None => {
                warn!(frame = %self.target_frame, "no root decided as 'yes'");
                Err(ElectionError::NoDecidedYesRoots)
            }
        }
    }
}
