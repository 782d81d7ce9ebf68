use lattice_types::{FrameIndex, PeerId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElectionError {
    /// No member slot was decided "yes" when selecting the witness. Reachable
    /// only if more than 1/3 of total stake is Byzantine; the caller decides
    /// whether to halt finality for the frame.
    #[error("no root decided as 'yes', which is possible only if more than 1/3 of stake is Byzantine")]
    NoDecidedYesRoots,

    /// A slot referenced a member that is not in the registry.
    #[error("unknown member {0}")]
    UnknownMember(PeerId),

    /// A root at or below the target frame cannot vote on it.
    #[error("root at frame {frame} cannot vote on target frame {target}")]
    FrameNotAfterTarget { frame: FrameIndex, target: FrameIndex },

    /// Internal bookkeeping is inconsistent. The election state can no longer
    /// be trusted to produce a correct decision; the caller must abort.
    #[error("election invariant violated: {0}")]
    InvariantViolation(String),
}

impl ElectionError {
    /// Whether this error means the election state is corrupt and the caller
    /// must abort rather than continue feeding roots.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}
