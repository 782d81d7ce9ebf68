//! Frame number type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A frame number within the DAG.
///
/// Frames partition events into consecutive generations; elections decide one
/// target frame at a time by scanning the frames above it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameIndex(u64);

impl FrameIndex {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The frame directly above this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// The frame directly below this one. Saturates at frame 0.
    pub fn prev(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_prev() {
        let f = FrameIndex::new(5);
        assert_eq!(f.next(), FrameIndex::new(6));
        assert_eq!(f.prev(), FrameIndex::new(4));
        assert_eq!(FrameIndex::new(0).prev(), FrameIndex::new(0));
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(FrameIndex::new(1) < FrameIndex::new(2));
        assert!(FrameIndex::new(2) <= FrameIndex::new(2));
    }
}
