//! Fundamental types for the Lattice election core.
//!
//! This crate defines the core types shared across the workspace: event
//! identifiers, member addresses, stake amounts, and frame numbers.

pub mod event;
pub mod frame;
pub mod peer;
pub mod stake;

pub use event::EventHash;
pub use frame::FrameIndex;
pub use peer::PeerId;
pub use stake::Stake;
