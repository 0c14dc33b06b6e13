//! Trap assignment: turning a fresh deck into an armed one.
//!
//! - `assign_random`: uniform placement, clamped so one card stays safe
//! - `ManualPlacement`: players arm cards one pick at a time, blind

pub mod manual;
pub mod random;

pub use manual::ManualPlacement;
pub use random::{assign_random, clamp_trap_count};
