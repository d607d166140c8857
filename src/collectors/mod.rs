//! Collectors for the per-cycle metrics.
//!
//! Each collector independently reads the pseudo-files it needs and owns
//! no state between calls.

pub mod cpu;
pub mod disk;
pub mod memory;
pub mod mounts;
pub mod process;
