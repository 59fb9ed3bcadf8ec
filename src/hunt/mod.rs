//! The hunt loop - finds incomplete library items and asks Lidarr to search.
//!
//! # Architecture
//!
//! - **Candidates** (`candidates.rs`) - fetch + filter one mode's entity list
//!   into an ordered candidate list
//! - **Selector** (`selector.rs`) - non-repeating pick over that list, random
//!   or sequential, keyed by stable entity id
//! - **Cycle** (`cycle.rs`) - per-item refresh-then-search sequence and the
//!   per-cycle budget
//! - **Upgrade** (`upgrade.rs`) - optional pass over cutoff-unmet albums
//!
//! Everything here runs against the [`crate::lidarr::LidarrApi`] trait so a
//! whole cycle can be exercised in tests with a scripted server double.

pub mod candidates;
pub mod cycle;
pub mod selector;
pub mod upgrade;

pub use candidates::{Candidate, Target};
pub use cycle::{CycleReport, run_missing_cycle};
pub use selector::Selection;
pub use upgrade::run_upgrade_cycle;
