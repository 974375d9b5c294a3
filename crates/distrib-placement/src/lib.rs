//! distrib placement — greedy largest-first distribution of files to nodes.
//!
//! Takes the items and nodes produced by `distrib-core` and computes an
//! immutable [`Allocation`]. No I/O happens here; rendering the result is
//! `distrib-report`'s job.
//!
//! # Components
//!
//! - **`placer`** — The allocation loop
//! - **`plan`** — Result types (assignments, per-node usage)

pub mod placer;
pub mod plan;

pub use placer::allocate;
pub use plan::{Allocation, Assignment, NodeUsage};
