//! Spec layer: per-execution spec snapshots and the paths that identify them.
//!
//! This module is intentionally separate from aggregation and rendering.
//! It owns:
//! - SpecPath (sibling indices from the root)
//! - SpecRun (one spec as seen by one execution)

pub mod path;
pub mod run;

pub use path::SpecPath;
pub use run::SpecRun;
