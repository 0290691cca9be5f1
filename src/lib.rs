//! Result collection and reporting for nested specs that are executed
//! repeatedly, once per leaf path.
//!
//! - `spec`: what a single execution saw
//! - `results`: the merged, canonical tree
//! - `render`: text and JSON reports
//! - `log`: run log input for the command line tool

pub mod diagnostics;
pub mod log;
pub mod render;
pub mod results;
pub mod spec;

pub type Result<T> = anyhow::Result<T>;
