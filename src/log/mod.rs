//! Run log parsing: a line-oriented record of the specs each execution visited.

pub mod parse;

pub use parse::{parse_log_file, parse_log_str};
