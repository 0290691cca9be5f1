//! Report rendering: the plain text report and a JSON projection of the same tree.

pub mod json;
pub mod text;

pub use json::render_json_report;
pub use text::{PrintFormat, Printer, SimplePrintFormat, render_text_report};
