//! Output formatters for tool results.

mod json;

pub use json::{shape_work, summarize_work};
