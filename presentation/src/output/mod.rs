//! Output formatters

pub mod console;
pub mod formatter;
pub mod json;
