//! Shared utilities.

mod format_utils;

pub use format_utils::format_dollar_value;
