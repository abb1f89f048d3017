//! Utility functions for formatting board content for display.

pub mod format;

pub use format::{format_date, preview, truncate_string};
