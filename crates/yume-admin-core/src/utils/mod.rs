//! Utility functions for display formatting.

pub mod format;

pub use format::{format_currency, format_order_time, truncate_string};
