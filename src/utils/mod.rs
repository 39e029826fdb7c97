//! Utility modules for common functionality

mod string;

pub use string::{split_message, truncate_str};
