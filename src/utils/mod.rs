//! Utility modules for common functionality

pub mod logger;
pub mod format_utils;
mod progress;

pub use progress::ProgressTracker;
